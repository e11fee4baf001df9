#![warn(clippy::pedantic)]
#![allow(
    clippy::too_many_lines,
    clippy::similar_names,
    clippy::missing_panics_doc
)]

//! Enumeration of the Pareto-optimal cycle combinations of N mutually
//! commuting elements on a twisty puzzle.
//!
//! Given a [`PuzzleOrbitDefinition`], the finder enumerates how the cubies of
//! each orbit can be split across N elements, searches each split for the
//! partitions maximizing the element orders under orientation and parity
//! rules, and reduces the candidates to the Pareto frontier over
//! `(order product, per-element orders)`. The output feeds the later solver
//! phases directly; no move tables or geometry are involved.
//!
//! ```
//! use cycle_finder::{cycle_combination_stats, optimal_cycle_combinations};
//! use puzzle_orbits::presets;
//!
//! let combinations = optimal_cycle_combinations(&presets::cube(3), 1);
//! let stats = cycle_combination_stats(&combinations);
//! // A single element on the 3x3 tops out at order 1260.
//! assert_eq!(stats.len(), 1);
//! ```

use puzzle_orbits::PuzzleOrbitDefinition;

mod combination;
mod cubie_partition;
mod enumerate;
mod numbers;
mod parity;
mod pareto;
mod search;
mod stats;

pub use combination::{Cycle, CycleCombination, ShareOrder};
pub use cubie_partition::CubiePartition;
pub use enumerate::CycleCombinationFinder;
pub use pareto::pareto_efficient_cycle_combinations;
pub use stats::cycle_combination_stats;

/// Run the full search for `num_cycles` commuting elements on `puzzle`.
///
/// One-shot convenience over [`CycleCombinationFinder`]; the memo caches live
/// and die with the call.
#[must_use]
pub fn optimal_cycle_combinations(
    puzzle: &PuzzleOrbitDefinition,
    num_cycles: usize,
) -> Vec<CycleCombination> {
    CycleCombinationFinder::new(puzzle).find(num_cycles)
}
