//! The outer enumeration: cubie budgets, their splits across cycles, share
//! assignment, and emission of candidate combinations.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

use fxhash::{FxHashMap, FxHashSet};
use itertools::Itertools;
use log::{debug, info};
use num_bigint::BigUint;
use num_traits::One;
use puzzle_orbits::{OrientationStatus, PuzzleOrbitDefinition};

use crate::combination::{Cycle, CycleCombination, ShareOrder};
use crate::cubie_partition::{CubiePartition, reduce_dominated};
use crate::numbers::{partitions_of, unique_permutations};
use crate::parity::ParityHelper;
use crate::pareto::pareto_efficient_cycle_combinations;

/// The top-level search driver.
///
/// Owns every memo cache, so results are computed once per finder value and
/// dropped (or explicitly cleared) with it.
pub struct CycleCombinationFinder<'p> {
    pub(crate) puzzle: &'p PuzzleOrbitDefinition,
    pub(crate) parity: ParityHelper,
    cancel: Option<Arc<AtomicBool>>,
    partitions: FxHashMap<u16, Arc<Vec<Vec<u16>>>>,
    reduced_tables: FxHashMap<(u16, usize, bool), Arc<Vec<Arc<CubiePartition>>>>,
    pub(crate) highest_order_cache: FxHashMap<Vec<u16>, Arc<Vec<Arc<Cycle>>>>,
    pub(crate) combination_cache: FxHashMap<Vec<Vec<u16>>, Arc<Vec<Vec<Arc<Cycle>>>>>,
}

impl<'p> CycleCombinationFinder<'p> {
    #[must_use]
    pub fn new(puzzle: &'p PuzzleOrbitDefinition) -> CycleCombinationFinder<'p> {
        CycleCombinationFinder {
            puzzle,
            parity: ParityHelper::new(puzzle),
            cancel: None,
            partitions: FxHashMap::default(),
            reduced_tables: FxHashMap::default(),
            highest_order_cache: FxHashMap::default(),
            combination_cache: FxHashMap::default(),
        }
    }

    /// Install a flag checked between used-cubie tuples; raising it makes
    /// [`find`](Self::find) stop enumerating and filter what it has.
    pub fn set_cancel_flag(&mut self, cancel: Arc<AtomicBool>) {
        self.cancel = Some(cancel);
    }

    pub fn clear_caches(&mut self) {
        self.partitions.clear();
        self.reduced_tables.clear();
        self.highest_order_cache.clear();
        self.combination_cache.clear();
    }

    fn cancelled(&self) -> bool {
        self.cancel
            .as_ref()
            .is_some_and(|cancel| cancel.load(Ordering::Relaxed))
    }

    pub(crate) fn integer_partitions(&mut self, n: u16) -> Arc<Vec<Vec<u16>>> {
        if let Some(hit) = self.partitions.get(&n) {
            return Arc::clone(hit);
        }
        let partitions = Arc::new(partitions_of(n));
        self.partitions.insert(n, Arc::clone(&partitions));
        partitions
    }

    /// The reduced partition table of one orbit at one cubie budget, with a
    /// fixed 1-cycle prepended when `share` is set.
    pub(crate) fn reduced_partition_table(
        &mut self,
        budget: u16,
        orbit_index: usize,
        share: bool,
    ) -> Arc<Vec<Arc<CubiePartition>>> {
        let key = (budget, orbit_index, share);
        if let Some(hit) = self.reduced_tables.get(&key) {
            return Arc::clone(hit);
        }

        let partitions = self.integer_partitions(budget);
        let orbit = &self.puzzle.orbits[orbit_index];
        let mut table = Vec::with_capacity(partitions.len());
        for partition in partitions.iter() {
            let partition = if share {
                let mut shared = Vec::with_capacity(partition.len() + 1);
                shared.push(1);
                shared.extend_from_slice(partition);
                shared
            } else {
                partition.clone()
            };
            if let Some(obj) = CubiePartition::from_partition(orbit, partition) {
                table.push(Arc::new(obj));
            }
        }

        let reduced = Arc::new(reduce_dominated(
            table,
            self.parity.constraint_orbit_flags[orbit_index],
        ));
        self.reduced_tables.insert(key, Arc::clone(&reduced));
        reduced
    }

    /// Run the full search: enumerate candidates for `num_cycles` commuting
    /// elements and reduce them to the Pareto frontier, sorted by
    /// `(order_product, cycle orders…)` descending.
    pub fn find(&mut self, num_cycles: usize) -> Vec<CycleCombination> {
        let start = Instant::now();
        let candidates = self.all_cycle_combinations(num_cycles);
        debug!(
            "enumerated {} candidate cycle combinations in {:?}",
            candidates.len(),
            start.elapsed()
        );

        let frontier = pareto_efficient_cycle_combinations(candidates);
        info!(
            "kept {} pareto-optimal cycle combinations in {:?}",
            frontier.len(),
            start.elapsed()
        );
        frontier
    }

    fn all_cycle_combinations(&mut self, num_cycles: usize) -> Vec<CycleCombination> {
        let puzzle = self.puzzle;
        let num_orbits = puzzle.orbits.len();
        let mut combinations = Vec::new();

        // A budget of 0 would force the all-zero split, rejected below.
        for used_cubie_counts in puzzle
            .orbits
            .iter()
            .map(|orbit| 1..=orbit.cubie_count)
            .multi_cartesian_product()
        {
            if self.cancelled() {
                break;
            }

            let per_orbit_partitions: Vec<Arc<Vec<Vec<u16>>>> = used_cubie_counts
                .iter()
                .map(|&used| self.integer_partitions(used))
                .collect();

            for partition_choice in per_orbit_partitions
                .iter()
                .map(|partitions| partitions.iter())
                .multi_cartesian_product()
            {
                if partition_choice
                    .iter()
                    .any(|partition| partition.len() > num_cycles)
                {
                    continue;
                }
                let padded_rows: Vec<Vec<u16>> = partition_choice
                    .iter()
                    .map(|partition| {
                        let mut row = (*partition).clone();
                        row.resize(num_cycles, 0);
                        row
                    })
                    .collect();

                let per_orbit_permutations: Vec<Vec<Vec<u16>>> = padded_rows
                    .iter()
                    .map(|row| unique_permutations(row))
                    .collect();

                let mut seen_columns = FxHashSet::default();
                for permuted_rows in per_orbit_permutations
                    .iter()
                    .map(|permutations| permutations.iter())
                    .multi_cartesian_product()
                {
                    let mut columns = Vec::with_capacity(num_cycles);
                    let mut trivial_column = false;
                    for j in 0..num_cycles {
                        let column: Vec<u16> =
                            permuted_rows.iter().map(|row| row[j]).collect();
                        // A column every orbit sits out contributes nothing
                        // to any element.
                        if column.iter().enumerate().all(|(i, &count)| {
                            count == 0
                                || puzzle.orbits[i].orientation_status
                                    == OrientationStatus::CannotOrient
                                    && count == 1
                        }) {
                            trivial_column = true;
                            break;
                        }
                        columns.push(column);
                    }
                    if trivial_column {
                        continue;
                    }

                    columns.sort_by(|a, b| b.cmp(a));
                    if !seen_columns.insert(columns.clone()) {
                        continue;
                    }

                    self.emit_for_columns(&used_cubie_counts, &columns, &mut combinations);
                }
            }
        }

        combinations
    }

    fn emit_for_columns(
        &mut self,
        used_cubie_counts: &[u16],
        columns: &[Vec<u16>],
        out: &mut Vec<CycleCombination>,
    ) {
        let num_orbits = self.puzzle.orbits.len();
        let combos = self.shared_cycle_combinations(columns);

        for combo in combos.iter() {
            // Every sharing cycle needs a donor: a cycle not itself sharing
            // the orbit whose partition carries a 1 there.
            let mut orbits_can_share = vec![false; num_orbits];
            let mut share_orbit_counts = vec![0_usize; num_orbits];
            for cycle in combo {
                for i in 0..num_orbits {
                    orbits_can_share[i] |=
                        !cycle.share[i] && cycle.partitions[i].contains_fixed_point();
                    share_orbit_counts[i] += usize::from(cycle.share[i]);
                }
            }
            if share_orbit_counts
                .iter()
                .zip(&orbits_can_share)
                .any(|(&count, &can_share)| count != 0 && !can_share)
            {
                continue;
            }

            // The per-column searches return cycles in column order; the
            // orders themselves need not be sorted yet.
            let mut descending = combo.clone();
            descending.sort_by(|a, b| Cycle::descending_cmp(a, b));

            // Downstream phases only distinguish the leading cycle among the
            // top-order tier, so emit one variant per distinct leading
            // partition there; permuting lower tiers is deferred.
            for i in 0..descending.len() {
                if i != 0 {
                    if descending[i].order != descending[0].order {
                        break;
                    }
                    if descending[i - 1].same_partitions(&descending[i]) {
                        continue;
                    }
                }
                let mut leading = descending.clone();
                leading.swap(0, i);
                self.emit_one(used_cubie_counts, leading, &share_orbit_counts, out);
            }
        }
    }

    fn emit_one(
        &self,
        used_cubie_counts: &[u16],
        cycles: Vec<Arc<Cycle>>,
        share_orbit_counts: &[usize],
        out: &mut Vec<CycleCombination>,
    ) {
        let num_orbits = self.puzzle.orbits.len();

        // Per orbit, the cycles that can hold the shared cell: they carry a
        // 1 there and some earlier cycle does too, leaving a donor in place.
        let mut orbits_can_share = vec![false; num_orbits];
        let mut share_candidates: Vec<Vec<usize>> = vec![Vec::new(); num_orbits];
        let mut order_product = BigUint::one();
        for (j, cycle) in cycles.iter().enumerate() {
            for k in 0..num_orbits {
                let has_fixed_point = cycle.partitions[k].contains_fixed_point();
                if orbits_can_share[k] && has_fixed_point {
                    share_candidates[k].push(j);
                }
                orbits_can_share[k] |= has_fixed_point;
            }
            order_product *= &cycle.order;
        }

        debug_assert!(
            share_candidates
                .iter()
                .zip(share_orbit_counts)
                .all(|(candidates, &count)| count == 0 || !candidates.is_empty()),
            "share validation guarantees candidates exist"
        );

        let share_orders: Vec<ShareOrder> = share_candidates
            .iter()
            .zip(share_orbit_counts)
            .map(|(candidates, &count)| candidates.iter().copied().combinations(count))
            .multi_cartesian_product()
            .map(|chosen_sharers| {
                (0..cycles.len())
                    .map(|j| {
                        chosen_sharers
                            .iter()
                            .map(|sharers| sharers.contains(&j))
                            .collect()
                    })
                    .collect()
            })
            .collect();

        out.push(CycleCombination {
            used_cubie_counts: used_cubie_counts.to_vec(),
            order_product,
            share_orders,
            cycles,
        });
    }
}
