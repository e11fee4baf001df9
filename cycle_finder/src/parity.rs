//! Parity constraints compiled for the depth-first search.

use puzzle_orbits::PuzzleOrbitDefinition;

/// Even-parity constraints rearranged so the search can settle each one the
/// moment its last orbit is assigned.
///
/// The DFS assigns orbits from the highest index down, so a constraint is
/// fully determined when its lowest participating index is placed. For each
/// constraint, `first_constraint_indices` holds that lowest index (sorted
/// descending across constraints, matching the order the search reaches
/// them), and `rest_constraint_flags` holds one participation flag per orbit
/// index strictly above it.
pub(crate) struct ParityHelper {
    pub(crate) first_constraint_indices: Vec<usize>,
    pub(crate) rest_constraint_flags: Vec<Vec<bool>>,
    /// Per orbit: does it participate in any parity constraint at all. Gates
    /// the signature-aware domination reduction.
    pub(crate) constraint_orbit_flags: Vec<bool>,
}

impl ParityHelper {
    pub(crate) fn new(puzzle: &PuzzleOrbitDefinition) -> ParityHelper {
        let mut constraint_orbit_flags = vec![false; puzzle.orbits.len()];
        let mut compiled: Vec<(usize, Vec<bool>)> =
            Vec::with_capacity(puzzle.even_parity_constraints.len());

        for constraint in &puzzle.even_parity_constraints {
            let mut first_index = None;
            let mut rest_flags = Vec::new();
            for (i, orbit) in puzzle.orbits.iter().enumerate() {
                let participates = constraint
                    .orbit_names
                    .iter()
                    .any(|name| *name == orbit.name);
                if participates {
                    constraint_orbit_flags[i] = true;
                }
                if first_index.is_some() {
                    rest_flags.push(participates);
                } else if participates {
                    first_index = Some(i);
                }
            }
            compiled.push((
                first_index.expect("validated constraints name at least one orbit"),
                rest_flags,
            ));
        }

        compiled.sort_by(|a, b| b.0.cmp(&a.0));

        let (first_constraint_indices, rest_constraint_flags): (Vec<_>, Vec<_>) =
            compiled.into_iter().unzip();
        ParityHelper {
            first_constraint_indices,
            rest_constraint_flags,
            constraint_orbit_flags,
        }
    }
}
