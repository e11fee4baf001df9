//! Highest-order search over the product of reduced partition tables.

use std::sync::Arc;

use num_bigint::BigUint;
use num_integer::Integer;
use num_traits::One;
use puzzle_orbits::OrientationStatus;

use crate::combination::Cycle;
use crate::cubie_partition::CubiePartition;
use crate::enumerate::CycleCombinationFinder;

/// How one orbit of a cycle may participate in sharing.
enum ShareState {
    Free,
    /// No cubies here, or the orbit cannot orient; a shared 1-cycle would be
    /// a dead cubie.
    CannotShare,
    /// A single orientable cubie only works as a shared 1-cycle.
    MustShare,
}

/// One level of the depth-first search. `depth` counts orbits still
/// unassigned; `placed` is the partition chosen for orbit `depth` by the
/// parent level.
struct Frame {
    depth: usize,
    running_order: BigUint,
    placed: Option<Arc<CubiePartition>>,
    next_constraint: usize,
}

impl CycleCombinationFinder<'_> {
    /// All cycles achieving the best realizable order for one vector of
    /// per-orbit cubie budgets.
    ///
    /// Share vectors are enumerated inside one invocation and the running
    /// best order carries across them, so a share vector whose optimum falls
    /// short of an earlier one contributes nothing. Memoized by the budget
    /// vector.
    pub(crate) fn highest_order_cycles(
        &mut self,
        cycle_cubie_counts: &[u16],
    ) -> Arc<Vec<Arc<Cycle>>> {
        if let Some(hit) = self.highest_order_cache.get(cycle_cubie_counts) {
            return Arc::clone(hit);
        }

        let num_orbits = cycle_cubie_counts.len();
        let mut share_states = Vec::with_capacity(num_orbits);
        let mut free_share_count = 0_u32;
        for (i, &count) in cycle_cubie_counts.iter().enumerate() {
            let state = if count == 0
                || self.puzzle.orbits[i].orientation_status == OrientationStatus::CannotOrient
            {
                ShareState::CannotShare
            } else if count == 1 {
                ShareState::MustShare
            } else {
                free_share_count += 1;
                ShareState::Free
            };
            share_states.push(state);
        }

        let mut shared_cycles: Vec<Arc<Cycle>> = Vec::new();
        let mut highest_order = BigUint::one();

        for mask in 0_u64..1 << free_share_count {
            // First free orbit varies slowest, unshared before shared.
            let mut free_index = 0;
            let share: Vec<bool> = share_states
                .iter()
                .map(|state| match state {
                    ShareState::Free => {
                        let shared = (mask >> (free_share_count - 1 - free_index)) & 1 == 1;
                        free_index += 1;
                        shared
                    }
                    ShareState::CannotShare => false,
                    ShareState::MustShare => true,
                })
                .collect();

            let tables: Vec<Arc<Vec<Arc<CubiePartition>>>> = (0..num_orbits)
                .map(|i| self.reduced_partition_table(cycle_cubie_counts[i], i, share[i]))
                .collect();
            if tables.iter().any(|table| table.is_empty()) {
                continue;
            }

            // rest_upper_bounds[i]: product of the strongest order of every
            // table below level i, for pruning.
            let mut rest_upper_bounds = Vec::with_capacity(num_orbits);
            let mut rest_upper_bound = BigUint::one();
            for table in &tables {
                rest_upper_bounds.push(rest_upper_bound.clone());
                rest_upper_bound *= &table[0].order;
            }

            let mut cycles: Vec<Arc<Cycle>> = Vec::new();
            let mut path: Vec<Option<Arc<CubiePartition>>> = vec![None; num_orbits];
            let mut stack = vec![Frame {
                depth: num_orbits,
                running_order: BigUint::one(),
                placed: None,
                next_constraint: 0,
            }];

            'frames: while let Some(frame) = stack.pop() {
                let Frame {
                    depth,
                    running_order,
                    placed,
                    mut next_constraint,
                } = frame;
                if let Some(placed) = placed {
                    path[depth] = Some(placed);
                }

                // Settle every parity constraint whose last orbit was just
                // assigned.
                while next_constraint < self.parity.first_constraint_indices.len()
                    && depth == self.parity.first_constraint_indices[next_constraint]
                {
                    let settled = path[depth]
                        .as_ref()
                        .expect("constraint settles on a placed orbit");
                    let mut parity = settled.signature();
                    for (offset, participates) in self.parity.rest_constraint_flags
                        [next_constraint]
                        .iter()
                        .enumerate()
                    {
                        if *participates {
                            parity += path[depth + 1 + offset]
                                .as_ref()
                                .expect("higher orbits are already placed")
                                .signature();
                        }
                    }
                    if parity % 2 != 0 {
                        continue 'frames;
                    }
                    next_constraint += 1;
                }

                if depth != 0 {
                    for obj in tables[depth - 1].iter() {
                        let upper_bound = &running_order * &obj.order;
                        // Tables are sorted by order descending, so nothing
                        // after this candidate can reach the bar either.
                        if &upper_bound * &rest_upper_bounds[depth - 1] < highest_order {
                            break;
                        }
                        stack.push(Frame {
                            depth: depth - 1,
                            running_order: running_order.lcm(&obj.order),
                            placed: Some(Arc::clone(obj)),
                            next_constraint,
                        });
                    }
                    continue;
                }

                if running_order > highest_order {
                    cycles.clear();
                }
                if running_order < highest_order {
                    continue;
                }
                highest_order.clone_from(&running_order);
                cycles.push(Arc::new(Cycle {
                    order: running_order,
                    share: share.clone(),
                    partitions: path
                        .iter()
                        .map(|slot| {
                            Arc::clone(slot.as_ref().expect("complete paths fill every orbit"))
                        })
                        .collect(),
                }));
            }

            shared_cycles.extend(cycles);
        }

        let shared_cycles = Arc::new(shared_cycles);
        self.highest_order_cache
            .insert(cycle_cubie_counts.to_vec(), Arc::clone(&shared_cycles));
        shared_cycles
    }

    /// Every way to pick one highest-order cycle per column, memoized on
    /// column-list suffixes.
    pub(crate) fn shared_cycle_combinations(
        &mut self,
        columns: &[Vec<u16>],
    ) -> Arc<Vec<Vec<Arc<Cycle>>>> {
        if let Some(hit) = self.combination_cache.get(columns) {
            return Arc::clone(hit);
        }

        let combinations = if columns.is_empty() {
            vec![Vec::new()]
        } else {
            let first = self.highest_order_cycles(&columns[0]);
            let rest = self.shared_cycle_combinations(&columns[1..]);
            let mut combinations = Vec::with_capacity(first.len() * rest.len());
            for cycle in first.iter() {
                for combination in rest.iter() {
                    let mut combined = Vec::with_capacity(1 + combination.len());
                    combined.push(Arc::clone(cycle));
                    combined.extend(combination.iter().cloned());
                    combinations.push(combined);
                }
            }
            combinations
        };

        let combinations = Arc::new(combinations);
        self.combination_cache
            .insert(columns.to_vec(), Arc::clone(&combinations));
        combinations
    }
}
