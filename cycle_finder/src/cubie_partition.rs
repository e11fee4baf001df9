//! One orbit's contribution to one group element, and the reduction of
//! partition tables under order domination.

use std::sync::Arc;

use internment::ArcIntern;
use num_bigint::BigUint;
use num_integer::Integer;
use puzzle_orbits::{Orbit, OrientationStatus, OrientationSumConstraint};

use crate::numbers::{lcm_of_partition, p_adic_valuation, signature};

/// The cycle lengths of one orbit inside one group element, together with the
/// realized order after orientation.
///
/// `always_orient` lists the fixed points (cycle length 1): those must count
/// as oriented or the cubie would be untouched, collapsing the structure into
/// a different one. `critical_orient` lists the positions of maximal p-adic
/// valuation for the orientation count; at least one of them must orient for
/// the orientation factor in `order` to survive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CubiePartition {
    pub name: ArcIntern<str>,
    pub partition: Vec<u16>,
    pub order: BigUint,
    pub always_orient: Option<Vec<usize>>,
    pub critical_orient: Option<Vec<usize>>,
}

impl CubiePartition {
    /// Realize a partition against an orbit's orientation rule.
    ///
    /// Returns `None` when the partition cannot be formed on the orbit: under
    /// a zero orientation sum, if every position is forced to orient and the
    /// forced set cannot sum to zero, the only repair is to leave a critical
    /// position unoriented, which is impossible when the critical positions
    /// are themselves fixed points.
    pub(crate) fn from_partition(orbit: &Orbit, partition: Vec<u16>) -> Option<CubiePartition> {
        let mut order = lcm_of_partition(&partition);
        let mut always_orient: Option<Vec<usize>> = None;
        let mut critical_orient: Option<Vec<usize>> = None;

        if let OrientationStatus::CanOrient {
            count,
            sum_constraint,
        } = orbit.orientation_status
        {
            let mut max_valuation = None;
            for (j, &part) in partition.iter().enumerate() {
                let valuation = p_adic_valuation(u64::from(part), u64::from(count));
                if max_valuation.is_none_or(|max| valuation > max) {
                    max_valuation = Some(valuation);
                    critical_orient = Some(vec![j]);
                } else if max_valuation == Some(valuation) {
                    critical_orient
                        .as_mut()
                        .expect("critical positions exist once a maximum is seen")
                        .push(j);
                }
                if part == 1 {
                    always_orient.get_or_insert_default().push(j);
                }
            }

            match sum_constraint {
                OrientationSumConstraint::None => {
                    if critical_orient.is_some() {
                        order *= BigUint::from(count);
                    }
                }
                OrientationSumConstraint::Zero => {
                    let mut orient_count =
                        always_orient.as_ref().map_or(0, Vec::len);
                    let critical_is_disjoint = critical_orient.as_ref().is_some_and(|critical| {
                        always_orient.as_ref().is_none_or(|always| {
                            critical.iter().all(|j| !always.contains(j))
                        })
                    });
                    if critical_is_disjoint {
                        orient_count += 1;
                    }
                    let unorient_critical = orient_count == partition.len()
                        && (count == 2 && orient_count % 2 == 1
                            || count > 2 && orient_count == 1);
                    if unorient_critical {
                        if !critical_is_disjoint {
                            return None;
                        }
                        debug_assert_eq!(
                            critical_orient.as_ref().map(Vec::len),
                            Some(1),
                            "a lone unorientable critical position"
                        );
                        critical_orient = None;
                    } else if orient_count != 0 {
                        order *= BigUint::from(count);
                    }
                }
            }
        }

        Some(CubiePartition {
            name: ArcIntern::clone(&orbit.name),
            partition,
            order,
            always_orient,
            critical_orient,
        })
    }

    pub(crate) fn signature(&self) -> u64 {
        signature(&self.partition)
    }

    pub(crate) fn contains_fixed_point(&self) -> bool {
        self.partition.contains(&1)
    }
}

/// Sort a partition table by order descending and drop every entry dominated
/// by an earlier one.
///
/// An entry is dominated when its order strictly divides an earlier entry's
/// order and, if the orbit participates in any parity constraint, the two
/// partitions have equal signature: swapping in the dominator then never
/// lowers an LCM and never changes a parity obligation.
pub(crate) fn reduce_dominated(
    mut table: Vec<Arc<CubiePartition>>,
    parity_constrained: bool,
) -> Vec<Arc<CubiePartition>> {
    table.sort_by(|a, b| b.order.cmp(&a.order));

    let mut dominated = vec![false; table.len()];
    let mut reduced = Vec::with_capacity(table.len());
    for i in 0..table.len() {
        if dominated[i] {
            continue;
        }
        let current = Arc::clone(&table[i]);
        for (j, candidate) in table.iter().enumerate().skip(i + 1) {
            if current.order != candidate.order
                && current.order.is_multiple_of(&candidate.order)
                && (!parity_constrained
                    || (current.signature() + candidate.signature()) % 2 == 0)
            {
                dominated[j] = true;
            }
        }
        reduced.push(current);
    }
    reduced
}
