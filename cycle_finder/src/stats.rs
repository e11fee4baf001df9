//! Summary statistics over a list of cycle combinations.

use std::collections::BTreeMap;

use num_bigint::BigUint;

use crate::combination::CycleCombination;

/// Multiset of per-cycle order tuples, each counted once per donor pattern
/// that realizes it.
#[must_use]
pub fn cycle_combination_stats(
    combinations: &[CycleCombination],
) -> BTreeMap<Vec<BigUint>, usize> {
    let mut stats = BTreeMap::new();
    for combination in combinations {
        let orders: Vec<BigUint> = combination
            .cycles
            .iter()
            .map(|cycle| cycle.order.clone())
            .collect();
        *stats.entry(orders).or_insert(0) += combination.share_orders.len();
    }
    stats
}
