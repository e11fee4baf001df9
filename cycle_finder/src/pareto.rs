//! Reduction of candidate combinations to the Pareto frontier.

use std::cmp::Ordering;

use pareto_front::{Dominate, ParetoFront};

use crate::combination::CycleCombination;

impl Dominate for CycleCombination {
    /// A combination dominates another when it is at least as good on the
    /// order product and on every per-cycle order, and either strictly better
    /// somewhere or structurally the same combination (equal partitions and
    /// share patterns), in which case only the first representative is kept.
    fn dominate(&self, other: &Self) -> bool {
        if self.order_product < other.order_product {
            return false;
        }

        let mut different_orders = false;
        let mut same_cycle = self.share_orders == other.share_orders;
        for (this, that) in self.cycles.iter().zip(&other.cycles) {
            if that.order > this.order {
                return false;
            }
            if different_orders {
                continue;
            }
            different_orders |= this.order > that.order;
            same_cycle &= this.same_partitions(that);
        }

        different_orders || same_cycle
    }
}

/// Sort candidates by `(order_product, cycle orders…)` descending and keep
/// each one iff no already-kept candidate dominates it.
///
/// Under that order a later candidate never dominates a kept one, so the
/// front grows append-only and the result stays sorted. Applying the filter
/// to its own output is a no-op.
#[must_use]
pub fn pareto_efficient_cycle_combinations(
    mut candidates: Vec<CycleCombination>,
) -> Vec<CycleCombination> {
    candidates.sort_by(|a, b| {
        b.order_product.cmp(&a.order_product).then_with(|| {
            for (x, y) in b.cycles.iter().zip(&a.cycles) {
                match x.order.cmp(&y.order) {
                    Ordering::Equal => {}
                    ord => return ord,
                }
            }
            Ordering::Equal
        })
    });

    let mut front = ParetoFront::new();
    for candidate in candidates {
        front.push(candidate);
    }
    front.into_iter().collect()
}
