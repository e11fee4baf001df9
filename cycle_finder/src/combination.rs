//! The records produced by the search: single commuting elements and
//! N-tuples of them.

use std::cmp::Ordering;
use std::sync::Arc;

use num_bigint::BigUint;

use crate::cubie_partition::CubiePartition;

/// One group element of a combination: its realized order and, per orbit, the
/// partition realizing it.
///
/// `share[i]` records that the contribution in orbit `i` begins with a forced
/// 1-cycle occupied jointly with another element of the combination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cycle {
    pub order: BigUint,
    pub share: Vec<bool>,
    pub partitions: Vec<Arc<CubiePartition>>,
}

impl Cycle {
    /// Descending comparison on `(order, per-orbit partitions)`; passing this
    /// to a stable sort puts the strongest cycle first.
    pub(crate) fn descending_cmp(a: &Cycle, b: &Cycle) -> Ordering {
        b.order.cmp(&a.order).then_with(|| {
            for (x, y) in b.partitions.iter().zip(&a.partitions) {
                match x.partition.cmp(&y.partition) {
                    Ordering::Equal => {}
                    ord => return ord,
                }
            }
            Ordering::Equal
        })
    }

    pub(crate) fn same_partitions(&self, other: &Cycle) -> bool {
        self.partitions
            .iter()
            .zip(&other.partitions)
            .all(|(a, b)| a.partition == b.partition)
    }
}

/// One way of distributing the shared cells: `[cycle][orbit]` flags marking
/// which cycles hold the shared 1-cycle in each sharing orbit.
pub type ShareOrder = Vec<Vec<bool>>;

/// An N-tuple of mutually commuting elements, sorted by
/// `(order, partitions)` descending, together with every share assignment
/// that realizes it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CycleCombination {
    pub used_cubie_counts: Vec<u16>,
    pub order_product: BigUint,
    pub share_orders: Vec<ShareOrder>,
    pub cycles: Vec<Arc<Cycle>>,
}
