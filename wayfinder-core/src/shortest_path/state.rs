use std::cmp::Ordering;

use crate::{TravelTime, VertexId};

/// Priority-queue entry ordered so that `BinaryHeap` pops the lowest cost.
#[derive(Copy, Clone, Debug, PartialEq)]
pub(super) struct State {
    pub(super) cost: TravelTime,
    pub(super) node: VertexId,
}

impl Eq for State {}

// Min-heap by cost, ties broken by node id for reproducible expansion order.
impl Ord for State {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .cost
            .total_cmp(&self.cost)
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for State {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
