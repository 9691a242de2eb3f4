//! Minimum spanning trees and their preorder linearisation.

use crate::{TravelTime, UnionFind, VertexId};

/// An undirected weighted edge used transiently by Kruskal's algorithm.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Edge {
    /// First endpoint.
    pub u: VertexId,
    /// Second endpoint.
    pub v: VertexId,
    /// Traversal cost.
    pub weight: TravelTime,
}

impl Edge {
    /// Construct an edge.
    #[must_use]
    pub const fn new(u: VertexId, v: VertexId, weight: TravelTime) -> Self {
        Self { u, v, weight }
    }
}

/// Result of Kruskal's algorithm over `vertex_count` vertices.
#[derive(Debug, Clone, PartialEq)]
pub struct SpanningTree {
    /// Accepted edges in acceptance (ascending weight) order.
    pub edges: Vec<Edge>,
    /// Size of the vertex id space the tree was built over.
    pub vertex_count: usize,
}

impl SpanningTree {
    /// Whether the tree spans all `vertex_count` ids.
    ///
    /// A disconnected candidate set yields a forest with fewer than
    /// `vertex_count - 1` edges.
    #[must_use]
    pub const fn is_spanning(&self) -> bool {
        self.edges.len() + 1 >= self.vertex_count
    }

    /// Sum of accepted edge weights.
    #[must_use]
    pub fn total_weight(&self) -> TravelTime {
        self.edges.iter().map(|edge| edge.weight).sum()
    }
}

/// Kruskal's minimum spanning tree over ids `0..vertex_count`.
///
/// Edges are stably sorted by weight, so ties keep their input order and
/// results are reproducible. Edges with out-of-range endpoints or non-finite
/// weights are skipped. Scanning stops as soon as `vertex_count - 1` edges
/// have been accepted.
///
/// # Examples
/// ```
/// use wayfinder_core::{Edge, kruskal};
///
/// let edges = vec![Edge::new(0, 1, 1.0), Edge::new(1, 2, 2.0), Edge::new(0, 2, 3.0)];
/// let tree = kruskal(3, &edges);
/// assert!(tree.is_spanning());
/// assert_eq!(tree.total_weight(), 3.0);
/// ```
#[must_use]
pub fn kruskal(vertex_count: usize, edges: &[Edge]) -> SpanningTree {
    let mut sorted: Vec<Edge> = edges
        .iter()
        .filter(|edge| {
            let usable =
                edge.u < vertex_count && edge.v < vertex_count && edge.weight.is_finite();
            if !usable {
                log::warn!("skipping edge {edge:?} outside the spanning tree domain");
            }
            usable
        })
        .copied()
        .collect();
    sorted.sort_by(|left, right| left.weight.total_cmp(&right.weight));

    let target = vertex_count.saturating_sub(1);
    let mut sets = UnionFind::new(vertex_count);
    let mut accepted = Vec::with_capacity(target);
    for edge in sorted {
        if accepted.len() == target {
            break;
        }
        if sets.unite(edge.u, edge.v) {
            accepted.push(edge);
        }
    }

    SpanningTree {
        edges: accepted,
        vertex_count,
    }
}

/// Preorder depth-first traversal of a tree from `start`.
///
/// Neighbours are visited in the order their edges appear in `tree`, which
/// makes the tour deterministic. Each reachable vertex appears exactly once.
/// An out-of-range `start` yields an empty tour.
#[must_use]
pub fn preorder_tour(tree: &SpanningTree, start: VertexId) -> Vec<VertexId> {
    let n = tree.vertex_count;
    if start >= n {
        return Vec::new();
    }
    let mut adjacency: Vec<Vec<VertexId>> = vec![Vec::new(); n];
    for edge in &tree.edges {
        if let Some(list) = adjacency.get_mut(edge.u) {
            list.push(edge.v);
        }
        if let Some(list) = adjacency.get_mut(edge.v) {
            list.push(edge.u);
        }
    }

    let mut visited = vec![false; n];
    let mut tour = Vec::with_capacity(n);
    let mut stack = vec![start];
    while let Some(node) = stack.pop() {
        match visited.get_mut(node) {
            Some(seen) if !*seen => *seen = true,
            _ => continue,
        }
        tour.push(node);
        let Some(next_hops) = adjacency.get(node) else {
            continue;
        };
        // Reverse so the first-listed neighbour is explored first.
        stack.extend(
            next_hops
                .iter()
                .rev()
                .copied()
                .filter(|next| visited.get(*next).is_some_and(|seen| !seen)),
        );
    }
    tour
}
