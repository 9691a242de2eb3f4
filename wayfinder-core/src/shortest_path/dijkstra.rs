use std::collections::BinaryHeap;

use super::state::State;
use crate::{Graph, PathSegment, TravelTime, VertexId};

/// Distances and parent links from one Dijkstra run.
///
/// Both vectors are indexed by vertex id and sized by
/// [`Graph::vertex_bound`].
#[derive(Debug, Clone, PartialEq)]
pub struct ShortestPaths {
    /// Source vertex of the search.
    pub source: VertexId,
    /// Best known distance per vertex, `+∞` when unreachable.
    pub distances: Vec<TravelTime>,
    /// Predecessor on a shortest path, `None` for the source and unreachable
    /// vertices.
    pub parents: Vec<Option<VertexId>>,
}

impl ShortestPaths {
    /// Distance to `target`, `+∞` when unreachable or out of range.
    #[must_use]
    pub fn distance(&self, target: VertexId) -> TravelTime {
        self.distances
            .get(target)
            .copied()
            .unwrap_or(TravelTime::INFINITY)
    }

    /// Shortest path from the source to `target` with its cost.
    ///
    /// Returns [`PathSegment::unreachable`] when no path exists, including
    /// when `target` is an unused id inside the graph's id range.
    #[must_use]
    pub fn segment_to(&self, target: VertexId) -> PathSegment {
        let cost = self.distance(target);
        if cost.is_infinite() {
            return PathSegment::unreachable();
        }
        let vertices = reconstruct_path(&self.parents, self.source, target);
        if vertices.is_empty() {
            PathSegment::unreachable()
        } else {
            PathSegment::new(vertices, cost)
        }
    }
}

/// Single-source shortest distances to every vertex.
///
/// Unknown start ids yield an all-`+∞` vector rather than an error.
///
/// # Examples
/// ```
/// use wayfinder_core::{Attraction, Graph, dijkstra};
///
/// # fn main() -> Result<(), wayfinder_core::GraphError> {
/// let mut graph = Graph::new();
/// for id in 0..3 {
///     graph.add_attraction(Attraction::new(id, format!("v{id}"), "test"))?;
/// }
/// graph.add_edge(0, 1, 2.0)?;
/// graph.add_edge(1, 2, 2.0)?;
/// graph.add_edge(0, 2, 5.0)?;
///
/// let distances = dijkstra(&graph, 0);
/// assert_eq!(distances, vec![0.0, 2.0, 4.0]);
/// # Ok(())
/// # }
/// ```
#[must_use]
pub fn dijkstra(graph: &Graph, start: VertexId) -> Vec<TravelTime> {
    run(graph, start, false).distances
}

/// Single-source shortest paths with parent links for reconstruction.
#[must_use]
pub fn dijkstra_with_path(graph: &Graph, start: VertexId) -> ShortestPaths {
    run(graph, start, true)
}

#[expect(
    clippy::float_arithmetic,
    reason = "path costs are sums of floating-point travel times"
)]
fn run(graph: &Graph, start: VertexId, track_parents: bool) -> ShortestPaths {
    let bound = graph.vertex_bound();
    let mut distances = vec![TravelTime::INFINITY; bound];
    let mut parents = vec![None; if track_parents { bound } else { 0 }];
    let mut heap = BinaryHeap::new();

    if graph.contains(start)
        && let Some(slot) = distances.get_mut(start)
    {
        *slot = 0.0;
        heap.push(State {
            cost: 0.0,
            node: start,
        });
    }

    while let Some(State { cost, node }) = heap.pop() {
        if distances.get(node).is_none_or(|&best| cost > best) {
            continue;
        }
        for &(neighbour, weight) in graph.neighbors(node) {
            let candidate = cost + weight;
            let Some(best) = distances.get_mut(neighbour) else {
                continue;
            };
            if candidate < *best {
                *best = candidate;
                if let Some(parent) = parents.get_mut(neighbour) {
                    *parent = Some(node);
                }
                heap.push(State {
                    cost: candidate,
                    node: neighbour,
                });
            }
        }
    }

    ShortestPaths {
        source: start,
        distances,
        parents,
    }
}

/// Walk parent links from `end` back to `start`.
///
/// Returns the path in travel order, or an empty vector when the walk does
/// not end exactly at `start`. `start == end` yields the single-vertex path.
#[must_use]
pub fn reconstruct_path(
    parents: &[Option<VertexId>],
    start: VertexId,
    end: VertexId,
) -> Vec<VertexId> {
    if end >= parents.len() {
        return Vec::new();
    }
    let mut path = vec![end];
    let mut current = end;
    while current != start {
        match parents.get(current).copied().flatten() {
            // A chain longer than the id space can only come from a corrupt
            // parent array.
            Some(parent) if path.len() <= parents.len() => {
                path.push(parent);
                current = parent;
            }
            _ => return Vec::new(),
        }
    }
    path.reverse();
    path
}
