//! Shortest-path searches over a [`Graph`](crate::Graph).
//!
//! Dijkstra answers single-source queries; A* answers single-pair queries
//! when both endpoints carry coordinates. Absence of a path is never an
//! error: distances are `+∞` and paths are empty.

mod astar;
mod dijkstra;
mod state;

pub use astar::{GeoHeuristic, a_star, haversine_km};
pub use dijkstra::{ShortestPaths, dijkstra, dijkstra_with_path, reconstruct_path};

use crate::{TravelTime, VertexId};

/// A concrete path between two vertices together with its total weight.
///
/// An empty vertex list means "no path" and always pairs with an infinite
/// cost. A path from a vertex to itself holds that single vertex and costs
/// zero.
#[derive(Debug, Clone, PartialEq)]
pub struct PathSegment {
    /// Vertices in travel order, endpoints included.
    pub vertices: Vec<VertexId>,
    /// Sum of edge weights along `vertices`.
    pub cost: TravelTime,
}

impl PathSegment {
    /// Construct a segment from a vertex list and its cost.
    #[must_use]
    pub const fn new(vertices: Vec<VertexId>, cost: TravelTime) -> Self {
        Self { vertices, cost }
    }

    /// The "no path" sentinel.
    #[must_use]
    pub const fn unreachable() -> Self {
        Self::new(Vec::new(), TravelTime::INFINITY)
    }

    /// Whether this is the "no path" sentinel.
    #[must_use]
    pub const fn is_unreachable(&self) -> bool {
        self.vertices.is_empty()
    }
}
