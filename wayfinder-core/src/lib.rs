//! Core route-computation engine for Wayfinder.
//!
//! An attraction [`Graph`] is loaded once and then shared read-only. On top
//! of it sit a Union-Find connectivity snapshot, Dijkstra and A* shortest
//! paths, Kruskal's minimum spanning tree with a preorder tour, exact and
//! approximate TSP solvers, and the [`RouteOptimizer`] that ties them
//! together for fixed-order, flexible-order and full-traversal requests.
//!
//! Unreachable targets and invalid requests are reported with sentinel
//! values (`+∞`, empty paths, annotated [`RouteResult`]s) rather than errors.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod attraction;
mod connectivity;
mod graph;
mod mst;
mod optimizer;
mod route;
pub mod shortest_path;
pub mod travel_time;
pub mod tsp;
mod union_find;

#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(docsrs, doc(cfg(feature = "test-support")))]
pub mod test_support;

/// Identifier of a graph vertex. Ids are dense and assigned on load.
pub type VertexId = usize;

/// Edge weight and path cost. `+∞` means "unreachable".
pub type TravelTime = f64;

pub use attraction::{Attraction, AttractionDetails};
pub use connectivity::Connectivity;
pub use graph::{Graph, GraphError};
pub use mst::{Edge, SpanningTree, kruskal, preorder_tour};
pub use optimizer::{RouteMode, RouteOptimizer, RouteOptimizerConfig, RoutePlanner, RouteRequest};
pub use route::{RouteIssue, RouteResult};
pub use shortest_path::{
    GeoHeuristic, PathSegment, ShortestPaths, a_star, dijkstra, dijkstra_with_path, haversine_km,
    reconstruct_path,
};
pub use travel_time::{TravelTimeError, TravelTimeMatrix, TravelTimeProvider};
pub use tsp::{TourSolution, TspAlgorithm, TspConfig, TwoOptConfig};
pub use union_find::UnionFind;
