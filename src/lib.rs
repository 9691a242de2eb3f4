//! Facade crate for the Wayfinder route engine.
//!
//! This crate re-exports the core graph and routing types and, behind the
//! `data` feature, the CSV dataset loader.

#![forbid(unsafe_code)]

pub use wayfinder_core::{
    Attraction, AttractionDetails, Connectivity, Graph, GraphError, PathSegment, RouteIssue,
    RouteMode, RouteOptimizer, RouteOptimizerConfig, RoutePlanner, RouteRequest, RouteResult,
    TourSolution, TravelTime, TravelTimeError, TravelTimeMatrix, TravelTimeProvider, TspAlgorithm,
    TspConfig, TwoOptConfig, UnionFind, VertexId,
};

/// Shortest-path, spanning-tree and tour primitives.
pub mod algorithms {
    pub use wayfinder_core::shortest_path::{
        GeoHeuristic, a_star, dijkstra, dijkstra_with_path, haversine_km, reconstruct_path,
    };
    pub use wayfinder_core::tsp::{held_karp, mst_two_opt, solve_tsp, tour_cost, two_opt};
    pub use wayfinder_core::{Edge, SpanningTree, kruskal, preorder_tour};
}

#[cfg(feature = "data")]
pub use wayfinder_data::{
    DatasetFile, DatasetPaths, LoadError, UnknownNames, load_graph, load_graph_from_readers,
    resolve_names,
};

#[cfg(feature = "test-support")]
pub use wayfinder_core::test_support;
