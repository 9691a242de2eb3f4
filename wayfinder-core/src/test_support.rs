//! Graph fixtures shared by unit tests, behaviour tests and benchmarks.
//!
//! Available under `cfg(test)` and the `test-support` feature.

use geo::Coord;

use crate::{Attraction, Graph, TravelTime, VertexId, haversine_km};

/// Build a graph with ids `0..vertex_count` named `stop {id}` and the given
/// undirected edges.
///
/// # Panics
///
/// Panics when a vertex or edge is rejected by the graph.
#[must_use]
pub fn graph_from_edges(vertex_count: usize, edges: &[(VertexId, VertexId, TravelTime)]) -> Graph {
    let ids: Vec<VertexId> = (0..vertex_count).collect();
    graph_with_ids(&ids, edges)
}

/// Build a graph holding exactly `ids`, so gaps in the id range stay unused.
///
/// # Panics
///
/// Panics when a vertex or edge is rejected by the graph.
#[must_use]
pub fn graph_with_ids(ids: &[VertexId], edges: &[(VertexId, VertexId, TravelTime)]) -> Graph {
    let mut graph = Graph::new();
    for &id in ids {
        graph
            .add_attraction(Attraction::new(id, format!("stop {id}"), "test"))
            .unwrap_or_else(|err| panic!("register fixture vertex: {err}"));
    }
    for &(from, to, weight) in edges {
        graph
            .add_edge(from, to, weight)
            .unwrap_or_else(|err| panic!("insert fixture edge: {err}"));
    }
    graph
}

/// Four vertices on a cycle: `0-1=1`, `1-2=2`, `2-3=3`, `3-0=4`.
///
/// No vertex has coordinates, so A* always defers to Dijkstra.
#[must_use]
pub fn cycle_graph() -> Graph {
    graph_from_edges(4, &[(0, 1, 1.0), (1, 2, 2.0), (2, 3, 3.0), (3, 0, 4.0)])
}

/// Two disjoint pairs: `0-1=1` and `2-3=1`.
#[must_use]
pub fn two_component_graph() -> Graph {
    graph_from_edges(4, &[(0, 1, 1.0), (2, 3, 1.0)])
}

/// Side length of [`geo_grid_graph`].
pub const GRID_SIDE: usize = 3;

/// A `GRID_SIDE × GRID_SIDE` lattice near the equator, 0.01° apart.
///
/// Vertex `row * GRID_SIDE + col` sits at longitude `col * 0.01`, latitude
/// `row * 0.01`. Edges join horizontal and vertical neighbours and weigh
/// between 1.0 and 1.2 times their great-circle length in kilometres, so the
/// default A* heuristic is admissible.
///
/// # Panics
///
/// Panics if the lattice cannot be assembled, which indicates a bug in
/// [`Graph`].
#[must_use]
#[expect(
    clippy::float_arithmetic,
    clippy::cast_precision_loss,
    clippy::integer_division,
    clippy::integer_division_remainder_used,
    reason = "lattice coordinates are derived from small row and column indices"
)]
pub fn geo_grid_graph() -> Graph {
    let mut graph = Graph::new();
    let coord = |id: VertexId| Coord {
        x: (id % GRID_SIDE) as f64 * 0.01,
        y: (id / GRID_SIDE) as f64 * 0.01,
    };
    for id in 0..GRID_SIDE * GRID_SIDE {
        graph
            .add_attraction(
                Attraction::new(id, format!("grid {id}"), "test").with_location(coord(id)),
            )
            .unwrap_or_else(|err| panic!("register grid vertex: {err}"));
    }
    for id in 0..GRID_SIDE * GRID_SIDE {
        let right = (id % GRID_SIDE + 1 < GRID_SIDE).then_some(id + 1);
        let down = (id + GRID_SIDE < GRID_SIDE * GRID_SIDE).then_some(id + GRID_SIDE);
        for next in right.into_iter().chain(down) {
            let stretch = 1.0 + 0.1 * ((id + next) % 3) as f64;
            graph
                .add_edge(id, next, haversine_km(coord(id), coord(next)) * stretch)
                .unwrap_or_else(|err| panic!("insert grid edge: {err}"));
        }
    }
    graph
}
