//! Route orchestration over a shared, read-only graph.
//!
//! [`RouteOptimizer`] turns a [`RouteRequest`] into a [`RouteResult`]. It
//! validates the request against a [`Connectivity`] snapshot before running
//! any search, then expands consecutive stops into concrete paths with A*,
//! falling back to Dijkstra when A* cannot answer.
//!
//! Failures are reported in-band: an empty result, an annotated label and a
//! [`RouteIssue`] list. Nothing here panics or returns `Err` for unreachable
//! or invalid input.

use crate::tsp::{TspConfig, solve_tsp};
use crate::{
    Connectivity, GeoHeuristic, Graph, PathSegment, RouteIssue, RouteResult, TravelTime,
    TravelTimeError, TravelTimeProvider, VertexId, a_star, dijkstra_with_path, kruskal,
    preorder_tour,
};

const EMPTY_LABEL: &str = "None";
const FIXED_ORDER_LABEL: &str = "Fixed Order";
const FLEXIBLE_LABEL: &str = "Flexible TSP";
const FULL_TRAVERSAL_LABEL: &str = "Kruskal + DFS + A*";

/// How the requested stops should be visited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RouteMode {
    /// Visit stops in the order given; the route is an open path.
    #[default]
    FixedOrder,
    /// Reorder stops into a cheap round trip from the first stop.
    FlexibleOrder,
    /// Ignore the stop list and tour every attraction.
    FullTraversal,
}

/// A route computation request.
///
/// # Examples
/// ```rust
/// use wayfinder_core::{RouteMode, RouteRequest};
///
/// let request = RouteRequest::flexible(vec![3, 1, 4]);
/// assert_eq!(request.mode, RouteMode::FlexibleOrder);
/// assert!(request.validate().is_ok());
/// assert!(RouteRequest::fixed(Vec::new()).validate().is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RouteRequest {
    /// Visiting strategy.
    pub mode: RouteMode,
    /// Requested stops; the first is the start for fixed and flexible modes.
    pub stops: Vec<VertexId>,
}

impl RouteRequest {
    /// Visit `stops` in the given order.
    #[must_use]
    pub const fn fixed(stops: Vec<VertexId>) -> Self {
        Self {
            mode: RouteMode::FixedOrder,
            stops,
        }
    }

    /// Visit `stops` in whatever order makes the round trip cheapest.
    #[must_use]
    pub const fn flexible(stops: Vec<VertexId>) -> Self {
        Self {
            mode: RouteMode::FlexibleOrder,
            stops,
        }
    }

    /// Tour the whole graph.
    #[must_use]
    pub const fn full_traversal() -> Self {
        Self {
            mode: RouteMode::FullTraversal,
            stops: Vec::new(),
        }
    }

    /// Check graph-independent request invariants.
    ///
    /// # Errors
    ///
    /// Returns [`RouteIssue::EmptyRequest`] when a fixed or flexible request
    /// names no stops.
    pub fn validate(&self) -> Result<(), RouteIssue> {
        if self.mode != RouteMode::FullTraversal && self.stops.is_empty() {
            return Err(RouteIssue::EmptyRequest);
        }
        Ok(())
    }
}

/// Tuning for [`RouteOptimizer`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RouteOptimizerConfig {
    /// Kilometres covered per unit of edge weight on the fastest edge; scales
    /// the A* heuristic.
    pub heuristic_km_per_unit: f64,
    /// TSP solver selection for flexible requests.
    pub tsp: TspConfig,
}

impl Default for RouteOptimizerConfig {
    fn default() -> Self {
        Self {
            heuristic_km_per_unit: 1.0,
            tsp: TspConfig::default(),
        }
    }
}

/// Plan routes for requests.
///
/// Planners must be `Send + Sync` so independent requests can be served in
/// parallel from one instance.
pub trait RoutePlanner: Send + Sync {
    /// Plan `request`, reporting failure through the result itself.
    fn plan(&self, request: &RouteRequest) -> RouteResult;
}

/// Route planner over a borrowed graph and its connectivity snapshot.
///
/// # Examples
/// ```rust
/// use wayfinder_core::{Attraction, Graph, RouteOptimizer, RouteRequest};
///
/// # fn main() -> Result<(), wayfinder_core::GraphError> {
/// let mut graph = Graph::new();
/// for id in 0..3 {
///     graph.add_attraction(Attraction::new(id, format!("stop {id}"), "test"))?;
/// }
/// graph.add_edge(0, 1, 2.0)?;
/// graph.add_edge(1, 2, 3.0)?;
///
/// let optimizer = RouteOptimizer::new(&graph);
/// let route = optimizer.plan(&RouteRequest::fixed(vec![0, 2]));
/// assert_eq!(route.path, vec![0, 1, 2]);
/// assert_eq!(route.total_time, 5.0);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct RouteOptimizer<'g> {
    graph: &'g Graph,
    connectivity: Connectivity,
    heuristic: GeoHeuristic,
    config: RouteOptimizerConfig,
}

impl<'g> RouteOptimizer<'g> {
    /// Construct an optimiser using default configuration.
    #[must_use]
    pub fn new(graph: &'g Graph) -> Self {
        Self::with_config(graph, RouteOptimizerConfig::default())
    }

    /// Construct an optimiser with explicit configuration.
    #[must_use]
    pub fn with_config(graph: &'g Graph, config: RouteOptimizerConfig) -> Self {
        Self::with_connectivity(graph, Connectivity::rebuild(graph), config)
    }

    /// Construct an optimiser reusing a prebuilt snapshot.
    ///
    /// A snapshot built from an older graph version is rebuilt.
    #[must_use]
    pub fn with_connectivity(
        graph: &'g Graph,
        connectivity: Connectivity,
        config: RouteOptimizerConfig,
    ) -> Self {
        let snapshot = if connectivity.is_current_for(graph) {
            connectivity
        } else {
            log::warn!(
                "connectivity snapshot from graph version {} is stale (now {}); rebuilding",
                connectivity.graph_version(),
                graph.version()
            );
            Connectivity::rebuild(graph)
        };
        Self {
            graph,
            connectivity: snapshot,
            heuristic: GeoHeuristic::new(config.heuristic_km_per_unit),
            config,
        }
    }

    /// The snapshot requests are validated against.
    #[must_use]
    pub const fn connectivity(&self) -> &Connectivity {
        &self.connectivity
    }

    /// Active configuration.
    #[must_use]
    pub const fn config(&self) -> &RouteOptimizerConfig {
        &self.config
    }

    /// Shortest path between two stops, A* first and Dijkstra as fallback.
    #[must_use]
    pub fn shortest_segment(&self, from: VertexId, to: VertexId) -> PathSegment {
        let segment = a_star(self.graph, from, to, &self.heuristic);
        if !segment.is_unreachable() {
            return segment;
        }
        log::debug!("A* found no path {from}->{to}; falling back to Dijkstra");
        dijkstra_with_path(self.graph, from).segment_to(to)
    }

    /// Plan `request`.
    #[must_use]
    pub fn plan(&self, request: &RouteRequest) -> RouteResult {
        match request.mode {
            RouteMode::FixedOrder => self.plan_stops(&request.stops, FIXED_ORDER_LABEL, |stops| {
                self.fixed_order(stops)
            }),
            RouteMode::FlexibleOrder => self.plan_stops(&request.stops, FLEXIBLE_LABEL, |stops| {
                self.flexible_order(stops)
            }),
            RouteMode::FullTraversal => self.full_traversal(),
        }
    }

    fn plan_stops(
        &self,
        stops: &[VertexId],
        label: &str,
        plan: impl FnOnce(&[VertexId]) -> RouteResult,
    ) -> RouteResult {
        if stops.is_empty() {
            return RouteResult::failure(EMPTY_LABEL, RouteIssue::EmptyRequest);
        }
        if let Some(&id) = stops.iter().find(|id| !self.graph.contains(**id)) {
            return RouteResult::failure(label, RouteIssue::UnknownStop { id });
        }
        if let [stop] = stops {
            return RouteResult::single(*stop);
        }
        if !self.connectivity.all_connected(stops) {
            log::warn!("requested stops {stops:?} span more than one component");
            return RouteResult::failure(label, RouteIssue::Disconnected);
        }
        plan(stops)
    }

    fn fixed_order(&self, stops: &[VertexId]) -> RouteResult {
        match self.expand(stops) {
            Ok((path, total)) => RouteResult::new(stops.to_vec(), path, total, FIXED_ORDER_LABEL),
            Err(issue) => RouteResult::failure(FIXED_ORDER_LABEL, issue),
        }
    }

    fn flexible_order(&self, stops: &[VertexId]) -> RouteResult {
        let matrix = match self.graph.travel_time_matrix(stops) {
            Ok(matrix) => matrix,
            Err(TravelTimeError::EmptyInput) => {
                return RouteResult::failure(EMPTY_LABEL, RouteIssue::EmptyRequest);
            }
            Err(TravelTimeError::UnknownStop { id }) => {
                return RouteResult::failure(FLEXIBLE_LABEL, RouteIssue::UnknownStop { id });
            }
        };
        let tour = solve_tsp(&matrix, &self.config.tsp);
        let label = format!("{FLEXIBLE_LABEL} ({})", tour.algorithm);
        if !tour.is_feasible() {
            return RouteResult::failure(&label, RouteIssue::NoTour);
        }

        let waypoints: Vec<VertexId> = tour
            .order
            .iter()
            .filter_map(|&index| stops.get(index).copied())
            .collect();
        let mut legs = waypoints.clone();
        legs.extend(waypoints.first().copied());
        match self.expand(&legs) {
            Ok((path, total)) => RouteResult::new(waypoints, path, total, label),
            Err(issue) => RouteResult::failure(&label, issue),
        }
    }

    fn full_traversal(&self) -> RouteResult {
        let Some(start) = self.graph.vertex_ids().next() else {
            return RouteResult::failure(FULL_TRAVERSAL_LABEL, RouteIssue::EmptyRequest);
        };
        if !self.connectivity.is_fully_connected() {
            log::warn!(
                "graph has {} components; refusing full traversal",
                self.connectivity.component_count()
            );
            return RouteResult::failure(FULL_TRAVERSAL_LABEL, RouteIssue::GraphNotConnected);
        }

        let tree = kruskal(self.graph.vertex_bound(), &self.graph.edges());
        let mut seen = vec![false; self.graph.vertex_bound()];
        let tour: Vec<VertexId> = preorder_tour(&tree, start)
            .into_iter()
            .filter(|&id| {
                seen.get_mut(id)
                    .is_some_and(|visited| !std::mem::replace(visited, true))
            })
            .collect();
        self.traverse(tour)
    }

    /// Walk `tour` leg by leg. An unreachable leg is recorded and skipped,
    /// and the walk resumes from its far end so every stop stays on the path.
    #[expect(
        clippy::float_arithmetic,
        reason = "route totals are sums of floating-point segment costs"
    )]
    fn traverse(&self, tour: Vec<VertexId>) -> RouteResult {
        let mut path: Vec<VertexId> = tour.first().copied().into_iter().collect();
        let mut total: TravelTime = 0.0;
        let mut issues = Vec::new();
        for (&from, &to) in tour.iter().zip(tour.iter().skip(1)) {
            let segment = self.shortest_segment(from, to);
            if segment.is_unreachable() {
                log::warn!("no path {from}->{to} during full traversal; continuing");
                issues.push(RouteIssue::UnreachableSegment { from, to });
                path.push(to);
                continue;
            }
            path.extend(segment.vertices.into_iter().skip(1));
            total += segment.cost;
        }

        let mut result = RouteResult::new(tour, path, total, FULL_TRAVERSAL_LABEL);
        for issue in issues {
            result.record(issue);
        }
        result
    }

    /// Join consecutive stops into one path, dropping repeated junctions.
    #[expect(
        clippy::float_arithmetic,
        reason = "route totals are sums of floating-point segment costs"
    )]
    fn expand(&self, stops: &[VertexId]) -> Result<(Vec<VertexId>, TravelTime), RouteIssue> {
        let mut path: Vec<VertexId> = stops.first().copied().into_iter().collect();
        let mut total: TravelTime = 0.0;
        for (&from, &to) in stops.iter().zip(stops.iter().skip(1)) {
            let segment = self.shortest_segment(from, to);
            if segment.is_unreachable() {
                log::warn!("no path {from}->{to}; abandoning route");
                return Err(RouteIssue::UnreachableSegment { from, to });
            }
            path.extend(segment.vertices.into_iter().skip(1));
            total += segment.cost;
        }
        Ok((path, total))
    }
}

impl RoutePlanner for RouteOptimizer<'_> {
    fn plan(&self, request: &RouteRequest) -> RouteResult {
        RouteOptimizer::plan(self, request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Attraction;
    use crate::test_support::{cycle_graph, geo_grid_graph, graph_with_ids, two_component_graph};
    use rstest::rstest;

    #[expect(
        clippy::indexing_slicing,
        clippy::integer_division_remainder_used,
        reason = "indices wrap modulo the checked cycle length"
    )]
    fn is_rotation_or_reflection(order: &[VertexId], cycle: &[VertexId]) -> bool {
        let n = cycle.len();
        if order.len() != n {
            return false;
        }
        let reversed: Vec<VertexId> = cycle.iter().rev().copied().collect();
        (0..n).any(|shift| {
            [cycle, reversed.as_slice()]
                .iter()
                .any(|candidate| (0..n).all(|i| order[i] == candidate[(i + shift) % n]))
        })
    }

    #[rstest]
    fn fixed_order_follows_the_cycle() {
        let graph = cycle_graph();
        let route = RouteOptimizer::new(&graph).plan(&RouteRequest::fixed(vec![0, 1, 2, 3]));
        assert_eq!(route.total_time, 6.0);
        assert_eq!(route.path, vec![0, 1, 2, 3]);
        assert_eq!(route.waypoints, vec![0, 1, 2, 3]);
        assert_eq!(route.algorithm, "Fixed Order");
        assert!(route.is_complete());
    }

    #[rstest]
    fn fixed_order_expands_intermediates() {
        let graph = cycle_graph();
        let route = RouteOptimizer::new(&graph).plan(&RouteRequest::fixed(vec![1, 3]));
        assert_eq!(route.path, vec![1, 0, 3]);
        assert_eq!(route.waypoints, vec![1, 3]);
        assert_eq!(route.total_time, 5.0);
    }

    #[rstest]
    fn flexible_order_closes_the_cycle() {
        let graph = cycle_graph();
        let route = RouteOptimizer::new(&graph).plan(&RouteRequest::flexible(vec![0, 1, 2, 3]));
        assert_eq!(route.total_time, 10.0);
        assert!(is_rotation_or_reflection(&route.waypoints, &[0, 1, 2, 3]));
        assert_eq!(route.waypoints.first(), Some(&0));
        assert_eq!(route.path.first(), Some(&0));
        assert_eq!(route.path.last(), Some(&0));
        assert_eq!(route.algorithm, "Flexible TSP (Held-Karp DP)");
    }

    #[rstest]
    fn disconnected_stops_fail_without_searching() {
        let graph = two_component_graph();
        let route = RouteOptimizer::new(&graph).plan(&RouteRequest::fixed(vec![0, 3]));
        assert!(route.is_empty());
        assert!(route.path.is_empty());
        assert_eq!(route.algorithm, "Fixed Order (Unreachable)");
        assert_eq!(route.issues, vec![RouteIssue::Disconnected]);
    }

    #[rstest]
    #[case(RouteRequest::fixed(vec![2]))]
    #[case(RouteRequest::flexible(vec![2]))]
    fn single_stop_costs_nothing(#[case] request: RouteRequest) {
        let graph = cycle_graph();
        let route = RouteOptimizer::new(&graph).plan(&request);
        assert_eq!(route.total_time, 0.0);
        assert_eq!(route.path, vec![2]);
        assert_eq!(route.algorithm, "Single");
    }

    #[rstest]
    #[case(RouteRequest::fixed(Vec::new()), "None (Empty)", RouteIssue::EmptyRequest)]
    #[case(
        RouteRequest::flexible(vec![0, 9]),
        "Flexible TSP (Unknown stop)",
        RouteIssue::UnknownStop { id: 9 }
    )]
    fn invalid_requests_are_annotated(
        #[case] request: RouteRequest,
        #[case] label: &str,
        #[case] issue: RouteIssue,
    ) {
        let graph = cycle_graph();
        let route = RouteOptimizer::new(&graph).plan(&request);
        assert!(route.is_empty());
        assert_eq!(route.algorithm, label);
        assert_eq!(route.issues, vec![issue]);
    }

    #[rstest]
    fn full_traversal_visits_every_vertex_once() {
        let graph = cycle_graph();
        let route = RouteOptimizer::new(&graph).plan(&RouteRequest::full_traversal());
        // MST keeps 0-1, 1-2 and 2-3; preorder from 0 walks the chain.
        assert_eq!(route.waypoints, vec![0, 1, 2, 3]);
        assert_eq!(route.path, vec![0, 1, 2, 3]);
        assert_eq!(route.total_time, 6.0);
        assert_eq!(route.algorithm, "Kruskal + DFS + A*");
    }

    #[rstest]
    fn full_traversal_refuses_disconnected_graphs() {
        let graph = two_component_graph();
        let route = RouteOptimizer::new(&graph).plan(&RouteRequest::full_traversal());
        assert!(route.is_empty());
        assert_eq!(route.algorithm, "Kruskal + DFS + A* (Graph not connected)");
        assert_eq!(route.issues, vec![RouteIssue::GraphNotConnected]);
    }

    #[rstest]
    fn full_traversal_of_empty_graph_is_empty() {
        let graph = Graph::new();
        let route = RouteOptimizer::new(&graph).plan(&RouteRequest::full_traversal());
        assert!(route.is_empty());
        assert_eq!(route.algorithm, "Kruskal + DFS + A* (Empty)");
    }

    #[rstest]
    fn stale_snapshot_is_rebuilt() {
        let mut graph = two_component_graph();
        let stale = Connectivity::rebuild(&graph);
        graph.add_edge(1, 2, 5.0).expect("bridge components");
        let optimizer =
            RouteOptimizer::with_connectivity(&graph, stale, RouteOptimizerConfig::default());
        assert!(optimizer.connectivity().is_current_for(&graph));
        let route = optimizer.plan(&RouteRequest::fixed(vec![0, 3]));
        assert_eq!(route.path, vec![0, 1, 2, 3]);
        assert_eq!(route.total_time, 7.0);
    }

    #[rstest]
    fn segments_without_coordinates_fall_back_to_dijkstra() {
        let graph = cycle_graph();
        let segment = RouteOptimizer::new(&graph).shortest_segment(1, 3);
        assert_eq!(segment.vertices, vec![1, 0, 3]);
        assert_eq!(segment.cost, 5.0);
    }

    #[rstest]
    fn unused_ids_have_no_segment() {
        let graph = graph_with_ids(&[0, 2], &[(0, 2, 4.0)]);
        let optimizer = RouteOptimizer::new(&graph);
        for (from, to) in [(1, 1), (0, 1), (1, 2)] {
            let segment = optimizer.shortest_segment(from, to);
            assert!(segment.is_unreachable(), "{from}->{to}: {segment:?}");
            assert!(segment.cost.is_infinite());
        }
    }

    #[rstest]
    fn traversal_resumes_after_an_unreachable_leg() {
        let graph = two_component_graph();
        let route = RouteOptimizer::new(&graph).traverse(vec![0, 1, 2, 3]);
        assert_eq!(route.waypoints, vec![0, 1, 2, 3]);
        assert_eq!(route.path, vec![0, 1, 2, 3]);
        assert_eq!(route.total_time, 2.0);
        assert_eq!(
            route.issues,
            vec![RouteIssue::UnreachableSegment { from: 1, to: 2 }]
        );
        assert_eq!(route.algorithm, "Kruskal + DFS + A* (Unreachable)");
    }

    #[rstest]
    #[expect(clippy::float_arithmetic, reason = "compares costs within a tolerance")]
    fn geographic_segments_match_dijkstra_costs() {
        let graph = geo_grid_graph();
        let optimizer = RouteOptimizer::new(&graph);
        let last = graph.vertex_bound() - 1;
        let segment = optimizer.shortest_segment(0, last);
        let expected = dijkstra_with_path(&graph, 0).distance(last);
        assert!((segment.cost - expected).abs() < 1e-9);
    }

    #[rstest]
    fn mixed_coordinates_still_route() {
        let mut graph = geo_grid_graph();
        let hub = graph.vertex_bound();
        graph
            .add_attraction(Attraction::new(hub, "hub", "test"))
            .expect("register hub");
        graph.add_edge(0, hub, 0.5).expect("edge to hub");
        let route = RouteOptimizer::new(&graph).plan(&RouteRequest::fixed(vec![hub, 1]));
        assert_eq!(route.path.first(), Some(&hub));
        assert_eq!(route.path.last(), Some(&1));
        assert!(route.is_complete());
    }

    #[rstest]
    fn planners_serve_requests_in_parallel() {
        let graph = cycle_graph();
        let optimizer = RouteOptimizer::new(&graph);
        let planner: &dyn RoutePlanner = &optimizer;
        let results: Vec<RouteResult> = std::thread::scope(|scope| {
            let handles: Vec<_> = [vec![0, 2], vec![1, 3], vec![3, 0]]
                .into_iter()
                .map(|stops| scope.spawn(move || planner.plan(&RouteRequest::fixed(stops))))
                .collect();
            handles
                .into_iter()
                .map(|handle| handle.join().expect("planner thread"))
                .collect()
        });
        let totals: Vec<TravelTime> = results.iter().map(|route| route.total_time).collect();
        assert_eq!(totals, vec![3.0, 5.0, 4.0]);
    }
}
