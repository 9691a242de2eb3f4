use std::collections::BinaryHeap;

use geo::line_measures::Distance;
use geo::{Coord, Haversine, Point};

use super::state::State;
use crate::{Graph, PathSegment, TravelTime, VertexId};

const METRES_PER_KM: f64 = 1000.0;

/// Great-circle distance in kilometres between two WGS84 coordinates.
///
/// Coordinates use `x = longitude`, `y = latitude`, in degrees.
#[must_use]
#[expect(clippy::float_arithmetic, reason = "converts metres to kilometres")]
pub fn haversine_km(a: Coord<f64>, b: Coord<f64>) -> f64 {
    Haversine.distance(Point::from(a), Point::from(b)) / METRES_PER_KM
}

/// Straight-line lower bound on travel time.
///
/// Converts great-circle kilometres into edge-weight units by dividing by the
/// fastest speed any edge can be traversed at. The estimate is admissible as
/// long as no edge is faster than `km_per_unit`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoHeuristic {
    km_per_unit: f64,
}

impl GeoHeuristic {
    /// Heuristic for a network whose fastest edge covers `km_per_unit`
    /// kilometres per unit of weight.
    ///
    /// Non-positive or non-finite speeds degrade to a zero heuristic, which
    /// turns A* into plain Dijkstra.
    #[must_use]
    pub const fn new(km_per_unit: f64) -> Self {
        Self { km_per_unit }
    }

    /// Estimated travel time between two coordinates.
    #[must_use]
    #[expect(
        clippy::float_arithmetic,
        reason = "scales kilometres into travel-time units"
    )]
    pub fn estimate(&self, from: Coord<f64>, to: Coord<f64>) -> TravelTime {
        if self.km_per_unit.is_finite() && self.km_per_unit > 0.0 {
            haversine_km(from, to) / self.km_per_unit
        } else {
            0.0
        }
    }
}

impl Default for GeoHeuristic {
    fn default() -> Self {
        Self::new(1.0)
    }
}

/// Geography-guided shortest path between `start` and `goal`.
///
/// Both endpoints must carry coordinates; otherwise, or when either id is
/// unknown or no path exists, the result is [`PathSegment::unreachable`] and
/// the caller should fall back to Dijkstra. Vertices without coordinates on
/// the way are estimated at zero remaining cost, which keeps the heuristic
/// admissible.
#[must_use]
#[expect(
    clippy::float_arithmetic,
    reason = "path costs are sums of floating-point travel times"
)]
pub fn a_star(
    graph: &Graph,
    start: VertexId,
    goal: VertexId,
    heuristic: &GeoHeuristic,
) -> PathSegment {
    let (Some(_), Some(goal_location)) = (graph.location(start), graph.location(goal)) else {
        return PathSegment::unreachable();
    };
    if start == goal {
        return PathSegment::new(vec![start], 0.0);
    }

    let estimate = |node: VertexId| {
        graph
            .location(node)
            .map_or(0.0, |location| heuristic.estimate(location, goal_location))
    };

    let bound = graph.vertex_bound();
    let mut g_score = vec![TravelTime::INFINITY; bound];
    let mut came_from: Vec<Option<VertexId>> = vec![None; bound];
    let mut closed = vec![false; bound];
    let mut open = BinaryHeap::new();

    if let Some(score) = g_score.get_mut(start) {
        *score = 0.0;
    }
    open.push(State {
        cost: estimate(start),
        node: start,
    });

    while let Some(State { node, .. }) = open.pop() {
        let Some(&node_score) = g_score.get(node) else {
            continue;
        };
        if node == goal {
            let vertices = super::reconstruct_path(&came_from, start, goal);
            return PathSegment::new(vertices, node_score);
        }
        match closed.get_mut(node) {
            Some(done) if !*done => *done = true,
            _ => continue,
        }

        for &(neighbour, weight) in graph.neighbors(node) {
            if closed.get(neighbour).is_none_or(|&done| done) {
                continue;
            }
            let tentative = node_score + weight;
            let (Some(best), Some(parent)) =
                (g_score.get_mut(neighbour), came_from.get_mut(neighbour))
            else {
                continue;
            };
            if tentative < *best {
                *parent = Some(node);
                *best = tentative;
                open.push(State {
                    cost: tentative + estimate(neighbour),
                    node: neighbour,
                });
            }
        }
    }

    PathSegment::unreachable()
}
