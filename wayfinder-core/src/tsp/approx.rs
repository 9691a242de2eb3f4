use crate::{Edge, TravelTime, kruskal, preorder_tour};

use super::{TourSolution, TspAlgorithm, TwoOptConfig, leg, tour_cost};

/// Improve a closed tour in place by segment reversal.
///
/// Each pass scans every pair `(i, j)` with `1 <= i < j < n` and reverses
/// `tour[i..=j]` when that shortens the tour by more than `config.epsilon`.
/// Passes repeat until one makes no change or `config.max_iterations` passes
/// have run. The first stop never moves. Returns the number of passes run.
///
/// Stops outside the matrix count as unreachable, so reversals touching them
/// are never taken.
///
/// # Examples
/// ```
/// use wayfinder_core::tsp::{TwoOptConfig, tour_cost, two_opt};
///
/// // Corners of a unit square, visited in a crossing order.
/// let d = 2.0_f64.sqrt();
/// let dist = vec![
///     vec![0.0, 1.0, d, 1.0],
///     vec![1.0, 0.0, 1.0, d],
///     vec![d, 1.0, 0.0, 1.0],
///     vec![1.0, d, 1.0, 0.0],
/// ];
/// let mut tour = vec![0, 2, 1, 3];
/// two_opt(&mut tour, &dist, &TwoOptConfig::default());
/// assert_eq!(tour_cost(&tour, &dist), 4.0);
/// ```
#[expect(
    clippy::indexing_slicing,
    clippy::float_arithmetic,
    clippy::integer_division_remainder_used,
    reason = "i and j stay within 1..n and the successor index wraps modulo n"
)]
pub fn two_opt(tour: &mut [usize], dist: &[Vec<TravelTime>], config: &TwoOptConfig) -> usize {
    let n = tour.len();
    if n < 4 {
        return 0;
    }

    let mut passes = 0;
    let mut improved = true;
    while improved && passes < config.max_iterations {
        improved = false;
        passes += 1;
        for i in 1..n - 1 {
            for j in i + 1..n {
                let before = tour[i - 1];
                let after = tour[(j + 1) % n];
                let current = leg(dist, before, tour[i]) + leg(dist, tour[j], after);
                let reversed = leg(dist, before, tour[j]) + leg(dist, tour[i], after);
                // NaN from two unreachable legs compares false and is skipped.
                if reversed < current - config.epsilon {
                    tour[i..=j].reverse();
                    improved = true;
                }
            }
        }
    }
    passes
}

/// Approximate closed tour from index 0: MST preorder seed plus 2-opt.
///
/// The complete graph over all stops is weighted by `dist[i][j]` for `i < j`,
/// so the seed assumes a symmetric matrix. If the finite entries do not span
/// every stop the instance is reported as infeasible.
#[must_use]
pub fn mst_two_opt(dist: &[Vec<TravelTime>], config: &TwoOptConfig) -> TourSolution {
    let n = dist.len();
    if n <= 1 {
        return TourSolution {
            cost: 0.0,
            order: (0..n).collect(),
            algorithm: TspAlgorithm::MstTwoOpt,
        };
    }

    let edges: Vec<Edge> = (0..n)
        .flat_map(|u| (u + 1..n).map(move |v| (u, v)))
        .filter_map(|(u, v)| {
            let weight = leg(dist, u, v);
            weight.is_finite().then(|| Edge::new(u, v, weight))
        })
        .collect();
    let tree = kruskal(n, &edges);
    if !tree.is_spanning() {
        log::debug!("stops do not form a connected instance; no approximate tour");
        return TourSolution::infeasible(TspAlgorithm::MstTwoOpt);
    }

    let mut order = preorder_tour(&tree, 0);
    let passes = two_opt(&mut order, dist, config);
    let cost = tour_cost(&order, dist);
    log::debug!("2-opt settled after {passes} passes at cost {cost}");
    if !cost.is_finite() {
        return TourSolution::infeasible(TspAlgorithm::MstTwoOpt);
    }
    TourSolution {
        cost,
        order,
        algorithm: TspAlgorithm::MstTwoOpt,
    }
}
