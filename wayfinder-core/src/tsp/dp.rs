use crate::TravelTime;

use super::{MAX_EXACT_STOPS, TourSolution, TspAlgorithm, leg};

/// Exact closed tour from index 0 by Held-Karp dynamic programming.
///
/// `cost[mask][last]` is the cheapest way to visit exactly the stops in
/// `mask`, starting at 0 and ending at `last`. Tables are flat vectors indexed
/// by `mask * n + last`. Unreachable legs (`+∞`) are never extended.
///
/// Instances above [`MAX_EXACT_STOPS`] are refused with
/// [`TourSolution::infeasible`], as are instances with no finite tour.
#[must_use]
#[expect(
    clippy::indexing_slicing,
    clippy::float_arithmetic,
    reason = "tables hold states * n entries and every slot is mask * n + last with last < n"
)]
pub fn held_karp(dist: &[Vec<TravelTime>]) -> TourSolution {
    let n = dist.len();
    if n > MAX_EXACT_STOPS {
        log::warn!("refusing exact tour over {n} stops (limit {MAX_EXACT_STOPS})");
        return TourSolution::infeasible(TspAlgorithm::ExactDp);
    }
    if n <= 1 {
        return TourSolution {
            cost: 0.0,
            order: (0..n).collect(),
            algorithm: TspAlgorithm::ExactDp,
        };
    }

    let finite_leg = |from: usize, to: usize| {
        Some(leg(dist, from, to)).filter(|weight| weight.is_finite())
    };

    let states = 1_usize << n;
    let mut cost = vec![TravelTime::INFINITY; states * n];
    let mut parent: Vec<Option<usize>> = vec![None; states * n];
    cost[n] = 0.0; // mask 0b1, last 0

    for mask in (1..states).filter(|mask| mask & 1 == 1) {
        for last in (0..n).filter(|last| mask & (1 << last) != 0) {
            let current = cost[mask * n + last];
            if current.is_infinite() {
                continue;
            }
            for next in (0..n).filter(|next| mask & (1 << next) == 0) {
                let Some(weight) = finite_leg(last, next) else {
                    continue;
                };
                let slot = (mask | (1 << next)) * n + next;
                let candidate = current + weight;
                if candidate < cost[slot] {
                    cost[slot] = candidate;
                    parent[slot] = Some(last);
                }
            }
        }
    }

    let full = states - 1;
    let mut best: Option<(TravelTime, usize)> = None;
    for last in 1..n {
        let Some(closing) = finite_leg(last, 0) else {
            continue;
        };
        let total = cost[full * n + last] + closing;
        if total.is_finite() && best.is_none_or(|(best_cost, _)| total < best_cost) {
            best = Some((total, last));
        }
    }
    let Some((total, last)) = best else {
        return TourSolution::infeasible(TspAlgorithm::ExactDp);
    };

    let mut order = Vec::with_capacity(n);
    let mut mask = full;
    let mut current = last;
    loop {
        order.push(current);
        match parent[mask * n + current] {
            Some(previous) => {
                mask &= !(1 << current);
                current = previous;
            }
            None => break,
        }
    }
    order.reverse();

    TourSolution {
        cost: total,
        order,
        algorithm: TspAlgorithm::ExactDp,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tsp::tour_cost;
    use rstest::rstest;

    const INF: TravelTime = TravelTime::INFINITY;

    fn square_cycle() -> Vec<Vec<TravelTime>> {
        // Shortest-path closure of the cycle 0-1=1, 1-2=2, 2-3=3, 3-0=4.
        vec![
            vec![0.0, 1.0, 3.0, 4.0],
            vec![1.0, 0.0, 2.0, 5.0],
            vec![3.0, 2.0, 0.0, 3.0],
            vec![4.0, 5.0, 3.0, 0.0],
        ]
    }

    #[rstest]
    fn finds_the_full_cycle() {
        let tour = held_karp(&square_cycle());
        assert_eq!(tour.cost, 10.0);
        assert_eq!(tour.order.first(), Some(&0));
        assert!(tour.order == vec![0, 1, 2, 3] || tour.order == vec![0, 3, 2, 1]);
        assert_eq!(tour_cost(&tour.order, &square_cycle()), tour.cost);
    }

    #[rstest]
    fn two_stops_go_there_and_back() {
        let tour = held_karp(&[vec![0.0, 2.5], vec![2.5, 0.0]]);
        assert_eq!(tour.cost, 5.0);
        assert_eq!(tour.order, vec![0, 1]);
    }

    #[rstest]
    fn unreachable_stop_is_infeasible() {
        let dist = vec![
            vec![0.0, 1.0, INF],
            vec![1.0, 0.0, INF],
            vec![INF, INF, 0.0],
        ];
        let tour = held_karp(&dist);
        assert!(!tour.is_feasible());
        assert!(tour.order.is_empty());
    }

    #[rstest]
    fn refuses_instances_beyond_the_cap() {
        let n = MAX_EXACT_STOPS + 1;
        let dist = vec![vec![1.0; n]; n];
        let tour = held_karp(&dist);
        assert!(tour.cost.is_infinite());
        assert!(tour.order.is_empty());
    }

    #[rstest]
    #[expect(
        clippy::float_arithmetic,
        clippy::cast_precision_loss,
        clippy::integer_division_remainder_used,
        reason = "builds an irregular matrix from small indices"
    )]
    fn visits_every_stop_once() {
        let n = 9;
        let dist: Vec<Vec<TravelTime>> = (0..n)
            .map(|i| {
                (0..n)
                    .map(|j| ((i * 7 + j * 3) % 11) as f64 + if i == j { 0.0 } else { 1.0 })
                    .collect()
            })
            .collect();
        let tour = held_karp(&dist);
        let mut seen = tour.order.clone();
        seen.sort_unstable();
        assert_eq!(seen, (0..n).collect::<Vec<_>>());
        assert!((tour_cost(&tour.order, &dist) - tour.cost).abs() < 1e-9);
    }
}
