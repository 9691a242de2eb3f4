//! Closed-tour TSP solvers over a travel-time matrix.
//!
//! Tours start at index 0 of the matrix and return to it. Small instances are
//! solved exactly with a bitmask dynamic programme; larger ones use an MST
//! seed refined by 2-opt. [`solve_tsp`] picks between them by instance size.
//!
//! Infeasible instances (a stop that cannot be reached, or an exact solve
//! beyond [`MAX_EXACT_STOPS`]) are reported as an infinite-cost, empty-order
//! [`TourSolution`] rather than an error.

mod approx;
mod dp;

use std::fmt;

pub use approx::{mst_two_opt, two_opt};
pub use dp::held_karp;

use crate::TravelTime;

/// Hard ceiling on the exact solver, bounding its `n·2ⁿ` tables.
pub const MAX_EXACT_STOPS: usize = 15;

/// Which solver produced a [`TourSolution`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TspAlgorithm {
    /// Zero or one stop; nothing to optimise.
    Trivial,
    /// Held-Karp bitmask dynamic programme.
    ExactDp,
    /// Minimum spanning tree preorder seed improved by 2-opt.
    MstTwoOpt,
}

impl TspAlgorithm {
    /// Human-readable label used in route summaries.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Trivial => "Trivial",
            Self::ExactDp => "Held-Karp DP",
            Self::MstTwoOpt => "MST + 2-opt",
        }
    }
}

impl fmt::Display for TspAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Result of a TSP solve.
#[derive(Debug, Clone, PartialEq)]
pub struct TourSolution {
    /// Closed-tour cost including the leg back to the first stop.
    pub cost: TravelTime,
    /// Matrix indices in visiting order, starting with `0`. Empty when
    /// infeasible.
    pub order: Vec<usize>,
    /// Solver that produced the tour.
    pub algorithm: TspAlgorithm,
}

impl TourSolution {
    /// The infinite-cost, empty-order sentinel.
    #[must_use]
    pub const fn infeasible(algorithm: TspAlgorithm) -> Self {
        Self {
            cost: TravelTime::INFINITY,
            order: Vec::new(),
            algorithm,
        }
    }

    /// Whether the solver found a tour.
    #[must_use]
    pub const fn is_feasible(&self) -> bool {
        self.cost.is_finite()
    }
}

/// Tuning for the 2-opt local search.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TwoOptConfig {
    /// Upper bound on full improvement passes.
    pub max_iterations: usize,
    /// Minimum gain for a reversal to count as an improvement.
    pub epsilon: TravelTime,
}

impl Default for TwoOptConfig {
    fn default() -> Self {
        Self {
            max_iterations: 100,
            epsilon: 1e-3,
        }
    }
}

/// Size thresholds for solver selection.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TspConfig {
    /// Instances up to this size are solved exactly.
    pub exact_limit: usize,
    /// Instances above `exact_limit` and up to this size run both solvers
    /// and keep the cheaper tour.
    pub hybrid_limit: usize,
    /// 2-opt tuning for the approximate solver.
    pub two_opt: TwoOptConfig,
}

impl Default for TspConfig {
    fn default() -> Self {
        Self {
            exact_limit: 10,
            hybrid_limit: MAX_EXACT_STOPS,
            two_opt: TwoOptConfig::default(),
        }
    }
}

/// Cost of the closed tour `order` under `dist`.
///
/// Tours with fewer than two stops cost zero. Out-of-range indices count as
/// unreachable.
#[must_use]
pub fn tour_cost(order: &[usize], dist: &[Vec<TravelTime>]) -> TravelTime {
    if order.len() < 2 {
        return 0.0;
    }
    order
        .iter()
        .zip(order.iter().cycle().skip(1))
        .map(|(&from, &to)| leg(dist, from, to))
        .sum()
}

/// Matrix entry `dist[from][to]`, `+∞` when either index is out of range.
pub(crate) fn leg(dist: &[Vec<TravelTime>], from: usize, to: usize) -> TravelTime {
    dist.get(from)
        .and_then(|row| row.get(to))
        .copied()
        .unwrap_or(TravelTime::INFINITY)
}

/// Order the stops of `dist` into a cheap closed tour from index 0.
///
/// Uses the exact solver up to `config.exact_limit` stops, both solvers up
/// to `config.hybrid_limit` (ties favour the exact tour), and the MST + 2-opt
/// approximation beyond. Both limits are clamped to [`MAX_EXACT_STOPS`].
///
/// # Examples
/// ```
/// use wayfinder_core::tsp::{TspAlgorithm, TspConfig, solve_tsp};
///
/// let dist = vec![
///     vec![0.0, 1.0, 5.0, 4.0],
///     vec![1.0, 0.0, 2.0, 5.0],
///     vec![5.0, 2.0, 0.0, 3.0],
///     vec![4.0, 5.0, 3.0, 0.0],
/// ];
/// let tour = solve_tsp(&dist, &TspConfig::default());
/// assert_eq!(tour.cost, 10.0);
/// assert_eq!(tour.algorithm, TspAlgorithm::ExactDp);
/// assert_eq!(tour.order.first(), Some(&0));
/// ```
#[must_use]
pub fn solve_tsp(dist: &[Vec<TravelTime>], config: &TspConfig) -> TourSolution {
    let n = dist.len();
    if n <= 1 {
        return TourSolution {
            cost: 0.0,
            order: (0..n).collect(),
            algorithm: TspAlgorithm::Trivial,
        };
    }

    let exact_limit = config.exact_limit.min(MAX_EXACT_STOPS);
    let hybrid_limit = config.hybrid_limit.min(MAX_EXACT_STOPS);

    if n <= exact_limit {
        log::debug!("solving {n}-stop tour exactly");
        return held_karp(dist);
    }
    if n <= hybrid_limit {
        let exact = held_karp(dist);
        let approx = mst_two_opt(dist, &config.two_opt);
        log::debug!(
            "hybrid {n}-stop tour: exact {} vs approximate {}",
            exact.cost,
            approx.cost
        );
        return if exact.cost <= approx.cost {
            exact
        } else {
            approx
        };
    }
    log::debug!("approximating {n}-stop tour with MST + 2-opt");
    mst_two_opt(dist, &config.two_opt)
}
