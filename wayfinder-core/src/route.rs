//! Route results returned by the optimiser.
//!
//! A [`RouteResult`] never signals failure through a separate flag: an empty
//! waypoint list plus an annotated algorithm label means "no route", and the
//! typed [`RouteIssue`] list says why.

use thiserror::Error;

use crate::{TravelTime, VertexId};

/// Why a route, or part of one, could not be produced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RouteIssue {
    /// The request named no stops.
    #[error("no stops were requested")]
    EmptyRequest,
    /// A requested stop is not part of the graph.
    #[error("stop {id} is not a known attraction")]
    UnknownStop {
        /// Offending identifier.
        id: VertexId,
    },
    /// The requested stops do not all share one connected component.
    #[error("requested stops are not mutually reachable")]
    Disconnected,
    /// Full traversal needs every attraction in one component.
    #[error("the attraction graph is not connected")]
    GraphNotConnected,
    /// No path joins two consecutive stops.
    #[error("no path from {from} to {to}")]
    UnreachableSegment {
        /// Segment start.
        from: VertexId,
        /// Segment end.
        to: VertexId,
    },
    /// The tour solver could not order the stops.
    #[error("no tour visits every requested stop")]
    NoTour,
}

impl RouteIssue {
    /// Suffix appended to the algorithm label when this issue is recorded.
    #[must_use]
    pub const fn label_suffix(&self) -> &'static str {
        match self {
            Self::EmptyRequest => " (Empty)",
            Self::UnknownStop { .. } => " (Unknown stop)",
            Self::Disconnected | Self::NoTour | Self::UnreachableSegment { .. } => {
                " (Unreachable)"
            }
            Self::GraphNotConnected => " (Graph not connected)",
        }
    }
}

/// An ordered route through the graph.
///
/// # Examples
/// ```
/// use wayfinder_core::RouteResult;
///
/// let route = RouteResult::single(7);
/// assert_eq!(route.waypoints, vec![7]);
/// assert_eq!(route.path, vec![7]);
/// assert_eq!(route.total_time, 0.0);
/// assert!(!route.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RouteResult {
    /// Requested stops in visiting order.
    pub waypoints: Vec<VertexId>,
    /// Every vertex traversed, intermediates included.
    pub path: Vec<VertexId>,
    /// Summed edge weight of `path`.
    pub total_time: TravelTime,
    /// Human-readable description of how the route was built.
    pub algorithm: String,
    /// Failure annotations, empty on full success.
    pub issues: Vec<RouteIssue>,
}

impl RouteResult {
    /// A successful route.
    #[must_use]
    pub fn new(
        waypoints: Vec<VertexId>,
        path: Vec<VertexId>,
        total_time: TravelTime,
        algorithm: impl Into<String>,
    ) -> Self {
        Self {
            waypoints,
            path,
            total_time,
            algorithm: algorithm.into(),
            issues: Vec::new(),
        }
    }

    /// The zero-cost route that stays at `stop`.
    #[must_use]
    pub fn single(stop: VertexId) -> Self {
        Self::new(vec![stop], vec![stop], 0.0, "Single")
    }

    /// An empty route carrying `issue`, its label annotated accordingly.
    #[must_use]
    pub fn failure(algorithm: &str, issue: RouteIssue) -> Self {
        let mut result = Self::new(Vec::new(), Vec::new(), 0.0, algorithm);
        result.record(issue);
        result
    }

    /// Record a failure annotation, extending the label the first time a
    /// given suffix appears.
    pub fn record(&mut self, issue: RouteIssue) {
        let suffix = issue.label_suffix();
        if !self.algorithm.ends_with(suffix) {
            self.algorithm.push_str(suffix);
        }
        self.issues.push(issue);
    }

    /// Whether no route was produced.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }

    /// Whether the route was produced without any annotation.
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        !self.is_empty() && self.issues.is_empty()
    }
}
