use thiserror::Error;

use crate::VertexId;

/// Errors from [`crate::travel_time::TravelTimeProvider::travel_time_matrix`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TravelTimeError {
    /// No stops were provided.
    ///
    /// Callers should pre-filter input to avoid this condition.
    #[error("at least one stop is required")]
    EmptyInput,
    /// A stop is not a vertex of the underlying graph.
    #[error("stop {id} is not a known attraction")]
    UnknownStop {
        /// Offending identifier.
        id: VertexId,
    },
}
