//! Travel-time provider trait and matrix alias for stop sets.

use crate::{Graph, TravelTime, VertexId, dijkstra};

use super::error::TravelTimeError;

/// Square matrix of travel times, `matrix[i][j]` from stop `i` to stop `j`.
pub type TravelTimeMatrix = Vec<Vec<TravelTime>>;

/// Fetch pairwise travel times for a set of stops.
///
/// Implementers must return a square `n×n` matrix where `n == stops.len()`.
/// Diagonal entries are zero and unreachable pairs are `+∞`.
///
/// # Examples
///
/// ```rust
/// use wayfinder_core::{
///     Attraction, Graph, TravelTimeError, TravelTimeMatrix, TravelTimeProvider,
/// };
///
/// let mut graph = Graph::new();
/// graph.add_attraction(Attraction::new(0, "Gate", "Entrance")).unwrap();
/// graph.add_attraction(Attraction::new(1, "Lake", "Nature")).unwrap();
/// graph.add_edge(0, 1, 4.0).unwrap();
///
/// let matrix: TravelTimeMatrix = graph.travel_time_matrix(&[1, 0])?;
/// assert_eq!(matrix, vec![vec![0.0, 4.0], vec![4.0, 0.0]]);
/// # Ok::<(), TravelTimeError>(())
/// ```
pub trait TravelTimeProvider {
    /// Return a matrix of travel times for `stops`.
    ///
    /// Implementations must return `Err(TravelTimeError::EmptyInput)` when
    /// `stops` is empty.
    fn travel_time_matrix(&self, stops: &[VertexId])
    -> Result<TravelTimeMatrix, TravelTimeError>;
}

impl TravelTimeProvider for Graph {
    fn travel_time_matrix(
        &self,
        stops: &[VertexId],
    ) -> Result<TravelTimeMatrix, TravelTimeError> {
        if stops.is_empty() {
            return Err(TravelTimeError::EmptyInput);
        }
        if let Some(&id) = stops.iter().find(|id| !self.contains(**id)) {
            return Err(TravelTimeError::UnknownStop { id });
        }
        Ok(stops
            .iter()
            .map(|&from| {
                let distances = dijkstra(self, from);
                stops
                    .iter()
                    .map(|&to| distances.get(to).copied().unwrap_or(TravelTime::INFINITY))
                    .collect()
            })
            .collect())
    }
}
