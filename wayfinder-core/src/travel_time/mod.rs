//! Pairwise travel times between requested stops.
//!
//! The [`TravelTimeProvider`] trait abstracts the all-pairs matrix the TSP
//! solvers consume. [`Graph`](crate::Graph) implements it by running one
//! Dijkstra search per stop, so entries are shortest-path costs and
//! unreachable pairs are `+∞`.

mod error;
mod provider;

pub use error::TravelTimeError;
pub use provider::{TravelTimeMatrix, TravelTimeProvider};
