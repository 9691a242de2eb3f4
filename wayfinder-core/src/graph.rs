//! Undirected weighted graph of attractions.
//!
//! The graph is built once per dataset and then shared read-only by every
//! route computation. Adjacency is always symmetric: inserting an edge updates
//! both endpoints.

use std::collections::{BTreeMap, HashMap, hash_map::Entry};

use geo::Coord;
use thiserror::Error;

use crate::{Attraction, Edge, TravelTime, VertexId};

/// Errors returned when mutating a [`Graph`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GraphError {
    /// An attraction with this id is already registered.
    #[error("attraction id {id} is already registered")]
    DuplicateId {
        /// Offending identifier.
        id: VertexId,
    },
    /// Another attraction already uses this display name.
    #[error("attraction name {name:?} is already used by id {existing}")]
    DuplicateName {
        /// Offending name.
        name: String,
        /// Id of the attraction that owns the name.
        existing: VertexId,
    },
    /// An edge endpoint has not been registered as an attraction.
    #[error("edge endpoint {id} is not a registered attraction")]
    UnknownVertex {
        /// Missing identifier.
        id: VertexId,
    },
    /// Edge weights must be finite and non-negative.
    #[error("edge {from}-{to} has invalid weight {weight}")]
    InvalidWeight {
        /// First endpoint.
        from: VertexId,
        /// Second endpoint.
        to: VertexId,
        /// Rejected weight.
        weight: TravelTime,
    },
}

/// Undirected graph keyed by dense attraction ids.
///
/// # Examples
/// ```
/// use wayfinder_core::{Attraction, Graph};
///
/// # fn main() -> Result<(), wayfinder_core::GraphError> {
/// let mut graph = Graph::new();
/// graph.add_attraction(Attraction::new(0, "Gate", "Entrance"))?;
/// graph.add_attraction(Attraction::new(1, "Library", "Academic"))?;
/// graph.add_edge(0, 1, 3.0)?;
///
/// assert_eq!(graph.edge_weight(1, 0), 3.0);
/// assert_eq!(graph.id_by_name("Library"), Some(1));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct Graph {
    attractions: BTreeMap<VertexId, Attraction>,
    adjacency: BTreeMap<VertexId, Vec<(VertexId, TravelTime)>>,
    names: HashMap<String, VertexId>,
    version: u64,
}

impl Graph {
    /// Construct an empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an attraction and give it an empty adjacency entry.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::DuplicateId`] or [`GraphError::DuplicateName`]
    /// when the id or a non-empty name is already taken.
    pub fn add_attraction(&mut self, attraction: Attraction) -> Result<(), GraphError> {
        let id = attraction.id;
        if self.attractions.contains_key(&id) {
            return Err(GraphError::DuplicateId { id });
        }
        if !attraction.name.is_empty() {
            match self.names.entry(attraction.name.clone()) {
                Entry::Occupied(entry) => {
                    return Err(GraphError::DuplicateName {
                        name: attraction.name,
                        existing: *entry.get(),
                    });
                }
                Entry::Vacant(entry) => {
                    entry.insert(id);
                }
            }
        }
        self.adjacency.entry(id).or_default();
        self.attractions.insert(id, attraction);
        Ok(())
    }

    /// Insert an undirected edge between two registered attractions.
    ///
    /// Self-loops carry no routing information and are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::UnknownVertex`] for unregistered endpoints and
    /// [`GraphError::InvalidWeight`] for negative or non-finite weights.
    pub fn add_edge(
        &mut self,
        from: VertexId,
        to: VertexId,
        weight: TravelTime,
    ) -> Result<(), GraphError> {
        for id in [from, to] {
            if !self.contains(id) {
                return Err(GraphError::UnknownVertex { id });
            }
        }
        if !weight.is_finite() || weight < 0.0 {
            return Err(GraphError::InvalidWeight { from, to, weight });
        }
        if from == to {
            log::debug!("ignoring self-loop on vertex {from}");
            return Ok(());
        }
        self.adjacency.entry(from).or_default().push((to, weight));
        self.adjacency.entry(to).or_default().push((from, weight));
        self.version += 1;
        Ok(())
    }

    /// Neighbours of `id` with their edge weights, in insertion order.
    ///
    /// Unknown ids have no neighbours.
    #[must_use]
    pub fn neighbors(&self, id: VertexId) -> &[(VertexId, TravelTime)] {
        self.adjacency.get(&id).map_or(&[][..], Vec::as_slice)
    }

    /// Look up an attraction by id.
    #[must_use]
    pub fn attraction(&self, id: VertexId) -> Option<&Attraction> {
        self.attractions.get(&id)
    }

    /// Geographic position of `id`, if the attraction exists and has one.
    #[must_use]
    pub fn location(&self, id: VertexId) -> Option<Coord<f64>> {
        self.attraction(id).and_then(|attraction| attraction.location)
    }

    /// Whether `id` is a registered attraction.
    #[must_use]
    pub fn contains(&self, id: VertexId) -> bool {
        self.attractions.contains_key(&id)
    }

    /// Resolve a display name to its id.
    #[must_use]
    pub fn id_by_name(&self, name: &str) -> Option<VertexId> {
        self.names.get(name).copied()
    }

    /// Weight of the cheapest direct edge from `from` to `to`.
    ///
    /// Returns `+∞` when the vertices are not adjacent.
    #[must_use]
    pub fn edge_weight(&self, from: VertexId, to: VertexId) -> TravelTime {
        self.neighbors(from)
            .iter()
            .filter(|(neighbour, _)| *neighbour == to)
            .map(|(_, weight)| *weight)
            .fold(TravelTime::INFINITY, TravelTime::min)
    }

    /// All attraction ids in ascending order.
    pub fn vertex_ids(&self) -> impl Iterator<Item = VertexId> + '_ {
        self.attractions.keys().copied()
    }

    /// All attractions in ascending id order.
    pub fn attractions(&self) -> impl Iterator<Item = &Attraction> + '_ {
        self.attractions.values()
    }

    /// Every undirected edge exactly once, ordered by `(u, v)` with `u < v`.
    ///
    /// Parallel edges collapse to the cheapest one.
    #[must_use]
    pub fn edges(&self) -> Vec<Edge> {
        let mut unique: BTreeMap<(VertexId, VertexId), TravelTime> = BTreeMap::new();
        for (&u, neighbours) in &self.adjacency {
            for &(v, weight) in neighbours {
                let key = (u.min(v), u.max(v));
                unique
                    .entry(key)
                    .and_modify(|existing| *existing = existing.min(weight))
                    .or_insert(weight);
            }
        }
        unique
            .into_iter()
            .map(|((u, v), weight)| Edge::new(u, v, weight))
            .collect()
    }

    /// Exclusive upper bound of the id space: largest id plus one.
    ///
    /// Array-backed algorithms size their storage with this value.
    #[must_use]
    pub fn vertex_bound(&self) -> usize {
        self.attractions
            .keys()
            .next_back()
            .map_or(0, |max_id| max_id + 1)
    }

    /// Number of registered attractions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.attractions.len()
    }

    /// Whether the graph has no attractions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.attractions.is_empty()
    }

    /// Edge-set revision, bumped on every successful edge insertion.
    ///
    /// Connectivity snapshots record the version they were built from.
    #[must_use]
    pub const fn version(&self) -> u64 {
        self.version
    }
}
