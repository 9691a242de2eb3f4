//! Immutable connectivity snapshots.
//!
//! A [`Connectivity`] is computed from a [`Graph`] by a pure rebuild and never
//! mutated afterwards, so route computations can share it freely. It records
//! the graph version it was built from; any later edge insertion makes it
//! stale.

use crate::{Graph, UnionFind, VertexId};

/// Component labels for every id of a graph, frozen at build time.
///
/// # Examples
/// ```
/// use wayfinder_core::{Attraction, Connectivity, Graph};
///
/// # fn main() -> Result<(), wayfinder_core::GraphError> {
/// let mut graph = Graph::new();
/// for id in 0..3 {
///     graph.add_attraction(Attraction::new(id, format!("stop {id}"), "test"))?;
/// }
/// graph.add_edge(0, 1, 1.0)?;
///
/// let connectivity = Connectivity::rebuild(&graph);
/// assert!(connectivity.same_component(0, 1));
/// assert!(!connectivity.same_component(0, 2));
/// assert!(connectivity.is_current_for(&graph));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Connectivity {
    labels: Vec<Option<usize>>,
    components: usize,
    graph_version: u64,
}

impl Connectivity {
    /// Build a snapshot of `graph`'s current edge set.
    #[must_use]
    pub fn rebuild(graph: &Graph) -> Self {
        let bound = graph.vertex_bound();
        let mut sets = UnionFind::new(bound);
        for edge in graph.edges() {
            sets.unite(edge.u, edge.v);
        }
        let mut labels = vec![None; bound];
        let mut roots = Vec::new();
        for id in graph.vertex_ids() {
            let root = sets.find(id);
            if let Some(label) = labels.get_mut(id) {
                *label = Some(root);
            }
            roots.push(root);
        }
        roots.sort_unstable();
        roots.dedup();
        Self {
            labels,
            components: roots.len(),
            graph_version: graph.version(),
        }
    }

    /// Component label of `id`, or `None` for ids the graph does not know.
    #[must_use]
    pub fn component(&self, id: VertexId) -> Option<usize> {
        self.labels.get(id).copied().flatten()
    }

    /// Whether `a` and `b` are both known and mutually reachable.
    #[must_use]
    pub fn same_component(&self, a: VertexId, b: VertexId) -> bool {
        match (self.component(a), self.component(b)) {
            (Some(left), Some(right)) => left == right,
            _ => false,
        }
    }

    /// Whether every id in `ids` lies in one component.
    ///
    /// An empty slice is trivially connected; any unknown id is not.
    #[must_use]
    pub fn all_connected(&self, ids: &[VertexId]) -> bool {
        let Some((&first, rest)) = ids.split_first() else {
            return true;
        };
        self.component(first).is_some() && rest.iter().all(|&id| self.same_component(first, id))
    }

    /// Number of connected components among known vertices.
    #[must_use]
    pub const fn component_count(&self) -> usize {
        self.components
    }

    /// Whether the whole graph forms a single component.
    #[must_use]
    pub const fn is_fully_connected(&self) -> bool {
        self.components == 1
    }

    /// Graph version this snapshot was built from.
    #[must_use]
    pub const fn graph_version(&self) -> u64 {
        self.graph_version
    }

    /// Whether the snapshot still reflects `graph`'s edge set.
    #[must_use]
    pub const fn is_current_for(&self, graph: &Graph) -> bool {
        self.graph_version == graph.version()
    }
}
