//! Mapping human-readable attraction names to vertex ids.

use wayfinder_core::{Graph, VertexId};

use crate::UnknownNames;

/// Resolve each name to its vertex id, preserving order.
///
/// Names are trimmed before lookup. Every unmatched name is reported, not
/// only the first.
///
/// # Errors
///
/// Returns [`UnknownNames`] listing the unmatched names in input order.
///
/// # Examples
/// ```
/// use wayfinder_data::{load_graph_from_readers, resolve_names};
///
/// let graph = load_graph_from_readers("name\nGate\nLibrary\n".as_bytes(), "from,to\n".as_bytes())?;
/// assert_eq!(resolve_names(&graph, &["Library", " Gate "])?, vec![1, 0]);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn resolve_names<S>(graph: &Graph, names: &[S]) -> Result<Vec<VertexId>, UnknownNames>
where
    S: AsRef<str>,
{
    let unknown: Vec<String> = names
        .iter()
        .map(|name| name.as_ref().trim())
        .filter(|name| graph.id_by_name(name).is_none())
        .map(str::to_owned)
        .collect();
    if !unknown.is_empty() {
        return Err(UnknownNames { names: unknown });
    }
    Ok(names
        .iter()
        .filter_map(|name| graph.id_by_name(name.as_ref().trim()))
        .collect())
}
