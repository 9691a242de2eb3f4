//! JSON wire format printed by the `route`, `explore` and `locations`
//! commands.

use serde::{Deserialize, Serialize};
use wayfinder_core::{Graph, RouteIssue, RouteResult, TravelTime, VertexId};
use wayfinder_data::UnknownNames;

/// One row of the `locations` listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct LocationEntry {
    pub(crate) id: VertexId,
    pub(crate) name: String,
    pub(crate) category: String,
}

/// Every attraction, sorted by id.
pub(crate) fn locations(graph: &Graph) -> Vec<LocationEntry> {
    graph
        .attractions()
        .map(|attraction| LocationEntry {
            id: attraction.id,
            name: attraction.name.clone(),
            category: attraction.category.clone(),
        })
        .collect()
}

/// Outcome of a routing command.
///
/// An empty route is reported as `success: false` with an `errorMessage`;
/// a route that was produced despite recorded issues keeps `success: true`
/// and still carries the message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RouteResponse {
    pub(crate) success: bool,
    pub(crate) algorithm: String,
    pub(crate) total_time: TravelTime,
    pub(crate) stop_count: usize,
    pub(crate) route_ids: Vec<VertexId>,
    pub(crate) route_names: Vec<String>,
    pub(crate) full_path: Vec<VertexId>,
    pub(crate) full_path_names: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) error_message: Option<String>,
}

impl RouteResponse {
    pub(crate) fn from_route(graph: &Graph, route: &RouteResult) -> Self {
        let error_message = (!route.issues.is_empty()).then(|| {
            route
                .issues
                .iter()
                .map(|issue| describe(graph, issue))
                .collect::<Vec<_>>()
                .join("; ")
        });
        Self {
            success: !route.is_empty(),
            algorithm: route.algorithm.clone(),
            total_time: route.total_time,
            stop_count: route.waypoints.len(),
            route_ids: route.waypoints.clone(),
            route_names: names_of(graph, &route.waypoints),
            full_path: route.path.clone(),
            full_path_names: names_of(graph, &route.path),
            error_message,
        }
    }

    pub(crate) fn unknown_names(err: &UnknownNames) -> Self {
        Self::failure(format!(
            "One or more location names do not exist: {}",
            err.names.join(", ")
        ))
    }

    fn failure(message: String) -> Self {
        Self {
            success: false,
            algorithm: String::new(),
            total_time: 0.0,
            stop_count: 0,
            route_ids: Vec::new(),
            route_names: Vec::new(),
            full_path: Vec::new(),
            full_path_names: Vec::new(),
            error_message: Some(message),
        }
    }
}

fn names_of(graph: &Graph, ids: &[VertexId]) -> Vec<String> {
    ids.iter().map(|&id| name_of(graph, id)).collect()
}

fn name_of(graph: &Graph, id: VertexId) -> String {
    graph
        .attraction(id)
        .map_or_else(|| format!("#{id}"), |attraction| attraction.name.clone())
}

fn describe(graph: &Graph, issue: &RouteIssue) -> String {
    match issue {
        RouteIssue::EmptyRequest => "No locations selected".to_owned(),
        RouteIssue::UnknownStop { id } => format!("Location #{id} does not exist"),
        RouteIssue::Disconnected => {
            "Selected locations are not reachable from each other".to_owned()
        }
        RouteIssue::GraphNotConnected => {
            "Attraction graph is not fully connected; full traversal cannot be performed"
                .to_owned()
        }
        RouteIssue::UnreachableSegment { from, to } => format!(
            "No path between {} and {}",
            name_of(graph, *from),
            name_of(graph, *to)
        ),
        RouteIssue::NoTour => "No tour visits every selected location".to_owned(),
    }
}
