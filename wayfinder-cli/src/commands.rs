//! Subcommand implementations.

use std::io::Write;

use log::debug;
use serde::Serialize;
use wayfinder_core::{Graph, RouteOptimizer, RoutePlanner, RouteRequest};
use wayfinder_data::resolve_names;

use crate::dataset::{DatasetArgs, load_dataset};
use crate::response::{RouteResponse, locations};
use crate::{CliError, RouteArgs};

pub(crate) fn run_locations(args: DatasetArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let graph = load_dataset(args)?;
    write_json(writer, &locations(&graph))
}

pub(crate) fn run_route(args: RouteArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let graph = load_dataset(args.dataset)?;
    let response = plan_named_route(&graph, &args.stops, args.flexible);
    write_json(writer, &response)
}

pub(crate) fn run_explore(args: DatasetArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let graph = load_dataset(args)?;
    let optimizer = RouteOptimizer::new(&graph);
    let route = optimizer.plan(&RouteRequest::full_traversal());
    write_json(writer, &RouteResponse::from_route(&graph, &route))
}

/// Resolve `names` and plan a fixed or flexible route through them.
pub(crate) fn plan_named_route(graph: &Graph, names: &[String], flexible: bool) -> RouteResponse {
    let stops = match resolve_names(graph, names) {
        Ok(stops) => stops,
        Err(err) => return RouteResponse::unknown_names(&err),
    };
    debug!("planning {} route through {stops:?}", mode_name(flexible));
    let request = if flexible {
        RouteRequest::flexible(stops)
    } else {
        RouteRequest::fixed(stops)
    };
    let optimizer = RouteOptimizer::new(graph);
    RouteResponse::from_route(graph, &optimizer.plan(&request))
}

const fn mode_name(flexible: bool) -> &'static str {
    if flexible { "flexible" } else { "fixed-order" }
}

fn write_json<T: Serialize + ?Sized>(writer: &mut dyn Write, value: &T) -> Result<(), CliError> {
    let payload = serde_json::to_string_pretty(value).map_err(CliError::SerialiseOutput)?;
    writer
        .write_all(payload.as_bytes())
        .map_err(CliError::WriteOutput)?;
    writer.write_all(b"\n").map_err(CliError::WriteOutput)?;
    Ok(())
}
