//! Command-line interface for the Wayfinder route engine.
#![forbid(unsafe_code)]

use clap::{Args, Parser, Subcommand};
use std::io::Write;

mod commands;
mod dataset;
mod error;
mod logging;
mod response;

pub use error::CliError;
pub use logging::init_logger;

use commands::{run_explore, run_locations, run_route};
use dataset::DatasetArgs;

pub(crate) const ARG_DATA_DIR: &str = "data-dir";
pub(crate) const ARG_ATTRACTIONS: &str = "attractions";
pub(crate) const ARG_ROADS: &str = "roads";

/// Run the Wayfinder CLI with the current process arguments and environment.
///
/// # Errors
///
/// Returns a [`CliError`] when arguments, configuration or the dataset are
/// invalid, or when output cannot be written.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    let mut stdout = std::io::stdout().lock();
    dispatch(cli.command, &mut stdout)
}

fn dispatch(command: Command, writer: &mut dyn Write) -> Result<(), CliError> {
    match command {
        Command::Locations(args) => run_locations(args, writer),
        Command::Route(args) => run_route(args, writer),
        Command::Explore(args) => run_explore(args, writer),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "wayfinder",
    about = "Plan routes through an attraction graph",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List every attraction with its id and category.
    Locations(DatasetArgs),
    /// Plan a route through the named attractions.
    Route(RouteArgs),
    /// Visit every attraction along a spanning-tree tour.
    Explore(DatasetArgs),
}

/// CLI arguments for the `route` subcommand.
#[derive(Debug, Clone, Args)]
pub(crate) struct RouteArgs {
    /// Let the planner choose the visiting order (round trip).
    #[arg(long)]
    pub(crate) flexible: bool,
    /// Attraction names, in visiting order unless `--flexible` is given.
    #[arg(value_name = "NAME", required = true)]
    pub(crate) stops: Vec<String>,
    #[command(flatten)]
    pub(crate) dataset: DatasetArgs,
}

#[cfg(test)]
mod tests;
