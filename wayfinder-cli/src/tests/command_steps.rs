//! Behaviour-driven step definitions driving the CLI subcommands.

use super::helpers::campus_dataset;
use super::*;
use crate::response::{LocationEntry, RouteResponse};
use camino::Utf8PathBuf;
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use std::cell::RefCell;
use tempfile::TempDir;

#[derive(Debug)]
struct CommandWorld {
    _tmp: TempDir,
    data_dir: Utf8PathBuf,
    stdout: RefCell<Vec<u8>>,
    result: RefCell<Option<Result<(), CliError>>>,
}

impl CommandWorld {
    fn new() -> Self {
        let (tmp, data_dir) = campus_dataset();
        Self {
            _tmp: tmp,
            data_dir,
            stdout: RefCell::new(Vec::new()),
            result: RefCell::new(None),
        }
    }

    fn run(&self, subcommand: &str, stops: &[&str]) {
        let mut argv = vec!["wayfinder".to_owned(), subcommand.to_owned()];
        argv.extend([format!("--{ARG_DATA_DIR}"), self.data_dir.as_str().to_owned()]);
        argv.extend(stops.iter().map(|stop| (*stop).to_owned()));
        let outcome = Cli::try_parse_from(argv)
            .map_err(CliError::from)
            .and_then(|cli| dispatch(cli.command, &mut *self.stdout.borrow_mut()));
        self.result.replace(Some(outcome));
    }

    fn stdout(&self) -> String {
        String::from_utf8(self.stdout.borrow().clone()).expect("stdout utf-8")
    }

    fn route_response(&self) -> RouteResponse {
        serde_json::from_str(&self.stdout()).expect("output should be a JSON route response")
    }
}

#[fixture]
fn world() -> CommandWorld {
    CommandWorld::new()
}

#[given("a campus dataset on disk")]
fn campus_on_disk(#[from(world)] world: &CommandWorld) {
    assert!(world.data_dir.join("attractions.csv").is_file());
}

#[given("the roads table is missing")]
fn roads_missing(#[from(world)] world: &CommandWorld) {
    std::fs::remove_file(world.data_dir.join("roads.csv")).expect("remove roads table");
}

#[when("I run \"locations\"")]
fn run_locations_command(#[from(world)] world: &CommandWorld) {
    world.run("locations", &[]);
}

#[when("I run \"explore\"")]
fn run_explore_command(#[from(world)] world: &CommandWorld) {
    world.run("explore", &[]);
}

#[when("I run \"route\" through \"Main Gate\" and \"Canteen\"")]
fn run_route_to_canteen(#[from(world)] world: &CommandWorld) {
    world.run("route", &["Main Gate", "Canteen"]);
}

#[when("I run \"route\" through \"Main Gate\" and \"Gym\"")]
fn run_route_to_gym(#[from(world)] world: &CommandWorld) {
    world.run("route", &["Main Gate", "Gym"]);
}

#[then("the command succeeds")]
fn command_succeeds(#[from(world)] world: &CommandWorld) {
    let borrowed = world.result.borrow();
    let result = borrowed.as_ref().expect("result recorded");
    if let Err(err) = result {
        panic!("expected success, found {err:?}");
    }
}

#[then("the output lists 5 locations in id order")]
fn lists_locations(#[from(world)] world: &CommandWorld) {
    let entries: Vec<LocationEntry> =
        serde_json::from_str(&world.stdout()).expect("output should be a JSON listing");
    let ids: Vec<usize> = entries.iter().map(|entry| entry.id).collect();
    assert_eq!(ids, vec![0, 1, 2, 3, 4]);
    assert_eq!(
        entries.first().map(|entry| entry.name.as_str()),
        Some("Main Gate")
    );
    assert_eq!(
        entries.last().map(|entry| entry.category.as_str()),
        Some("Academic")
    );
}

#[then("the response is successful with a total time of 3")]
fn response_successful(#[from(world)] world: &CommandWorld) {
    let response = world.route_response();
    assert!(response.success);
    assert_eq!(response.total_time, 3.0);
    assert_eq!(response.route_names, vec!["Main Gate", "Canteen"]);
}

#[then("the response fails mentioning \"Gym\"")]
fn response_mentions_gym(#[from(world)] world: &CommandWorld) {
    assert_failure_mentions(&world.route_response(), "Gym");
}

#[then("the response fails mentioning \"not fully connected\"")]
fn response_mentions_connectivity(#[from(world)] world: &CommandWorld) {
    let response = world.route_response();
    assert_failure_mentions(&response, "not fully connected");
    assert!(response.algorithm.ends_with("(Graph not connected)"));
}

fn assert_failure_mentions(response: &RouteResponse, needle: &str) {
    assert!(!response.success);
    let message = response.error_message.as_deref().unwrap_or_default();
    assert!(message.contains(needle), "unexpected message {message:?}");
}

#[then("the command fails because the roads table is missing")]
fn command_fails_missing_roads(#[from(world)] world: &CommandWorld) {
    let borrowed = world.result.borrow();
    let error = borrowed
        .as_ref()
        .expect("result recorded")
        .as_ref()
        .expect_err("expected error");
    match error {
        CliError::MissingSourceFile { field, .. } => assert_eq!(*field, ARG_ROADS),
        other => panic!("expected MissingSourceFile, found {other:?}"),
    }
    assert!(world.stdout().is_empty());
}

macro_rules! register_command_scenario {
    ($fn_name:ident, $scenario_title:literal) => {
        #[scenario(path = "tests/features/route_command.feature", name = $scenario_title)]
        fn $fn_name(#[from(world)] world: CommandWorld) {
            let _ = world;
        }
    };
}

register_command_scenario!(listing_locations, "listing the campus locations");
register_command_scenario!(planning_fixed_route, "planning a fixed-order route by name");
register_command_scenario!(naming_unknown_attraction, "naming an unknown attraction");
register_command_scenario!(
    exploring_disconnected_campus,
    "exploring a campus with an isolated building"
);
register_command_scenario!(missing_roads_table, "running without a roads table");
