//! CSV dataset loading for Wayfinder.
//!
//! Turns an `attractions.csv` / `roads.csv` pair into a
//! [`wayfinder_core::Graph`] and resolves the human-readable names that
//! callers use to refer to attractions.

#![forbid(unsafe_code)]

mod error;
mod loader;
mod names;

pub use error::{DatasetFile, LoadError, UnknownNames};
pub use loader::{
    ATTRACTIONS_FILE, DEFAULT_TRAVEL_TIME, DatasetPaths, ROADS_FILE, load_graph,
    load_graph_from_readers,
};
pub use names::resolve_names;
