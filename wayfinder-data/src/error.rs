//! Error types raised while loading a dataset.

use std::fmt;
use std::io;

use camino::Utf8PathBuf;
use thiserror::Error;
use wayfinder_core::GraphError;

/// The two CSV tables a dataset is made of.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatasetFile {
    /// `name,category,rating,duration,fee,popularity,latitude,longitude`.
    Attractions,
    /// `from,to,time`, endpoints given by attraction name.
    Roads,
}

impl fmt::Display for DatasetFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Attractions => f.write_str("attractions"),
            Self::Roads => f.write_str("roads"),
        }
    }
}

/// Errors raised while loading a dataset into a [`wayfinder_core::Graph`].
#[derive(Debug, Error)]
pub enum LoadError {
    /// A dataset file could not be opened.
    #[error("failed to open {file} file at {path:?}: {source}")]
    Open {
        /// Which table was being opened.
        file: DatasetFile,
        /// Path that failed.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
    /// A table is not valid CSV or lacks a required column.
    #[error("malformed {file} table: {source}")]
    Csv {
        /// Which table failed to parse.
        file: DatasetFile,
        /// Underlying CSV error.
        #[source]
        source: csv::Error,
    },
    /// A road declares a negative travel time.
    #[error("road {from} -> {to} on line {line} has negative travel time {time}")]
    NegativeTravelTime {
        /// Name of the first endpoint.
        from: String,
        /// Name of the second endpoint.
        to: String,
        /// Rejected travel time.
        time: f64,
        /// One-based line number in the roads table.
        line: u64,
    },
    /// The parsed rows do not form a valid graph, e.g. duplicate names.
    #[error("dataset does not form a valid graph: {0}")]
    Graph(#[from] GraphError),
}

/// One or more names did not match any attraction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown attraction names: {}", .names.join(", "))]
pub struct UnknownNames {
    /// Unmatched names, in request order.
    pub names: Vec<String>,
}
