//! Dataset location flags shared by every subcommand.

use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};
use wayfinder_core::Graph;
use wayfinder_data::{ATTRACTIONS_FILE, DatasetPaths, ROADS_FILE};
use wayfinder_fs::resolve_in_dir;

use crate::{ARG_ATTRACTIONS, ARG_DATA_DIR, ARG_ROADS, CliError};

/// Where to find the attraction and road tables.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[ortho_config(prefix = "WAYFINDER")]
pub(crate) struct DatasetArgs {
    /// Directory holding `attractions.csv` and `roads.csv`.
    #[arg(long = ARG_DATA_DIR, value_name = "dir")]
    #[serde(default)]
    pub(crate) data_dir: Option<Utf8PathBuf>,
    /// Override the attractions table.
    #[arg(long = ARG_ATTRACTIONS, value_name = "path")]
    #[serde(default)]
    pub(crate) attractions: Option<Utf8PathBuf>,
    /// Override the roads table.
    #[arg(long = ARG_ROADS, value_name = "path")]
    #[serde(default)]
    pub(crate) roads: Option<Utf8PathBuf>,
}

impl DatasetArgs {
    pub(crate) fn into_config(self) -> Result<DatasetConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        Ok(DatasetConfig::from(merged))
    }
}

/// Resolved dataset locations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct DatasetConfig {
    pub(crate) paths: DatasetPaths,
}

impl DatasetConfig {
    pub(crate) fn validate_sources(&self) -> Result<(), CliError> {
        Self::require_existing(&self.paths.attractions, ARG_ATTRACTIONS)?;
        Self::require_existing(&self.paths.roads, ARG_ROADS)?;
        Ok(())
    }

    fn require_existing(path: &Utf8Path, field: &'static str) -> Result<(), CliError> {
        match wayfinder_fs::file_is_file(path) {
            Ok(true) => Ok(()),
            Ok(false) => Err(CliError::SourcePathNotFile {
                field,
                path: path.to_path_buf(),
            }),
            Err(source) if source.kind() == std::io::ErrorKind::NotFound => {
                Err(CliError::MissingSourceFile {
                    field,
                    path: path.to_path_buf(),
                })
            }
            Err(source) => Err(CliError::InspectSourcePath {
                field,
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    pub(crate) fn load(&self) -> Result<Graph, CliError> {
        Ok(self.paths.load()?)
    }
}

impl From<DatasetArgs> for DatasetConfig {
    fn from(args: DatasetArgs) -> Self {
        let data_dir = args.data_dir.unwrap_or_else(|| Utf8PathBuf::from("."));
        let attractions = args
            .attractions
            .unwrap_or_else(|| Utf8PathBuf::from(ATTRACTIONS_FILE));
        let roads = args.roads.unwrap_or_else(|| Utf8PathBuf::from(ROADS_FILE));
        Self {
            paths: DatasetPaths {
                attractions: resolve_in_dir(&data_dir, &attractions),
                roads: resolve_in_dir(&data_dir, &roads),
            },
        }
    }
}

/// Merge, validate and load the dataset named by `args`.
pub(crate) fn load_dataset(args: DatasetArgs) -> Result<Graph, CliError> {
    let config = args.into_config()?;
    config.validate_sources()?;
    config.load()
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<DatasetConfig, CliError> {
    let merged = DatasetArgs::merge_from_layers(layers).map_err(CliError::from)?;
    Ok(DatasetConfig::from(merged))
}
