//! CSV dataset loading.
//!
//! A dataset is two headed tables. `attractions.csv` carries
//! `name,category,rating,duration,fee,popularity,latitude,longitude` and
//! `roads.csv` carries `from,to,time` with endpoints given by attraction name.
//! Parsing is lenient: blank numbers default to zero, unparsable numbers are
//! logged and defaulted, and roads naming unknown attractions are skipped.

use std::io::Read;
use std::str::FromStr;

use camino::{Utf8Path, Utf8PathBuf};
use csv::{ReaderBuilder, StringRecord, Trim};
use geo::Coord;
use log::{debug, warn};
use serde::Deserialize;
use wayfinder_core::{Attraction, AttractionDetails, Graph, TravelTime, VertexId};

use crate::{DatasetFile, LoadError};

/// File name of the attractions table inside a data directory.
pub const ATTRACTIONS_FILE: &str = "attractions.csv";
/// File name of the roads table inside a data directory.
pub const ROADS_FILE: &str = "roads.csv";

/// Travel time assumed for a road whose `time` column is empty.
pub const DEFAULT_TRAVEL_TIME: TravelTime = 1.0;

/// Locations of the two tables making up a dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetPaths {
    /// Path to the attractions table.
    pub attractions: Utf8PathBuf,
    /// Path to the roads table.
    pub roads: Utf8PathBuf,
}

impl DatasetPaths {
    /// Default file names inside `dir`.
    ///
    /// # Examples
    /// ```
    /// use camino::Utf8Path;
    /// use wayfinder_data::DatasetPaths;
    ///
    /// let paths = DatasetPaths::in_dir(Utf8Path::new("data"));
    /// assert_eq!(paths.roads, "data/roads.csv");
    /// ```
    #[must_use]
    pub fn in_dir(dir: &Utf8Path) -> Self {
        Self {
            attractions: dir.join(ATTRACTIONS_FILE),
            roads: dir.join(ROADS_FILE),
        }
    }

    /// Load both tables into a graph.
    ///
    /// # Errors
    ///
    /// See [`load_graph`].
    pub fn load(&self) -> Result<Graph, LoadError> {
        load_graph(&self.attractions, &self.roads)
    }
}

#[derive(Debug, Deserialize)]
struct AttractionRow {
    name: String,
    #[serde(default)]
    category: Option<String>,
    #[serde(default)]
    rating: Option<String>,
    #[serde(default)]
    duration: Option<String>,
    #[serde(default)]
    fee: Option<String>,
    #[serde(default)]
    popularity: Option<String>,
    #[serde(default)]
    latitude: Option<String>,
    #[serde(default)]
    longitude: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RoadRow {
    from: String,
    to: String,
    #[serde(default)]
    time: Option<String>,
}

/// Load a dataset from two CSV files on disk.
///
/// # Errors
///
/// Returns [`LoadError::Open`] when a file cannot be opened and otherwise
/// the errors of [`load_graph_from_readers`].
pub fn load_graph(attractions: &Utf8Path, roads: &Utf8Path) -> Result<Graph, LoadError> {
    let open = |file: DatasetFile, path: &Utf8Path| {
        wayfinder_fs::open_utf8_file(path).map_err(|source| LoadError::Open {
            file,
            path: path.to_path_buf(),
            source,
        })
    };
    let attractions_file = open(DatasetFile::Attractions, attractions)?;
    let roads_file = open(DatasetFile::Roads, roads)?;
    let graph = load_graph_from_readers(attractions_file, roads_file)?;
    debug!(
        "loaded {} attractions from {attractions} and {roads}",
        graph.len()
    );
    Ok(graph)
}

/// Parse a dataset from any pair of readers.
///
/// Ids are assigned densely in attraction file order, starting at zero.
/// Rows with a blank name are skipped.
///
/// # Errors
///
/// - [`LoadError::Csv`] when a table is not valid CSV or lacks a required
///   column (`name`, or `from` and `to`).
/// - [`LoadError::NegativeTravelTime`] when a road has a negative time.
/// - [`LoadError::Graph`] for duplicate attraction names.
///
/// # Examples
/// ```
/// use wayfinder_data::load_graph_from_readers;
///
/// let attractions = "name,category\nGate,Entrance\nLibrary,Academic\n";
/// let roads = "from,to,time\nGate,Library,4\n";
/// let graph = load_graph_from_readers(attractions.as_bytes(), roads.as_bytes())?;
///
/// assert_eq!(graph.edge_weight(0, 1), 4.0);
/// # Ok::<(), wayfinder_data::LoadError>(())
/// ```
pub fn load_graph_from_readers<A, R>(attractions: A, roads: R) -> Result<Graph, LoadError>
where
    A: Read,
    R: Read,
{
    let mut graph = Graph::new();
    read_attractions(&mut graph, attractions)?;
    read_roads(&mut graph, roads)?;
    Ok(graph)
}

fn read_attractions<A: Read>(graph: &mut Graph, source: A) -> Result<(), LoadError> {
    let csv_error = |err| LoadError::Csv {
        file: DatasetFile::Attractions,
        source: err,
    };
    let mut reader = ReaderBuilder::new()
        .trim(Trim::All)
        .flexible(true)
        .from_reader(source);
    let headers = reader.headers().map_err(csv_error)?.clone();
    let mut next_id: VertexId = 0;
    for parsed in reader.records() {
        let record = parsed.map_err(csv_error)?;
        let row: AttractionRow = record.deserialize(Some(&headers)).map_err(csv_error)?;
        let line = line_of(&record);
        if row.name.is_empty() {
            warn!("skipping attraction on line {line}: blank name");
            continue;
        }
        graph.add_attraction(attraction_from_row(next_id, row, line))?;
        next_id += 1;
    }
    Ok(())
}

fn attraction_from_row(id: VertexId, row: AttractionRow, line: u64) -> Attraction {
    let details = AttractionDetails {
        rating: lenient(row.rating.as_deref(), "rating", line),
        visit_duration: lenient(row.duration.as_deref(), "duration", line),
        entry_fee: lenient(row.fee.as_deref(), "fee", line),
        popularity: lenient(row.popularity.as_deref(), "popularity", line),
        ..AttractionDetails::default()
    };
    let latitude: f64 = lenient(row.latitude.as_deref(), "latitude", line);
    let longitude: f64 = lenient(row.longitude.as_deref(), "longitude", line);
    Attraction {
        location: location(latitude, longitude),
        ..Attraction::new(id, row.name, row.category.unwrap_or_default()).with_details(details)
    }
}

/// `(0, 0)` marks a missing position in the source data.
fn location(latitude: f64, longitude: f64) -> Option<Coord<f64>> {
    let unset = latitude == 0.0 && longitude == 0.0;
    (!unset && latitude.is_finite() && longitude.is_finite()).then_some(Coord {
        x: longitude,
        y: latitude,
    })
}

fn read_roads<R: Read>(graph: &mut Graph, source: R) -> Result<(), LoadError> {
    let csv_error = |err| LoadError::Csv {
        file: DatasetFile::Roads,
        source: err,
    };
    let mut reader = ReaderBuilder::new()
        .trim(Trim::All)
        .flexible(true)
        .from_reader(source);
    let headers = reader.headers().map_err(csv_error)?.clone();
    for parsed in reader.records() {
        let record = parsed.map_err(csv_error)?;
        let row: RoadRow = record.deserialize(Some(&headers)).map_err(csv_error)?;
        let line = line_of(&record);
        let (Some(from), Some(to)) = (graph.id_by_name(&row.from), graph.id_by_name(&row.to))
        else {
            warn!(
                "skipping road {} -> {} on line {line}: unknown attraction",
                row.from, row.to
            );
            continue;
        };
        let time = travel_time(row.time.as_deref(), line);
        if time < 0.0 {
            return Err(LoadError::NegativeTravelTime {
                from: row.from,
                to: row.to,
                time,
                line,
            });
        }
        graph.add_edge(from, to, time)?;
    }
    Ok(())
}

fn travel_time(raw: Option<&str>, line: u64) -> TravelTime {
    raw.filter(|value| !value.is_empty())
        .map_or(DEFAULT_TRAVEL_TIME, |value| {
            value.parse().unwrap_or_else(|_| {
                warn!("line {line}: unparsable time {value:?}, using {DEFAULT_TRAVEL_TIME}");
                DEFAULT_TRAVEL_TIME
            })
        })
}

/// Parse an optional numeric field, treating blanks and garbage as the
/// type's default.
fn lenient<T>(raw: Option<&str>, field: &str, line: u64) -> T
where
    T: FromStr + Default,
{
    raw.filter(|value| !value.is_empty())
        .map_or_else(T::default, |value| {
            value.parse().unwrap_or_else(|_| {
                warn!("line {line}: unparsable {field} {value:?}, defaulting");
                T::default()
            })
        })
}

fn line_of(record: &StringRecord) -> u64 {
    record.position().map_or(0, csv::Position::line)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const ATTRACTIONS: &str = "\
name,category,rating,duration,fee,popularity,latitude,longitude
Main Gate,Entrance,4.5,10,0,120,26.4710,73.1134
Library,Academic,,,,,0,0
Canteen,Food,oops,30,50,,26.4720,73.1140
";

    fn load(attractions: &str, roads: &str) -> Result<Graph, LoadError> {
        load_graph_from_readers(attractions.as_bytes(), roads.as_bytes())
    }

    #[rstest]
    fn assigns_dense_ids_in_file_order() {
        let graph = load(ATTRACTIONS, "from,to,time\n").expect("load dataset");
        assert_eq!(graph.len(), 3);
        assert_eq!(graph.id_by_name("Main Gate"), Some(0));
        assert_eq!(graph.id_by_name("Library"), Some(1));
        assert_eq!(graph.id_by_name("Canteen"), Some(2));
    }

    #[rstest]
    fn parses_details_and_locations() {
        let graph = load(ATTRACTIONS, "from,to,time\n").expect("load dataset");
        let gate = graph.attraction(0).expect("gate");
        assert_eq!(gate.category, "Entrance");
        assert_eq!(gate.details.rating, 4.5);
        assert_eq!(gate.details.popularity, 120);
        assert_eq!(gate.location, Some(Coord { x: 73.1134, y: 26.4710 }));
    }

    #[rstest]
    fn zero_coordinates_mean_unknown_location() {
        let graph = load(ATTRACTIONS, "from,to,time\n").expect("load dataset");
        assert_eq!(graph.location(1), None);
    }

    #[rstest]
    fn unparsable_numbers_default_to_zero() {
        let graph = load(ATTRACTIONS, "from,to,time\n").expect("load dataset");
        let canteen = graph.attraction(2).expect("canteen");
        assert_eq!(canteen.details.rating, 0.0);
        assert_eq!(canteen.details.visit_duration, 30.0);
        assert_eq!(canteen.details.entry_fee, 50.0);
    }

    #[rstest]
    #[case::explicit("Main Gate,Library,7", 7.0)]
    #[case::blank("Main Gate,Library,", DEFAULT_TRAVEL_TIME)]
    #[case::missing_column("Main Gate,Library", DEFAULT_TRAVEL_TIME)]
    #[case::garbage("Main Gate,Library,soon", DEFAULT_TRAVEL_TIME)]
    fn reads_travel_times(#[case] road: &str, #[case] expected: TravelTime) {
        let graph = load(ATTRACTIONS, &format!("from,to,time\n{road}\n")).expect("load dataset");
        assert_eq!(graph.edge_weight(0, 1), expected);
        assert_eq!(graph.edge_weight(1, 0), expected);
    }

    #[rstest]
    fn skips_roads_to_unknown_attractions() {
        let roads = "from,to,time\nMain Gate,Nowhere,3\nLibrary,Canteen,2\n";
        let graph = load(ATTRACTIONS, roads).expect("load dataset");
        assert_eq!(graph.edges().len(), 1);
        assert_eq!(graph.edge_weight(1, 2), 2.0);
    }

    #[rstest]
    fn skips_blank_names_without_consuming_ids() {
        let attractions = "name,category\nGate,Entrance\n,Ghost\nLibrary,Academic\n";
        let graph = load(attractions, "from,to,time\n").expect("load dataset");
        assert_eq!(graph.id_by_name("Library"), Some(1));
    }

    #[rstest]
    fn rejects_negative_travel_times() {
        let roads = "from,to,time\nMain Gate,Library,1\nLibrary,Canteen,-2\n";
        let err = load(ATTRACTIONS, roads).expect_err("negative time rejected");
        match err {
            LoadError::NegativeTravelTime { time, line, .. } => {
                assert_eq!(time, -2.0);
                assert_eq!(line, 3);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[rstest]
    fn rejects_duplicate_names() {
        let attractions = "name,category\nGate,Entrance\nGate,Exit\n";
        let err = load(attractions, "from,to,time\n").expect_err("duplicate rejected");
        assert!(matches!(err, LoadError::Graph(_)), "unexpected error: {err}");
    }

    #[rstest]
    fn requires_a_name_column() {
        let err = load("title,category\nGate,Entrance\n", "from,to,time\n")
            .expect_err("missing column rejected");
        assert!(
            matches!(
                err,
                LoadError::Csv {
                    file: DatasetFile::Attractions,
                    ..
                }
            ),
            "unexpected error: {err}"
        );
    }

    #[rstest]
    #[case(0.0, 0.0, None)]
    #[case(f64::NAN, 73.0, None)]
    #[case(26.0, 0.0, Some(Coord { x: 0.0, y: 26.0 }))]
    fn translates_coordinates(
        #[case] latitude: f64,
        #[case] longitude: f64,
        #[case] expected: Option<Coord<f64>>,
    ) {
        assert_eq!(location(latitude, longitude), expected);
    }
}
