//! Test helpers for writing datasets to temporary directories.

use camino::{Utf8Path, Utf8PathBuf};
use std::fs;
use tempfile::TempDir;

/// Attractions on a small campus: a cycle plus one isolated building.
pub(super) const CAMPUS_ATTRACTIONS: &str = "\
name,category,rating,duration,fee,popularity,latitude,longitude
Main Gate,Entrance,4.5,10,0,120,0,0
Library,Academic,4.8,60,0,300,0,0
Canteen,Food,4.0,30,50,200,0,0
Hostel,Residence,3.9,0,0,80,0,0
Observatory,Academic,4.9,45,20,40,0,0
";

/// Roads joining the cycle `Main Gate-Library=1`, `Library-Canteen=2`,
/// `Canteen-Hostel=3`, `Hostel-Main Gate=4`.
pub(super) const CAMPUS_ROADS: &str = "\
from,to,time
Main Gate,Library,1
Library,Canteen,2
Canteen,Hostel,3
Hostel,Main Gate,4
";

pub(super) fn write_utf8(path: &Utf8Path, contents: &[u8]) {
    fs::write(path, contents).unwrap_or_else(|err| panic!("write {path}: {err}"));
}

pub(super) fn utf8_root(tmp: &TempDir) -> Utf8PathBuf {
    Utf8PathBuf::from_path_buf(tmp.path().to_path_buf()).expect("utf-8 workspace")
}

/// A temporary directory holding `attractions.csv` and `roads.csv`.
pub(super) fn campus_dataset() -> (TempDir, Utf8PathBuf) {
    let tmp = TempDir::new().expect("tempdir");
    let root = utf8_root(&tmp);
    write_utf8(&root.join("attractions.csv"), CAMPUS_ATTRACTIONS.as_bytes());
    write_utf8(&root.join("roads.csv"), CAMPUS_ROADS.as_bytes());
    (tmp, root)
}
