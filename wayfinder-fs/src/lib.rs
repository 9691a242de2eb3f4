//! Capability-based file helpers for dataset access, built on `cap-std` and
//! `camino`.
#![forbid(unsafe_code)]

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::{ambient_authority, fs_utf8};
use std::io;

/// Open a UTF-8 file path for reading using ambient authority.
///
/// # Errors
///
/// Propagates the underlying I/O error, e.g. `NotFound`.
pub fn open_utf8_file(path: &Utf8Path) -> io::Result<fs_utf8::File> {
    fs_utf8::File::open_ambient(path, ambient_authority())
}

/// Resolve the directory containing `path` and return it with the file name.
///
/// # Errors
///
/// Fails when `path` has no file name or its parent cannot be opened.
pub fn open_dir_and_file(path: &Utf8Path) -> io::Result<(fs_utf8::Dir, String)> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_str().is_empty() => parent,
        _ => Utf8Path::new("."),
    };
    let file_name = path
        .file_name()
        .ok_or_else(|| io::Error::other(format!("{path} does not name a file")))?
        .to_owned();
    let dir = fs_utf8::Dir::open_ambient_dir(parent, ambient_authority())?;
    Ok((dir, file_name))
}

/// Return whether `path` is a regular file.
///
/// # Errors
///
/// Propagates I/O errors, including `NotFound` when `path` or its parent
/// does not exist.
pub fn file_is_file(path: &Utf8Path) -> io::Result<bool> {
    let (dir, name) = open_dir_and_file(path)?;
    dir.metadata(name.as_str()).map(|meta| meta.is_file())
}

/// Join `path` onto `dir` unless it is already absolute.
///
/// # Examples
/// ```
/// use camino::Utf8Path;
/// use wayfinder_fs::resolve_in_dir;
///
/// let dir = Utf8Path::new("data");
/// assert_eq!(resolve_in_dir(dir, Utf8Path::new("roads.csv")), "data/roads.csv");
/// ```
#[must_use]
pub fn resolve_in_dir(dir: &Utf8Path, path: &Utf8Path) -> Utf8PathBuf {
    if path.is_absolute() {
        path.to_owned()
    } else {
        dir.join(path)
    }
}
