// src/core/paths.rs

use crate::constants::BUILD_CACHE_FILENAME;
use log::debug;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Ascends from `start` looking for a directory that contains the build
/// cache file. `start` may be a file; the search begins at its directory.
pub fn find_build_directory(start: &Path) -> Option<PathBuf> {
    let start = dunce::canonicalize(start).ok()?;
    let mut current = if start.is_dir() {
        start.as_path()
    } else {
        start.parent()?
    };
    loop {
        if current.join(BUILD_CACHE_FILENAME).is_file() {
            debug!("Build tree found at '{}'", current.display());
            return Some(current.to_path_buf());
        }
        current = current.parent()?;
    }
}

/// Walks the tree below `root` for the first file with the given name and
/// returns the directory containing it.
///
/// The walk is iterative and depth-bounded, so deep or looping directory
/// structures cannot run it away. Symlinks are not followed.
pub fn find_marker_dir(root: &Path, marker: &str, max_depth: usize) -> Option<PathBuf> {
    WalkDir::new(root)
        .max_depth(max_depth)
        .follow_links(false)
        .into_iter()
        .filter_map(Result::ok)
        .find(|entry| entry.file_type().is_file() && entry.file_name() == OsStr::new(marker))
        .and_then(|entry| entry.path().parent().map(Path::to_path_buf))
}
