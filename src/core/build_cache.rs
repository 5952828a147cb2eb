// src/core/build_cache.rs

use crate::constants::BUILD_CACHE_FILENAME;
use log::debug;
use std::{fs, path::Path};

/// Read-only view over the generated cache file of a build tree.
///
/// The cache is line-oriented `KEY:TYPE=VALUE` text. Lookups are prefix
/// matches against whole lines; nothing here parses the format beyond that.
#[derive(Debug, Default)]
pub struct BuildCache {
    lines: Vec<String>,
}

impl BuildCache {
    /// Loads the cache file from `build_dir`.
    ///
    /// A missing or unreadable file yields an empty cache, not an error;
    /// callers apply their own defaults when lookups come back empty.
    pub fn load(build_dir: &Path) -> Self {
        let cache_file = build_dir.join(BUILD_CACHE_FILENAME);
        let lines = match fs::read_to_string(&cache_file) {
            Ok(content) => content.lines().map(str::to_string).collect(),
            Err(e) => {
                debug!(
                    "No readable build cache at '{}': {}",
                    cache_file.display(),
                    e
                );
                Vec::new()
            }
        };
        Self { lines }
    }

    /// Returns the text following `key` on the first line whose prefix
    /// exactly matches it, skipping one delimiter character.
    ///
    /// Scanning is in file order and stops at the first match. A line that
    /// is exactly `key` with nothing following yields `None`.
    pub fn find(&self, key: &str) -> Option<&str> {
        self.lines
            .iter()
            .find(|line| line.starts_with(key))
            .and_then(|line| line.get(key.len() + 1..))
    }
}
