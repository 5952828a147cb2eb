// src/core/user_config.rs

use crate::constants::DEFAULT_CONFIG_SECTION;
use log::debug;
use std::{fs, path::Path};

/// Read-only view over the optional `.expectconfig` file.
///
/// The format is classic section-delimited `key=value` text. Keys before the
/// first `[SECTION]` header belong to the default section; `;` and `#` start
/// comment lines; section and key names compare ASCII case-insensitively;
/// the first occurrence of a key within a section wins.
#[derive(Debug, Default)]
pub struct UserConfig {
    // (section, key, value) in file order. The file is a handful of lines;
    // a linear scan keeps first-match-wins trivial.
    entries: Vec<(String, String, String)>,
}

impl UserConfig {
    /// Loads `path`.
    ///
    /// A missing or unreadable file yields an empty store: every read comes
    /// back empty and every existence check false.
    pub fn load(path: &Path) -> Self {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                debug!("No readable user config at '{}': {}", path.display(), e);
                return Self::default();
            }
        };
        Self::parse(&content)
    }

    fn parse(content: &str) -> Self {
        let mut entries = Vec::new();
        let mut section = DEFAULT_CONFIG_SECTION.to_string();
        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with(';') || line.starts_with('#') {
                continue;
            }
            if let Some(name) = line.strip_prefix('[').and_then(|rest| rest.strip_suffix(']')) {
                section = name.trim().to_string();
                continue;
            }
            if let Some((key, value)) = line.split_once('=') {
                entries.push((
                    section.clone(),
                    key.trim().to_string(),
                    value.trim().to_string(),
                ));
            }
            // A line with neither a header nor a '=' is ignored.
        }
        Self { entries }
    }

    /// Returns the value for `key` within `section`, or the empty string
    /// when absent. Omitting the section reads the default section.
    pub fn read(&self, key: &str, section: Option<&str>) -> String {
        let section = section.unwrap_or(DEFAULT_CONFIG_SECTION);
        self.entries
            .iter()
            .find(|(s, k, _)| s.eq_ignore_ascii_case(section) && k.eq_ignore_ascii_case(key))
            .map(|(_, _, value)| value.clone())
            .unwrap_or_default()
    }

    /// True iff [`read`](Self::read) returns a non-empty string for the same
    /// key/section pair. A key assigned an empty value does not exist.
    pub fn key_exists(&self, key: &str, section: Option<&str>) -> bool {
        !self.read(key, section).is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    const SAMPLE: &str = "\
; regression runner settings
trace = on
options=--verbose --color
empty =

[paths]
temp = ~/regtest-scratch
temp = /ignored/second/occurrence

[PATHS]
shadowed = later-section
";

    #[test]
    fn reads_from_the_default_section_before_any_header() {
        let config = UserConfig::parse(SAMPLE);
        assert_eq!(config.read("trace", None), "on");
        assert_eq!(config.read("options", None), "--verbose --color");
    }

    #[test]
    fn omitted_section_equals_the_default_literal() {
        let config = UserConfig::parse(SAMPLE);
        assert_eq!(
            config.read("trace", None),
            config.read("trace", Some(DEFAULT_CONFIG_SECTION))
        );
        assert_eq!(
            config.key_exists("options", None),
            config.key_exists("options", Some(DEFAULT_CONFIG_SECTION))
        );
    }

    #[test]
    fn first_occurrence_within_a_section_wins() {
        let config = UserConfig::parse(SAMPLE);
        assert_eq!(config.read("temp", Some("paths")), "~/regtest-scratch");
    }

    #[test]
    fn section_and_key_names_ignore_ascii_case() {
        let config = UserConfig::parse(SAMPLE);
        assert_eq!(config.read("TEMP", Some("Paths")), "~/regtest-scratch");
        assert_eq!(config.read("shadowed", Some("paths")), "later-section");
    }

    #[test]
    fn key_exists_mirrors_a_non_empty_read() {
        let config = UserConfig::parse(SAMPLE);
        assert!(config.key_exists("trace", None));
        assert!(!config.key_exists("empty", None));
        assert!(!config.key_exists("absent", None));
        assert!(config.read("empty", None).is_empty());
    }

    #[test]
    fn missing_file_behaves_as_an_empty_store() {
        let dir = tempdir().unwrap();
        let config = UserConfig::load(&dir.path().join(".expectconfig"));
        assert_eq!(config.read("trace", None), "");
        assert!(!config.key_exists("trace", None));
    }

    #[test]
    fn comment_and_malformed_lines_are_ignored() {
        let config = UserConfig::parse("# comment\n; comment\nnot a pair\nkey=value\n");
        assert_eq!(config.read("key", None), "value");
        assert!(!config.key_exists("not a pair", None));
    }

    #[test]
    fn load_reads_a_real_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(".expectconfig");
        fs::write(&path, "keep-temp = 1\n").unwrap();
        let config = UserConfig::load(&path);
        assert!(config.key_exists("keep-temp", None));
    }
}
