// src/core/project_file.rs

use lazy_static::lazy_static;
use log::debug;
use regex::Regex;
use std::{fs, path::Path};

lazy_static! {
    // <OutDir Condition="...">value</OutDir>, scanned textually. The probed
    // files are machine-generated with one element per line; a full XML
    // parse buys nothing here.
    static ref OUT_DIR_RE: Regex =
        Regex::new(r#"<OutDir\s+Condition\s*=\s*"([^"]*)"\s*>([^<]*)</OutDir>"#).unwrap();
}

/// Returns the output directory a project file declares for `configuration`:
/// the inner text of the first `OutDir` element whose condition attribute
/// contains the configuration name, verbatim.
///
/// A missing or unreadable project file yields `None`.
pub fn out_dir(project: &Path, configuration: &str) -> Option<String> {
    let content = match fs::read_to_string(project) {
        Ok(content) => content,
        Err(e) => {
            debug!("No readable project file at '{}': {}", project.display(), e);
            return None;
        }
    };
    OUT_DIR_RE
        .captures_iter(&content)
        .find(|caps| {
            caps.get(1)
                .is_some_and(|condition| condition.as_str().contains(configuration))
        })
        .and_then(|caps| caps.get(2).map(|value| value.as_str().to_string()))
}
