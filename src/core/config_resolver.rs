// src/core/config_resolver.rs

use crate::{
    constants::{
        DEFAULT_INTERPRETER, INTERPRETER_KEY, OUTPUT_PROJECT_FILES, TEMP_DIR_NAME, TOOL_HOME_KEY,
        USER_CONFIG_FILENAME,
    },
    core::{build_cache::BuildCache, project_file, user_config::UserConfig},
    dev_utils::BlockTimer,
    models::InvocationContext,
};
use log::{debug, warn};
use std::path::{Path, PathBuf};

/// Environment facts the resolver needs from its host.
///
/// An IDE host supplies these from its active editor and solution; the CLI
/// host supplies them from arguments and filesystem discovery.
pub trait Workspace {
    /// Absolute path of the file the operation targets, if any.
    fn active_file(&self) -> Option<PathBuf>;
    /// Root of the generated build tree, if one can be determined.
    fn build_directory(&self) -> Option<PathBuf>;
    /// Name of the active build configuration, if known.
    fn active_configuration(&self) -> Option<String>;
    /// Flush any unsaved editor state before resolution reads from disk.
    fn save_all(&self);
}

/// Resolves one immutable [`InvocationContext`] from the workspace and disk.
///
/// Returns `None` when a precondition is missing: no target file, no build
/// tree, or no tool home in the build cache. That outcome is a quiet no-op,
/// reported only at debug level — the operation simply does not run.
///
/// Everything else degrades to defaults. Context is never cached; every
/// invocation re-reads the build cache and user config.
pub fn resolve(workspace: &dyn Workspace) -> Option<InvocationContext> {
    let _timer = BlockTimer::new("config_resolver::resolve");
    workspace.save_all();

    let target_file = match workspace.active_file() {
        Some(file) => file,
        None => {
            debug!("No active target file; nothing to do.");
            return None;
        }
    };
    let build_directory = match workspace.build_directory() {
        Some(dir) => dir,
        None => {
            debug!("No build directory; nothing to do.");
            return None;
        }
    };

    let cache = BuildCache::load(&build_directory);
    let tool_home = match cache.find(TOOL_HOME_KEY) {
        Some(home) => PathBuf::from(home),
        None => {
            debug!("Build cache has no '{}'; nothing to do.", TOOL_HOME_KEY);
            return None;
        }
    };

    let user_config =
        locate_user_config(&build_directory, &tool_home).map(|path| UserConfig::load(&path));

    // An existing config without `keep-temp` turns the flag off; only the
    // complete absence of a config file leaves it on.
    let trace_enabled = user_config
        .as_ref()
        .is_some_and(|config| config.key_exists("trace", None));
    let keep_temp_enabled = user_config
        .as_ref()
        .map_or(true, |config| config.key_exists("keep-temp", None));
    let extra_options = user_config
        .as_ref()
        .map(|config| config.read("options", None))
        .unwrap_or_default();

    let configured_temp = user_config
        .as_ref()
        .map(|config| config.read("temp", None))
        .unwrap_or_default();
    let temp_directory = if configured_temp.is_empty() {
        build_directory.join(TEMP_DIR_NAME)
    } else {
        expand_configured_path(&configured_temp)
    };

    let interpreter = cache
        .find(INTERPRETER_KEY)
        .unwrap_or(DEFAULT_INTERPRETER)
        .to_string();

    let output_directory = match workspace.active_configuration() {
        Some(configuration) => OUTPUT_PROJECT_FILES
            .iter()
            .find_map(|relative| {
                project_file::out_dir(&build_directory.join(relative), &configuration)
            })
            .unwrap_or_default(),
        None => String::new(),
    };

    Some(InvocationContext {
        build_directory,
        tool_home,
        interpreter,
        trace_enabled,
        keep_temp_enabled,
        extra_options,
        temp_directory,
        output_directory,
        target_file,
    })
}

/// Probes the candidate directories for the user configuration file and
/// returns the first hit.
///
/// Candidates are probed in fixed order: the build directory, the tool
/// home's parent, then the user's home directory. The probe path is
/// anchored at the build directory for every candidate; the candidate
/// itself is not consulted.
fn locate_user_config(build_directory: &Path, tool_home: &Path) -> Option<PathBuf> {
    let candidates = [
        Some(build_directory.to_path_buf()),
        tool_home.parent().map(Path::to_path_buf),
        dirs::home_dir(),
    ];
    for _candidate in candidates.iter().flatten() {
        let probe = build_directory.join(USER_CONFIG_FILENAME);
        if probe.is_file() {
            debug!("User config found at '{}'", probe.display());
            return Some(probe);
        }
    }
    None
}

/// Expands `~` and environment variables in a configured path. Expansion
/// failures keep the verbatim value.
fn expand_configured_path(raw: &str) -> PathBuf {
    match shellexpand::full(raw) {
        Ok(expanded) => PathBuf::from(expanded.into_owned()),
        Err(e) => {
            warn!("Could not expand configured path '{}': {}", raw, e);
            PathBuf::from(raw)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::BUILD_CACHE_FILENAME;
    use std::fs;
    use tempfile::{TempDir, tempdir};

    struct StubWorkspace {
        file: Option<PathBuf>,
        build: Option<PathBuf>,
        configuration: Option<String>,
    }

    impl Workspace for StubWorkspace {
        fn active_file(&self) -> Option<PathBuf> {
            self.file.clone()
        }
        fn build_directory(&self) -> Option<PathBuf> {
            self.build.clone()
        }
        fn active_configuration(&self) -> Option<String> {
            self.configuration.clone()
        }
        fn save_all(&self) {}
    }

    fn build_tree(cache_content: &str) -> (TempDir, StubWorkspace) {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(BUILD_CACHE_FILENAME), cache_content).unwrap();
        let file = dir.path().join("a.cpp");
        fs::write(&file, "").unwrap();
        let workspace = StubWorkspace {
            file: Some(file),
            build: Some(dir.path().to_path_buf()),
            configuration: None,
        };
        (dir, workspace)
    }

    #[test]
    fn resolution_without_a_target_file_is_a_quiet_no_op() {
        let workspace = StubWorkspace {
            file: None,
            build: Some(PathBuf::from("/tmp")),
            configuration: None,
        };
        assert!(resolve(&workspace).is_none());
    }

    #[test]
    fn resolution_without_a_tool_home_is_a_quiet_no_op() {
        let (_dir, workspace) = build_tree("SOMETHING_ELSE:BOOL=ON\n");
        assert!(resolve(&workspace).is_none());
    }

    #[test]
    fn defaults_apply_when_no_user_config_exists() {
        let (dir, workspace) = build_tree(
            "CMAKE_HOME_DIRECTORY:INTERNAL=/opt/maketools\nPYTHON_COMMAND:STRING=python3\n",
        );
        let context = resolve(&workspace).unwrap();
        assert!(!context.trace_enabled);
        assert!(context.keep_temp_enabled);
        assert_eq!(context.extra_options, "");
        assert_eq!(context.interpreter, "python3");
        assert_eq!(context.tool_home, PathBuf::from("/opt/maketools"));
        assert_eq!(context.temp_directory, dir.path().join(TEMP_DIR_NAME));
        assert_eq!(context.output_directory, "");
    }

    #[test]
    fn interpreter_falls_back_to_the_bare_literal() {
        let (_dir, workspace) = build_tree("CMAKE_HOME_DIRECTORY:INTERNAL=/opt/maketools\n");
        let context = resolve(&workspace).unwrap();
        assert_eq!(context.interpreter, DEFAULT_INTERPRETER);
    }

    #[test]
    fn a_user_config_in_the_build_directory_governs_the_flags() {
        let (dir, workspace) = build_tree("CMAKE_HOME_DIRECTORY:INTERNAL=/opt/maketools\n");
        fs::write(
            dir.path().join(USER_CONFIG_FILENAME),
            "trace = on\noptions = --strict\ntemp = scratch\n",
        )
        .unwrap();
        let context = resolve(&workspace).unwrap();
        assert!(context.trace_enabled);
        // The key is absent from an existing config, so the flag is off.
        assert!(!context.keep_temp_enabled);
        assert_eq!(context.extra_options, "--strict");
        assert_eq!(context.temp_directory, PathBuf::from("scratch"));
    }

    #[test]
    fn the_output_directory_comes_from_the_first_matching_project_file() {
        let (dir, mut workspace) = build_tree("CMAKE_HOME_DIRECTORY:INTERNAL=/opt/maketools\n");
        let project_dir = dir.path().join("qacpp_com");
        fs::create_dir_all(&project_dir).unwrap();
        fs::write(
            project_dir.join("qacpp.vcxproj"),
            r#"<OutDir Condition="'Debug|x64'">bin\Debug\</OutDir>"#,
        )
        .unwrap();
        workspace.configuration = Some("Debug".to_string());
        let context = resolve(&workspace).unwrap();
        assert_eq!(context.output_directory, r"bin\Debug\");
    }

    #[test]
    fn no_configuration_name_skips_the_output_lookup() {
        let (_dir, workspace) = build_tree("CMAKE_HOME_DIRECTORY:INTERNAL=/opt/maketools\n");
        let context = resolve(&workspace).unwrap();
        assert_eq!(context.output_directory, "");
    }
}
