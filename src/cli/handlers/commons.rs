// src/cli/handlers/commons.rs

// This module contains the shared pipeline used by every action handler.

use anyhow::{Context, Result, anyhow};
use log::debug;
use std::env;
use std::path::PathBuf;

use crate::{
    cli::args::ExpectArgs,
    constants::{BUILD_CACHE_FILENAME, BUILD_TYPE_KEY, MARKER_SEARCH_MAX_DEPTH},
    core::{
        build_cache::BuildCache,
        command_builder,
        config_resolver::{self, Workspace},
        paths,
    },
    models::{OutputLine, RunMode},
    system::{executor, sink::OutputSink},
};

/// Workspace facts gathered once from the CLI arguments and filesystem.
///
/// Discovery happens in the constructor; the trait accessors only hand the
/// results out, so the resolver can call them in any order without
/// repeating filesystem walks.
#[derive(Debug)]
pub struct CliWorkspace {
    target_file: Option<PathBuf>,
    build_directory: Option<PathBuf>,
    configuration: Option<String>,
}

impl CliWorkspace {
    /// Discovers the workspace for one invocation.
    ///
    /// The build tree is the `--build-dir` override when given, otherwise
    /// the nearest ancestor of the target file containing a build cache,
    /// otherwise the first build cache found in a bounded walk below the
    /// current directory. The configuration name falls back to the build
    /// type recorded in the build cache.
    pub fn discover(args: &ExpectArgs) -> Self {
        let target_file = args
            .file
            .as_ref()
            .and_then(|file| dunce::canonicalize(file).ok());
        let build_directory = args
            .build_dir
            .clone()
            .or_else(|| target_file.as_deref().and_then(paths::find_build_directory))
            .or_else(|| {
                let cwd = env::current_dir().ok()?;
                paths::find_marker_dir(&cwd, BUILD_CACHE_FILENAME, MARKER_SEARCH_MAX_DEPTH)
            });
        let configuration = args.configuration.clone().or_else(|| {
            build_directory.as_deref().and_then(|dir| {
                BuildCache::load(dir)
                    .find(BUILD_TYPE_KEY)
                    .map(str::to_string)
            })
        });
        Self {
            target_file,
            build_directory,
            configuration,
        }
    }
}

impl Workspace for CliWorkspace {
    fn active_file(&self) -> Option<PathBuf> {
        self.target_file.clone()
    }

    fn build_directory(&self) -> Option<PathBuf> {
        self.build_directory.clone()
    }

    fn active_configuration(&self) -> Option<String> {
        self.configuration.clone()
    }

    fn save_all(&self) {
        // CLI invocations read files already on disk; editor hosts hook
        // this seam when embedding.
    }
}

/// Resolves the context and runs one expect action against the sink.
///
/// A missing file argument is a usage error. Everything downstream follows
/// the resolver's contract: precondition misses are a quiet no-op, spawn
/// failures surface as errors, and the results view is activated only
/// after a run that actually started, whatever its exit code.
pub fn run_expect(args: &ExpectArgs, mode: RunMode, sink: &dyn OutputSink) -> Result<()> {
    if args.file.is_none() {
        return Err(anyhow!(format!(
            t!("run.error.missing_file"),
            action = mode
        )));
    }

    let workspace = CliWorkspace::discover(args);
    let Some(context) = config_resolver::resolve(&workspace) else {
        debug!("Preconditions for '{}' not met; nothing to do.", mode);
        return Ok(());
    };

    let (program, argument_line) = command_builder::build(&context, mode);
    sink.clear();
    if context.trace_enabled {
        sink.write(&OutputLine::Plain(format!("{} {}\n", program, argument_line)));
    }
    let status = executor::run_streaming(&program, &argument_line, sink)
        .with_context(|| format!(t!("run.error.script_failed"), command = program))?;
    debug!("Expect script exited with {}.", status);
    sink.activate();
    Ok(())
}
