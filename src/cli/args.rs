// src/cli/args.rs
use clap::Parser;
use std::path::PathBuf;

/// Arguments shared by every expect action.
#[derive(Parser, Debug, Default)]
#[command(no_binary_name = true)] // Important: the action name is consumed by the dispatcher
pub struct ExpectArgs {
    /// The file to run the expect script against.
    pub file: Option<PathBuf>,

    /// Root of the generated build tree. Discovered from the file's
    /// location when omitted.
    #[arg(long)]
    pub build_dir: Option<PathBuf>,

    /// Build configuration used for the output-directory lookup. Defaults
    /// to the build type recorded in the build cache.
    #[arg(long)]
    pub configuration: Option<String>,
}
