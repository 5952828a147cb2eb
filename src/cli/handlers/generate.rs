// src/cli/handlers/generate.rs

use crate::{
    cli::{args::ExpectArgs, handlers::commons},
    models::RunMode,
    system::sink::ConsoleSink,
};
use anyhow::Result;
use clap::Parser;

/// Entry point for the 'generate' action: regenerate the recorded
/// expectations for the file, then run the check.
pub fn handle(args: Vec<String>) -> Result<()> {
    let args = ExpectArgs::try_parse_from(args)?;
    let sink = ConsoleSink::new();
    commons::run_expect(&args, RunMode::Generate, &sink)
}
