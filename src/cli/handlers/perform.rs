// src/cli/handlers/perform.rs

use crate::{
    cli::{args::ExpectArgs, handlers::commons},
    models::RunMode,
    system::sink::ConsoleSink,
};
use anyhow::Result;
use clap::Parser;

/// Entry point for the 'do' action: apply the pending expectations for the
/// file, then run the check.
pub fn handle(args: Vec<String>) -> Result<()> {
    let args = ExpectArgs::try_parse_from(args)?;
    let sink = ConsoleSink::new();
    commons::run_expect(&args, RunMode::Do, &sink)
}
