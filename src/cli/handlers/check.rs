// src/cli/handlers/check.rs

use crate::{
    cli::{args::ExpectArgs, handlers::commons},
    models::RunMode,
    system::sink::ConsoleSink,
};
use anyhow::Result;
use clap::Parser;

/// Entry point for the 'check' action: compare the file's current output
/// against its recorded expectations.
pub fn handle(args: Vec<String>) -> Result<()> {
    let args = ExpectArgs::try_parse_from(args)?;
    let sink = ConsoleSink::new();
    commons::run_expect(&args, RunMode::Check, &sink)
}
