// src/bin/regrun.rs

use anyhow::Result;
use clap::{CommandFactory, Parser};
use colored::*;
use regrun::cli::{Cli, handlers};

// --- Command Definition and Registry ---

/// Defines an action, its aliases, and its handler function.
/// The handler signature is kept consistent across all actions for
/// simplicity in the registry.
struct CommandDefinition {
    name: &'static str,
    aliases: &'static [&'static str],
    handler: fn(Vec<String>) -> Result<()>,
}

/// The single source of truth for all actions.
/// To add a new action, simply add a new entry to this static array.
static COMMAND_REGISTRY: &[CommandDefinition] = &[
    CommandDefinition {
        name: "check",
        aliases: &[],
        handler: handlers::check::handle,
    },
    CommandDefinition {
        name: "do",
        aliases: &[],
        handler: handlers::perform::handle,
    },
    CommandDefinition {
        name: "generate",
        aliases: &["gen"],
        handler: handlers::generate::handle,
    },
];

/// Finds an action definition in the registry by its name or alias.
fn find_command(name: &str) -> Option<&'static CommandDefinition> {
    COMMAND_REGISTRY
        .iter()
        .find(|cmd| cmd.name == name || cmd.aliases.contains(&name))
}

/// The main entry point of the `regrun` binary.
/// It sets up logging, parses arguments, dispatches to the correct handler,
/// and performs centralized error handling.
fn main() {
    env_logger::init();

    if let Err(e) = run_cli(Cli::parse()) {
        eprintln!("\n{}: {:#}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

/// Routes the argument list to the requested action handler.
///
/// `regrun <file> [options]` is a shortcut for `regrun check <file>
/// [options]`.
fn run_cli(cli: Cli) -> Result<()> {
    log::debug!("CLI args parsed: {:?}", cli);

    let mut args = cli.args;
    if args.is_empty() {
        Cli::command().print_help()?;
        return Ok(());
    }

    let first = args.remove(0);
    if let Some(command) = find_command(&first) {
        (command.handler)(args)
    } else {
        // Not a known action, so it must be the target file.
        let mut check_args = vec![first];
        check_args.extend(args);
        handlers::check::handle(check_args)
    }
}
