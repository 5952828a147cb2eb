// src/core/command_builder.rs

use crate::constants::EXPECT_SCRIPT_FILENAME;
use crate::models::{InvocationContext, RunMode};

/// Assembles the interpreter invocation for one run.
///
/// Returns the executable and a single argument line; the executor splits
/// the line into argv without any shell involvement. Fragment order is
/// fixed, and each optional fragment appears only when its source value is
/// set. `extra_options` is opaque text: it is never inspected or quoted
/// here.
pub fn build(context: &InvocationContext, mode: RunMode) -> (String, String) {
    // Invariant: `extra_options` rides directly on the file path with no
    // separator here, and is appended a second time, space separated,
    // further down. Both placements are part of the argument-line contract.
    let mut args = format!(
        "{}/{} {}-o check {}{}",
        context.tool_home.display(),
        EXPECT_SCRIPT_FILENAME,
        mode.flag(),
        context.target_file.display(),
        context.extra_options,
    );
    if context.trace_enabled {
        args.push_str(" --trace");
    }
    if !context.temp_directory.as_os_str().is_empty() {
        args.push_str(&format!(" --temp {}", context.temp_directory.display()));
    }
    if context.keep_temp_enabled {
        args.push_str(" --keep-temp");
    }
    if !context.output_directory.is_empty() {
        args.push_str(" --path ");
        args.push_str(&context.output_directory);
    }
    if !context.extra_options.is_empty() {
        args.push(' ');
        args.push_str(&context.extra_options);
    }
    (context.interpreter.clone(), args)
}
