// src/models.rs

use std::fmt;
use std::path::PathBuf;

/// The operation requested from the expect script.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    /// Compare the file's current output against its recorded expectations.
    Check,
    /// Regenerate the recorded expectations.
    Generate,
    /// Apply pending expectations.
    Do,
}

impl RunMode {
    /// The mode fragment spliced into the argument line.
    ///
    /// Non-default modes carry their own `-o` prefix and a trailing space;
    /// the check action is always requested separately by the builder, so
    /// the default mode contributes nothing here.
    pub fn flag(self) -> &'static str {
        match self {
            Self::Check => "",
            Self::Generate => "-o generate ",
            Self::Do => "-o do ",
        }
    }
}

impl fmt::Display for RunMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Check => "check",
            Self::Generate => "generate",
            Self::Do => "do",
        };
        write!(f, "{}", name)
    }
}

/// Everything the command builder needs for one run, resolved once from disk.
///
/// A context belongs to a single invocation. Nothing in it is cached across
/// runs; every run re-reads the build cache and user config.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvocationContext {
    /// Root of the generated build tree.
    pub build_directory: PathBuf,
    /// Directory containing the expect script, from the build cache.
    pub tool_home: PathBuf,
    /// Interpreter used to run the script. May be a bare name.
    pub interpreter: String,
    /// Echo the assembled command line and ask the script to trace.
    pub trace_enabled: bool,
    /// Ask the script to keep its temporary files around.
    pub keep_temp_enabled: bool,
    /// Free-form option text passed through to the script verbatim.
    pub extra_options: String,
    /// Scratch directory handed to the script.
    pub temp_directory: PathBuf,
    /// Configuration-dependent output directory, empty when unresolved.
    pub output_directory: String,
    /// The file the script operates on.
    pub target_file: PathBuf,
}

/// Priority attached to a structured write, for task-list integrations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskPriority {
    /// Informational entries.
    Normal,
    /// Entries that should surface at the top of a task list.
    High,
}

/// Category attached to a structured write, for task-list integrations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskCategory {
    /// Build and compile diagnostics.
    BuildCompile,
    /// Everything else.
    General,
}

/// A compiler-style diagnostic promoted from one line of script output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructuredDiagnostic {
    /// Source file the diagnostic points at, verbatim from the output line.
    pub file: PathBuf,
    /// 0-based line number. The textual form is 1-based.
    pub line: u32,
    /// The message portion of the matched segment.
    pub error_text: String,
    /// Fixed at [`TaskPriority::High`] for promoted diagnostics.
    pub priority: TaskPriority,
    /// Fixed at [`TaskCategory::BuildCompile`] for promoted diagnostics.
    pub category: TaskCategory,
}

/// One classified line of child-process output, ready for a sink.
///
/// Classification never hides output: the diagnostic variant keeps the full
/// raw text alongside the parsed structure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputLine {
    /// A line that did not match the diagnostic grammar, newline-terminated.
    Plain(String),
    /// A line promoted to a structured diagnostic.
    Diagnostic {
        /// The raw line, newline-terminated.
        text: String,
        /// The parsed structure.
        item: StructuredDiagnostic,
    },
}

impl OutputLine {
    /// The renderable text of the line, raw in both variants.
    pub fn text(&self) -> &str {
        match self {
            Self::Plain(text) => text,
            Self::Diagnostic { text, .. } => text,
        }
    }
}
