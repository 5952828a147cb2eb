// src/system/sink.rs

use crate::models::OutputLine;
use colored::Colorize;
use std::io::{self, Write as _};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, PoisonError};

/// The results view that receives relayed script output.
///
/// Writes arrive interleaved from two concurrent stream readers, so
/// implementations serialize access internally. Callers preserve arrival
/// order per stream; nothing more is promised.
pub trait OutputSink: Send + Sync {
    /// Discards previously shown output.
    fn clear(&self);
    /// Appends one classified line.
    fn write(&self, line: &OutputLine);
    /// Brings the results view to the foreground.
    fn activate(&self);
}

/// Terminal-backed sink used by the CLI handlers.
///
/// Plain lines pass through verbatim; diagnostic lines are highlighted.
/// A lock serializes writers so interleaved lines never tear.
#[derive(Debug, Default)]
pub struct ConsoleSink {
    gate: Mutex<()>,
}

impl ConsoleSink {
    /// Creates a sink writing to the current process stdout.
    pub fn new() -> Self {
        Self::default()
    }
}

impl OutputSink for ConsoleSink {
    fn clear(&self) {
        // A terminal scrolls; there is nothing to discard.
    }

    fn write(&self, line: &OutputLine) {
        let _guard = self.gate.lock().unwrap_or_else(PoisonError::into_inner);
        match line {
            OutputLine::Plain(text) => print!("{}", text),
            OutputLine::Diagnostic { text, .. } => print!("{}", text.red().bold()),
        }
    }

    fn activate(&self) {
        let _ = io::stdout().flush();
    }
}

/// Collecting sink for embedding hosts and tests.
///
/// Records every write in arrival order, plus whether the view was
/// activated.
#[derive(Debug, Default)]
pub struct MemorySink {
    lines: Mutex<Vec<OutputLine>>,
    activated: AtomicBool,
}

impl MemorySink {
    /// Creates an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// The lines written so far, in arrival order.
    pub fn lines(&self) -> Vec<OutputLine> {
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// True once [`OutputSink::activate`] has been called.
    pub fn activated(&self) -> bool {
        self.activated.load(Ordering::SeqCst)
    }
}

impl OutputSink for MemorySink {
    fn clear(&self) {
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    fn write(&self, line: &OutputLine) {
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(line.clone());
    }

    fn activate(&self) {
        self.activated.store(true, Ordering::SeqCst);
    }
}
