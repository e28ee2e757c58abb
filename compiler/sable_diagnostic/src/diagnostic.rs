//! Per-package diagnostic collection.
//!
//! Errors are recorded during checking and rendered on demand; a note is
//! always chained to the most recently reported error. The text format is
//! fixed:
//!
//! ```text
//! ERROR(<file>:<line>:<col>[, E<4-digit>]): <message>
//! NOTE(<file>:<line>:<col>): <message>
//! ```
//!
//! The error-code segment appears only when enabled in [`DiagnosticConfig`].

use std::fmt::Write as _;

use sable_ir::{Position, StringLookup};

use crate::ErrorCode;

/// A note chained to an error, pointing at related context.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Note {
    pub pos: Position,
    pub message: String,
}

/// A reported error with its chained notes.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Diagnostic {
    pub code: ErrorCode,
    pub pos: Position,
    pub message: String,
    pub notes: Vec<Note>,
}

/// Configuration for diagnostic rendering.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct DiagnosticConfig {
    /// Render the `E<4-digit>` code segment on error lines.
    pub error_codes: bool,
}

/// The per-package diagnostics list.
///
/// Owned by a `Package`; the checker appends, the driver flushes.
#[derive(Clone, Debug, Default)]
pub struct Diagnostics {
    errors: Vec<Diagnostic>,
    config: DiagnosticConfig,
}

impl Diagnostics {
    /// Create an empty list with default config.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty list with the given config.
    pub fn with_config(config: DiagnosticConfig) -> Self {
        Diagnostics {
            errors: Vec::new(),
            config,
        }
    }

    /// Append a formatted error line.
    pub fn report_error(&mut self, code: ErrorCode, pos: Position, message: impl Into<String>) {
        self.errors.push(Diagnostic {
            code,
            pos,
            message: message.into(),
            notes: Vec::new(),
        });
    }

    /// Append a note chained to the most recently reported error.
    ///
    /// Reporting a note before any error is a checker bug; the note is
    /// dropped in release builds.
    pub fn report_note(&mut self, pos: Position, message: impl Into<String>) {
        debug_assert!(!self.errors.is_empty(), "note reported before any error");
        if let Some(error) = self.errors.last_mut() {
            error.notes.push(Note {
                pos,
                message: message.into(),
            });
        }
    }

    /// Merge another batch of diagnostics onto the end of this list.
    ///
    /// Used by the checker to commit a buffered batch once a unit of work
    /// completes without requeueing.
    pub fn absorb(&mut self, other: Diagnostics) {
        self.errors.extend(other.errors);
    }

    /// Whether any errors have been reported and not yet flushed.
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Number of pending errors (notes are not counted).
    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    /// Iterate pending errors in report order.
    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.errors.iter()
    }

    /// Render all pending errors to a string without clearing them.
    pub fn render(&self, lookup: &impl StringLookup) -> String {
        let mut out = String::new();
        for error in &self.errors {
            let file = lookup.lookup(error.pos.file);
            if self.config.error_codes {
                let _ = writeln!(
                    out,
                    "ERROR({file}:{}:{}, {}): {}",
                    error.pos.line, error.pos.column, error.code, error.message
                );
            } else {
                let _ = writeln!(
                    out,
                    "ERROR({file}:{}:{}): {}",
                    error.pos.line, error.pos.column, error.message
                );
            }
            for note in &error.notes {
                let note_file = lookup.lookup(note.pos.file);
                let _ = writeln!(
                    out,
                    "NOTE({note_file}:{}:{}): {}",
                    note.pos.line, note.pos.column, note.message
                );
            }
        }
        out
    }

    /// Flush all pending errors: render, clear, and return the text.
    pub fn output_reported_errors(&mut self, lookup: &impl StringLookup) -> String {
        let out = self.render(lookup);
        self.errors.clear();
        out
    }
}

#[cfg(test)]
mod tests;
