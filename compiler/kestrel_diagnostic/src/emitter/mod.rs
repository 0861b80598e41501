//! Diagnostic Emitters
//!
//! An emitter renders diagnostics for a reader. Only terminal output is
//! provided; tooling formats can implement [`DiagnosticEmitter`] the same way.

mod terminal;

pub use terminal::{ColorMode, TerminalEmitter};

use crate::{Diagnostic, Severity};

/// Trait for emitting diagnostics in various formats.
pub trait DiagnosticEmitter {
    /// Emit a single diagnostic.
    fn emit(&mut self, diagnostic: &Diagnostic);

    /// Emit multiple diagnostics, then a summary of what was emitted.
    fn emit_all(&mut self, diagnostics: &[Diagnostic]) {
        for diag in diagnostics {
            self.emit(diag);
        }
        let errors = diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Error)
            .count();
        let warnings = diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Warning)
            .count();
        self.emit_summary(errors, warnings);
    }

    /// Flush any buffered output.
    fn flush(&mut self);

    /// Emit a summary of errors/warnings.
    fn emit_summary(&mut self, error_count: usize, warning_count: usize);
}
