//! Diagnostic queue for collecting, deduplicating, and sorting diagnostics.
//!
//! Features:
//! - Error limits to prevent overwhelming output
//! - Optional deduplication of identical errors on the same line
//! - Position ordering on flush

use kestrel_ir::Span;

use crate::span_utils::LineOffsetTable;
use crate::{Diagnostic, ErrorCode};

/// Configuration for diagnostic processing.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct DiagnosticConfig {
    /// Maximum number of errors before stopping (0 = unlimited).
    pub error_limit: usize,
    /// Drop an error whose line, code and message match a queued one.
    /// Off by default.
    pub deduplicate: bool,
    /// Order diagnostics by position on flush. Otherwise keep insertion order.
    pub sort: bool,
}

impl Default for DiagnosticConfig {
    fn default() -> Self {
        DiagnosticConfig {
            error_limit: 10,
            deduplicate: false,
            sort: true,
        }
    }
}

impl DiagnosticConfig {
    /// Create a config with no limits (for testing).
    pub fn unlimited() -> Self {
        DiagnosticConfig {
            error_limit: 0,
            deduplicate: false,
            sort: true,
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq, Hash)]
struct QueuedDiagnostic {
    diagnostic: Diagnostic,
    /// 1-based line for sorting.
    line: u32,
    /// 1-based column for sorting within a line.
    column: u32,
}

/// Queue for collecting, deduplicating, and sorting diagnostics.
///
/// # Example
///
/// ```text
/// let mut queue = DiagnosticQueue::new();
/// queue.add_with_source(diagnostic, &document.source);
/// let sorted = queue.flush();
/// ```
#[derive(Clone, Debug, Default)]
pub struct DiagnosticQueue {
    diagnostics: Vec<QueuedDiagnostic>,
    /// Count of errors (not warnings/notes).
    error_count: usize,
    /// Set when an error was dropped because of the limit.
    overflowed: bool,
    config: DiagnosticConfig,
}

impl DiagnosticQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: DiagnosticConfig) -> Self {
        DiagnosticQueue {
            config,
            ..Self::default()
        }
    }

    /// Add a diagnostic at a known position.
    ///
    /// Returns `true` if the diagnostic was added, `false` if it was filtered.
    pub fn add(&mut self, diag: Diagnostic, line: u32, column: u32) -> bool {
        let is_error = diag.is_error();
        if is_error && self.limit_reached() {
            self.overflowed = true;
            return false;
        }
        if self.config.deduplicate && self.is_duplicate(&diag, line) {
            return false;
        }

        self.diagnostics.push(QueuedDiagnostic {
            diagnostic: diag,
            line,
            column,
        });
        if is_error {
            self.error_count += 1;
        }
        true
    }

    /// Add a diagnostic, computing its position from the primary span.
    pub fn add_with_source(&mut self, diag: Diagnostic, source: &str) -> bool {
        let (line, column) = diag.primary_span().map_or((1, 1), |span| {
            crate::span_utils::offset_to_line_col(source, span.start)
        });
        self.add(diag, line, column)
    }

    /// Add a diagnostic, using a pre-built table for the position.
    pub fn add_with_table(&mut self, diag: Diagnostic, source: &str, table: &LineOffsetTable) -> bool {
        let (line, column) = diag
            .primary_span()
            .map_or((1, 1), |span| table.offset_to_line_col(source, span.start));
        self.add(diag, line, column)
    }

    /// Check if the error limit has been reached.
    pub fn limit_reached(&self) -> bool {
        self.config.error_limit > 0 && self.error_count >= self.config.error_limit
    }

    pub fn error_count(&self) -> usize {
        self.error_count
    }

    /// Sort diagnostics by position and return them.
    ///
    /// Clears the queue. When errors were dropped because of the limit, a
    /// final "too many errors" diagnostic is appended.
    pub fn flush(&mut self) -> Vec<Diagnostic> {
        if self.config.sort {
            // Stable: diagnostics at one position keep insertion order.
            self.diagnostics.sort_by_key(|d| (d.line, d.column));
        }
        let mut result: Vec<Diagnostic> =
            self.diagnostics.drain(..).map(|d| d.diagnostic).collect();
        if self.overflowed {
            let span = result
                .last()
                .and_then(Diagnostic::primary_span)
                .unwrap_or(Span::DUMMY);
            result.push(too_many_errors(self.config.error_limit, span));
        }

        self.error_count = 0;
        self.overflowed = false;
        result
    }

    /// Get diagnostics without clearing the queue.
    pub fn peek(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().map(|d| &d.diagnostic)
    }

    fn is_duplicate(&self, diag: &Diagnostic, line: u32) -> bool {
        diag.is_error()
            && self.diagnostics.iter().rev().any(|queued| {
                queued.line == line
                    && queued.diagnostic.code == diag.code
                    && queued.diagnostic.message == diag.message
            })
    }
}

/// Create a "too many errors" diagnostic.
#[cold]
pub fn too_many_errors(limit: usize, span: Span) -> Diagnostic {
    Diagnostic::error(ErrorCode::E9002)
        .with_message(format!("aborting after {limit} errors"))
        .with_label(span, "error limit reached here")
        .with_note("raise `DiagnosticConfig::error_limit` to see more")
}
