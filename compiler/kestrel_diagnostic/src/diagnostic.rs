//! Core diagnostic types.
//!
//! A [`Diagnostic`] is built from one of the node model's error channels:
//! a document-level [`ParseError`], a [`SemanticError`] hanging off a node,
//! or an [`IrError`](kestrel_ir::IrError) for a broken invariant.

use kestrel_ir::{NodeArena, NodeId, ParseError, SemanticError, Span};
use std::fmt;

use crate::ErrorCode;

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Severity {
    Error,
    Warning,
}

impl Severity {
    pub const fn as_str(self) -> &'static str {
        match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A source position with a short explanation.
///
/// A diagnostic has at most one primary label, the place the problem is;
/// secondary labels point at related declarations.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Label {
    pub span: Span,
    pub message: String,
    pub is_primary: bool,
}

/// A reportable problem.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[must_use = "diagnostics should be reported or returned, not silently dropped"]
pub struct Diagnostic {
    pub code: ErrorCode,
    pub severity: Severity,
    pub message: String,
    pub labels: Vec<Label>,
    /// Context lines, printed as `= note:`.
    pub notes: Vec<String>,
    /// Fix hints, printed as `= help:`.
    pub suggestions: Vec<String>,
}

impl Diagnostic {
    #[cold]
    pub fn error(code: ErrorCode) -> Self {
        Diagnostic {
            code,
            severity: Severity::Error,
            message: String::new(),
            labels: Vec::new(),
            notes: Vec::new(),
            suggestions: Vec::new(),
        }
    }

    #[cold]
    pub fn warning(code: ErrorCode) -> Self {
        Diagnostic {
            severity: Severity::Warning,
            ..Self::error(code)
        }
    }

    /// `E1001` for malformed source the parser reported.
    pub fn from_parse_error(error: &ParseError) -> Self {
        Self::error(ErrorCode::E1001)
            .with_message(&error.message)
            .with_label(error.span, "syntax error here")
    }

    /// `E2001` for an error a pass attached to `node`.
    ///
    /// The label names the node's kind. A synthesized node reports the
    /// position of the declaration it was derived from, and says so.
    pub fn from_node_error(arena: &NodeArena, node: NodeId, error: &SemanticError) -> Self {
        let mut diagnostic = Self::error(ErrorCode::E2001)
            .with_message(&error.message)
            .with_label(arena.span(node), arena.tag(node).as_str());
        diagnostic.notes.extend(error.note.clone());
        if arena.is_injected(node) {
            diagnostic =
                diagnostic.with_note("in compiler-generated code derived from this location");
        }
        diagnostic
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Set the primary label, replacing any previous one.
    pub fn with_label(mut self, span: Span, message: impl Into<String>) -> Self {
        self.labels.retain(|l| !l.is_primary);
        self.labels.insert(
            0,
            Label {
                span,
                message: message.into(),
                is_primary: true,
            },
        );
        self
    }

    pub fn with_secondary_label(mut self, span: Span, message: impl Into<String>) -> Self {
        self.labels.push(Label {
            span,
            message: message.into(),
            is_primary: false,
        });
        self
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }

    pub fn primary_span(&self) -> Option<Span> {
        self.labels.iter().find(|l| l.is_primary).map(|l| l.span)
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

/// Single-line-per-part rendering without source context.
impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]: {}", self.severity, self.code, self.message)?;
        for label in &self.labels {
            let marker = if label.is_primary { "-->" } else { "   " };
            write!(f, "\n  {marker} {:?}: {}", label.span, label.message)?;
        }
        let trailers = self
            .notes
            .iter()
            .map(|n| ("note", n))
            .chain(self.suggestions.iter().map(|s| ("help", s)));
        for (kind, text) in trailers {
            write!(f, "\n  = {kind}: {text}")?;
        }
        Ok(())
    }
}
