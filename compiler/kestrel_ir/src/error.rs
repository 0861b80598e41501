//! Error types of the node model.
//!
//! Three classes, kept apart on purpose:
//! - [`ParseError`]: malformed input reported by the external parser,
//!   accumulated on the document root.
//! - [`SemanticError`]: attached to one node's error list by a later pass.
//!   Never aborts traversal.
//! - [`IrError`]: a violated structural invariant. These are compiler bugs
//!   (a lowering step or pass misused the model) and are returned as `Err`
//!   from the operation that detected them.

use crate::node::{LiteralKind, NodeTag};
use crate::{LocalSlot, Name, NodeId, Span};

/// Structural invariant violation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IrError {
    #[error("node {0} does not exist in this arena")]
    UnknownNode(NodeId),

    #[error("node {child} is already owned by {owner}")]
    AlreadyOwned { child: NodeId, owner: NodeId },

    #[error("{what} list of {len} entries exceeds the arena limit")]
    ListTooLong { what: &'static str, len: usize },

    #[error("node arena exceeded u32::MAX nodes")]
    ArenaFull,

    #[error("node {node} is a {found}, expected {expected}")]
    UnexpectedKind {
        node: NodeId,
        expected: &'static str,
        found: NodeTag,
    },

    #[error("overload group {0:?} has no members")]
    EmptyOverloadGroup(Name),

    #[error("overload member {member} is named {found:?}, group is named {expected:?}")]
    OverloadNameMismatch {
        member: NodeId,
        expected: Name,
        found: Name,
    },

    #[error("const directive at {0} has no initializer")]
    UninitializedConst(Span),

    #[error("binary expression {0} has no operator")]
    MissingOperator(NodeId),

    #[error("function {0} is already specialized; specialize its base declaration instead")]
    NestedSpecialization(NodeId),

    #[error("match expression lowered outside of any function")]
    NoEnclosingFunction,

    #[error("function finished without a matching begin_function")]
    UnbalancedFunction,

    #[error("default arm {arm} must be the last arm of its match")]
    DefaultArmNotLast { arm: NodeId },

    #[error("{decoration} of node {node} is already set to a different value")]
    DecorationConflict {
        node: NodeId,
        decoration: &'static str,
    },

    #[error("literal {node} holds a {found} value, cannot store a {expected} value")]
    LiteralKindMismatch {
        node: NodeId,
        expected: LiteralKind,
        found: LiteralKind,
    },

    #[error("invalid {kind} literal {text:?}")]
    InvalidLiteral { kind: LiteralKind, text: String },

    #[error("function {function} has no local slot {}", slot.raw())]
    UnknownLocal { function: NodeId, slot: LocalSlot },

    #[error("node {child} lists {expected} as owner but its parent link is {found}")]
    BrokenParentLink {
        child: NodeId,
        expected: NodeId,
        found: NodeId,
    },
}

/// Error attached to a node by a semantic pass.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SemanticError {
    pub message: String,
    /// Optional extra context shown as a note.
    pub note: Option<String>,
}

impl SemanticError {
    pub fn new(message: impl Into<String>) -> Self {
        SemanticError {
            message: message.into(),
            note: None,
        }
    }

    #[must_use]
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }
}

/// Error reported by the external parser for the whole document.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ParseError {
    pub message: String,
    pub span: Span,
}

impl ParseError {
    pub fn new(message: impl Into<String>, span: Span) -> Self {
        ParseError {
            message: message.into(),
            span,
        }
    }
}
