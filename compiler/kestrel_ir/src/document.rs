//! Compilation unit.

use crate::node::{NodeKind, NodeTag};
use crate::{ContextId, IrError, NodeArena, NodeId, ParseError, SharedInterner};

/// One lowered source file: its arena, root and document-level state.
///
/// Produced by [`Lowering::finish`](crate::Lowering::finish).
#[derive(Clone, Debug)]
pub struct Document {
    pub arena: NodeArena,
    /// The `Document` node.
    pub root: NodeId,
    pub interner: SharedInterner,
    /// Errors the parser reported while producing this document.
    pub parse_errors: Vec<ParseError>,
    /// Path of the source file, if it came from one.
    pub file: Option<String>,
    /// Raw source text, kept for diagnostics.
    pub source: String,
    context: Option<ContextId>,
}

impl Document {
    pub(crate) fn new(
        arena: NodeArena,
        root: NodeId,
        interner: SharedInterner,
        parse_errors: Vec<ParseError>,
        file: Option<String>,
        source: String,
    ) -> Self {
        Document {
            arena,
            root,
            interner,
            parse_errors,
            file,
            source,
            context: None,
        }
    }

    /// Top-level directives in declaration order.
    pub fn directives(&self) -> &[NodeId] {
        match self.arena.kind(self.root) {
            NodeKind::Document { directives } => self.arena.list(*directives),
            _ => &[],
        }
    }

    /// Lexical context resolved for this document.
    pub fn context(&self) -> Option<ContextId> {
        self.context
    }

    /// Record the resolved lexical context. Set once.
    pub fn set_context(&mut self, context: ContextId) -> Result<(), IrError> {
        match self.context {
            Some(existing) if existing != context => Err(IrError::DecorationConflict {
                node: self.root,
                decoration: "document context",
            }),
            _ => {
                self.context = Some(context);
                Ok(())
            }
        }
    }

    /// Whether parsing or any pass reported an error.
    pub fn has_errors(&self) -> bool {
        !self.parse_errors.is_empty() || self.arena.error_count() > 0
    }

    /// See [`text`](crate::text).
    pub fn text(&self, id: NodeId) -> Result<String, IrError> {
        crate::text(&self.arena, &self.interner, id)
    }

    /// See [`search`](crate::search); starts at the root.
    pub fn search(&self, tag: NodeTag) -> Vec<NodeId> {
        crate::search(&self.arena, self.root, tag)
    }

    /// Interned string of a `NameIdentifier` or `TypeReference`.
    pub fn name_of(&self, id: NodeId) -> Option<&str> {
        match *self.arena.try_kind(id).ok()? {
            NodeKind::NameIdentifier { name } | NodeKind::TypeReference { name, .. } => {
                Some(self.interner.lookup(name))
            }
            _ => None,
        }
    }
}
