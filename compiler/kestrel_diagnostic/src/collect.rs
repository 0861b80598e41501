//! Collecting diagnostics from a lowered document.
//!
//! Parse errors come first, in the order the parser reported them. Node
//! errors follow in pre-order over the document tree. Errors on nodes the
//! tree does not reach (a specialization is never attached to a directive)
//! come last, in allocation order.

use kestrel_ir::{walk_node, Document, IrError, NodeArena, NodeId, Span, Visitor};

use crate::{Diagnostic, DiagnosticConfig, DiagnosticQueue, ErrorCode};

/// Every parse error and node error of `document`, unsorted.
#[tracing::instrument(level = "debug", skip_all, fields(file = document.file.as_deref()))]
pub fn collect_diagnostics(document: &Document) -> Vec<Diagnostic> {
    let mut diagnostics: Vec<Diagnostic> = document
        .parse_errors
        .iter()
        .map(Diagnostic::from_parse_error)
        .collect();
    let parse_count = diagnostics.len();

    let arena = &document.arena;
    let mut collector = ErrorCollector {
        diagnostics: &mut diagnostics,
        reached: vec![false; arena.len()],
    };
    collector.visit_node(document.root, arena);
    let reached = collector.reached;
    let in_tree = diagnostics.len() - parse_count;

    for id in arena.ids().filter(|id| !reached[id.index()]) {
        for error in arena.errors(id) {
            diagnostics.push(Diagnostic::from_node_error(arena, id, error));
        }
    }

    tracing::debug!(
        parse = parse_count,
        semantic = in_tree,
        detached = diagnostics.len() - parse_count - in_tree,
        "collected diagnostics"
    );
    diagnostics
}

/// Collect, then order and limit through a [`DiagnosticQueue`].
pub fn report(document: &Document, config: DiagnosticConfig) -> Vec<Diagnostic> {
    let mut queue = DiagnosticQueue::with_config(config);
    let table = crate::span_utils::LineOffsetTable::build(&document.source);
    for diagnostic in collect_diagnostics(document) {
        queue.add_with_table(diagnostic, &document.source, &table);
    }
    queue.flush()
}

/// Report a broken node-model invariant. These are compiler bugs.
#[cold]
pub fn internal_error(error: &IrError, span: Span) -> Diagnostic {
    Diagnostic::error(ErrorCode::E9001)
        .with_message(format!("internal compiler error: {error}"))
        .with_label(span, "while processing this")
        .with_note("this is a bug in the compiler, please report it")
}

struct ErrorCollector<'d> {
    diagnostics: &'d mut Vec<Diagnostic>,
    /// Indexed by node; set for every node the walk visits.
    reached: Vec<bool>,
}

impl<'a> Visitor<'a> for ErrorCollector<'_> {
    fn visit_node(&mut self, id: NodeId, arena: &'a NodeArena) {
        if let Some(seen) = self.reached.get_mut(id.index()) {
            *seen = true;
        }
        for error in arena.errors(id) {
            self.diagnostics.push(Diagnostic::from_node_error(arena, id, error));
        }
        walk_node(self, id, arena);
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
