//! Indented debug rendering of a subtree.

use std::fmt::Write;

use crate::visitor::{walk_node, Visitor};
use crate::{IrError, NodeArena, NodeId, StringLookup};

/// Render `root` and its descendants one node per line.
///
/// Each line is `Tag text : Type` indented by depth, with `: Type` only
/// for nodes whose type is resolved and a trailing ` [injected]` for
/// synthesized nodes.
pub fn dump_tree<I: StringLookup + ?Sized>(
    arena: &NodeArena,
    interner: &I,
    root: NodeId,
) -> Result<String, IrError> {
    arena.try_kind(root)?;
    let mut dumper = Dumper {
        interner,
        depth: 0,
        out: String::new(),
        error: None,
    };
    dumper.visit_node(root, arena);
    match dumper.error {
        Some(error) => Err(error),
        None => Ok(dumper.out),
    }
}

struct Dumper<'i, I: ?Sized> {
    interner: &'i I,
    depth: usize,
    out: String,
    error: Option<IrError>,
}

impl<'a, I: StringLookup + ?Sized> Visitor<'a> for Dumper<'_, I> {
    fn visit_node(&mut self, id: NodeId, arena: &'a NodeArena) {
        if self.error.is_some() {
            return;
        }
        let text = match crate::text(arena, self.interner, id) {
            Ok(text) => text,
            Err(error) => {
                self.error = Some(error);
                return;
            }
        };

        let _ = write!(self.out, "{:indent$}{}", "", arena.tag(id), indent = self.depth * 2);
        if !text.is_empty() {
            let _ = write!(self.out, " {text}");
        }
        let ty = arena.ty(id);
        if ty.is_resolved() {
            let _ = write!(self.out, " : {ty:?}");
        }
        if arena.is_injected(id) {
            self.out.push_str(" [injected]");
        }
        self.out.push('\n');

        self.depth += 1;
        walk_node(self, id, arena);
        self.depth -= 1;
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests {
    use super::*;
    use crate::node::NodeKind;
    use crate::{LiteralValue, Span, StringInterner, TypeId};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_dump_nested() {
        let interner = StringInterner::new();
        let mut arena = NodeArena::new();
        let lhs = arena
            .push(NodeKind::Literal(LiteralValue::Integer(1)), Span::DUMMY)
            .unwrap();
        let rhs = arena
            .push(NodeKind::Literal(LiteralValue::Boolean(true)), Span::DUMMY)
            .unwrap();
        let sum = arena
            .push(
                NodeKind::Binary {
                    lhs,
                    operator: interner.intern("+"),
                    rhs,
                },
                Span::DUMMY,
            )
            .unwrap();
        arena.set_type(lhs, TypeId::new(4)).unwrap();

        assert_eq!(
            dump_tree(&arena, &interner, sum).unwrap(),
            "BinaryExpressionNode \"+\"\n  IntegerLiteral 1 : TypeId(4)\n  BooleanLiteral true\n"
        );
    }

    #[test]
    fn test_dump_unknown_root() {
        let interner = StringInterner::new();
        let arena = NodeArena::new();
        assert_eq!(
            dump_tree(&arena, &interner, NodeId::new(0)),
            Err(IrError::UnknownNode(NodeId::new(0)))
        );
    }
}
