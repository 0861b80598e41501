//! Node Visitor Pattern
//!
//! Generic read-only traversal over the arena. Children come from
//! [`NodeArena::children`], so every variant is covered without a
//! per-variant walk function.
//!
//! Default `visit_*` implementations call [`walk_node`], which visits the
//! children of a node in source order. Override a `visit_*` method to add
//! behavior for one category and call `walk_node` to keep descending.
//!
//! # Example
//!
//! ```text
//! struct CountArms(usize);
//!
//! impl<'a> Visitor<'a> for CountArms {
//!     fn visit_match_arm(&mut self, id: NodeId, arena: &'a NodeArena) {
//!         self.0 += 1;
//!         walk_node(self, id, arena);
//!     }
//! }
//! ```

use crate::stack::ensure_sufficient_stack;
use crate::{NodeArena, NodeId};

/// Node visitor.
///
/// The visitor may mutate its own state. The arena stays immutable.
pub trait Visitor<'a> {
    /// Visit any node. The default dispatches to the category hooks.
    fn visit_node(&mut self, id: NodeId, arena: &'a NodeArena) {
        let tag = arena.tag(id);
        if tag.is_directive() {
            self.visit_directive(id, arena);
        } else if tag.is_function() {
            self.visit_function(id, arena);
        } else if tag.is_matcher() {
            self.visit_match_arm(id, arena);
        } else {
            walk_node(self, id, arena);
        }
    }

    /// Visit a top-level directive.
    fn visit_directive(&mut self, id: NodeId, arena: &'a NodeArena) {
        walk_node(self, id, arena);
    }

    /// Visit a plain or specialized function.
    ///
    /// A specialization has no structural children; its parts are reached
    /// through the base declaration.
    fn visit_function(&mut self, id: NodeId, arena: &'a NodeArena) {
        walk_node(self, id, arena);
    }

    /// Visit one arm of a match.
    fn visit_match_arm(&mut self, id: NodeId, arena: &'a NodeArena) {
        walk_node(self, id, arena);
    }
}

/// Visit every direct child of `id`.
///
/// Grows the stack as needed, so arbitrarily deep trees are safe to walk.
pub fn walk_node<'a, V: Visitor<'a> + ?Sized>(visitor: &mut V, id: NodeId, arena: &'a NodeArena) {
    ensure_sufficient_stack(|| {
        for child in arena.children(id) {
            visitor.visit_node(child, arena);
        }
    });
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests {
    use super::*;
    use crate::node::NodeKind;
    use crate::{LiteralValue, Name, Span};
    use pretty_assertions::assert_eq;

    #[derive(Default)]
    struct Counter {
        nodes: usize,
        directives: usize,
        functions: usize,
    }

    impl<'a> Visitor<'a> for Counter {
        fn visit_node(&mut self, id: NodeId, arena: &'a NodeArena) {
            self.nodes += 1;
            let tag = arena.tag(id);
            if tag.is_directive() {
                self.visit_directive(id, arena);
            } else if tag.is_function() {
                self.visit_function(id, arena);
            } else {
                walk_node(self, id, arena);
            }
        }

        fn visit_directive(&mut self, id: NodeId, arena: &'a NodeArena) {
            self.directives += 1;
            walk_node(self, id, arena);
        }

        fn visit_function(&mut self, id: NodeId, arena: &'a NodeArena) {
            self.functions += 1;
            walk_node(self, id, arena);
        }
    }

    #[test]
    fn test_visitor_reaches_every_node() {
        let mut arena = NodeArena::new();
        let name = arena
            .push(
                NodeKind::NameIdentifier {
                    name: Name::from_raw(1),
                },
                Span::DUMMY,
            )
            .unwrap();
        let body = arena
            .push(NodeKind::Literal(LiteralValue::Integer(1)), Span::DUMMY)
            .unwrap();
        let function = arena
            .push(
                NodeKind::Function {
                    name,
                    return_type: NodeId::INVALID,
                    params: crate::NodeRange::EMPTY,
                    body,
                },
                Span::DUMMY,
            )
            .unwrap();
        let directive = arena
            .push(
                NodeKind::FunDirective {
                    function,
                    exported: false,
                },
                Span::DUMMY,
            )
            .unwrap();
        let directives = arena.push_list(&[directive], "directives").unwrap();
        let root = arena
            .push(NodeKind::Document { directives }, Span::DUMMY)
            .unwrap();

        let mut counter = Counter::default();
        counter.visit_node(root, &arena);
        assert_eq!(counter.nodes, 5);
        assert_eq!(counter.directives, 1);
        assert_eq!(counter.functions, 1);
    }

    #[test]
    fn test_deep_tree_does_not_overflow() {
        const DEPTH: usize = 200_000;
        let mut arena = NodeArena::new();
        let mut node = arena
            .push(NodeKind::Literal(LiteralValue::Integer(0)), Span::DUMMY)
            .unwrap();
        for _ in 0..DEPTH {
            node = arena
                .push(NodeKind::NumberNeg { operand: node }, Span::DUMMY)
                .unwrap();
        }

        let mut counter = Counter::default();
        counter.visit_node(node, &arena);
        assert_eq!(counter.nodes, DEPTH + 1);
    }
}
