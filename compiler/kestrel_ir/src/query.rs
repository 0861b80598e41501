//! Tree queries.
//!
//! Search is a pre-order walk over structural children: a node is yielded
//! before its descendants, siblings in source order. The walk is iterative
//! so deeply nested expressions cannot overflow the stack. Aliased parts of
//! a specialization are not structural children and are not revisited.

use crate::node::NodeTag;
use crate::{NodeArena, NodeId};

/// Pre-order iterator over `root` and its descendants.
pub struct PreOrder<'a> {
    arena: &'a NodeArena,
    stack: Vec<NodeId>,
}

impl Iterator for PreOrder<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.stack.pop()?;
        self.stack.extend(self.arena.children(id).into_iter().rev());
        Some(id)
    }
}

/// Walk `root` and everything under it, root first.
///
/// An id the arena does not know yields nothing.
pub fn descendants(arena: &NodeArena, root: NodeId) -> PreOrder<'_> {
    let stack = if arena.contains(root) {
        vec![root]
    } else {
        Vec::new()
    };
    PreOrder { arena, stack }
}

/// Every node under `root` (inclusive) whose tag is `tag`, in pre-order.
pub fn search(arena: &NodeArena, root: NodeId, tag: NodeTag) -> Vec<NodeId> {
    search_by(arena, root, |arena, id| arena.tag(id) == tag)
}

/// Every node under `root` (inclusive) accepted by `predicate`, in pre-order.
pub fn search_by<F>(arena: &NodeArena, root: NodeId, mut predicate: F) -> Vec<NodeId>
where
    F: FnMut(&NodeArena, NodeId) -> bool,
{
    let found: Vec<NodeId> = descendants(arena, root)
        .filter(|&id| predicate(arena, id))
        .collect();
    tracing::trace!(root = root.raw(), matches = found.len(), "tree search");
    found
}
