//! Node arena.
//!
//! [`NodeArena`] uses struct-of-arrays layout: parallel `kinds`, `spans`,
//! `parents`, `types` and `flags` columns indexed by [`NodeId`], plus a flat
//! `node_lists` store indexed by [`NodeRange`]. Decorations that only a few
//! nodes carry live in sparse side tables.
//!
//! # Ownership
//!
//! Structural edges are the child ids inside each `NodeKind`. The `parents`
//! column is derived from them by the arena and is never an ownership edge.
//! A node may be attached to at most one owner; attaching an owned node is
//! rejected with [`IrError::AlreadyOwned`].
//!
//! # Decorations
//!
//! Resolved types, native types, resolved operations, internal identifiers
//! and local types are single-assignment: setting the same value again is a
//! no-op, setting a different one is [`IrError::DecorationConflict`].
//! Error lists are append-only.

use rustc_hash::FxHashMap;

use crate::children::{kind_children, Children};
use crate::error::SemanticError;
use crate::node::{NodeFlags, NodeKind, NodeTag};
use crate::{IrError, LiteralValue, LocalSlot, Name, NodeId, NodeRange, OperationId, Span, TypeId};

/// Convert a length to `u32`, failing when the arena is full.
fn to_u32(len: usize) -> Result<u32, IrError> {
    u32::try_from(len)
        .ok()
        .filter(|v| *v != u32::MAX)
        .ok_or(IrError::ArenaFull)
}

/// Per-function decorations. Specializations get their own entry.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
struct FunctionInfo {
    /// Unique name assigned after analysis. `Name::EMPTY` = unassigned.
    internal_identifier: Name,
    /// Local-variable types, indexed by `LocalSlot`.
    locals: Vec<TypeId>,
}

/// Allocation state saved by [`NodeArena::checkpoint`].
#[derive(Clone, Copy, Debug)]
pub(crate) struct Checkpoint {
    nodes: usize,
    lists: usize,
}

/// Arena holding every node of one compilation unit.
#[derive(Clone, Debug, Default)]
pub struct NodeArena {
    kinds: Vec<NodeKind>,
    spans: Vec<Span>,
    parents: Vec<NodeId>,
    types: Vec<TypeId>,
    flags: Vec<NodeFlags>,
    node_lists: Vec<NodeId>,
    errors: FxHashMap<NodeId, Vec<SemanticError>>,
    /// Injected node -> node whose position it reports.
    donors: FxHashMap<NodeId, NodeId>,
    functions: FxHashMap<NodeId, FunctionInfo>,
    native_types: FxHashMap<NodeId, TypeId>,
    operations: FxHashMap<NodeId, OperationId>,
}

impl NodeArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an arena pre-allocated for a source of `source_len` bytes.
    ///
    /// Heuristic: about one node per 8 bytes of source.
    pub fn with_capacity(source_len: usize) -> Self {
        let estimated = source_len / 8;
        NodeArena {
            kinds: Vec::with_capacity(estimated),
            spans: Vec::with_capacity(estimated),
            parents: Vec::with_capacity(estimated),
            types: Vec::with_capacity(estimated),
            flags: Vec::with_capacity(estimated),
            node_lists: Vec::with_capacity(estimated / 4),
            ..Self::default()
        }
    }

    /// Number of allocated nodes.
    #[inline]
    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }

    /// Whether `id` was allocated by this arena.
    #[inline]
    pub fn contains(&self, id: NodeId) -> bool {
        id.is_valid() && id.index() < self.kinds.len()
    }

    /// Iterator over every allocated id, in allocation order.
    pub fn ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        (0..self.kinds.len()).filter_map(|i| u32::try_from(i).ok().map(NodeId::new))
    }

    // Allocation

    /// Allocate a node produced from source, attaching its children.
    pub fn push(&mut self, kind: NodeKind, span: Span) -> Result<NodeId, IrError> {
        self.push_with_flags(kind, span, NodeFlags::empty())
    }

    /// Allocate a node synthesized by a pass.
    ///
    /// The node reports `donor`'s position in diagnostics.
    pub fn push_injected(&mut self, kind: NodeKind, donor: NodeId) -> Result<NodeId, IrError> {
        let span = self.try_span(donor)?;
        let id = self.push_with_flags(kind, span, NodeFlags::INJECTED)?;
        self.donors.insert(id, donor);
        Ok(id)
    }

    pub(crate) fn push_with_flags(
        &mut self,
        kind: NodeKind,
        span: Span,
        flags: NodeFlags,
    ) -> Result<NodeId, IrError> {
        let id = NodeId::new(to_u32(self.kinds.len())?);
        let children = kind_children(&kind, &self.node_lists);
        self.check_attachable(&children, id)?;
        self.check_payload(&kind, span)?;

        self.kinds.push(kind);
        self.spans.push(span);
        self.parents.push(NodeId::INVALID);
        self.types.push(TypeId::UNRESOLVED);
        self.flags.push(flags);
        for child in children {
            self.parents[child.index()] = id;
        }
        if kind.tag().is_function() {
            self.functions.insert(id, FunctionInfo::default());
        }

        tracing::trace!(node = id.raw(), tag = %kind.tag(), "allocated node");
        Ok(id)
    }

    /// Every child must exist and be unowned (or already owned by `owner`).
    fn check_attachable(&self, children: &Children, owner: NodeId) -> Result<(), IrError> {
        for (i, &child) in children.iter().enumerate() {
            if !self.contains(child) {
                return Err(IrError::UnknownNode(child));
            }
            let current = self.parents[child.index()];
            if current.is_valid() && current != owner {
                return Err(IrError::AlreadyOwned {
                    child,
                    owner: current,
                });
            }
            if children[..i].contains(&child) {
                return Err(IrError::AlreadyOwned { child, owner });
            }
        }
        Ok(())
    }

    /// Payload rules no child-ownership check covers.
    ///
    /// - a specialization's `base` is an existing plain `Function`
    /// - a `ConstDirective` has a value
    /// - an `OverloadedFunction` has members, all `FunDirective`s named `name`
    fn check_payload(&self, kind: &NodeKind, span: Span) -> Result<(), IrError> {
        match *kind {
            NodeKind::ContextAwareFunction { base, .. } => match *self.try_kind(base)? {
                NodeKind::Function { .. } => Ok(()),
                NodeKind::ContextAwareFunction { .. } => Err(IrError::NestedSpecialization(base)),
                ref other => Err(IrError::UnexpectedKind {
                    node: base,
                    expected: "FunctionNode",
                    found: other.tag(),
                }),
            },
            NodeKind::ConstDirective { value, .. } if !value.is_valid() => {
                Err(IrError::UninitializedConst(span))
            }
            NodeKind::OverloadedFunction { name, functions } => {
                let members = self.list(functions);
                if members.is_empty() {
                    return Err(IrError::EmptyOverloadGroup(name));
                }
                for &member in members {
                    let found = crate::fun_directive_name(self, member)?;
                    if found != name {
                        return Err(IrError::OverloadNameMismatch {
                            member,
                            expected: name,
                            found,
                        });
                    }
                }
                Ok(())
            }
            _ => Ok(()),
        }
    }

    /// Allocate a contiguous list of ids for a `NodeRange` field.
    pub fn push_list(&mut self, ids: &[NodeId], what: &'static str) -> Result<NodeRange, IrError> {
        if ids.is_empty() {
            return Ok(NodeRange::EMPTY);
        }
        let len = u16::try_from(ids.len()).map_err(|_| IrError::ListTooLong {
            what,
            len: ids.len(),
        })?;
        let start = to_u32(self.node_lists.len())?;
        self.node_lists.extend_from_slice(ids);
        Ok(NodeRange::new(start, len))
    }

    /// Ids stored in a range.
    pub fn list(&self, range: NodeRange) -> &[NodeId] {
        if range.is_empty() {
            return &[];
        }
        let start = range.start as usize;
        self.node_lists
            .get(start..start + range.len())
            .unwrap_or(&[])
    }

    /// Replace the payload of a container node.
    ///
    /// Old children are detached, new ones attached. New children must be
    /// unowned or already owned by `id`. Only passes that synthesize
    /// structure (overload grouping) rewrite nodes this way.
    pub(crate) fn replace_kind(&mut self, id: NodeId, kind: NodeKind) -> Result<(), IrError> {
        let old = *self.try_kind(id)?;
        let new_children = kind_children(&kind, &self.node_lists);
        self.check_attachable(&new_children, id)?;
        self.check_payload(&kind, self.spans[id.index()])?;

        for child in kind_children(&old, &self.node_lists) {
            if self.parents[child.index()] == id {
                self.parents[child.index()] = NodeId::INVALID;
            }
        }
        for child in new_children {
            self.parents[child.index()] = id;
        }
        self.kinds[id.index()] = kind;
        Ok(())
    }

    /// Mark the current allocation state for [`rollback`](Self::rollback).
    pub(crate) fn checkpoint(&self) -> Checkpoint {
        Checkpoint {
            nodes: self.kinds.len(),
            lists: self.node_lists.len(),
        }
    }

    /// Drop every node and list allocated after `checkpoint`.
    ///
    /// Children those nodes owned become unowned again. Rewrites of nodes
    /// older than the checkpoint are not undone.
    pub(crate) fn rollback(&mut self, checkpoint: Checkpoint) {
        for index in (checkpoint.nodes..self.kinds.len()).rev() {
            let id = NodeId::new(u32::try_from(index).unwrap_or(u32::MAX));
            for child in kind_children(&self.kinds[index], &self.node_lists) {
                if self.parents.get(child.index()) == Some(&id) {
                    self.parents[child.index()] = NodeId::INVALID;
                }
            }
            self.errors.remove(&id);
            self.donors.remove(&id);
            self.functions.remove(&id);
            self.native_types.remove(&id);
            self.operations.remove(&id);
        }
        self.kinds.truncate(checkpoint.nodes);
        self.spans.truncate(checkpoint.nodes);
        self.parents.truncate(checkpoint.nodes);
        self.types.truncate(checkpoint.nodes);
        self.flags.truncate(checkpoint.nodes);
        self.node_lists.truncate(checkpoint.lists);
    }

    // Structure

    /// Payload of a node.
    ///
    /// # Panics
    /// Panics if `id` was not allocated by this arena.
    #[inline]
    pub fn kind(&self, id: NodeId) -> &NodeKind {
        &self.kinds[id.index()]
    }

    /// Payload of a node, or `UnknownNode`.
    pub fn try_kind(&self, id: NodeId) -> Result<&NodeKind, IrError> {
        self.kinds.get(id.index()).ok_or(IrError::UnknownNode(id))
    }

    #[inline]
    pub fn tag(&self, id: NodeId) -> NodeTag {
        self.kinds[id.index()].tag()
    }

    /// Position of the originating token (`Span::DUMMY` if none).
    #[inline]
    pub fn span(&self, id: NodeId) -> Span {
        self.spans[id.index()]
    }

    fn try_span(&self, id: NodeId) -> Result<Span, IrError> {
        self.spans.get(id.index()).copied().ok_or(IrError::UnknownNode(id))
    }

    /// Structural owner, `None` for roots and detached nodes.
    #[inline]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.parents[id.index()].to_option()
    }

    /// Direct structural children in source order.
    pub fn children(&self, id: NodeId) -> Children {
        kind_children(&self.kinds[id.index()], &self.node_lists)
    }

    /// Owners of `id`, nearest first.
    pub fn ancestors(&self, id: NodeId) -> Ancestors<'_> {
        Ancestors {
            arena: self,
            next: self.parent(id),
        }
    }

    /// Nearest function (plain or specialized) owning `id`.
    pub fn enclosing_function(&self, id: NodeId) -> Option<NodeId> {
        self.ancestors(id).find(|a| self.tag(*a).is_function())
    }

    #[inline]
    pub fn flags(&self, id: NodeId) -> NodeFlags {
        self.flags[id.index()]
    }

    #[inline]
    pub fn is_parenthesized(&self, id: NodeId) -> bool {
        self.flags(id).contains(NodeFlags::PARENTHESIZED)
    }

    /// Record that the source wrote this node inside parentheses.
    pub fn set_parenthesized(&mut self, id: NodeId) -> Result<(), IrError> {
        let flags = self
            .flags
            .get_mut(id.index())
            .ok_or(IrError::UnknownNode(id))?;
        flags.insert(NodeFlags::PARENTHESIZED);
        Ok(())
    }

    /// Synthesized by a pass rather than lowered from source.
    #[inline]
    pub fn is_injected(&self, id: NodeId) -> bool {
        self.flags(id).contains(NodeFlags::INJECTED)
    }

    /// Node whose source position an injected node reports.
    pub fn donor(&self, id: NodeId) -> Option<NodeId> {
        self.donors.get(&id).copied()
    }

    // Decorations

    /// Resolved semantic type (`TypeId::UNRESOLVED` until a pass fills it).
    #[inline]
    pub fn ty(&self, id: NodeId) -> TypeId {
        self.types[id.index()]
    }

    pub fn set_type(&mut self, id: NodeId, ty: TypeId) -> Result<(), IrError> {
        let slot = self
            .types
            .get_mut(id.index())
            .ok_or(IrError::UnknownNode(id))?;
        assign_once(slot, ty, TypeId::UNRESOLVED, id, "resolved type")
    }

    /// Semantic errors attached to a node, in insertion order.
    pub fn errors(&self, id: NodeId) -> &[SemanticError] {
        self.errors.get(&id).map_or(&[], Vec::as_slice)
    }

    pub fn push_error(&mut self, id: NodeId, error: SemanticError) -> Result<(), IrError> {
        if !self.contains(id) {
            return Err(IrError::UnknownNode(id));
        }
        tracing::debug!(node = id.raw(), message = %error.message, "semantic error");
        self.errors.entry(id).or_default().push(error);
        Ok(())
    }

    /// Total semantic errors across the arena.
    pub fn error_count(&self) -> usize {
        self.errors.values().map(Vec::len).sum()
    }

    /// Resolved native type of a `Type` node.
    pub fn native_type(&self, id: NodeId) -> Option<TypeId> {
        self.native_types.get(&id).copied()
    }

    pub fn set_native_type(&mut self, id: NodeId, ty: TypeId) -> Result<(), IrError> {
        self.expect_tag(id, NodeTag::Type, "TypeNode")?;
        let slot = self.native_types.entry(id).or_insert(TypeId::UNRESOLVED);
        assign_once(slot, ty, TypeId::UNRESOLVED, id, "native type")
    }

    /// Operation bound to a binary expression by the operation registry.
    pub fn operation(&self, id: NodeId) -> Option<OperationId> {
        self.operations.get(&id).copied()
    }

    pub fn set_operation(&mut self, id: NodeId, op: OperationId) -> Result<(), IrError> {
        self.expect_tag(id, NodeTag::BinaryExpression, "BinaryExpressionNode")?;
        match self.operations.get(&id) {
            Some(existing) if *existing != op => Err(IrError::DecorationConflict {
                node: id,
                decoration: "binary operation",
            }),
            _ => {
                self.operations.insert(id, op);
                Ok(())
            }
        }
    }

    fn expect_tag(&self, id: NodeId, tag: NodeTag, expected: &'static str) -> Result<(), IrError> {
        let found = self.try_kind(id)?.tag();
        if found == tag {
            Ok(())
        } else {
            Err(IrError::UnexpectedKind {
                node: id,
                expected,
                found,
            })
        }
    }

    // Literals

    /// Cached value of a literal node.
    pub fn literal(&self, id: NodeId) -> Option<LiteralValue> {
        match self.kinds.get(id.index()) {
            Some(NodeKind::Literal(value)) => Some(*value),
            _ => None,
        }
    }

    /// Replace a literal's value. The kind must not change.
    ///
    /// This is the only mutation of a lowered node's payload. Source text
    /// is not touched; render the value explicitly when needed.
    pub fn set_literal(&mut self, id: NodeId, value: LiteralValue) -> Result<(), IrError> {
        match self.kinds.get_mut(id.index()) {
            Some(NodeKind::Literal(current)) => {
                if current.kind() != value.kind() {
                    return Err(IrError::LiteralKindMismatch {
                        node: id,
                        expected: value.kind(),
                        found: current.kind(),
                    });
                }
                *current = value;
                Ok(())
            }
            Some(other) => Err(IrError::UnexpectedKind {
                node: id,
                expected: "literal",
                found: other.tag(),
            }),
            None => Err(IrError::UnknownNode(id)),
        }
    }

    // Function decorations

    fn function_info_mut(&mut self, id: NodeId) -> Result<&mut FunctionInfo, IrError> {
        if !self.functions.contains_key(&id) {
            return Err(self.not_a_function(id));
        }
        self.functions
            .get_mut(&id)
            .ok_or(IrError::UnknownNode(id))
    }

    fn not_a_function(&self, id: NodeId) -> IrError {
        match self.try_kind(id) {
            Ok(kind) => IrError::UnexpectedKind {
                node: id,
                expected: "function",
                found: kind.tag(),
            },
            Err(e) => e,
        }
    }

    /// Unique identifier assigned after analysis.
    pub fn internal_identifier(&self, function: NodeId) -> Option<Name> {
        self.functions
            .get(&function)
            .map(|info| info.internal_identifier)
            .filter(|name| !name.is_empty())
    }

    pub fn set_internal_identifier(&mut self, function: NodeId, name: Name) -> Result<(), IrError> {
        let info = self.function_info_mut(function)?;
        assign_once(
            &mut info.internal_identifier,
            name,
            Name::EMPTY,
            function,
            "internal identifier",
        )
    }

    /// Local-variable types of a function, indexed by slot.
    pub fn locals(&self, function: NodeId) -> &[TypeId] {
        self.functions
            .get(&function)
            .map_or(&[], |info| info.locals.as_slice())
    }

    /// Append a fresh local slot of type `ty` to a function.
    pub fn allocate_local(&mut self, function: NodeId, ty: TypeId) -> Result<LocalSlot, IrError> {
        let info = self.function_info_mut(function)?;
        let slot = LocalSlot::new(to_u32(info.locals.len())?);
        info.locals.push(ty);
        Ok(slot)
    }

    /// Fill the type of a local allocated as unresolved.
    pub fn set_local_type(
        &mut self,
        function: NodeId,
        slot: LocalSlot,
        ty: TypeId,
    ) -> Result<(), IrError> {
        let info = self.function_info_mut(function)?;
        let local = info
            .locals
            .get_mut(slot.index())
            .ok_or(IrError::UnknownLocal { function, slot })?;
        assign_once(local, ty, TypeId::UNRESOLVED, function, "local type")
    }

    /// Extend a function's locals to `count` unresolved slots.
    pub(crate) fn reserve_locals(&mut self, function: NodeId, count: usize) -> Result<(), IrError> {
        let info = self.function_info_mut(function)?;
        if info.locals.len() < count {
            info.locals.resize(count, TypeId::UNRESOLVED);
        }
        Ok(())
    }

    // Invariants

    /// Check that every node under `root` is linked to the node listing it.
    pub fn verify_tree(&self, root: NodeId) -> Result<(), IrError> {
        let mut stack = vec![self.try_kind(root).map(|_| root)?];
        while let Some(id) = stack.pop() {
            for child in self.children(id).into_iter().rev() {
                let found = self.parents[child.index()];
                if found != id {
                    return Err(IrError::BrokenParentLink {
                        child,
                        expected: id,
                        found,
                    });
                }
                stack.push(child);
            }
        }
        Ok(())
    }
}

/// Single-assignment write: `unset -> value` and `value -> value` succeed.
fn assign_once<T: PartialEq + Copy>(
    slot: &mut T,
    value: T,
    unset: T,
    node: NodeId,
    decoration: &'static str,
) -> Result<(), IrError> {
    if *slot == unset || *slot == value {
        *slot = value;
        Ok(())
    } else {
        Err(IrError::DecorationConflict { node, decoration })
    }
}

/// Iterator over a node's owners, nearest first.
pub struct Ancestors<'a> {
    arena: &'a NodeArena,
    next: Option<NodeId>,
}

impl Iterator for Ancestors<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.next?;
        self.next = self.arena.parent(current);
        Some(current)
    }
}
