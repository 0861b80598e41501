//! Overload grouping.
//!
//! Top-level functions that share a name are gathered into one
//! [`NodeKind::OverloadedFunction`] directive. Which member a call resolves
//! to is decided elsewhere; this module only builds the grouping.

use rustc_hash::FxHashMap;

use crate::closure::function_parts;
use crate::node::{NodeKind, NodeTag};
use crate::{Document, IrError, Name, NodeArena, NodeId, NodeRange};

/// Declared name of the function inside a `FunDirective`.
pub fn fun_directive_name(arena: &NodeArena, directive: NodeId) -> Result<Name, IrError> {
    let function = match *arena.try_kind(directive)? {
        NodeKind::FunDirective { function, .. } => function,
        ref other => {
            return Err(IrError::UnexpectedKind {
                node: directive,
                expected: "FunDirectiveNode",
                found: other.tag(),
            })
        }
    };
    let name = function_parts(arena, function)?.name;
    match *arena.try_kind(name)? {
        NodeKind::NameIdentifier { name } => Ok(name),
        ref other => Err(IrError::UnexpectedKind {
            node: name,
            expected: "NameIdentifierNode",
            found: other.tag(),
        }),
    }
}

/// Build one overload group named `name` over `members`.
///
/// Members must be non-empty, unowned `FunDirective`s whose functions are
/// all named `name` (checked by the arena on every push). The group is
/// injected and reports the position of its first member.
pub fn overload_group(
    arena: &mut NodeArena,
    name: Name,
    members: &[NodeId],
) -> Result<NodeId, IrError> {
    let first = *members.first().ok_or(IrError::EmptyOverloadGroup(name))?;
    let functions = arena.push_list(members, "overload members")?;
    arena.push_injected(NodeKind::OverloadedFunction { name, functions }, first)
}

/// Group every function name the document declares more than once.
///
/// Each group replaces its members in the root's directive list at the
/// position of the first member; members keep declaration order. Names
/// declared once are left alone. Returns the new groups.
///
/// On error the document is left as it was before the call.
#[tracing::instrument(level = "debug", skip_all, fields(file = document.file.as_deref()))]
pub fn group_overloads(document: &mut Document) -> Result<Vec<NodeId>, IrError> {
    let root = document.root;
    let original = match *document.arena.try_kind(root)? {
        NodeKind::Document { directives } => directives,
        ref other => {
            return Err(IrError::UnexpectedKind {
                node: root,
                expected: "DocumentNode",
                found: other.tag(),
            })
        }
    };
    let arena = &mut document.arena;

    let mut by_name: FxHashMap<Name, Vec<NodeId>> = FxHashMap::default();
    for &directive in arena.list(original) {
        if arena.tag(directive) == NodeTag::FunDirective {
            let name = fun_directive_name(arena, directive)?;
            by_name.entry(name).or_default().push(directive);
        }
    }
    if by_name.values().all(|members| members.len() < 2) {
        return Ok(Vec::new());
    }
    apply_grouping(arena, root, original, &by_name)
}

/// Regroup `root`'s `original` directives, restoring them if any step fails.
fn apply_grouping(
    arena: &mut NodeArena,
    root: NodeId,
    original: NodeRange,
    by_name: &FxHashMap<Name, Vec<NodeId>>,
) -> Result<Vec<NodeId>, IrError> {
    let directives = arena.list(original).to_vec();
    let checkpoint = arena.checkpoint();
    match regroup(arena, root, &directives, by_name) {
        Ok(groups) => Ok(groups),
        Err(error) => {
            arena.rollback(checkpoint);
            arena.replace_kind(
                root,
                NodeKind::Document {
                    directives: original,
                },
            )?;
            tracing::warn!(%error, "overload grouping failed, document restored");
            Err(error)
        }
    }
}

/// Rebuild the root's directive list with the duplicated names grouped.
fn regroup(
    arena: &mut NodeArena,
    root: NodeId,
    directives: &[NodeId],
    by_name: &FxHashMap<Name, Vec<NodeId>>,
) -> Result<Vec<NodeId>, IrError> {
    // Release every directive so the groups can take ownership of members.
    arena.replace_kind(
        root,
        NodeKind::Document {
            directives: NodeRange::EMPTY,
        },
    )?;

    let mut groups = Vec::new();
    let mut rewritten = Vec::with_capacity(directives.len());
    for &directive in directives {
        if arena.tag(directive) != NodeTag::FunDirective {
            rewritten.push(directive);
            continue;
        }
        let name = fun_directive_name(arena, directive)?;
        let members = by_name.get(&name).map_or(&[][..], Vec::as_slice);
        match members {
            [_] | [] => rewritten.push(directive),
            [first, ..] if *first == directive => {
                let group = overload_group(arena, name, members)?;
                tracing::debug!(group = group.raw(), members = members.len(), "formed overload group");
                groups.push(group);
                rewritten.push(group);
            }
            _ => {}
        }
    }

    let list = arena.push_list(&rewritten, "directives")?;
    arena.replace_kind(root, NodeKind::Document { directives: list })?;
    Ok(groups)
}
