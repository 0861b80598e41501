//! Function specialization under a captured lexical context.
//!
//! A [`NodeKind::ContextAwareFunction`] is the same declaration seen
//! through a specific closure. It stores only the id of its base function
//! and its own [`ClosureId`]; name, return type, parameters and body are
//! read through the base, so a decoration written on any of them is
//! visible from both sides. The specialization owns none of those nodes,
//! which keeps the tree a tree and traversal free of duplicates.
//!
//! Specializations are never nested: [`specialize`] rejects a base that is
//! itself specialized, so closure chains are one level deep and cannot
//! form cycles.

use crate::node::NodeKind;
use crate::{ClosureId, IrError, NodeArena, NodeId, NodeRange};

/// The shared parts of a function, resolved through any specialization.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct FunctionParts {
    /// The `Function` node that owns the parts below.
    pub declaration: NodeId,
    pub name: NodeId,
    pub return_type: Option<NodeId>,
    pub params: NodeRange,
    pub body: Option<NodeId>,
    /// Closure of the specialization, `None` for a plain declaration.
    pub closure: Option<ClosureId>,
}

/// Resolve a `Function` or `ContextAwareFunction` to its parts.
pub fn function_parts(arena: &NodeArena, id: NodeId) -> Result<FunctionParts, IrError> {
    match *arena.try_kind(id)? {
        NodeKind::Function {
            name,
            return_type,
            params,
            body,
        } => Ok(FunctionParts {
            declaration: id,
            name,
            return_type: return_type.to_option(),
            params,
            body: body.to_option(),
            closure: None,
        }),
        NodeKind::ContextAwareFunction { base, closure } => {
            let parts = function_parts(arena, base)?;
            Ok(FunctionParts {
                closure: Some(closure),
                ..parts
            })
        }
        ref other => Err(IrError::UnexpectedKind {
            node: id,
            expected: "function",
            found: other.tag(),
        }),
    }
}

/// The plain declaration behind `id` (itself for a `Function`).
pub fn base_function(arena: &NodeArena, id: NodeId) -> Result<NodeId, IrError> {
    function_parts(arena, id).map(|parts| parts.declaration)
}

/// Re-instantiate `base` under `closure`.
///
/// The result is a new, detached, injected node whose donor is `base`.
/// It starts with no locals and no internal identifier of its own.
/// `base` must be a plain `Function`; specializing a specialization is
/// [`IrError::NestedSpecialization`].
#[tracing::instrument(level = "debug", skip(arena))]
pub fn specialize(
    arena: &mut NodeArena,
    base: NodeId,
    closure: ClosureId,
) -> Result<NodeId, IrError> {
    let id = arena.push_injected(NodeKind::ContextAwareFunction { base, closure }, base)?;
    tracing::debug!(specialization = id.raw(), "specialized function");
    Ok(id)
}
