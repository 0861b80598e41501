//! Structural child discovery.
//!
//! One exhaustive `match` over [`NodeKind`] lists the children of every
//! variant. Adding a variant with node-valued fields fails to compile until
//! it is handled here, and every pass that walks the tree (the visitor,
//! [`search`](crate::search), parent linking, diagnostics collection) picks
//! it up without further changes.

use smallvec::SmallVec;

use crate::node::NodeKind;
use crate::{NodeId, NodeRange};

/// Direct children of one node, in source order.
pub type Children = SmallVec<[NodeId; 4]>;

/// Children of `kind`, resolving ranges against the arena's list storage.
///
/// Order is declaration/evaluation order (parameters before body, callee
/// before arguments, scrutinee before arms). Absent optional children are
/// skipped. The parent link is never included, and neither is the aliased
/// base of a `ContextAwareFunction`, which is not owned by it.
pub fn kind_children(kind: &NodeKind, lists: &[NodeId]) -> Children {
    let mut out = Children::new();
    let one = |id: NodeId, out: &mut Children| {
        if id.is_valid() {
            out.push(id);
        }
    };
    let many = |range: NodeRange, out: &mut Children| {
        if !range.is_empty() {
            let start = range.start as usize;
            if let Some(slice) = lists.get(start..start + range.len()) {
                out.extend_from_slice(slice);
            }
        }
    };

    match *kind {
        // Leaves
        NodeKind::NameIdentifier { .. }
        | NodeKind::TypeReference { .. }
        | NodeKind::Type
        | NodeKind::Literal(_)
        | NodeKind::ContextAwareFunction { .. } => {}

        NodeKind::Document { directives } => many(directives, &mut out),
        NodeKind::OverloadedFunction { functions, .. } => many(functions, &mut out),

        NodeKind::VariableReference { variable } => one(variable, &mut out),
        NodeKind::Parameter {
            name,
            ty,
            default_value,
        } => {
            one(name, &mut out);
            one(ty, &mut out);
            one(default_value, &mut out);
        }
        NodeKind::Function {
            name,
            return_type,
            params,
            body,
        } => {
            one(name, &mut out);
            one(return_type, &mut out);
            many(params, &mut out);
            one(body, &mut out);
        }
        NodeKind::FunDirective { function, .. } => one(function, &mut out),
        NodeKind::VarDirective {
            name, ty, value, ..
        }
        | NodeKind::ConstDirective {
            name, ty, value, ..
        } => {
            one(name, &mut out);
            one(ty, &mut out);
            one(value, &mut out);
        }
        NodeKind::TypeDirective {
            name, value_type, ..
        } => {
            one(name, &mut out);
            one(value_type, &mut out);
        }

        NodeKind::FunctionCall {
            callee, arguments, ..
        } => {
            one(callee, &mut out);
            many(arguments, &mut out);
        }
        NodeKind::Binary { lhs, rhs, .. } => {
            one(lhs, &mut out);
            one(rhs, &mut out);
        }
        NodeKind::Unary { operand, .. }
        | NodeKind::BooleanNeg { operand }
        | NodeKind::NumberNeg { operand } => one(operand, &mut out),

        NodeKind::MatchCondition {
            declared_name,
            condition,
            body,
        } => {
            one(declared_name, &mut out);
            one(condition, &mut out);
            one(body, &mut out);
        }
        NodeKind::MatchLiteral { literal, body } => {
            one(literal, &mut out);
            one(body, &mut out);
        }
        NodeKind::MatchDefault { body } => one(body, &mut out),
        NodeKind::Match {
            scrutinee, arms, ..
        } => {
            one(scrutinee, &mut out);
            many(arms, &mut out);
        }
    }

    out
}
