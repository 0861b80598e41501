//! Short diagnostic rendering of a node's atomic payload.

use crate::node::NodeKind;
use crate::{IrError, NodeArena, NodeId, StringLookup};

/// Render the atomic payload of a node.
///
/// Names and operators are quoted, literals render as their value, and
/// purely structural nodes render as the empty string. An overload group
/// renders its quoted group name. Reading the
/// operator of a binary expression that never received one is a lowering
/// bug and yields [`IrError::MissingOperator`].
pub fn text<I: StringLookup + ?Sized>(
    arena: &NodeArena,
    interner: &I,
    id: NodeId,
) -> Result<String, IrError> {
    let rendered = match *arena.try_kind(id)? {
        NodeKind::NameIdentifier { name }
        | NodeKind::TypeReference { name, .. }
        | NodeKind::OverloadedFunction { name, .. } => quote(interner.lookup(name)),
        NodeKind::Binary { operator, .. } => {
            if operator.is_empty() {
                return Err(IrError::MissingOperator(id));
            }
            quote(interner.lookup(operator))
        }
        NodeKind::Unary { operator, .. } => quote(interner.lookup(operator)),
        NodeKind::Literal(value) => value.render(),
        NodeKind::Document { .. }
        | NodeKind::VariableReference { .. }
        | NodeKind::Parameter { .. }
        | NodeKind::Function { .. }
        | NodeKind::ContextAwareFunction { .. }
        | NodeKind::FunDirective { .. }
        | NodeKind::VarDirective { .. }
        | NodeKind::ConstDirective { .. }
        | NodeKind::TypeDirective { .. }
        | NodeKind::Type
        | NodeKind::FunctionCall { .. }
        | NodeKind::BooleanNeg { .. }
        | NodeKind::NumberNeg { .. }
        | NodeKind::MatchCondition { .. }
        | NodeKind::MatchLiteral { .. }
        | NodeKind::MatchDefault { .. }
        | NodeKind::Match { .. } => String::new(),
    };
    Ok(rendered)
}

fn quote(s: &str) -> String {
    format!("{s:?}")
}
