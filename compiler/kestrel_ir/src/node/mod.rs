//! Node variants.
//!
//! All children are arena indices, not boxes. Optional child slots hold
//! `NodeId::INVALID` when absent; ordered child sequences are `NodeRange`s.
//!
//! # Variant catalog
//!
//! - Root: `Document`
//! - Names: `NameIdentifier`, `TypeReference` (syntactic, not a resolved type)
//! - Directives: `FunDirective`, `OverloadedFunction`, `VarDirective`,
//!   `ConstDirective`, `TypeDirective`
//! - Functions: `Function`, `ContextAwareFunction`, `Parameter`
//! - Expressions: literals, `VariableReference`, `FunctionCall`, `Binary`,
//!   `Unary`, `BooleanNeg`, `NumberNeg`, `Match`
//! - Match arms: `MatchCondition`, `MatchLiteral`, `MatchDefault`

mod literal;
mod tag;

pub use literal::{LiteralKind, LiteralValue};
pub use tag::NodeTag;

use crate::{ClosureId, LocalSlot, Name, NodeId, NodeRange};

bitflags::bitflags! {
    /// Per-node boolean attributes.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
    pub struct NodeFlags: u8 {
        /// Written inside parentheses in the source.
        const PARENTHESIZED = 1 << 0;
        /// Synthesized by a compiler pass, not produced from source tokens.
        const INJECTED = 1 << 1;
    }
}

/// Node variant payload.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub enum NodeKind {
    /// Compilation unit root.
    Document { directives: NodeRange },

    /// Identifier leaf.
    NameIdentifier { name: Name },

    /// Syntactic type reference: `int`, `*int`, `int[]`.
    TypeReference {
        name: Name,
        pointer_depth: u32,
        is_array: bool,
    },

    /// Reference to a variable by name.
    VariableReference { variable: NodeId },

    Parameter {
        name: NodeId,
        /// `NodeId::INVALID` = no annotation.
        ty: NodeId,
        /// `NodeId::INVALID` = no default.
        default_value: NodeId,
    },

    Function {
        name: NodeId,
        /// `NodeId::INVALID` = no return type annotation.
        return_type: NodeId,
        params: NodeRange,
        /// `NodeId::INVALID` = declaration without a body.
        body: NodeId,
    },

    /// A function re-instantiated under a captured lexical context.
    ///
    /// `base` is an alias, not an owning edge: name, return type,
    /// parameters and body are read through it.
    ContextAwareFunction { base: NodeId, closure: ClosureId },

    FunDirective { function: NodeId, exported: bool },

    /// Same-named function directives awaiting signature-based resolution.
    OverloadedFunction { name: Name, functions: NodeRange },

    VarDirective {
        name: NodeId,
        ty: NodeId,
        /// `NodeId::INVALID` = uninitialized.
        value: NodeId,
        exported: bool,
    },

    /// Immutable binding; `value` is always present.
    ConstDirective {
        name: NodeId,
        ty: NodeId,
        value: NodeId,
        exported: bool,
    },

    TypeDirective {
        name: NodeId,
        value_type: NodeId,
        exported: bool,
    },

    /// Type definition body. Its resolved native type is a decoration.
    Type,

    Literal(LiteralValue),

    FunctionCall {
        /// Any expression, not necessarily a bare identifier.
        callee: NodeId,
        arguments: NodeRange,
        /// Operator-sugar call (`a op b`) rather than `f(a, b)`.
        is_infix: bool,
    },

    Binary {
        lhs: NodeId,
        /// `Name::EMPTY` = not yet assigned.
        operator: Name,
        rhs: NodeId,
    },

    Unary { operator: Name, operand: NodeId },

    /// `!expr`
    BooleanNeg { operand: NodeId },

    /// `-expr`
    NumberNeg { operand: NodeId },

    /// `case name if condition -> body`
    MatchCondition {
        declared_name: NodeId,
        condition: NodeId,
        body: NodeId,
    },

    /// `case literal -> body`
    MatchLiteral { literal: NodeId, body: NodeId },

    /// `else -> body`
    MatchDefault { body: NodeId },

    Match {
        scrutinee: NodeId,
        arms: NodeRange,
        /// Where the matched value lives while arms are evaluated.
        local: LocalSlot,
    },
}

impl NodeKind {
    /// The variant discriminant.
    pub const fn tag(&self) -> NodeTag {
        match self {
            NodeKind::Document { .. } => NodeTag::Document,
            NodeKind::NameIdentifier { .. } => NodeTag::NameIdentifier,
            NodeKind::TypeReference { .. } => NodeTag::TypeReference,
            NodeKind::VariableReference { .. } => NodeTag::VariableReference,
            NodeKind::Parameter { .. } => NodeTag::Parameter,
            NodeKind::Function { .. } => NodeTag::Function,
            NodeKind::ContextAwareFunction { .. } => NodeTag::ContextAwareFunction,
            NodeKind::FunDirective { .. } => NodeTag::FunDirective,
            NodeKind::OverloadedFunction { .. } => NodeTag::OverloadedFunction,
            NodeKind::VarDirective { .. } => NodeTag::VarDirective,
            NodeKind::ConstDirective { .. } => NodeTag::ConstDirective,
            NodeKind::TypeDirective { .. } => NodeTag::TypeDirective,
            NodeKind::Type => NodeTag::Type,
            NodeKind::Literal(LiteralValue::Integer(_)) => NodeTag::IntegerLiteral,
            NodeKind::Literal(LiteralValue::Float(_)) => NodeTag::FloatLiteral,
            NodeKind::Literal(LiteralValue::Boolean(_)) => NodeTag::BooleanLiteral,
            NodeKind::Literal(LiteralValue::Null) => NodeTag::NullLiteral,
            NodeKind::FunctionCall { .. } => NodeTag::FunctionCall,
            NodeKind::Binary { .. } => NodeTag::BinaryExpression,
            NodeKind::Unary { .. } => NodeTag::UnaryExpression,
            NodeKind::BooleanNeg { .. } => NodeTag::BooleanNeg,
            NodeKind::NumberNeg { .. } => NodeTag::NumberNeg,
            NodeKind::MatchCondition { .. } => NodeTag::MatchCondition,
            NodeKind::MatchLiteral { .. } => NodeTag::MatchLiteral,
            NodeKind::MatchDefault { .. } => NodeTag::MatchDefault,
            NodeKind::Match { .. } => NodeTag::Match,
        }
    }

    /// `Some(mutable)` for variable bindings, `None` for everything else.
    pub const fn binding_mutability(&self) -> Option<bool> {
        match self {
            NodeKind::VarDirective { .. } => Some(true),
            NodeKind::ConstDirective { .. } => Some(false),
            _ => None,
        }
    }

    /// Export flag of a directive.
    pub const fn is_exported(&self) -> bool {
        match self {
            NodeKind::FunDirective { exported, .. }
            | NodeKind::VarDirective { exported, .. }
            | NodeKind::ConstDirective { exported, .. }
            | NodeKind::TypeDirective { exported, .. } => *exported,
            _ => false,
        }
    }

    /// Arm body of a matcher.
    pub const fn arm_body(&self) -> Option<NodeId> {
        match self {
            NodeKind::MatchCondition { body, .. }
            | NodeKind::MatchLiteral { body, .. }
            | NodeKind::MatchDefault { body } => Some(*body),
            _ => None,
        }
    }
}
