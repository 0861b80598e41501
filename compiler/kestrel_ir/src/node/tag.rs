//! Stable variant discriminants.

use std::fmt;

/// Discriminant identifying the concrete variant of a node.
///
/// Stored implicitly by [`NodeKind`](super::NodeKind) and recovered with
/// [`NodeKind::tag`](super::NodeKind::tag); it never depends on runtime
/// type identity, so tags compare equal across independently built arenas.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum NodeTag {
    Document,
    NameIdentifier,
    TypeReference,
    VariableReference,
    Parameter,
    Function,
    ContextAwareFunction,
    FunDirective,
    OverloadedFunction,
    VarDirective,
    ConstDirective,
    TypeDirective,
    Type,
    IntegerLiteral,
    FloatLiteral,
    BooleanLiteral,
    NullLiteral,
    FunctionCall,
    BinaryExpression,
    UnaryExpression,
    BooleanNeg,
    NumberNeg,
    MatchCondition,
    MatchLiteral,
    MatchDefault,
    Match,
}

impl NodeTag {
    /// Every tag, in declaration order.
    pub const ALL: [NodeTag; 26] = [
        NodeTag::Document,
        NodeTag::NameIdentifier,
        NodeTag::TypeReference,
        NodeTag::VariableReference,
        NodeTag::Parameter,
        NodeTag::Function,
        NodeTag::ContextAwareFunction,
        NodeTag::FunDirective,
        NodeTag::OverloadedFunction,
        NodeTag::VarDirective,
        NodeTag::ConstDirective,
        NodeTag::TypeDirective,
        NodeTag::Type,
        NodeTag::IntegerLiteral,
        NodeTag::FloatLiteral,
        NodeTag::BooleanLiteral,
        NodeTag::NullLiteral,
        NodeTag::FunctionCall,
        NodeTag::BinaryExpression,
        NodeTag::UnaryExpression,
        NodeTag::BooleanNeg,
        NodeTag::NumberNeg,
        NodeTag::MatchCondition,
        NodeTag::MatchLiteral,
        NodeTag::MatchDefault,
        NodeTag::Match,
    ];

    /// Stable diagnostic name.
    pub const fn as_str(self) -> &'static str {
        match self {
            NodeTag::Document => "DocumentNode",
            NodeTag::NameIdentifier => "NameIdentifierNode",
            NodeTag::TypeReference => "TypeReferenceNode",
            NodeTag::VariableReference => "VariableReferenceNode",
            NodeTag::Parameter => "ParameterNode",
            NodeTag::Function => "FunctionNode",
            NodeTag::ContextAwareFunction => "ContextAwareFunction",
            NodeTag::FunDirective => "FunDirectiveNode",
            NodeTag::OverloadedFunction => "OverloadedFunctionNode",
            NodeTag::VarDirective => "VarDirectiveNode",
            NodeTag::ConstDirective => "ConstDirectiveNode",
            NodeTag::TypeDirective => "TypeDirectiveNode",
            NodeTag::Type => "TypeNode",
            NodeTag::IntegerLiteral => "IntegerLiteral",
            NodeTag::FloatLiteral => "FloatLiteral",
            NodeTag::BooleanLiteral => "BooleanLiteral",
            NodeTag::NullLiteral => "NullLiteral",
            NodeTag::FunctionCall => "FunctionCallNode",
            NodeTag::BinaryExpression => "BinaryExpressionNode",
            NodeTag::UnaryExpression => "UnaryExpressionNode",
            NodeTag::BooleanNeg => "BooleanNegNode",
            NodeTag::NumberNeg => "NumberNegNode",
            NodeTag::MatchCondition => "MatchConditionNode",
            NodeTag::MatchLiteral => "MatchLiteralNode",
            NodeTag::MatchDefault => "MatchDefaultNode",
            NodeTag::Match => "MatchNode",
        }
    }

    /// Top-level declarations.
    pub const fn is_directive(self) -> bool {
        matches!(
            self,
            NodeTag::FunDirective
                | NodeTag::OverloadedFunction
                | NodeTag::VarDirective
                | NodeTag::ConstDirective
                | NodeTag::TypeDirective
        )
    }

    /// Anything usable in expression position, functions included.
    pub const fn is_expression(self) -> bool {
        matches!(
            self,
            NodeTag::VariableReference
                | NodeTag::Function
                | NodeTag::ContextAwareFunction
                | NodeTag::FunctionCall
                | NodeTag::BinaryExpression
                | NodeTag::UnaryExpression
                | NodeTag::BooleanNeg
                | NodeTag::NumberNeg
                | NodeTag::Match
        ) || self.is_literal()
            || self.is_matcher()
    }

    pub const fn is_literal(self) -> bool {
        matches!(
            self,
            NodeTag::IntegerLiteral
                | NodeTag::FloatLiteral
                | NodeTag::BooleanLiteral
                | NodeTag::NullLiteral
        )
    }

    /// Match arms.
    pub const fn is_matcher(self) -> bool {
        matches!(
            self,
            NodeTag::MatchCondition | NodeTag::MatchLiteral | NodeTag::MatchDefault
        )
    }

    pub const fn is_function(self) -> bool {
        matches!(self, NodeTag::Function | NodeTag::ContextAwareFunction)
    }
}

impl fmt::Display for NodeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
