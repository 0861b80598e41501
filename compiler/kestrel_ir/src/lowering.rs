//! Node construction.
//!
//! [`Lowering`] is the builder an external CST-lowering step drives. Every
//! constructor validates what it can see locally: child slots hold the
//! right category of node, children exist and are unowned, const
//! directives are initialized and match expressions sit inside a function.
//! Violations are returned as [`IrError`]; malformed *source* is reported
//! with [`Lowering::parse_error`] instead.
//!
//! # Function frames
//!
//! Children are built before their parent, so a match expression exists
//! before the function that will own it. The builder keeps a stack of open
//! function frames: [`begin_function`](Lowering::begin_function) opens one,
//! [`function`](Lowering::function) closes it and hands the slots reserved
//! by nested matches to the new node.

use crate::node::{LiteralKind, LiteralValue, NodeKind, NodeTag};
use crate::{
    Document, IrError, LocalSlot, NodeArena, NodeId, ParseError, SharedInterner, Span,
};

/// Locals reserved inside one not-yet-built function.
#[derive(Debug, Default)]
struct FunctionFrame {
    locals: u32,
}

/// Builder for one [`Document`].
pub struct Lowering {
    arena: NodeArena,
    interner: SharedInterner,
    frames: Vec<FunctionFrame>,
    parse_errors: Vec<ParseError>,
    file: Option<String>,
    source: String,
}

impl Lowering {
    pub fn new(interner: SharedInterner, source: impl Into<String>) -> Self {
        let source = source.into();
        Lowering {
            arena: NodeArena::with_capacity(source.len()),
            interner,
            frames: Vec::new(),
            parse_errors: Vec::new(),
            file: None,
            source,
        }
    }

    #[must_use]
    pub fn with_file(mut self, file: impl Into<String>) -> Self {
        self.file = Some(file.into());
        self
    }

    pub fn arena(&self) -> &NodeArena {
        &self.arena
    }

    pub fn interner(&self) -> &SharedInterner {
        &self.interner
    }

    /// Record malformed input reported by the parser.
    pub fn parse_error(&mut self, error: ParseError) {
        tracing::debug!(span = %error.span, message = %error.message, "parse error");
        self.parse_errors.push(error);
    }

    // Slot validation

    fn expect(
        &self,
        id: NodeId,
        expected: &'static str,
        accept: fn(NodeTag) -> bool,
    ) -> Result<NodeId, IrError> {
        let found = self.arena.try_kind(id)?.tag();
        if accept(found) {
            Ok(id)
        } else {
            Err(IrError::UnexpectedKind {
                node: id,
                expected,
                found,
            })
        }
    }

    fn expect_optional(
        &self,
        id: Option<NodeId>,
        expected: &'static str,
        accept: fn(NodeTag) -> bool,
    ) -> Result<NodeId, IrError> {
        match id {
            Some(id) => self.expect(id, expected, accept),
            None => Ok(NodeId::INVALID),
        }
    }

    fn expect_name(&self, id: NodeId) -> Result<NodeId, IrError> {
        self.expect(id, "NameIdentifierNode", |t| t == NodeTag::NameIdentifier)
    }

    fn expect_expression(&self, id: NodeId) -> Result<NodeId, IrError> {
        self.expect(id, "expression", NodeTag::is_expression)
    }

    // Names

    pub fn name(&mut self, text: &str, span: Span) -> Result<NodeId, IrError> {
        let name = self.interner.intern(text);
        self.arena.push(NodeKind::NameIdentifier { name }, span)
    }

    /// Syntactic type reference such as `int`, `**int` or `int[]`.
    pub fn type_reference(
        &mut self,
        name: &str,
        pointer_depth: u32,
        is_array: bool,
        span: Span,
    ) -> Result<NodeId, IrError> {
        let name = self.interner.intern(name);
        self.arena.push(
            NodeKind::TypeReference {
                name,
                pointer_depth,
                is_array,
            },
            span,
        )
    }

    pub fn variable_reference(&mut self, variable: NodeId, span: Span) -> Result<NodeId, IrError> {
        let variable = self.expect_name(variable)?;
        self.arena
            .push(NodeKind::VariableReference { variable }, span)
    }

    pub fn parameter(
        &mut self,
        name: NodeId,
        ty: Option<NodeId>,
        default_value: Option<NodeId>,
        span: Span,
    ) -> Result<NodeId, IrError> {
        let name = self.expect_name(name)?;
        let ty = self.expect_optional(ty, "TypeReferenceNode", |t| t == NodeTag::TypeReference)?;
        let default_value = self.expect_optional(default_value, "expression", NodeTag::is_expression)?;
        self.arena.push(
            NodeKind::Parameter {
                name,
                ty,
                default_value,
            },
            span,
        )
    }

    // Functions

    /// Open a function frame. Must be paired with [`function`](Self::function).
    pub fn begin_function(&mut self) {
        self.frames.push(FunctionFrame::default());
    }

    /// Close the innermost frame and build its function.
    pub fn function(
        &mut self,
        name: NodeId,
        return_type: Option<NodeId>,
        params: &[NodeId],
        body: Option<NodeId>,
        span: Span,
    ) -> Result<NodeId, IrError> {
        let name = self.expect_name(name)?;
        let return_type = self.expect_optional(return_type, "TypeReferenceNode", |t| {
            t == NodeTag::TypeReference
        })?;
        for &param in params {
            self.expect(param, "ParameterNode", |t| t == NodeTag::Parameter)?;
        }
        let body = self.expect_optional(body, "expression", NodeTag::is_expression)?;

        let frame = self.frames.pop().ok_or(IrError::UnbalancedFunction)?;
        let params = self.arena.push_list(params, "parameters")?;
        let id = self.arena.push(
            NodeKind::Function {
                name,
                return_type,
                params,
                body,
            },
            span,
        )?;
        self.arena.reserve_locals(id, frame.locals as usize)?;
        Ok(id)
    }

    // Directives

    pub fn fun_directive(
        &mut self,
        function: NodeId,
        exported: bool,
        span: Span,
    ) -> Result<NodeId, IrError> {
        let function = self.expect(function, "FunctionNode", |t| t == NodeTag::Function)?;
        self.arena
            .push(NodeKind::FunDirective { function, exported }, span)
    }

    pub fn var_directive(
        &mut self,
        name: NodeId,
        ty: Option<NodeId>,
        value: Option<NodeId>,
        exported: bool,
        span: Span,
    ) -> Result<NodeId, IrError> {
        let name = self.expect_name(name)?;
        let ty = self.expect_optional(ty, "TypeReferenceNode", |t| t == NodeTag::TypeReference)?;
        let value = self.expect_optional(value, "expression", NodeTag::is_expression)?;
        self.arena.push(
            NodeKind::VarDirective {
                name,
                ty,
                value,
                exported,
            },
            span,
        )
    }

    /// Immutable binding. `value` must be present.
    pub fn const_directive(
        &mut self,
        name: NodeId,
        ty: Option<NodeId>,
        value: NodeId,
        exported: bool,
        span: Span,
    ) -> Result<NodeId, IrError> {
        if !value.is_valid() {
            return Err(IrError::UninitializedConst(span));
        }
        let name = self.expect_name(name)?;
        let ty = self.expect_optional(ty, "TypeReferenceNode", |t| t == NodeTag::TypeReference)?;
        let value = self.expect_expression(value)?;
        self.arena.push(
            NodeKind::ConstDirective {
                name,
                ty,
                value,
                exported,
            },
            span,
        )
    }

    pub fn type_directive(
        &mut self,
        name: NodeId,
        value_type: NodeId,
        exported: bool,
        span: Span,
    ) -> Result<NodeId, IrError> {
        let name = self.expect_name(name)?;
        let value_type = self.expect(value_type, "TypeNode", |t| t == NodeTag::Type)?;
        self.arena.push(
            NodeKind::TypeDirective {
                name,
                value_type,
                exported,
            },
            span,
        )
    }

    /// Type-definition body. Its native type is filled in later.
    pub fn type_node(&mut self, span: Span) -> Result<NodeId, IrError> {
        self.arena.push(NodeKind::Type, span)
    }

    /// Group same-named function directives. See [`overload_group`](crate::overload_group).
    pub fn overload_group(&mut self, name: &str, members: &[NodeId]) -> Result<NodeId, IrError> {
        let name = self.interner.intern(name);
        crate::overload_group(&mut self.arena, name, members)
    }

    // Literals

    pub fn literal(&mut self, value: LiteralValue, span: Span) -> Result<NodeId, IrError> {
        self.arena.push(NodeKind::Literal(value), span)
    }

    /// Parse the source text under `span` as a literal of `kind`.
    pub fn literal_from_source(&mut self, kind: LiteralKind, span: Span) -> Result<NodeId, IrError> {
        let text = span.slice(&self.source).ok_or_else(|| IrError::InvalidLiteral {
            kind,
            text: String::new(),
        })?;
        let value = LiteralValue::parse_as(kind, text)?;
        self.literal(value, span)
    }

    // Expressions

    pub fn call(
        &mut self,
        callee: NodeId,
        arguments: &[NodeId],
        is_infix: bool,
        span: Span,
    ) -> Result<NodeId, IrError> {
        let callee = self.expect_expression(callee)?;
        for &arg in arguments {
            self.expect_expression(arg)?;
        }
        let arguments = self.arena.push_list(arguments, "arguments")?;
        self.arena.push(
            NodeKind::FunctionCall {
                callee,
                arguments,
                is_infix,
            },
            span,
        )
    }

    /// Binary expression. An empty `operator` leaves it unset.
    pub fn binary(
        &mut self,
        lhs: NodeId,
        operator: &str,
        rhs: NodeId,
        span: Span,
    ) -> Result<NodeId, IrError> {
        let lhs = self.expect_expression(lhs)?;
        let rhs = self.expect_expression(rhs)?;
        let operator = self.interner.intern(operator);
        self.arena
            .push(NodeKind::Binary { lhs, operator, rhs }, span)
    }

    pub fn unary(&mut self, operator: &str, operand: NodeId, span: Span) -> Result<NodeId, IrError> {
        let operand = self.expect_expression(operand)?;
        let operator = self.interner.intern(operator);
        self.arena
            .push(NodeKind::Unary { operator, operand }, span)
    }

    /// `!operand`
    pub fn boolean_neg(&mut self, operand: NodeId, span: Span) -> Result<NodeId, IrError> {
        let operand = self.expect_expression(operand)?;
        self.arena.push(NodeKind::BooleanNeg { operand }, span)
    }

    /// `-operand`
    pub fn number_neg(&mut self, operand: NodeId, span: Span) -> Result<NodeId, IrError> {
        let operand = self.expect_expression(operand)?;
        self.arena.push(NodeKind::NumberNeg { operand }, span)
    }

    /// Mark an expression as written inside parentheses.
    pub fn parenthesized(&mut self, id: NodeId) -> Result<NodeId, IrError> {
        self.arena.set_parenthesized(id)?;
        Ok(id)
    }

    // Pattern matching

    /// `case name if condition -> body`
    pub fn match_condition(
        &mut self,
        declared_name: NodeId,
        condition: NodeId,
        body: NodeId,
        span: Span,
    ) -> Result<NodeId, IrError> {
        let declared_name = self.expect_name(declared_name)?;
        let condition = self.expect_expression(condition)?;
        let body = self.expect_expression(body)?;
        self.arena.push(
            NodeKind::MatchCondition {
                declared_name,
                condition,
                body,
            },
            span,
        )
    }

    /// `case <literal> -> body`
    pub fn match_literal(
        &mut self,
        literal: NodeId,
        body: NodeId,
        span: Span,
    ) -> Result<NodeId, IrError> {
        let literal = self.expect(literal, "literal", NodeTag::is_literal)?;
        let body = self.expect_expression(body)?;
        self.arena
            .push(NodeKind::MatchLiteral { literal, body }, span)
    }

    /// `else -> body`
    pub fn match_default(&mut self, body: NodeId, span: Span) -> Result<NodeId, IrError> {
        let body = self.expect_expression(body)?;
        self.arena.push(NodeKind::MatchDefault { body }, span)
    }

    /// Match expression with a fresh local slot in the innermost open function.
    ///
    /// At most one default arm is allowed and it must come last.
    pub fn match_expr(
        &mut self,
        scrutinee: NodeId,
        arms: &[NodeId],
        span: Span,
    ) -> Result<NodeId, IrError> {
        let scrutinee = self.expect_expression(scrutinee)?;
        for (i, &arm) in arms.iter().enumerate() {
            self.expect(arm, "match arm", NodeTag::is_matcher)?;
            if self.arena.tag(arm) == NodeTag::MatchDefault && i + 1 != arms.len() {
                return Err(IrError::DefaultArmNotLast { arm });
            }
        }

        let frame = self.frames.last().ok_or(IrError::NoEnclosingFunction)?;
        let local = LocalSlot::new(frame.locals);
        let arm_range = self.arena.push_list(arms, "match arms")?;
        let id = self.arena.push(
            NodeKind::Match {
                scrutinee,
                arms: arm_range,
                local,
            },
            span,
        )?;
        if let Some(frame) = self.frames.last_mut() {
            frame.locals += 1;
        }
        Ok(id)
    }

    // Completion

    /// Build the root over `directives` and hand back the document.
    pub fn finish(mut self, directives: &[NodeId]) -> Result<Document, IrError> {
        for &directive in directives {
            self.expect(directive, "directive", NodeTag::is_directive)?;
        }
        if !self.frames.is_empty() {
            tracing::warn!(open = self.frames.len(), "lowering finished with open function frames");
        }
        let list = self.arena.push_list(directives, "directives")?;
        let span = u32::try_from(self.source.len()).map_or(Span::DUMMY, |end| Span::new(0, end));
        let root = self
            .arena
            .push(NodeKind::Document { directives: list }, span)?;
        tracing::debug!(
            nodes = self.arena.len(),
            parse_errors = self.parse_errors.len(),
            "lowered document"
        );
        Ok(Document::new(
            self.arena,
            root,
            self.interner,
            self.parse_errors,
            self.file,
            self.source,
        ))
    }
}
