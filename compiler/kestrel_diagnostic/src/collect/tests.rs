use super::*;
use kestrel_ir::{
    group_overloads, specialize, ClosureId, LiteralKind, LiteralValue, Lowering, NodeTag,
    ParseError, SemanticError, SharedInterner,
};
use pretty_assertions::assert_eq;

const SOURCE: &str = "const x = 1;\nconst y = 2;\n";

fn span_of(needle: &str) -> Span {
    let start = SOURCE.find(needle).unwrap();
    Span::try_from_range(start..start + needle.len()).unwrap()
}

/// `const x = 1; const y = 2;` with one parse error at `y`.
fn document() -> Document {
    let mut lw = Lowering::new(SharedInterner::new(), SOURCE);
    let mut directives = Vec::new();
    for (name, value) in [("x", "1"), ("y", "2")] {
        let ident = lw.name(name, span_of(name)).unwrap();
        let lit = lw
            .literal_from_source(LiteralKind::Integer, span_of(value))
            .unwrap();
        directives.push(lw.const_directive(ident, None, lit, false, span_of(name)).unwrap());
    }
    lw.parse_error(ParseError::new("expected type annotation", span_of("y")));
    lw.finish(&directives).unwrap()
}

#[test]
fn test_parse_errors_come_first() {
    let mut doc = document();
    let first = doc.search(NodeTag::IntegerLiteral)[0];
    doc.arena
        .push_error(first, SemanticError::new("type mismatch").with_note("expected str"))
        .unwrap();

    let diagnostics = collect_diagnostics(&doc);
    assert_eq!(diagnostics.len(), 2);
    assert_eq!(diagnostics[0].code, ErrorCode::E1001);
    assert_eq!(diagnostics[0].message, "expected type annotation");
    assert_eq!(diagnostics[1].code, ErrorCode::E2001);
    assert_eq!(diagnostics[1].primary_span(), Some(span_of("1")));
    assert_eq!(diagnostics[1].notes, vec!["expected str".to_string()]);
}

#[test]
fn test_node_errors_in_pre_order() {
    let mut doc = document();
    let literals = doc.search(NodeTag::IntegerLiteral);
    let directives = doc.directives().to_vec();
    doc.arena
        .push_error(literals[1], SemanticError::new("second literal"))
        .unwrap();
    doc.arena
        .push_error(directives[1], SemanticError::new("second directive"))
        .unwrap();
    doc.arena
        .push_error(literals[0], SemanticError::new("first literal"))
        .unwrap();

    let messages: Vec<String> = collect_diagnostics(&doc)
        .into_iter()
        .skip(1)
        .map(|d| d.message)
        .collect();
    assert_eq!(
        messages,
        vec!["first literal", "second directive", "second literal"]
    );
}

#[test]
fn test_report_orders_by_position() {
    let mut doc = document();
    let first = doc.search(NodeTag::IntegerLiteral)[0];
    doc.arena
        .push_error(first, SemanticError::new("on line one"))
        .unwrap();

    let reported = report(&doc, DiagnosticConfig::unlimited());
    let messages: Vec<&str> = reported.iter().map(|d| d.message.as_str()).collect();
    assert_eq!(messages, vec!["on line one", "expected type annotation"]);
}

#[test]
fn test_injected_node_reports_donor_position() {
    let source = "fun f() = 1\nfun f() = 2\n";
    let mut lw = Lowering::new(SharedInterner::new(), source);
    let mut directives = Vec::new();
    for offset in [0u32, 12] {
        let span = Span::new(offset, offset + 11);
        lw.begin_function();
        let name = lw.name("f", span).unwrap();
        let body = lw
            .literal(LiteralValue::Integer(1), span)
            .unwrap();
        let function = lw.function(name, None, &[], Some(body), span).unwrap();
        directives.push(lw.fun_directive(function, false, span).unwrap());
    }
    let mut doc = lw.finish(&directives).unwrap();
    let group = group_overloads(&mut doc).unwrap()[0];
    doc.arena
        .push_error(group, SemanticError::new("ambiguous overloads"))
        .unwrap();

    let diagnostics = collect_diagnostics(&doc);
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].primary_span(), Some(Span::new(0, 11)));
    assert_eq!(diagnostics[0].notes.len(), 1);
}

#[test]
fn test_internal_error() {
    let diagnostic = internal_error(&IrError::NoEnclosingFunction, Span::new(3, 4));
    assert_eq!(diagnostic.code, ErrorCode::E9001);
    assert!(diagnostic.message.contains("outside of any function"));
    assert_eq!(diagnostic.primary_span(), Some(Span::new(3, 4)));
}

#[test]
fn test_detached_specialization_errors_are_reported() {
    let source = "fun f() = 1\n";
    let mut lw = Lowering::new(SharedInterner::new(), source);
    lw.begin_function();
    let name = lw.name("f", Span::new(4, 5)).unwrap();
    let body = lw.literal(LiteralValue::Integer(1), Span::new(10, 11)).unwrap();
    let function = lw
        .function(name, None, &[], Some(body), Span::new(0, 11))
        .unwrap();
    let directive = lw.fun_directive(function, false, Span::new(0, 11)).unwrap();
    let mut doc = lw.finish(&[directive]).unwrap();

    let special = specialize(&mut doc.arena, function, ClosureId::new(3)).unwrap();
    doc.arena
        .push_error(special, SemanticError::new("captured variable escapes"))
        .unwrap();
    doc.arena
        .push_error(body, SemanticError::new("in the tree"))
        .unwrap();

    assert!(doc.has_errors());
    let diagnostics = collect_diagnostics(&doc);
    let messages: Vec<&str> = diagnostics.iter().map(|d| d.message.as_str()).collect();
    assert_eq!(messages, vec!["in the tree", "captured variable escapes"]);
    assert_eq!(diagnostics[1].primary_span(), Some(Span::new(0, 11)));
    assert_eq!(diagnostics[1].labels[0].message, "ContextAwareFunction");
    assert_eq!(diagnostics[1].notes.len(), 1);
}

#[test]
fn test_deeply_nested_expression() {
    const DEPTH: usize = 200_000;
    let mut lw = Lowering::new(SharedInterner::new(), "");
    lw.begin_function();
    let innermost = lw.literal(LiteralValue::Integer(1), Span::DUMMY).unwrap();
    let mut body = innermost;
    for _ in 0..DEPTH {
        body = lw.number_neg(body, Span::DUMMY).unwrap();
    }
    let name = lw.name("deep", Span::DUMMY).unwrap();
    let function = lw.function(name, None, &[], Some(body), Span::DUMMY).unwrap();
    let directive = lw.fun_directive(function, false, Span::DUMMY).unwrap();
    let mut doc = lw.finish(&[directive]).unwrap();
    doc.arena
        .push_error(innermost, SemanticError::new("innermost"))
        .unwrap();

    let diagnostics = collect_diagnostics(&doc);
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].message, "innermost");
}
