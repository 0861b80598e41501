//! End-to-end lowering scenarios.
//!
//! Each test drives `Lowering` the way a CST-lowering step would for a
//! small source snippet, then inspects the resulting document.

#![allow(clippy::unwrap_used, reason = "Tests can panic")]

use kestrel_ir::{
    function_parts, group_overloads, search, specialize, ClosureId, Document, LiteralValue,
    LocalSlot, Lowering, NodeKind, NodeTag, SharedInterner, Span, StringLookup, TypeId,
};
use pretty_assertions::assert_eq;

fn span(source: &str, needle: &str) -> Span {
    let start = source.find(needle).unwrap();
    Span::try_from_range(start..start + needle.len()).unwrap()
}

/// `const x: int = 5;`
fn const_document() -> Document {
    let source = "const x: int = 5;";
    let mut lw = Lowering::new(SharedInterner::new(), source);
    let x = lw.name("x", span(source, "x")).unwrap();
    let int = lw.type_reference("int", 0, false, span(source, "int")).unwrap();
    let five = lw
        .literal_from_source(kestrel_ir::LiteralKind::Integer, span(source, "5"))
        .unwrap();
    let directive = lw
        .const_directive(x, Some(int), five, false, span(source, source))
        .unwrap();
    lw.finish(&[directive]).unwrap()
}

#[test]
fn const_directive_scenario() {
    kestrel_ir::init_tracing();
    let doc = const_document();
    let consts = doc.search(NodeTag::ConstDirective);
    assert_eq!(consts.len(), 1);
    let directive = consts[0];

    let kind = *doc.arena.kind(directive);
    assert_eq!(kind.binding_mutability(), Some(false));
    let NodeKind::ConstDirective {
        name, ty, value, ..
    } = kind
    else {
        panic!("expected const directive, found {kind:?}");
    };
    assert_eq!(doc.name_of(name), Some("x"));
    assert_eq!(doc.name_of(ty), Some("int"));
    assert_eq!(doc.arena.tag(ty), NodeTag::TypeReference);
    assert_eq!(doc.arena.literal(value), Some(LiteralValue::Integer(5)));
    assert_eq!(doc.text(value).unwrap(), "5");
    assert!(doc.arena.errors(directive).is_empty());
    assert!(!doc.has_errors());
    assert!(doc.arena.verify_tree(doc.root).is_ok());
}

/// `fun add(a: int, b: int) = a + b`
fn declare_add(lw: &mut Lowering, params: &[&str]) -> kestrel_ir::NodeId {
    lw.begin_function();
    let mut param_ids = Vec::new();
    let mut refs = Vec::new();
    for p in params {
        let pname = lw.name(p, Span::DUMMY).unwrap();
        let pty = lw.type_reference("int", 0, false, Span::DUMMY).unwrap();
        param_ids.push(lw.parameter(pname, Some(pty), None, Span::DUMMY).unwrap());
        let rname = lw.name(p, Span::DUMMY).unwrap();
        refs.push(lw.variable_reference(rname, Span::DUMMY).unwrap());
    }
    let body = match refs.as_slice() {
        [a, b] => lw.binary(*a, "+", *b, Span::DUMMY).unwrap(),
        [a] => *a,
        _ => lw.literal(LiteralValue::Integer(0), Span::DUMMY).unwrap(),
    };
    let name = lw.name("add", Span::DUMMY).unwrap();
    let function = lw
        .function(name, None, &param_ids, Some(body), Span::DUMMY)
        .unwrap();
    lw.fun_directive(function, true, Span::DUMMY).unwrap()
}

#[test]
fn overload_grouping_scenario() {
    kestrel_ir::init_tracing();
    let mut lw = Lowering::new(SharedInterner::new(), "");
    let first = declare_add(&mut lw, &["a", "b"]);
    let second = declare_add(&mut lw, &["a"]);
    let mut doc = lw.finish(&[first, second]).unwrap();

    let groups = group_overloads(&mut doc).unwrap();
    assert_eq!(doc.directives(), groups.as_slice());
    let NodeKind::OverloadedFunction { name, functions } = *doc.arena.kind(groups[0]) else {
        panic!("expected an overload group");
    };
    assert_eq!(doc.interner.lookup(name), "add");
    assert_eq!(doc.arena.list(functions), &[first, second]);
    assert_eq!(doc.text(groups[0]).unwrap(), "\"add\"");
    assert!(doc.arena.verify_tree(doc.root).is_ok());
}

#[test]
fn match_scenario() {
    // fun f(x) = match x { case y if y > 0 -> 1, else -> 0 }
    let mut lw = Lowering::new(SharedInterner::new(), "");
    lw.begin_function();
    let x_param_name = lw.name("x", Span::DUMMY).unwrap();
    let x_param = lw.parameter(x_param_name, None, None, Span::DUMMY).unwrap();

    let x = lw.name("x", Span::DUMMY).unwrap();
    let scrutinee = lw.variable_reference(x, Span::DUMMY).unwrap();
    let y = lw.name("y", Span::DUMMY).unwrap();
    let y_use = lw.name("y", Span::DUMMY).unwrap();
    let y_ref = lw.variable_reference(y_use, Span::DUMMY).unwrap();
    let zero = lw.literal(LiteralValue::Integer(0), Span::DUMMY).unwrap();
    let guard = lw.binary(y_ref, ">", zero, Span::DUMMY).unwrap();
    let one = lw.literal(LiteralValue::Integer(1), Span::DUMMY).unwrap();
    let conditional = lw.match_condition(y, guard, one, Span::DUMMY).unwrap();
    let fallback_value = lw.literal(LiteralValue::Integer(0), Span::DUMMY).unwrap();
    let default = lw.match_default(fallback_value, Span::DUMMY).unwrap();
    let matched = lw
        .match_expr(scrutinee, &[conditional, default], Span::DUMMY)
        .unwrap();

    let fname = lw.name("f", Span::DUMMY).unwrap();
    let function = lw
        .function(fname, None, &[x_param], Some(matched), Span::DUMMY)
        .unwrap();
    let directive = lw.fun_directive(function, false, Span::DUMMY).unwrap();
    let mut doc = lw.finish(&[directive]).unwrap();

    let NodeKind::Match { arms, local, .. } = *doc.arena.kind(matched) else {
        panic!("expected a match");
    };
    let arm_tags: Vec<NodeTag> = doc
        .arena
        .list(arms)
        .iter()
        .map(|&arm| doc.arena.tag(arm))
        .collect();
    assert_eq!(arm_tags, vec![NodeTag::MatchCondition, NodeTag::MatchDefault]);
    assert_eq!(local, LocalSlot::new(0));
    assert_eq!(doc.arena.enclosing_function(matched), Some(function));

    // Later passes allocate past the slot reserved at lowering.
    let extra = doc.arena.allocate_local(function, TypeId::new(3)).unwrap();
    assert_ne!(extra, local);
    doc.arena
        .set_local_type(function, local, TypeId::new(2))
        .unwrap();
    assert_eq!(doc.arena.locals(function), &[TypeId::new(2), TypeId::new(3)]);

    assert_eq!(
        search(&doc.arena, doc.root, NodeTag::MatchDefault),
        vec![default]
    );
}

#[test]
fn specialization_scenario() {
    let mut lw = Lowering::new(SharedInterner::new(), "");
    let directive = declare_add(&mut lw, &["a", "b"]);
    let mut doc = lw.finish(&[directive]).unwrap();
    let function = doc.search(NodeTag::Function)[0];

    let special = specialize(&mut doc.arena, function, ClosureId::new(1)).unwrap();
    let parts = function_parts(&doc.arena, special).unwrap();
    assert_eq!(parts.name, function_parts(&doc.arena, function).unwrap().name);
    assert_eq!(doc.arena.list(parts.params).len(), 2);

    // The detached specialization is not part of the document tree.
    assert!(doc.search(NodeTag::ContextAwareFunction).is_empty());
    assert_eq!(search(&doc.arena, special, NodeTag::ContextAwareFunction), vec![special]);
}
