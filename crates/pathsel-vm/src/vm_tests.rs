use pathsel_core::{Document, Host, NodeId};
use pathsel_program::Mode;

use crate::test_utils::{Plain, filter, list, program, select};
use crate::{NoopTracer, PrintTracer, Strategy, VM, Verbosity};

/// `<r><a id="x"/><b class="y"/></r>`
fn small() -> (Document, [NodeId; 3]) {
    let mut doc = Document::new();
    let root = doc.root();
    let r = doc.element(root, "r", &[]);
    let a = doc.element(r, "a", &[("id", "x")]);
    let b = doc.element(r, "b", &[("class", "y")]);
    (doc, [r, a, b])
}

#[test]
fn small_tree_queries() {
    let (doc, [r, a, b]) = small();

    assert_eq!(select(&doc, "#x", r), [a]);
    assert_eq!(select(&doc, ".y", r), [b]);

    let mut both = select(&doc, "a", r);
    both.extend(select(&doc, "b", r));
    assert_eq!(both, [a, b]);

    assert_eq!(filter(&doc, ":last", &[a, b]), [b]);
}

#[test]
fn repeated_runs_agree() {
    let (doc, _, items) = list();
    let first = select(&doc, ".a", doc.root());
    let second = select(&doc, ".a", doc.root());
    assert_eq!(first, second);
    assert_eq!(first, [items[1], items[3]]);
}

#[test]
fn universal_returns_elements_in_document_order() {
    let (doc, ul, items) = list();
    let all = select(&doc, "*", doc.root());
    let mut expected = vec![ul];
    expected.extend(&items);
    assert_eq!(all, expected);
}

#[test]
fn child_and_scoped_paths() {
    let (doc, ul, items) = list();
    assert_eq!(select(&doc, "ul > li", doc.root()), items);
    assert_eq!(select(&doc, "/ul/li", doc.root()), items);
    assert_eq!(select(&doc, "li", ul), items);
}

#[test]
fn nested_descendants_are_found_once() {
    let mut doc = Document::new();
    let root = doc.root();
    let d1 = doc.element(root, "div", &[]);
    let d2 = doc.element(d1, "div", &[]);
    let d3 = doc.element(d2, "DIV", &[]);

    assert_eq!(select(&doc, "div div", root), [d2, d3]);
    assert_eq!(select(&Plain(&doc), "div div", root), [d2, d3]);

    let p = program("div div", Mode::Select);
    let out = VM::builder(&doc)
        .strategy(Strategy::SideTable)
        .build()
        .select(&p, root);
    assert_eq!(out, [d2, d3]);
}

#[test]
fn id_lookup_uses_index_or_scan() {
    let (doc, ul, items) = list();
    assert_eq!(select(&doc, "#list", doc.root()), [ul]);
    assert_eq!(select(&Plain(&doc), "#list", doc.root()), [ul]);
    assert_eq!(select(&doc, "#list > li.a", doc.root()), [items[1], items[3]]);
    assert!(select(&doc, "#missing li", doc.root()).is_empty());
}

#[test]
fn attribute_operators() {
    let mut doc = Document::new();
    let root = doc.root();
    let foo = doc.element(root, "input", &[("name", "foobar"), ("size", "12")]);
    let xfoo = doc.element(root, "input", &[("name", "xfoo"), ("size", "7")]);
    let bare = doc.element(root, "input", &[]);

    assert_eq!(select(&doc, "[@name^='fo']", root), [foo]);
    assert_eq!(select(&doc, "[name$=foo]", root), [xfoo]);
    assert_eq!(select(&doc, "[name*=oo]", root), [foo, xfoo]);
    assert_eq!(select(&doc, "[name!=foobar]", root), [xfoo, bare]);
    assert_eq!(select(&doc, "[size%=4]", root), [foo]);
    assert_eq!(select(&doc, "[name]", root), [foo, xfoo]);
    assert_eq!(select(&doc, "input[size=7]", root), [xfoo]);
}

#[test]
fn class_name_alias_and_inline_style() {
    let mut doc = Document::new();
    let root = doc.root();
    let hidden = doc.element(
        root,
        "p",
        &[("className", "ignored"), ("class", "x"), ("style", "display: none")],
    );
    let shown = doc.element(root, "p", &[("style", "fontSize: 2px; display:block")]);

    assert_eq!(select(&doc, "[className=x]", root), [hidden]);
    assert_eq!(select(&doc, "p{display=none}", root), [hidden]);
    assert_eq!(select(&doc, "{display!=none}", root), [shown]);
}

#[test]
fn empty_set_stops_early() {
    let (doc, _, _) = list();
    let p = program("ol li.a", Mode::Select);
    let mut vm = VM::builder(&doc)
        .tracer(PrintTracer::new(Verbosity::Default, pathsel_core::Colors::OFF))
        .build();
    assert!(vm.select(&p, doc.root()).is_empty());
    assert_eq!(vm.tracer().lines().len(), 3, "program, first step, dedup");
}

#[test]
fn filter_keeps_input_order() {
    let (doc, _, items) = list();
    let reversed: Vec<_> = items.iter().rev().copied().collect();
    assert_eq!(filter(&doc, "li.a", &reversed), [items[3], items[1]]);
    assert!(filter(&doc, "ul", &items).is_empty());
}

#[test]
fn builder_defaults() {
    let (doc, _, _) = list();
    let vm: VM<'_, Document, NoopTracer> = VM::new(&doc);
    assert_eq!(vm.host().document(), doc.root());
    let _tracer: NoopTracer = vm.into_tracer();
}
