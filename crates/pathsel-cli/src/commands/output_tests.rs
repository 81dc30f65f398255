use pathsel_core::Document;
use pathsel_html::HtmlTree;
use pathsel_lib::Engine;

use super::output::{Match, excerpt};
use super::select::collect;

const PAGE: &str = "<p id=\"intro\" class=\"lead big\">Hello <b>big</b>\n  world</p><a href=\"/x\">go</a>";

#[test]
fn matches_carry_spans_and_projections() {
    let tree = HtmlTree::parse(PAGE).unwrap();
    let matches = collect(&Engine::new(), &tree, "p, a/@href", |n| Some(tree.span(n))).unwrap();

    insta::assert_snapshot!(serde_json::to_string(&matches).unwrap(), @r#"[{"tag":"p","id":"intro","classes":["lead","big"],"text":"Hello big world","span":[0,59]},{"tag":"a","text":"go","value":"/x","span":[59,78]}]"#);
}

#[test]
fn native_documents_have_no_spans() {
    let tree = HtmlTree::parse(PAGE).unwrap();
    let doc = tree.to_document();
    let matches = collect(&Engine::new(), &doc, "b", |_| None).unwrap();

    insta::assert_snapshot!(serde_json::to_string(&matches).unwrap(), @r#"[{"tag":"b","text":"big"}]"#);
}

#[test]
fn compile_errors_are_returned() {
    let tree = HtmlTree::parse(PAGE).unwrap();
    let result = collect(&Engine::new(), &tree, "p >", |n| Some(tree.span(n)));
    assert!(result.is_err());
}

#[test]
fn excerpt_collapses_and_truncates() {
    let mut doc = Document::new();
    let root = doc.root();
    let p = doc.element(root, "p", &[]);
    doc.text(p, "  one\n\ttwo  ");
    let em = doc.element(p, "em", &[]);
    doc.text(em, "three");
    assert_eq!(excerpt(&doc, p), "one two three");

    let long = doc.element(root, "div", &[]);
    doc.text(long, &"word ".repeat(20));
    let cut = excerpt(&doc, long);
    assert_eq!(cut.chars().count(), 60);
    assert!(cut.ends_with("word…"));
}

#[test]
fn non_elements_are_named_by_kind() {
    let mut doc = Document::new();
    let root = doc.root();
    let text = doc.text(root, "loose");
    let m = Match::describe(&doc, text, None, None);
    assert_eq!(m.tag, "#text");
    assert_eq!(m.text, "loose");
    assert!(m.classes.is_empty());
}
