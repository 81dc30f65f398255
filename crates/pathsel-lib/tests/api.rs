use std::sync::Arc;

use indoc::indoc;
use pathsel_lib::{Document, Engine, Host, HtmlTree, Mode, NodeId, Strategy};

/// `<r><a id="x"/><b class="y"/></r>`
fn small() -> (Document, [NodeId; 3]) {
    let mut doc = Document::new();
    let root = doc.root();
    let r = doc.element(root, "r", &[]);
    let a = doc.element(r, "a", &[("id", "x")]);
    let b = doc.element(r, "b", &[("class", "y")]);
    (doc, [r, a, b])
}

fn five_items() -> (Document, Vec<NodeId>) {
    let mut doc = Document::new();
    let root = doc.root();
    let ul = doc.element(root, "ul", &[]);
    let items = (0..5).map(|_| doc.element(ul, "li", &[])).collect();
    (doc, items)
}

#[test]
fn compiled_programs_are_shared() {
    let engine = Engine::new();
    let first = engine.compile(".x", Mode::Select).unwrap();
    let second = engine.compile(".x", Mode::Select).unwrap();
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(engine.cache().stats().misses, 1);
}

#[test]
fn repeated_selects_are_stable() {
    let (doc, [_, _, b]) = small();
    let first = pathsel_lib::select(&doc, ".y").unwrap();
    let second = pathsel_lib::select(&doc, ".y").unwrap();
    assert_eq!(first, second);
    assert_eq!(first, [b]);
}

#[test]
fn universal_alternatives_keep_duplicates() {
    let (doc, items) = five_items();
    let once = pathsel_lib::select(&doc, "*").unwrap();
    let twice = pathsel_lib::select(&doc, "*, *").unwrap();

    assert_eq!(once.len(), items.len() + 1);
    assert_eq!(twice.len(), 2 * once.len());
    assert_eq!(pathsel_lib::deduplicate(&doc, twice), once);
}

#[test]
fn nth_child_odd_and_even() {
    let (doc, items) = five_items();
    assert_eq!(
        pathsel_lib::filter(&doc, &items, ":nth-child(odd)").unwrap(),
        [items[0], items[2], items[4]]
    );
    assert_eq!(
        pathsel_lib::filter(&doc, &items, ":nth-child(even)").unwrap(),
        [items[1], items[3]]
    );
}

#[test]
fn not_over_three_nodes() {
    let mut doc = Document::new();
    let root = doc.root();
    let n1 = doc.element(root, "p", &[]);
    let n2 = doc.element(root, "p", &[("class", "a")]);
    let n3 = doc.element(root, "p", &[]);
    assert_eq!(
        pathsel_lib::filter(&doc, &[n1, n2, n3], ":not(.a)").unwrap(),
        [n1, n3]
    );
}

#[test]
fn small_tree_properties() {
    let (doc, [r, a, b]) = small();
    let engine = Engine::new();

    assert_eq!(engine.select_from(&doc, "#x", r).unwrap(), [a]);
    assert_eq!(engine.select_from(&doc, ".y", r).unwrap(), [b]);
    assert_eq!(engine.select_from(&doc, "a, b", r).unwrap(), [a, b]);
    assert_eq!(engine.filter(&doc, &[a, b], ":last").unwrap(), [b]);
}

#[test]
fn prefix_attribute_match() {
    let mut doc = Document::new();
    let root = doc.root();
    let hit = doc.element(root, "input", &[("name", "foobar")]);
    let miss = doc.element(root, "input", &[("name", "xfoo")]);

    assert!(pathsel_lib::is(&doc, hit, "[@name^='fo']").unwrap());
    assert!(!pathsel_lib::is(&doc, miss, "[@name^='fo']").unwrap());
}

#[test]
fn class_helpers_then_requery() {
    let (mut doc, [_, a, b]) = small();
    doc.add_classes(a, "y z");
    assert_eq!(pathsel_lib::select(&doc, ".y").unwrap(), [a, b]);

    doc.remove_classes(b, "y");
    doc.set_classes(a, "z");
    assert!(pathsel_lib::select(&doc, ".y").unwrap().is_empty());
    assert_eq!(pathsel_lib::select(&doc, ".z").unwrap(), [a]);
}

const PAGE: &str = indoc! {r#"
    <table id="prices">
      <tr><td class="name">Tea</td><td class="cost">3.20</td></tr>
      <tr><td class="name">Cake</td><td class="cost">4</td></tr>
    </table>
    <a href="/menu">Menu</a>
"#};

#[test]
fn html_tree_and_document_agree() {
    let tree = HtmlTree::parse(PAGE).unwrap();
    let doc = tree.to_document();
    let engine = Engine::new();

    for path in ["td.cost", "#prices tr > td:first-child", "tr:has(.cost)", "a, td"] {
        assert_eq!(
            engine.select(&tree, path).unwrap().len(),
            engine.select(&doc, path).unwrap().len(),
            "{path}"
        );
    }

    assert_eq!(engine.select_value(&tree, "a/@href", "").unwrap(), "/menu");
    assert_eq!(engine.select_number(&tree, "td.cost", 0.0).unwrap(), 3.2);
    assert_eq!(engine.select_number(&doc, "tr:last td.cost", 0.0).unwrap(), 4.0);
    assert_eq!(
        engine.select_value(&doc, "td.name:nth(2)", "").unwrap(),
        "Cake"
    );
}

#[test]
fn engines_with_forced_side_tables() {
    let tree = HtmlTree::parse(PAGE).unwrap();
    let engine = Engine::builder().strategy(Strategy::SideTable).build();
    let cells = engine.select(&tree, "td").unwrap();
    assert_eq!(cells.len(), 4);
    assert!(cells.iter().all(|&c| tree.tag_name(c) == Some("td")));
}
