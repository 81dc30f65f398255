//! Traversal and filter primitives. Each takes a node sequence and returns
//! a new one, preserving order.

use pathsel_core::{Host, has_class};
use pathsel_program::{AttrSource, AttrTest};

use crate::set_algebra::{Seen, Strategy};

/// `None` is the universal `*`. Only elements ever match.
pub fn tag_matches<H: Host + ?Sized>(host: &H, node: H::Node, tag: Option<&str>) -> bool {
    if !host.is_element(node) {
        return false;
    }
    let Some(tag) = tag else {
        return true;
    };
    host.tag_name(node)
        .is_some_and(|name| name.eq_ignore_ascii_case(tag))
}

/// Element descendants of every node, in document order. A node inside a
/// subtree that was already expanded in this call is not expanded again.
pub fn collect_descendants<H: Host + ?Sized>(
    host: &H,
    nodes: &[H::Node],
    tag: Option<&str>,
    strategy: Strategy,
) -> Vec<H::Node> {
    let mut expanded = Seen::new(host, strategy, nodes.len());
    let mut out = Vec::new();
    for &node in nodes {
        if expanded.contains(node) {
            continue;
        }
        for d in host.descendants(node) {
            expanded.insert(d);
            if tag_matches(host, d, tag) {
                out.push(d);
            }
        }
    }
    out
}

/// Direct element children of every node.
pub fn collect_children<H: Host + ?Sized>(
    host: &H,
    nodes: &[H::Node],
    tag: Option<&str>,
) -> Vec<H::Node> {
    nodes
        .iter()
        .flat_map(|&n| host.element_children(n))
        .filter(|&c| tag_matches(host, c, tag))
        .collect()
}

/// At most one element carrying `id` among the children or descendants of
/// `nodes`. Uses the host's id lookup when the set is just the document.
pub fn lookup_id<H: Host + ?Sized>(
    host: &H,
    nodes: &[H::Node],
    id: &str,
    direct: bool,
) -> Vec<H::Node> {
    if !direct && nodes == [host.document()] {
        return host.find_by_id(id).into_iter().collect();
    }
    let has_id = |n: &H::Node| host.is_element(*n) && host.attribute(*n, "id") == Some(id);
    let hit = if direct {
        nodes.iter().find_map(|&n| host.element_children(n).find(|c| has_id(c)))
    } else {
        nodes.iter().find_map(|&n| host.descendants(n).find(|c| has_id(c)))
    };
    hit.into_iter().collect()
}

pub fn by_tag<H: Host + ?Sized>(host: &H, nodes: &[H::Node], tag: &str) -> Vec<H::Node> {
    nodes
        .iter()
        .copied()
        .filter(|&n| tag_matches(host, n, Some(tag)))
        .collect()
}

/// Keeps the first node carrying `id`.
pub fn by_id<H: Host + ?Sized>(host: &H, nodes: &[H::Node], id: &str) -> Vec<H::Node> {
    nodes
        .iter()
        .copied()
        .find(|&n| host.attribute(n, "id") == Some(id))
        .into_iter()
        .collect()
}

pub fn by_class<H: Host + ?Sized>(host: &H, nodes: &[H::Node], class: &str) -> Vec<H::Node> {
    nodes
        .iter()
        .copied()
        .filter(|&n| host.attribute(n, "class").is_some_and(|list| has_class(list, class)))
        .collect()
}

pub fn by_attribute<H: Host + ?Sized>(host: &H, nodes: &[H::Node], test: &AttrTest) -> Vec<H::Node> {
    let name = attribute_alias(&test.name);
    nodes
        .iter()
        .copied()
        .filter(|&n| {
            let actual = match test.source {
                AttrSource::Attribute => host.attribute(n, name),
                AttrSource::Style => host.style(n, &test.name),
            };
            match (test.op, actual) {
                (None, actual) => actual.is_some(),
                (Some(op), None) => op.matches_missing(),
                (Some(op), Some(actual)) => op.eval(actual, &test.value),
            }
        })
        .collect()
}

/// DOM property names accepted in place of attribute names.
fn attribute_alias(name: &str) -> &str {
    match name {
        "className" => "class",
        "htmlFor" => "for",
        _ => name,
    }
}
