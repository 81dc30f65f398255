//! Fixtures shared by the VM tests.

use pathsel_core::{Document, Host, NodeId, NodeKind};
use pathsel_program::{Mode, Program};

use crate::VM;

pub fn program(text: &str, mode: Mode) -> Program {
    pathsel_compiler::compile(text, mode).unwrap()
}

pub fn select<H: Host + ?Sized>(host: &H, text: &str, root: H::Node) -> Vec<H::Node> {
    VM::new(host).select(&program(text, Mode::Select), root)
}

pub fn filter<H: Host + ?Sized>(host: &H, text: &str, nodes: &[H::Node]) -> Vec<H::Node> {
    VM::new(host).filter(&program(text, Mode::Filter), nodes)
}

/// `<ul id="list">` holding five `<li>`, with whitespace text between them.
/// The second and fourth items carry class `a`.
pub fn list() -> (Document, NodeId, Vec<NodeId>) {
    let mut doc = Document::new();
    let root = doc.root();
    let ul = doc.element(root, "ul", &[("id", "list")]);
    let mut items = Vec::new();
    for i in 1..=5 {
        doc.text(ul, "\n  ");
        let class = if i % 2 == 0 { "item a" } else { "item" };
        let n = i.to_string();
        items.push(doc.element(ul, "li", &[("class", class), ("data-n", n.as_str())]));
    }
    doc.text(ul, "\n");
    (doc, ul, items)
}

/// Host over a `Document` that only implements the required methods, so
/// every default (id scan, side-table algebra) is in play.
pub struct Plain<'d>(pub &'d Document);

impl Host for Plain<'_> {
    type Node = NodeId;

    fn document(&self) -> NodeId {
        self.0.document()
    }

    fn kind(&self, node: NodeId) -> NodeKind {
        self.0.kind(node)
    }

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.0.parent(node)
    }

    fn first_child(&self, node: NodeId) -> Option<NodeId> {
        self.0.first_child(node)
    }

    fn next_sibling(&self, node: NodeId) -> Option<NodeId> {
        self.0.next_sibling(node)
    }

    fn prev_sibling(&self, node: NodeId) -> Option<NodeId> {
        self.0.prev_sibling(node)
    }

    fn tag_name(&self, node: NodeId) -> Option<&str> {
        self.0.tag_name(node)
    }

    fn attribute(&self, node: NodeId, name: &str) -> Option<&str> {
        self.0.attribute(node, name)
    }

    fn attributes(&self, node: NodeId) -> Vec<(&str, &str)> {
        self.0.attributes(node)
    }

    fn node_value(&self, node: NodeId) -> Option<&str> {
        self.0.node_value(node)
    }
}
