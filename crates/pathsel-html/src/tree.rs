//! HTML parsed with tree-sitter and flattened into an arena.
//!
//! The syntax tree keeps tags, attributes and text as separate grammar
//! nodes. `HtmlTree` folds them into element, text and comment nodes so the
//! selector engine sees the DOM shape:
//! - `start_tag`/`self_closing_tag` become the element's tag and attributes
//! - adjacent `text` and `entity` nodes merge into one decoded text node
//! - `script`/`style` bodies stay raw
//!
//! Whitespace between tags is not part of the syntax tree and does not
//! appear as text nodes. There is no id index and no stamp storage: lookups
//! scan and set algebra uses side tables.

use std::ops::Range;

use arborium_tree_sitter::{Language, Node, Parser};
use pathsel_core::{Document, Host, NodeKind};

use html_escape::decode_html_entities as decode;

use crate::Error;

/// Handle to a node of one `HtmlTree`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HtmlId(u32);

impl HtmlId {
    #[inline]
    pub fn as_u32(self) -> u32 {
        self.0
    }

    #[inline]
    fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug, Clone)]
struct HtmlNode {
    kind: NodeKind,
    tag: Option<Box<str>>,
    attrs: Vec<(Box<str>, Box<str>)>,
    value: Option<String>,
    span: Range<usize>,
    parent: Option<HtmlId>,
    first_child: Option<HtmlId>,
    last_child: Option<HtmlId>,
    prev_sibling: Option<HtmlId>,
    next_sibling: Option<HtmlId>,
}

impl HtmlNode {
    fn new(kind: NodeKind, span: Range<usize>) -> Self {
        Self {
            kind,
            tag: None,
            attrs: Vec::new(),
            value: None,
            span,
            parent: None,
            first_child: None,
            last_child: None,
            prev_sibling: None,
            next_sibling: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct HtmlTree {
    nodes: Vec<HtmlNode>,
}

impl HtmlTree {
    pub const ROOT: HtmlId = HtmlId(0);

    pub fn parse(source: &str) -> Result<Self, Error> {
        let language: Language = arborium_html::language().into();
        let mut parser = Parser::new();
        parser.set_language(&language)?;
        let tree = parser.parse(source, None).ok_or(Error::Parse)?;

        let mut html = Self {
            nodes: vec![HtmlNode::new(NodeKind::Document, 0..source.len())],
        };
        html.build(tree.root_node(), source);
        Ok(html)
    }

    pub fn root(&self) -> HtmlId {
        Self::ROOT
    }

    /// Number of nodes, the document node included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.len() == 1
    }

    /// Byte range of the node in the parsed source.
    pub fn span(&self, node: HtmlId) -> Range<usize> {
        self.node(node).span.clone()
    }

    /// Copies the tree into a mutable `Document`. Doctype nodes are dropped.
    pub fn to_document(&self) -> Document {
        let mut doc = Document::new();
        let root = doc.root();
        self.copy_children(Self::ROOT, &mut doc, root);
        doc
    }

    /// Pre-order copy with an explicit stack of `(node, target parent)`.
    fn copy_children(&self, from: HtmlId, doc: &mut Document, to: pathsel_core::NodeId) {
        let mut stack = Vec::new();
        self.queue_copies(from, to, &mut stack);
        while let Some((child, to)) = stack.pop() {
            let node = self.node(child);
            match node.kind {
                NodeKind::Element => {
                    let attrs: Vec<(&str, &str)> =
                        node.attrs.iter().map(|(k, v)| (&**k, &**v)).collect();
                    let tag = node.tag.as_deref().unwrap_or_default();
                    let el = doc.element(to, tag, &attrs);
                    self.queue_copies(child, el, &mut stack);
                }
                NodeKind::Text => {
                    doc.text(to, node.value.as_deref().unwrap_or_default());
                }
                NodeKind::Comment => {
                    let comment = doc.create_comment(node.value.as_deref().unwrap_or_default());
                    doc.append_child(to, comment);
                }
                NodeKind::Document | NodeKind::Other => {}
            }
        }
    }

    fn queue_copies(
        &self,
        from: HtmlId,
        to: pathsel_core::NodeId,
        stack: &mut Vec<(HtmlId, pathsel_core::NodeId)>,
    ) {
        let start = stack.len();
        stack.extend(self.children(from).map(|child| (child, to)));
        stack[start..].reverse();
    }

    fn node(&self, id: HtmlId) -> &HtmlNode {
        &self.nodes[id.index()]
    }

    fn push(&mut self, parent: HtmlId, node: HtmlNode) -> HtmlId {
        let id = HtmlId(self.nodes.len() as u32);
        self.nodes.push(node);

        let prev = self.nodes[parent.index()].last_child;
        {
            let record = &mut self.nodes[id.index()];
            record.parent = Some(parent);
            record.prev_sibling = prev;
        }
        match prev {
            Some(prev) => self.nodes[prev.index()].next_sibling = Some(id),
            None => self.nodes[parent.index()].first_child = Some(id),
        }
        self.nodes[parent.index()].last_child = Some(id);
        id
    }

    /// Flattens the syntax tree in pre-order. Each stack entry is a syntax
    /// node and the arena parent it attaches to, so document depth never
    /// turns into call depth.
    fn build<'t>(&mut self, root: Node<'t>, source: &str) {
        let mut stack = Vec::new();
        queue_children(Self::ROOT, root, &mut stack);
        while let Some((parent, ts)) = stack.pop() {
            match ts.kind() {
                "element" | "script_element" | "style_element" => {
                    let id = self.push_element(parent, ts, source);
                    queue_children(id, ts, &mut stack);
                }
                "text" | "entity" => self.push_text(parent, ts.byte_range(), source, true),
                "raw_text" => self.push_text(parent, ts.byte_range(), source, false),
                "comment" => {
                    let raw = &source[ts.byte_range()];
                    let inner = raw
                        .strip_prefix("<!--")
                        .map(|s| s.strip_suffix("-->").unwrap_or(s))
                        .unwrap_or(raw);
                    let mut node = HtmlNode::new(NodeKind::Comment, ts.byte_range());
                    node.value = Some(inner.to_owned());
                    self.push(parent, node);
                }
                "doctype" => {
                    self.push(parent, HtmlNode::new(NodeKind::Other, ts.byte_range()));
                }
                // Recovery nodes still hold whatever parsed inside them.
                "ERROR" => queue_children(parent, ts, &mut stack),
                _ => {}
            }
        }
    }

    fn push_element(&mut self, parent: HtmlId, ts: Node, source: &str) -> HtmlId {
        let mut node = HtmlNode::new(NodeKind::Element, ts.byte_range());

        let mut cursor = ts.walk();
        if cursor.goto_first_child() {
            loop {
                let child = cursor.node();
                if matches!(child.kind(), "start_tag" | "self_closing_tag") {
                    read_tag(child, source, &mut node);
                    break;
                }
                if !cursor.goto_next_sibling() {
                    break;
                }
            }
        }

        self.push(parent, node)
    }

    /// Appends text, merging with a text node that directly precedes it.
    fn push_text(&mut self, parent: HtmlId, span: Range<usize>, source: &str, decoded: bool) {
        let text = |span: Range<usize>| {
            let raw = &source[span];
            if decoded {
                decode(raw).into_owned()
            } else {
                raw.to_owned()
            }
        };

        if let Some(last) = self.nodes[parent.index()].last_child {
            let record = &mut self.nodes[last.index()];
            if record.kind == NodeKind::Text {
                record.span.end = span.end;
                record.value = Some(text(record.span.clone()));
                return;
            }
        }

        let mut node = HtmlNode::new(NodeKind::Text, span.clone());
        node.value = Some(text(span));
        self.push(parent, node);
    }
}

/// Queues the named children of `ts` so the first one is popped first.
fn queue_children<'t>(parent: HtmlId, ts: Node<'t>, stack: &mut Vec<(HtmlId, Node<'t>)>) {
    let start = stack.len();
    let mut cursor = ts.walk();
    if cursor.goto_first_child() {
        loop {
            let child = cursor.node();
            if child.is_named() {
                stack.push((parent, child));
            }
            if !cursor.goto_next_sibling() {
                break;
            }
        }
    }
    stack[start..].reverse();
}

fn read_tag(tag: Node, source: &str, node: &mut HtmlNode) {
    let mut cursor = tag.walk();
    if !cursor.goto_first_child() {
        return;
    }
    loop {
        let child = cursor.node();
        match child.kind() {
            "tag_name" => node.tag = Some(source[child.byte_range()].into()),
            "attribute" => node.attrs.push(read_attribute(child, source)),
            _ => {}
        }
        if !cursor.goto_next_sibling() {
            break;
        }
    }
}

/// `name`, `name=value` or `name="value"`. A bare name has an empty value.
fn read_attribute(attr: Node, source: &str) -> (Box<str>, Box<str>) {
    let mut name: &str = "";
    let mut value: Option<&str> = None;

    let mut cursor = attr.walk();
    if cursor.goto_first_child() {
        loop {
            let child = cursor.node();
            match child.kind() {
                "attribute_name" => name = &source[child.byte_range()],
                "attribute_value" => value = Some(&source[child.byte_range()]),
                "quoted_attribute_value" => {
                    let raw = &source[child.byte_range()];
                    let inner = raw
                        .get(1..raw.len().saturating_sub(1))
                        .unwrap_or_default();
                    value = Some(inner);
                }
                _ => {}
            }
            if !cursor.goto_next_sibling() {
                break;
            }
        }
    }

    (name.into(), decode(value.unwrap_or_default()).into())
}

impl Host for HtmlTree {
    type Node = HtmlId;

    fn document(&self) -> HtmlId {
        Self::ROOT
    }

    fn kind(&self, node: HtmlId) -> NodeKind {
        self.node(node).kind
    }

    fn parent(&self, node: HtmlId) -> Option<HtmlId> {
        self.node(node).parent
    }

    fn first_child(&self, node: HtmlId) -> Option<HtmlId> {
        self.node(node).first_child
    }

    fn next_sibling(&self, node: HtmlId) -> Option<HtmlId> {
        self.node(node).next_sibling
    }

    fn prev_sibling(&self, node: HtmlId) -> Option<HtmlId> {
        self.node(node).prev_sibling
    }

    fn tag_name(&self, node: HtmlId) -> Option<&str> {
        self.node(node).tag.as_deref()
    }

    fn attribute(&self, node: HtmlId, name: &str) -> Option<&str> {
        self.node(node)
            .attrs
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| &**v)
    }

    fn attributes(&self, node: HtmlId) -> Vec<(&str, &str)> {
        self.node(node)
            .attrs
            .iter()
            .map(|(k, v)| (&**k, &**v))
            .collect()
    }

    fn node_value(&self, node: HtmlId) -> Option<&str> {
        self.node(node).value.as_deref()
    }
}
