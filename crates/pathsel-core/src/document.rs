//! Arena-backed mutable document.
//!
//! Nodes live in a single `Vec` and link to each other by index. Node 0 is the
//! document node. Removed nodes stay in the arena, detached, so every `NodeId`
//! handed out remains valid for the document's lifetime.
//!
//! The document keeps two side structures the generic host path lacks:
//! - an id index (`id` attribute value to elements), for `#id` lookups
//! - a stamp per node, for set algebra without hashing

use std::cell::Cell;
use std::collections::HashMap;

use indexmap::IndexMap;

use crate::classes::{add_tokens, remove_tokens};
use crate::host::{Host, NodeKind, NodeMarks};
use crate::interner::{Interner, Symbol};

/// Handle to a node of one `Document`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(u32);

impl NodeId {
    #[inline]
    pub fn as_u32(self) -> u32 {
        self.0
    }

    #[inline]
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone)]
pub(crate) enum NodeData {
    Document,
    Element {
        tag: Symbol,
        attrs: IndexMap<Symbol, String>,
    },
    Text(String),
    Comment(String),
}

#[derive(Debug, Clone)]
pub(crate) struct NodeRecord {
    pub(crate) data: NodeData,
    pub(crate) parent: Option<NodeId>,
    pub(crate) first_child: Option<NodeId>,
    pub(crate) last_child: Option<NodeId>,
    pub(crate) prev_sibling: Option<NodeId>,
    pub(crate) next_sibling: Option<NodeId>,
}

impl NodeRecord {
    fn new(data: NodeData) -> Self {
        Self {
            data,
            parent: None,
            first_child: None,
            last_child: None,
            prev_sibling: None,
            next_sibling: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Document {
    pub(crate) nodes: Vec<NodeRecord>,
    names: Interner,
    ids: HashMap<String, Vec<NodeId>>,
    stamps: Vec<Cell<u32>>,
    generation: Cell<u32>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    pub const ROOT: NodeId = NodeId(0);

    pub fn new() -> Self {
        Self {
            nodes: vec![NodeRecord::new(NodeData::Document)],
            names: Interner::new(),
            ids: HashMap::new(),
            stamps: vec![Cell::new(0)],
            generation: Cell::new(0),
        }
    }

    pub fn root(&self) -> NodeId {
        Self::ROOT
    }

    /// Number of nodes ever created, detached ones included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.len() == 1
    }

    fn push(&mut self, data: NodeData) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(NodeRecord::new(data));
        self.stamps.push(Cell::new(0));
        id
    }

    pub fn create_element(&mut self, tag: &str) -> NodeId {
        let tag = self.names.intern(tag);
        self.push(NodeData::Element {
            tag,
            attrs: IndexMap::new(),
        })
    }

    pub fn create_text(&mut self, text: &str) -> NodeId {
        self.push(NodeData::Text(text.to_owned()))
    }

    pub fn create_comment(&mut self, text: &str) -> NodeId {
        self.push(NodeData::Comment(text.to_owned()))
    }

    /// Creates an element with attributes and appends it to `parent`.
    pub fn element(&mut self, parent: NodeId, tag: &str, attrs: &[(&str, &str)]) -> NodeId {
        let node = self.create_element(tag);
        for (name, value) in attrs {
            self.set_attribute(node, name, value);
        }
        self.append_child(parent, node);
        node
    }

    /// Creates a text node and appends it to `parent`.
    pub fn text(&mut self, parent: NodeId, text: &str) -> NodeId {
        let node = self.create_text(text);
        self.append_child(parent, node);
        node
    }

    /// Moves `child` to the end of `parent`'s children.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        self.ensure_insertable(parent, child);
        self.detach(child);

        let last = self.record(parent).last_child;
        {
            let rec = self.record_mut(child);
            rec.parent = Some(parent);
            rec.prev_sibling = last;
        }
        match last {
            Some(last) => self.record_mut(last).next_sibling = Some(child),
            None => self.record_mut(parent).first_child = Some(child),
        }
        self.record_mut(parent).last_child = Some(child);
    }

    /// Moves `child` right before `reference`, which must be a child of `parent`.
    pub fn insert_before(&mut self, parent: NodeId, child: NodeId, reference: NodeId) {
        if child == reference {
            return;
        }
        self.ensure_insertable(parent, child);
        self.ensure_child_of(parent, reference);
        self.detach(child);

        let prev = self.record(reference).prev_sibling;
        {
            let rec = self.record_mut(child);
            rec.parent = Some(parent);
            rec.prev_sibling = prev;
            rec.next_sibling = Some(reference);
        }
        self.record_mut(reference).prev_sibling = Some(child);
        match prev {
            Some(prev) => self.record_mut(prev).next_sibling = Some(child),
            None => self.record_mut(parent).first_child = Some(child),
        }
    }

    /// Detaches `child` from `parent`. The subtree stays in the arena.
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) {
        self.ensure_child_of(parent, child);
        self.detach(child);
    }

    fn detach(&mut self, node: NodeId) {
        let (parent, prev, next) = {
            let rec = self.record(node);
            (rec.parent, rec.prev_sibling, rec.next_sibling)
        };
        let Some(parent) = parent else {
            return;
        };
        match prev {
            Some(prev) => self.record_mut(prev).next_sibling = next,
            None => self.record_mut(parent).first_child = next,
        }
        match next {
            Some(next) => self.record_mut(next).prev_sibling = prev,
            None => self.record_mut(parent).last_child = prev,
        }
        let rec = self.record_mut(node);
        rec.parent = None;
        rec.prev_sibling = None;
        rec.next_sibling = None;
    }

    pub fn set_attribute(&mut self, node: NodeId, name: &str, value: &str) {
        if name == "id" {
            self.unindex_id(node);
            self.ids.entry(value.to_owned()).or_default().push(node);
        }
        let name = self.names.intern(name);
        self.attrs_mut(node).insert(name, value.to_owned());
    }

    pub fn remove_attribute(&mut self, node: NodeId, name: &str) {
        let Some(sym) = self.names.get(name) else {
            return;
        };
        if name == "id" {
            self.unindex_id(node);
        }
        self.attrs_mut(node).shift_remove(&sym);
    }

    fn unindex_id(&mut self, node: NodeId) {
        let Some(old) = self.attribute_of(node, "id").map(str::to_owned) else {
            return;
        };
        if let Some(list) = self.ids.get_mut(&old) {
            list.retain(|&n| n != node);
            if list.is_empty() {
                self.ids.remove(&old);
            }
        }
    }

    /// Replaces the content of a text or comment node.
    pub fn set_text(&mut self, node: NodeId, text: &str) {
        match &mut self.record_mut(node).data {
            NodeData::Text(t) | NodeData::Comment(t) => {
                t.clear();
                t.push_str(text);
            }
            other => panic!("Document: set_text on {other:?} node {node}"),
        }
    }

    /// Adds the whitespace-separated `classes` that are not already present.
    pub fn add_classes(&mut self, node: NodeId, classes: &str) {
        let current = self.attribute_of(node, "class").unwrap_or_default();
        let updated = add_tokens(current, classes);
        self.set_attribute(node, "class", &updated);
    }

    /// Removes the whitespace-separated `classes`. Other tokens keep their order.
    pub fn remove_classes(&mut self, node: NodeId, classes: &str) {
        let Some(current) = self.attribute_of(node, "class") else {
            return;
        };
        let updated = remove_tokens(current, classes);
        self.set_attribute(node, "class", &updated);
    }

    /// Replaces the whole class list.
    pub fn set_classes(&mut self, node: NodeId, classes: &str) {
        let normalized = add_tokens("", classes);
        self.set_attribute(node, "class", &normalized);
    }

    pub fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.attribute_of(node, "class")
            .is_some_and(|v| crate::classes::has_class(v, class))
    }

    /// Whether the node is reachable from the document node.
    pub fn is_connected(&self, node: NodeId) -> bool {
        let mut cur = node;
        loop {
            if cur == Self::ROOT {
                return true;
            }
            match self.record(cur).parent {
                Some(p) => cur = p,
                None => return false,
            }
        }
    }

    pub(crate) fn stamps_slice(&self) -> &[Cell<u32>] {
        &self.stamps
    }

    #[cfg(test)]
    pub(crate) fn generation_for_tests(&self, generation: u32) {
        self.generation.set(generation);
    }

    fn attribute_of(&self, node: NodeId, name: &str) -> Option<&str> {
        let sym = self.names.get(name)?;
        match &self.record(node).data {
            NodeData::Element { attrs, .. } => attrs.get(&sym).map(String::as_str),
            _ => None,
        }
    }

    fn attrs_mut(&mut self, node: NodeId) -> &mut IndexMap<Symbol, String> {
        match &mut self.record_mut(node).data {
            NodeData::Element { attrs, .. } => attrs,
            other => panic!("Document: attributes on non-element {other:?} node {node}"),
        }
    }
}

impl Host for Document {
    type Node = NodeId;

    fn document(&self) -> NodeId {
        Self::ROOT
    }

    fn kind(&self, node: NodeId) -> NodeKind {
        match self.record(node).data {
            NodeData::Document => NodeKind::Document,
            NodeData::Element { .. } => NodeKind::Element,
            NodeData::Text(_) => NodeKind::Text,
            NodeData::Comment(_) => NodeKind::Comment,
        }
    }

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.record(node).parent
    }

    fn first_child(&self, node: NodeId) -> Option<NodeId> {
        self.record(node).first_child
    }

    fn next_sibling(&self, node: NodeId) -> Option<NodeId> {
        self.record(node).next_sibling
    }

    fn prev_sibling(&self, node: NodeId) -> Option<NodeId> {
        self.record(node).prev_sibling
    }

    fn tag_name(&self, node: NodeId) -> Option<&str> {
        match self.record(node).data {
            NodeData::Element { tag, .. } => Some(self.names.resolve(tag)),
            _ => None,
        }
    }

    fn attribute(&self, node: NodeId, name: &str) -> Option<&str> {
        self.attribute_of(node, name)
    }

    fn attributes(&self, node: NodeId) -> Vec<(&str, &str)> {
        match &self.record(node).data {
            NodeData::Element { attrs, .. } => attrs
                .iter()
                .map(|(k, v)| (self.names.resolve(*k), v.as_str()))
                .collect(),
            _ => Vec::new(),
        }
    }

    fn node_value(&self, node: NodeId) -> Option<&str> {
        match &self.record(node).data {
            NodeData::Text(t) | NodeData::Comment(t) => Some(t),
            _ => None,
        }
    }

    fn find_by_id(&self, id: &str) -> Option<NodeId> {
        let candidates = self.ids.get(id)?;
        let mut connected = candidates.iter().copied().filter(|&n| self.is_connected(n));
        let first = connected.next()?;
        if connected.next().is_none() {
            return Some(first);
        }
        // Duplicate ids: registration order is not document order.
        self.descendants(Self::ROOT)
            .find(|&n| self.is_element(n) && self.attribute_of(n, "id") == Some(id))
    }

    fn marks(&self) -> Option<&dyn NodeMarks<NodeId>> {
        Some(self)
    }
}

impl NodeMarks<NodeId> for Document {
    fn next_stamp(&self) -> u32 {
        let next = self.generation.get().wrapping_add(1);
        if next == 0 {
            for stamp in &self.stamps {
                stamp.set(0);
            }
            self.generation.set(1);
            return 1;
        }
        self.generation.set(next);
        next
    }

    fn stamp(&self, node: NodeId) -> u32 {
        self.stamp_cell(node).get()
    }

    fn set_stamp(&self, node: NodeId, stamp: u32) {
        self.stamp_cell(node).set(stamp);
    }
}
