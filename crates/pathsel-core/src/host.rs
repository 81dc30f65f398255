//! Tree-walk interface that selector programs run against.
//!
//! A host exposes ordered children, a parent link, tag names and attributes.
//! Everything else (iteration, id lookup, markup) has a default built on
//! those primitives, so a minimal host only implements the required methods.
//! Hosts with faster paths (an id index, scratch stamps) override them.

use std::fmt::Debug;
use std::hash::Hash;

use crate::markup::write_inner_markup;
use crate::style::style_property;

/// Kind of a tree node, as far as selectors care.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Document,
    Element,
    Text,
    Comment,
    /// Anything else a host keeps in its tree (doctype, processing instruction).
    Other,
}

/// Scratch stamps stored on the nodes themselves.
///
/// Set algebra uses stamps to test membership in O(1) without a side table.
/// Every call to `next_stamp` yields a value no node currently carries, so
/// stale stamps from earlier passes never collide with the current one.
pub trait NodeMarks<N> {
    fn next_stamp(&self) -> u32;
    fn stamp(&self, node: N) -> u32;
    fn set_stamp(&self, node: N, stamp: u32);
}

pub trait Host {
    type Node: Copy + Eq + Hash + Debug;

    /// The document node. Never returned as a selection result.
    fn document(&self) -> Self::Node;

    fn kind(&self, node: Self::Node) -> NodeKind;
    fn parent(&self, node: Self::Node) -> Option<Self::Node>;
    fn first_child(&self, node: Self::Node) -> Option<Self::Node>;
    fn next_sibling(&self, node: Self::Node) -> Option<Self::Node>;
    fn prev_sibling(&self, node: Self::Node) -> Option<Self::Node>;

    /// Tag name as written in the source. `None` for non-elements.
    fn tag_name(&self, node: Self::Node) -> Option<&str>;

    fn attribute(&self, node: Self::Node, name: &str) -> Option<&str>;

    /// All attributes in source order.
    fn attributes(&self, node: Self::Node) -> Vec<(&str, &str)>;

    /// Raw content of text and comment nodes.
    fn node_value(&self, node: Self::Node) -> Option<&str>;

    /// Inline style property, read from the `style` attribute.
    fn style(&self, node: Self::Node, property: &str) -> Option<&str> {
        style_property(self.attribute(node, "style")?, property)
    }

    fn is_checked(&self, node: Self::Node) -> bool {
        self.attribute(node, "checked").is_some()
    }

    /// Serialized markup of the node's children.
    fn inner_markup(&self, node: Self::Node) -> String {
        let mut out = String::new();
        write_inner_markup(self, node, &mut out);
        out
    }

    /// First element in document order whose `id` equals `id`.
    fn find_by_id(&self, id: &str) -> Option<Self::Node> {
        self.descendants(self.document())
            .find(|&n| self.is_element(n) && self.attribute(n, "id") == Some(id))
    }

    /// Native stamp storage, if the host has it.
    fn marks(&self) -> Option<&dyn NodeMarks<Self::Node>> {
        None
    }

    fn is_element(&self, node: Self::Node) -> bool {
        self.kind(node) == NodeKind::Element
    }

    fn children(&self, node: Self::Node) -> Children<'_, Self> {
        Children {
            host: self,
            next: self.first_child(node),
        }
    }

    fn element_children(&self, node: Self::Node) -> impl Iterator<Item = Self::Node> + '_ {
        self.children(node).filter(|&n| self.is_element(n))
    }

    /// Strict descendants in document order.
    fn descendants(&self, node: Self::Node) -> Descendants<'_, Self> {
        Descendants {
            host: self,
            root: node,
            next: self.first_child(node),
        }
    }

    fn next_element_sibling(&self, node: Self::Node) -> Option<Self::Node> {
        let mut cur = self.next_sibling(node);
        while let Some(n) = cur {
            if self.is_element(n) {
                return Some(n);
            }
            cur = self.next_sibling(n);
        }
        None
    }

    fn prev_element_sibling(&self, node: Self::Node) -> Option<Self::Node> {
        let mut cur = self.prev_sibling(node);
        while let Some(n) = cur {
            if self.is_element(n) {
                return Some(n);
            }
            cur = self.prev_sibling(n);
        }
        None
    }
}

/// Iterator over the direct children of a node.
pub struct Children<'h, H: Host + ?Sized> {
    host: &'h H,
    next: Option<H::Node>,
}

impl<H: Host + ?Sized> Iterator for Children<'_, H> {
    type Item = H::Node;

    fn next(&mut self) -> Option<H::Node> {
        let node = self.next?;
        self.next = self.host.next_sibling(node);
        Some(node)
    }
}

/// Pre-order iterator over the strict descendants of a node.
pub struct Descendants<'h, H: Host + ?Sized> {
    host: &'h H,
    root: H::Node,
    next: Option<H::Node>,
}

impl<H: Host + ?Sized> Iterator for Descendants<'_, H> {
    type Item = H::Node;

    fn next(&mut self) -> Option<H::Node> {
        let node = self.next?;
        self.next = self.successor(node);
        Some(node)
    }
}

impl<H: Host + ?Sized> Descendants<'_, H> {
    fn successor(&self, node: H::Node) -> Option<H::Node> {
        if let Some(child) = self.host.first_child(node) {
            return Some(child);
        }
        let mut cur = node;
        loop {
            if cur == self.root {
                return None;
            }
            if let Some(sibling) = self.host.next_sibling(cur) {
                return Some(sibling);
            }
            cur = self.host.parent(cur)?;
        }
    }
}
