//! Markup serialization for any host.
//!
//! Produces the HTML-like text that `:contains(...)` searches. Void elements
//! print without a closing tag; everything else prints open and close tags
//! even when empty.

use crate::host::{Host, NodeKind};

const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

fn is_void(tag: &str) -> bool {
    VOID_ELEMENTS.iter().any(|v| v.eq_ignore_ascii_case(tag))
}

/// Pending work for the serializer. Close tags are queued behind an
/// element's children.
enum Frame<N> {
    Open(N),
    Close(N),
}

pub fn write_inner_markup<H: Host + ?Sized>(host: &H, node: H::Node, out: &mut String) {
    let mut stack = Vec::new();
    push_children(host, node, &mut stack);
    drain(host, stack, out);
}

pub fn write_outer_markup<H: Host + ?Sized>(host: &H, node: H::Node, out: &mut String) {
    drain(host, vec![Frame::Open(node)], out);
}

/// Serializes with an explicit stack so nesting depth is bounded by the heap.
fn drain<H: Host + ?Sized>(host: &H, mut stack: Vec<Frame<H::Node>>, out: &mut String) {
    while let Some(frame) = stack.pop() {
        let node = match frame {
            Frame::Open(node) => node,
            Frame::Close(node) => {
                out.push_str("</");
                out.push_str(host.tag_name(node).unwrap_or_default());
                out.push('>');
                continue;
            }
        };

        match host.kind(node) {
            NodeKind::Element => {
                let tag = host.tag_name(node).unwrap_or_default();
                out.push('<');
                out.push_str(tag);
                for (name, value) in host.attributes(node) {
                    out.push(' ');
                    out.push_str(name);
                    out.push_str("=\"");
                    escape_into(value, true, out);
                    out.push('"');
                }
                out.push('>');
                if is_void(tag) && host.first_child(node).is_none() {
                    continue;
                }
                stack.push(Frame::Close(node));
                push_children(host, node, &mut stack);
            }
            NodeKind::Text => escape_into(host.node_value(node).unwrap_or_default(), false, out),
            NodeKind::Comment => {
                out.push_str("<!--");
                out.push_str(host.node_value(node).unwrap_or_default());
                out.push_str("-->");
            }
            NodeKind::Document | NodeKind::Other => push_children(host, node, &mut stack),
        }
    }
}

/// Queues children so the first one is popped first.
fn push_children<H: Host + ?Sized>(host: &H, node: H::Node, stack: &mut Vec<Frame<H::Node>>) {
    let start = stack.len();
    stack.extend(host.children(node).map(Frame::Open));
    stack[start..].reverse();
}

fn escape_into(text: &str, in_attribute: bool, out: &mut String) {
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' if !in_attribute => out.push_str("&lt;"),
            '>' if !in_attribute => out.push_str("&gt;"),
            '"' if in_attribute => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
}
