//! JSON shape of selected nodes.

use std::ops::Range;

use pathsel_core::{Host, NodeKind, class_tokens};
use serde::Serialize;

/// Longest text excerpt, in characters.
const EXCERPT_LEN: usize = 60;

/// One selected node as printed by `pathsel select`.
#[derive(Debug, Serialize)]
pub struct Match {
    pub tag: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub classes: Vec<String>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub text: String,
    /// Projected attribute (`a/@href`), when the selector has one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    /// Byte range in the source, when the host keeps one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub span: Option<[usize; 2]>,
}

impl Match {
    pub fn describe<H: Host + ?Sized>(
        host: &H,
        node: H::Node,
        projection: Option<&str>,
        span: Option<Range<usize>>,
    ) -> Self {
        let tag = match host.kind(node) {
            NodeKind::Element => host.tag_name(node).unwrap_or_default().to_owned(),
            NodeKind::Document => "#document".to_owned(),
            NodeKind::Text => "#text".to_owned(),
            NodeKind::Comment => "#comment".to_owned(),
            NodeKind::Other => "#other".to_owned(),
        };
        let classes = host
            .attribute(node, "class")
            .map(|v| class_tokens(v).map(str::to_owned).collect())
            .unwrap_or_default();

        Self {
            tag,
            id: host.attribute(node, "id").map(str::to_owned),
            classes,
            text: excerpt(host, node),
            value: projection.and_then(|attr| host.attribute(node, attr).map(str::to_owned)),
            span: span.map(|r| [r.start, r.end]),
        }
    }
}

/// Text content with whitespace runs collapsed, cut at `EXCERPT_LEN` chars.
pub fn excerpt<H: Host + ?Sized>(host: &H, node: H::Node) -> String {
    let mut words = Vec::new();
    let own = host.node_value(node).filter(|_| host.kind(node) == NodeKind::Text);
    let below = host
        .descendants(node)
        .filter(|&n| host.kind(n) == NodeKind::Text)
        .filter_map(|n| host.node_value(n));
    for text in own.into_iter().chain(below) {
        words.extend(text.split_whitespace());
    }

    let joined = words.join(" ");
    if joined.chars().count() <= EXCERPT_LEN {
        return joined;
    }
    let mut cut: String = joined.chars().take(EXCERPT_LEN - 1).collect();
    cut.truncate(cut.trim_end().len());
    cut.push('…');
    cut
}
