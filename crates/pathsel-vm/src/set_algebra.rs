//! Order-preserving set operations over node sequences.
//!
//! Membership is tested either with the host's native stamps (O(1), no
//! allocation) or with a side table scoped to the single call.

use std::collections::HashSet;
use std::hash::Hash;

use pathsel_core::{Host, NodeMarks};

/// How set operations test membership.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Strategy {
    /// Native stamps when the host has them, side table otherwise.
    #[default]
    Auto,
    /// Always the side table, even on hosts with stamps.
    SideTable,
}

/// Visited set for one pass.
pub(crate) enum Seen<'h, N> {
    Stamps {
        marks: &'h dyn NodeMarks<N>,
        stamp: u32,
    },
    Table(HashSet<N>),
}

impl<'h, N: Copy + Eq + Hash> Seen<'h, N> {
    pub fn new<H>(host: &'h H, strategy: Strategy, capacity: usize) -> Self
    where
        H: Host<Node = N> + ?Sized,
    {
        match (strategy, host.marks()) {
            (Strategy::Auto, Some(marks)) => Self::Stamps {
                stamp: marks.next_stamp(),
                marks,
            },
            _ => Self::Table(HashSet::with_capacity(capacity)),
        }
    }

    /// Returns `true` if `node` was not seen before.
    pub fn insert(&mut self, node: N) -> bool {
        match self {
            Self::Stamps { marks, stamp } => {
                if marks.stamp(node) == *stamp {
                    return false;
                }
                marks.set_stamp(node, *stamp);
                true
            }
            Self::Table(set) => set.insert(node),
        }
    }

    pub fn contains(&self, node: N) -> bool {
        match self {
            Self::Stamps { marks, stamp } => marks.stamp(node) == *stamp,
            Self::Table(set) => set.contains(&node),
        }
    }
}

/// Keeps the first occurrence of every node, in order.
pub fn deduplicate<H: Host + ?Sized>(host: &H, nodes: Vec<H::Node>) -> Vec<H::Node> {
    deduplicate_with(host, nodes, Strategy::Auto)
}

/// Returns the input vector itself when it holds no duplicates.
pub fn deduplicate_with<H: Host + ?Sized>(
    host: &H,
    nodes: Vec<H::Node>,
    strategy: Strategy,
) -> Vec<H::Node> {
    let mut seen = Seen::new(host, strategy, nodes.len());
    let Some(first_dup) = nodes.iter().position(|&n| !seen.insert(n)) else {
        return nodes;
    };

    let mut out = Vec::with_capacity(nodes.len() - 1);
    out.extend_from_slice(&nodes[..first_dup]);
    out.extend(nodes[first_dup + 1..].iter().copied().filter(|&n| seen.insert(n)));
    out
}

/// Elements of `b` that are not in `a`, in `b`'s order.
pub fn difference<H: Host + ?Sized>(host: &H, a: &[H::Node], b: &[H::Node]) -> Vec<H::Node> {
    difference_with(host, a, b, Strategy::Auto)
}

pub fn difference_with<H: Host + ?Sized>(
    host: &H,
    a: &[H::Node],
    b: &[H::Node],
    strategy: Strategy,
) -> Vec<H::Node> {
    if a.is_empty() {
        return b.to_vec();
    }
    let mut seen = Seen::new(host, strategy, a.len());
    for &n in a {
        seen.insert(n);
    }
    b.iter().copied().filter(|&n| !seen.contains(n)).collect()
}
