//! Invariant checks excluded from coverage reports.

#![cfg_attr(coverage_nightly, coverage(off))]

use std::cell::Cell;

use crate::document::{Document, NodeId, NodeRecord};

impl Document {
    #[inline]
    pub(crate) fn record(&self, node: NodeId) -> &NodeRecord {
        self.nodes.get(node.index()).unwrap_or_else(|| {
            panic!("Document: node {node} not found (NodeId must come from this document)")
        })
    }

    #[inline]
    pub(crate) fn record_mut(&mut self, node: NodeId) -> &mut NodeRecord {
        self.nodes.get_mut(node.index()).unwrap_or_else(|| {
            panic!("Document: node {node} not found (NodeId must come from this document)")
        })
    }

    #[inline]
    pub(crate) fn stamp_cell(&self, node: NodeId) -> &Cell<u32> {
        self.stamps_slice().get(node.index()).unwrap_or_else(|| {
            panic!("Document: node {node} has no stamp slot (NodeId must come from this document)")
        })
    }

    pub(crate) fn ensure_insertable(&self, parent: NodeId, child: NodeId) {
        assert!(
            child != Self::ROOT,
            "Document: the document node cannot be inserted"
        );
        let mut cur = Some(parent);
        while let Some(n) = cur {
            assert!(
                n != child,
                "Document: inserting {child} under {parent} would create a cycle"
            );
            cur = self.record(n).parent;
        }
    }

    pub(crate) fn ensure_child_of(&self, parent: NodeId, child: NodeId) {
        let actual = self.record(child).parent;
        assert_eq!(
            actual,
            Some(parent),
            "Document: {child} is not a child of {parent}"
        );
    }
}
