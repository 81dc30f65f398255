//! HTML documents as pathsel hosts.
//!
//! [`HtmlTree`] parses markup with the tree-sitter HTML grammar and exposes
//! it through `pathsel_core::Host`. It is read-only; call
//! [`HtmlTree::to_document`] for a mutable copy with an id index.

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

mod tree;


pub use tree::{HtmlId, HtmlTree};

/// Errors that can occur while loading HTML.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to load the HTML grammar: {0}")]
    Language(#[from] arborium_tree_sitter::LanguageError),

    #[error("parser returned no tree")]
    Parse,
}
