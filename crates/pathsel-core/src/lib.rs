#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Core tree model for pathsel.
//!
//! Two layers:
//! - **Host interface** (`Host`): read-only tree walking that the selector
//!   engine runs against. Any tree can be queried once it implements it.
//! - **Native document** (`Document`): an arena tree with an id index and
//!   per-node scratch stamps, mutable through a small DOM-like API.

mod classes;
mod colors;
mod document;
mod host;
mod interner;
mod invariants;
mod markup;
mod style;

#[cfg(test)]
mod interner_tests;
#[cfg(test)]
mod style_tests;

pub use classes::{class_tokens, has_class};
pub use colors::Colors;
pub use document::{Document, NodeId};
pub use host::{Children, Descendants, Host, NodeKind, NodeMarks};
pub use interner::{Interner, Symbol};
pub use markup::{write_inner_markup, write_outer_markup};
pub use style::{normalize_property_name, style_property};
