//! Pathsel: path selectors over document trees.
//!
//! Selectors are compiled once into step programs, cached, and run against
//! any tree implementing [`Host`].
//!
//! # Example
//!
//! ```
//! use pathsel_lib::{Document, Engine};
//!
//! let mut doc = Document::new();
//! let root = doc.root();
//! let ul = doc.element(root, "ul", &[]);
//! let li = doc.element(ul, "li", &[("class", "item")]);
//!
//! let engine = Engine::new();
//! assert_eq!(engine.select(&doc, "ul > li.item").unwrap(), [li]);
//! assert!(engine.is(&doc, li, "li:first-child").unwrap());
//! ```

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

mod cache;
mod engine;
mod number;


use std::sync::LazyLock;

pub use cache::{CacheStats, SelectorCache};
pub use engine::{Engine, EngineBuilder, EngineConfig};
pub use number::parse_number_prefix;

pub use pathsel_compiler::{Diagnostics, DiagnosticsPrinter, split_alternatives};
pub use pathsel_core::{Document, Host, NodeId, NodeKind};
pub use pathsel_program::{Mode, Program};
pub use pathsel_vm::{
    PrintTracer, Strategy, Tracer, VM, Verbosity, deduplicate, difference,
};

#[cfg(feature = "pathsel-html")]
pub use pathsel_html::{HtmlId, HtmlTree};

/// Errors that can occur while querying.
#[derive(Debug, Clone, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Compile(#[from] pathsel_compiler::Error),

    #[error("`{value}` does not start with a number")]
    InvalidNumber { value: String },
}

/// Result type for query operations.
pub type Result<T> = std::result::Result<T, Error>;

static GLOBAL: LazyLock<Engine> = LazyLock::new(Engine::new);

/// Process-wide engine behind the free functions.
pub fn global() -> &'static Engine {
    &GLOBAL
}

/// [`Engine::select`] on the global engine.
pub fn select<H: Host + ?Sized>(host: &H, path: &str) -> Result<Vec<H::Node>> {
    global().select(host, path)
}

/// [`Engine::filter`] on the global engine.
pub fn filter<H: Host + ?Sized>(host: &H, nodes: &[H::Node], selector: &str) -> Result<Vec<H::Node>> {
    global().filter(host, nodes, selector)
}

/// [`Engine::is`] on the global engine.
pub fn is<H: Host + ?Sized>(host: &H, node: H::Node, selector: &str) -> Result<bool> {
    global().is(host, node, selector)
}
