//! Parser infrastructure for selector text.
//!
//! # Architecture
//!
//! This parser produces a lossless concrete syntax tree (CST) via Rowan's green tree builder:
//!
//! - Zero-copy parsing: tokens carry spans, text sliced only when building tree nodes
//! - Whitespace is a real token: between compounds it is the descendant combinator
//! - Pseudo-class arguments are kept verbatim and compiled later as nested selectors
//!
//! # Recovery Strategy
//!
//! The parser is resilient: it always produces a tree.
//!
//! 1. Unknown tokens get wrapped in `SyntaxKind::Error` nodes and consumed
//! 2. Missing expected tokens emit a diagnostic but don't consume
//! 3. Unclosed delimiters swallow the rest of the input and suppress errors inside it

pub mod ast;
pub mod cst;
pub mod lexer;

mod core;
mod grammar;
mod invariants;

#[cfg(test)]
mod grammar_tests;
#[cfg(test)]
mod lexer_tests;

use std::fmt::Write;

pub use cst::{SyntaxKind, SyntaxNode, SyntaxToken};

pub use core::Parser;

use crate::diagnostics::Diagnostics;
use lexer::lex;
use rowan::NodeOrToken;

/// Parse result containing the green tree.
///
/// The tree is always complete; diagnostics are returned separately.
#[derive(Debug, Clone)]
pub struct Parse {
    cst: rowan::GreenNode,
}

impl Parse {
    pub fn as_cst(&self) -> &rowan::GreenNode {
        &self.cst
    }

    /// Creates a typed view over the immutable green tree.
    pub fn syntax(&self) -> SyntaxNode {
        SyntaxNode::new_root(self.cst.clone())
    }

    pub fn root(&self) -> ast::Root {
        ast::Root::cast(self.syntax()).expect("parser always produces a Root node")
    }
}

/// Main entry point.
pub fn parse(source: &str) -> (Parse, Diagnostics) {
    let mut parser = Parser::new(source, lex(source));
    parser.parse_root();
    let (cst, diagnostics) = parser.finish();
    (Parse { cst }, diagnostics)
}

/// Indented tree dump, one line per node or token. With `spans`, every line
/// carries its byte range.
pub fn dump_cst(node: &SyntaxNode, spans: bool) -> String {
    let mut out = String::new();
    format_cst(node, 0, spans, &mut out).expect("String write never fails");
    out
}

fn format_cst(node: &SyntaxNode, indent: usize, spans: bool, w: &mut impl Write) -> std::fmt::Result {
    let prefix = "  ".repeat(indent);
    let span = span_str(node.text_range(), spans);
    writeln!(w, "{}{:?}{}", prefix, node.kind(), span)?;

    for child in node.children_with_tokens() {
        match child {
            NodeOrToken::Node(n) => format_cst(&n, indent + 1, spans, w)?,
            NodeOrToken::Token(t) => {
                let child_prefix = "  ".repeat(indent + 1);
                let child_span = span_str(t.text_range(), spans);
                writeln!(w, "{}{:?}{} {:?}", child_prefix, t.kind(), child_span, t.text())?;
            }
        }
    }
    Ok(())
}

fn span_str(range: rowan::TextRange, spans: bool) -> String {
    if !spans {
        return String::new();
    }
    format!(" [{}..{}]", u32::from(range.start()), u32::from(range.end()))
}
