//! Pathsel compiler: selector text to executable step lists.
//!
//! - `parser` - lexer, CST, and typed AST
//! - `diagnostics` - error reporting
//! - `lower` - CST to [`Program`] lowering, with nested selectors compiled
//!   through a [`Resolve`] implementation

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod diagnostics;
pub mod parser;

mod lower;

#[cfg(test)]
mod lower_tests;

use std::sync::Arc;

use pathsel_program::{Mode, Program};

pub use diagnostics::{DiagnosticKind, Diagnostics, DiagnosticsPrinter, Severity};

use lower::Lower;
use parser::SyntaxKind;

/// Errors that can occur while compiling a selector.
#[derive(Debug, Clone, thiserror::Error)]
pub enum Error {
    #[error("invalid selector `{selector}`: {}", primary_message(.diagnostics))]
    Syntax {
        selector: String,
        diagnostics: Diagnostics,
    },

    #[error("unknown pseudo-class `:{name}` in `{selector}`")]
    UnknownPredicate {
        selector: String,
        name: String,
        diagnostics: Diagnostics,
    },

    #[error("invalid combinator in `{selector}`: {}", primary_message(.diagnostics))]
    InvalidCombinator {
        selector: String,
        diagnostics: Diagnostics,
    },

    /// Nested selectors (`:not(:has(...))`) went deeper than the limit.
    #[error("recursion limit exceeded")]
    RecursionLimitExceeded,
}

fn primary_message(diagnostics: &Diagnostics) -> &str {
    diagnostics.primary().map_or("", |d| d.message())
}

impl Error {
    /// Builds the error from raw diagnostics. The variant follows the
    /// highest-priority diagnostic left after cascade suppression.
    fn from_diagnostics(selector: &str, diagnostics: Diagnostics, unknown: Option<Box<str>>) -> Self {
        let diagnostics = diagnostics.filtered();
        let selector = selector.to_owned();
        match diagnostics.primary().map(|d| d.kind()) {
            Some(kind) if kind.is_combinator_error() => Self::InvalidCombinator {
                selector,
                diagnostics,
            },
            Some(DiagnosticKind::UnknownPseudoClass) => Self::UnknownPredicate {
                selector,
                name: unknown.map(String::from).unwrap_or_default(),
                diagnostics,
            },
            _ => Self::Syntax {
                selector,
                diagnostics,
            },
        }
    }

    pub fn diagnostics(&self) -> Option<&Diagnostics> {
        match self {
            Self::Syntax { diagnostics, .. }
            | Self::UnknownPredicate { diagnostics, .. }
            | Self::InvalidCombinator { diagnostics, .. } => Some(diagnostics),
            Self::RecursionLimitExceeded => None,
        }
    }

    pub fn selector(&self) -> Option<&str> {
        match self {
            Self::Syntax { selector, .. }
            | Self::UnknownPredicate { selector, .. }
            | Self::InvalidCombinator { selector, .. } => Some(selector),
            Self::RecursionLimitExceeded => None,
        }
    }

    /// Diagnostics rendered against the selector text.
    pub fn render(&self, colored: bool) -> String {
        match (self.diagnostics(), self.selector()) {
            (Some(diagnostics), Some(selector)) => diagnostics.render_colored(selector, colored),
            _ => self.to_string(),
        }
    }
}

/// Result type for compiler operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Supplies compiled programs for nested selectors.
///
/// The engine implements this over its cache so `:not(.x)` inside many
/// selectors compiles once.
pub trait Resolve {
    fn resolve(&mut self, text: &str, mode: Mode, depth: u32) -> Result<Arc<Program>>;
}

/// Resolver that compiles every nested selector afresh.
#[derive(Debug, Clone, Copy)]
pub struct Uncached {
    max_depth: u32,
}

impl Uncached {
    pub fn new(max_depth: u32) -> Self {
        Self { max_depth }
    }
}

impl Default for Uncached {
    fn default() -> Self {
        Self::new(Compiler::DEFAULT_MAX_DEPTH)
    }
}

impl Resolve for Uncached {
    fn resolve(&mut self, text: &str, mode: Mode, depth: u32) -> Result<Arc<Program>> {
        let compiler = Compiler::new(mode).depth(depth).max_depth(self.max_depth);
        compiler.compile(text, self).map(Arc::new)
    }
}

/// Compiles one selector (no top-level commas) in a fixed mode.
#[derive(Debug, Clone, Copy)]
pub struct Compiler {
    mode: Mode,
    depth: u32,
    max_depth: u32,
}

impl Compiler {
    pub const DEFAULT_MAX_DEPTH: u32 = 64;

    pub fn new(mode: Mode) -> Self {
        Self {
            mode,
            depth: 0,
            max_depth: Self::DEFAULT_MAX_DEPTH,
        }
    }

    /// Nesting level of this selector; 0 for top-level text.
    pub fn depth(mut self, depth: u32) -> Self {
        self.depth = depth;
        self
    }

    pub fn max_depth(mut self, max_depth: u32) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn compile<R: Resolve + ?Sized>(&self, text: &str, resolver: &mut R) -> Result<Program> {
        if self.depth > self.max_depth {
            return Err(Error::RecursionLimitExceeded);
        }

        let text = text.trim();
        let (parse, diagnostics) = parser::parse(text);
        if diagnostics.has_errors() {
            return Err(Error::from_diagnostics(text, diagnostics, None));
        }

        let lowered = Lower::new(self.mode, self.depth, resolver).lower(&parse.root())?;
        if lowered.diagnostics.has_errors() {
            return Err(Error::from_diagnostics(
                text,
                lowered.diagnostics,
                lowered.unknown_pseudo,
            ));
        }

        Ok(Program::new(text, self.mode, lowered.steps, lowered.projection))
    }
}

/// Compiles `text` with a fresh, non-caching resolver.
pub fn compile(text: &str, mode: Mode) -> Result<Program> {
    Compiler::new(mode).compile(text, &mut Uncached::default())
}

/// Splits selector text on top-level commas. Commas inside parentheses,
/// brackets, braces or quotes do not split. Parts are trimmed; empty parts
/// are kept so that `a,` still fails to compile.
pub fn split_alternatives(text: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0u32;
    let mut start = 0usize;
    for token in parser::lexer::lex(text) {
        match token.kind {
            SyntaxKind::ParenOpen | SyntaxKind::BracketOpen | SyntaxKind::BraceOpen => depth += 1,
            SyntaxKind::ParenClose | SyntaxKind::BracketClose | SyntaxKind::BraceClose => {
                depth = depth.saturating_sub(1)
            }
            SyntaxKind::Comma if depth == 0 => {
                let at = usize::from(token.span.start());
                parts.push(text[start..at].trim());
                start = at + 1;
            }
            _ => {}
        }
    }
    parts.push(text[start..].trim());
    parts
}
