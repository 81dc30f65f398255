//! Parser state machine and low-level operations.
//!
//! Whitespace is significant in selectors (it is the descendant combinator),
//! so unlike most grammars there is no trivia buffering: every token is
//! consumed explicitly by the grammar, whitespace included.

use rowan::{GreenNode, GreenNodeBuilder, TextRange, TextSize};

use super::cst::{SyntaxKind, TokenSet};
use super::lexer::{Token, token_text};
use crate::diagnostics::{DiagnosticKind, Diagnostics};

#[derive(Debug, Clone, Copy)]
pub(super) struct OpenDelimiter {
    pub kind: SyntaxKind,
    pub span: TextRange,
}

pub struct Parser<'src> {
    pub(super) source: &'src str,
    pub(super) tokens: Vec<Token>,
    pub(super) pos: usize,
    pub(super) builder: GreenNodeBuilder<'static>,
    pub(super) diagnostics: Diagnostics,
    pub(super) last_diagnostic_pos: Option<TextSize>,
    pub(super) delimiter_stack: Vec<OpenDelimiter>,
    pub(super) debug_fuel: std::cell::Cell<u32>,
}

impl<'src> Parser<'src> {
    pub fn new(source: &'src str, tokens: Vec<Token>) -> Self {
        Self {
            source,
            tokens,
            pos: 0,
            builder: GreenNodeBuilder::new(),
            diagnostics: Diagnostics::new(),
            last_diagnostic_pos: None,
            delimiter_stack: Vec::with_capacity(4),
            debug_fuel: std::cell::Cell::new(256),
        }
    }

    pub(super) fn finish(self) -> (GreenNode, Diagnostics) {
        (self.builder.finish(), self.diagnostics)
    }

    pub(super) fn current(&self) -> SyntaxKind {
        self.nth(0)
    }

    fn reset_debug_fuel(&self) {
        self.debug_fuel.set(256);
    }

    /// Raw lookahead, whitespace included.
    pub(super) fn nth(&self, lookahead: usize) -> SyntaxKind {
        self.ensure_progress();
        self.tokens
            .get(self.pos + lookahead)
            .map_or(SyntaxKind::Error, |t| t.kind)
    }

    pub(super) fn current_span(&self) -> TextRange {
        self.tokens
            .get(self.pos)
            .map_or_else(|| TextRange::empty(self.eof_offset()), |t| t.span)
    }

    pub(super) fn current_text(&self) -> &'src str {
        self.tokens
            .get(self.pos)
            .map_or("", |t| token_text(self.source, t))
    }

    pub(super) fn eof_offset(&self) -> TextSize {
        TextSize::from(self.source.len() as u32)
    }

    pub(super) fn eof(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    pub(super) fn currently_is(&self, kind: SyntaxKind) -> bool {
        !self.eof() && self.current() == kind
    }

    pub(super) fn currently_is_one_of(&self, set: TokenSet) -> bool {
        !self.eof() && set.contains(self.current())
    }

    pub(super) fn start_node(&mut self, kind: SyntaxKind) {
        self.builder.start_node(kind.into());
    }

    pub(super) fn finish_node(&mut self) {
        self.builder.finish_node();
    }

    pub(super) fn bump(&mut self) {
        assert!(!self.eof(), "bump called at EOF");
        self.reset_debug_fuel();

        let token = self.tokens[self.pos];
        let text = token_text(self.source, &token);
        self.builder.token(token.kind.into(), text);
        self.pos += 1;
    }

    pub(super) fn eat_token(&mut self, kind: SyntaxKind) -> bool {
        if self.currently_is(kind) {
            self.bump();
            true
        } else {
            false
        }
    }

    pub(super) fn eat_whitespace(&mut self) {
        while self.currently_is(SyntaxKind::Whitespace) {
            self.bump();
        }
    }

    /// On mismatch: emit diagnostic but don't consume.
    pub(super) fn expect(&mut self, kind: SyntaxKind, missing: DiagnosticKind) -> bool {
        if self.eat_token(kind) {
            return true;
        }
        self.error(missing);
        false
    }

    pub(super) fn current_suppression_span(&self) -> TextRange {
        self.delimiter_stack
            .last()
            .map(|d| TextRange::new(d.span.start(), self.eof_offset()))
            .unwrap_or_else(|| self.current_span())
    }

    fn should_report(&mut self, pos: TextSize) -> bool {
        if self.last_diagnostic_pos == Some(pos) {
            return false;
        }
        self.last_diagnostic_pos = Some(pos);
        true
    }

    pub(super) fn bump_as_error(&mut self) {
        if !self.eof() {
            self.start_node(SyntaxKind::Error);
            self.bump();
            self.finish_node();
        }
    }

    fn get_error_ranges(&mut self) -> Option<(TextRange, TextRange)> {
        let range = self.current_span();
        if !self.should_report(range.start()) {
            return None;
        }
        let suppression = self.current_suppression_span();
        Some((range, suppression))
    }

    pub(super) fn error(&mut self, kind: DiagnosticKind) {
        let Some((range, suppression)) = self.get_error_ranges() else {
            return;
        };
        self.diagnostics
            .report(kind, range)
            .suppression_range(suppression)
            .emit();
    }

    pub(super) fn error_msg(&mut self, kind: DiagnosticKind, message: impl Into<String>) {
        let Some((range, suppression)) = self.get_error_ranges() else {
            return;
        };
        self.diagnostics
            .report(kind, range)
            .message(message)
            .suppression_range(suppression)
            .emit();
    }

    pub(super) fn error_at(&mut self, kind: DiagnosticKind, range: TextRange) {
        if !self.should_report(range.start()) {
            return;
        }
        self.diagnostics.report(kind, range).emit();
    }

    /// Reports the current token as unexpected and wraps it in an `Error` node.
    pub(super) fn error_and_bump_unexpected(&mut self) {
        let text = self.current_text().to_owned();
        self.error_msg(DiagnosticKind::UnexpectedToken, text);
        self.bump_as_error();
    }

    pub(super) fn push_delimiter(&mut self, kind: SyntaxKind) {
        let span = self.current_span();
        self.delimiter_stack.push(OpenDelimiter { kind, span });
    }

    pub(super) fn pop_delimiter(&mut self) -> Option<OpenDelimiter> {
        self.delimiter_stack.pop()
    }

    pub(super) fn error_unclosed_delimiter(&mut self, kind: DiagnosticKind, open: OpenDelimiter) {
        let current = self.current_span();
        if !self.should_report(current.start()) {
            return;
        }
        let close = match open.kind {
            SyntaxKind::ParenOpen => ")",
            SyntaxKind::BracketOpen => "]",
            _ => "}",
        };
        // Full range for easier downstream error suppression
        let full_range = TextRange::new(open.span.start(), current.end());
        self.diagnostics
            .report(kind, full_range)
            .related_to("opened here", open.span)
            .fix(format!("add `{close}`"), close)
            .emit();
    }
}
