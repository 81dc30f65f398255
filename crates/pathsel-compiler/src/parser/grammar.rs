//! Grammar productions.
//!
//! ```text
//! root      = selector ("," selector)*
//! selector  = "/"* compound (combinator compound)*
//! compound  = tag? fragment*
//! fragment  = class | pseudo | attr | id | projection
//! ```

use rowan::TextRange;

use super::core::Parser;
use super::cst::SyntaxKind::{self, *};
use super::cst::token_sets::{ATTR_OPS, COMBINATOR_FIRST, COMPOUND_FIRST, FRAGMENT_FIRST, QUOTES};
use crate::diagnostics::DiagnosticKind;

impl Parser<'_> {
    pub fn parse_root(&mut self) {
        self.start_node(Root);
        loop {
            self.parse_selector();
            if !self.eat_token(Comma) {
                break;
            }
        }
        assert!(self.eof(), "parse_root: selector stopped before end of input");
        self.finish_node();
    }

    /// Consumes everything up to the next top-level `,` or the end of input.
    fn parse_selector(&mut self) {
        self.start_node(Selector);
        self.eat_whitespace();

        // A leading `/` is a no-op path anchor
        while self.eat_token(Slash) {}
        self.eat_whitespace();

        if self.at_selector_end() {
            self.error(DiagnosticKind::ExpectedSelector);
            self.finish_node();
            return;
        }

        if self.currently_is(Gt) {
            self.error(DiagnosticKind::LeadingCombinator);
            self.bump_as_error();
            self.eat_whitespace();
        }

        while !self.at_selector_end() {
            if self.currently_is_one_of(COMPOUND_FIRST) {
                self.parse_compound();
                continue;
            }

            if self.at_trailing_whitespace() {
                self.bump();
                break;
            }

            if self.currently_is_one_of(COMBINATOR_FIRST) {
                let explicit = self.parse_combinator();
                if self.at_selector_end() {
                    if let Some(range) = explicit {
                        self.error_at(DiagnosticKind::TrailingCombinator, range);
                    }
                } else if self.currently_is_one_of(COMBINATOR_FIRST) {
                    self.error(DiagnosticKind::DoubledCombinator);
                }
                continue;
            }

            self.error_and_bump_unexpected();
        }

        self.finish_node();
    }

    fn at_selector_end(&self) -> bool {
        self.eof() || self.currently_is(Comma)
    }

    /// Whitespace that only separates the selector from `,` or the end.
    fn at_trailing_whitespace(&self) -> bool {
        self.currently_is(Whitespace) && (self.pos + 1 >= self.tokens.len() || self.nth(1) == Comma)
    }

    /// Returns the range of the explicit `>` or `/`, if any.
    fn parse_combinator(&mut self) -> Option<TextRange> {
        self.start_node(Combinator);
        self.eat_whitespace();
        let mut explicit = None;
        if self.currently_is(Gt) || self.currently_is(Slash) {
            explicit = Some(self.current_span());
            self.bump();
            self.eat_whitespace();
        }
        self.finish_node();
        explicit
    }

    fn parse_compound(&mut self) {
        self.start_node(Compound);

        if self.currently_is(Star) || self.currently_is(Id) {
            self.start_node(Tag);
            self.bump();
            self.finish_node();
        }

        while self.currently_is_one_of(FRAGMENT_FIRST)
            || self.currently_is(Star)
            || self.currently_is(Id)
        {
            match self.current() {
                Dot => self.parse_prefixed_name(Class),
                Hash => self.parse_prefixed_name(IdRef),
                At => self.parse_prefixed_name(Projection),
                Colon => self.parse_pseudo(),
                BracketOpen | BraceOpen => self.parse_attr(),
                _ => {
                    self.error(DiagnosticKind::MisplacedTag);
                    self.bump_as_error();
                }
            }
        }

        self.finish_node();
    }

    /// `.name`, `#name` and `@name`.
    fn parse_prefixed_name(&mut self, kind: SyntaxKind) {
        self.start_node(kind);
        self.bump();
        self.expect(Id, DiagnosticKind::ExpectedName);
        self.finish_node();
    }

    fn parse_pseudo(&mut self) {
        self.assert_current(Colon);
        self.start_node(Pseudo);
        self.bump();
        if self.expect(Id, DiagnosticKind::ExpectedName) && self.currently_is(ParenOpen) {
            self.parse_pseudo_arg();
        }
        self.finish_node();
    }

    /// Raw argument up to the matching `)`. Quoted strings are single tokens,
    /// so parentheses inside them never count.
    fn parse_pseudo_arg(&mut self) {
        self.start_node(PseudoArg);
        self.push_delimiter(ParenOpen);
        self.bump();

        let mut depth = 0u32;
        loop {
            if self.eof() {
                if let Some(open) = self.pop_delimiter() {
                    self.error_unclosed_delimiter(DiagnosticKind::UnclosedParen, open);
                }
                break;
            }
            match self.current() {
                ParenOpen => depth += 1,
                ParenClose if depth == 0 => {
                    self.pop_delimiter();
                    self.bump();
                    break;
                }
                ParenClose => depth -= 1,
                _ => {}
            }
            self.bump();
        }

        self.finish_node();
    }

    /// `[name]`, `[@name op value]` and the inline-style form `{name op value}`.
    fn parse_attr(&mut self) {
        let (open, close, unclosed) = if self.currently_is(BracketOpen) {
            (BracketOpen, BracketClose, DiagnosticKind::UnclosedBracket)
        } else {
            (BraceOpen, BraceClose, DiagnosticKind::UnclosedBrace)
        };

        self.start_node(Attr);
        self.push_delimiter(open);
        self.bump();
        self.eat_whitespace();

        self.eat_token(At);
        if !self.eat_token(Id) {
            self.error(DiagnosticKind::ExpectedAttrName);
        }
        self.eat_whitespace();

        if self.currently_is_one_of(ATTR_OPS) {
            self.bump();
            self.eat_whitespace();
            self.parse_attr_value(close);
        } else if self.currently_is(Garbage)
            && self.pos + 1 < self.tokens.len()
            && self.nth(1) == Equals
        {
            // `~=`, `|=` and friends
            let op = format!("{}=", self.current_text());
            self.error_msg(DiagnosticKind::InvalidAttrOperator, op);
            self.bump_as_error();
            self.bump_as_error();
            self.eat_whitespace();
            self.parse_attr_value(close);
        }

        if !self.eof() && !self.currently_is(close) {
            self.error_and_bump_unexpected();
            while !self.eof() && !self.currently_is(close) {
                self.bump_as_error();
            }
        }

        if self.currently_is(close) {
            self.pop_delimiter();
            self.bump();
        } else if let Some(open) = self.pop_delimiter() {
            self.error_unclosed_delimiter(unclosed, open);
        }

        self.finish_node();
    }

    /// Quoted string, or raw tokens up to the closing delimiter. Whitespace
    /// before the delimiter is not part of an unquoted value.
    fn parse_attr_value(&mut self, close: SyntaxKind) {
        self.start_node(AttrValue);
        if self.currently_is_one_of(QUOTES) {
            self.bump();
            self.eat_token(StrVal);
            if self.currently_is_one_of(QUOTES) {
                self.bump();
            }
        } else {
            while !self.eof() && !self.currently_is(close) {
                if self.currently_is(Whitespace)
                    && (self.pos + 1 >= self.tokens.len() || self.nth(1) == close)
                {
                    break;
                }
                self.bump();
            }
        }
        self.finish_node();
        self.eat_whitespace();
    }
}
