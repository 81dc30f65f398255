//! CST to step-list lowering.
//!
//! Runs only on trees without parse errors. Produces its own diagnostics for
//! problems the grammar cannot see: unknown pseudo-classes, bad arguments,
//! combinators in filters and misplaced projections.

use std::sync::Arc;

use pathsel_program::{AttrOp, AttrSource, AttrTest, Combinator, Mode, NthExpr, Program, Pseudo, Step};
use rowan::TextRange;

use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::parser::SyntaxToken;
use crate::parser::ast::{self, Fragment, PathItem};
use crate::{Error, Resolve, split_alternatives};

pub(crate) struct Lowered {
    pub steps: Vec<Step>,
    pub projection: Option<Box<str>>,
    pub diagnostics: Diagnostics,
    /// First unknown pseudo-class name, including ones inside nested selectors.
    pub unknown_pseudo: Option<Box<str>>,
}

pub(crate) struct Lower<'r, R: Resolve + ?Sized> {
    mode: Mode,
    depth: u32,
    resolver: &'r mut R,
    steps: Vec<Step>,
    projection: Option<(Box<str>, TextRange)>,
    diagnostics: Diagnostics,
    unknown_pseudo: Option<Box<str>>,
}

impl<'r, R: Resolve + ?Sized> Lower<'r, R> {
    pub fn new(mode: Mode, depth: u32, resolver: &'r mut R) -> Self {
        Self {
            mode,
            depth,
            resolver,
            steps: Vec::new(),
            projection: None,
            diagnostics: Diagnostics::new(),
            unknown_pseudo: None,
        }
    }

    pub fn lower(mut self, root: &ast::Root) -> Result<Lowered, Error> {
        let selectors: Vec<_> = root.selectors().collect();
        if let Some(extra) = selectors.get(1) {
            let range = TextRange::new(extra.text_range().start(), root.text_range().end());
            self.diagnostics
                .report(DiagnosticKind::UnexpectedAlternatives, range)
                .emit();
        } else if let Some(selector) = selectors.first() {
            self.lower_selector(selector)?;
        }

        Ok(Lowered {
            steps: self.steps,
            projection: self.projection.map(|(name, _)| name),
            diagnostics: self.diagnostics,
            unknown_pseudo: self.unknown_pseudo,
        })
    }

    fn lower_selector(&mut self, selector: &ast::Selector) -> Result<(), Error> {
        let mut combinator = Combinator::Descendant;
        for item in selector.items() {
            match item {
                PathItem::Combinator(c) => {
                    if self.mode == Mode::Filter {
                        self.diagnostics
                            .report(DiagnosticKind::CombinatorInFilter, c.text_range())
                            .emit();
                        return Ok(());
                    }
                    combinator = match c.operator().map(|t| t.kind()) {
                        None => Combinator::Descendant,
                        Some(crate::parser::SyntaxKind::Gt) => Combinator::Child,
                        Some(_) => Combinator::Scoped,
                    };
                }
                PathItem::Compound(compound) => {
                    if !self.lower_compound(&compound, combinator)? {
                        return Ok(());
                    }
                }
            }
        }
        Ok(())
    }

    /// Returns `false` once lowering cannot usefully continue.
    fn lower_compound(&mut self, compound: &ast::Compound, combinator: Combinator) -> Result<bool, Error> {
        if !self.check_projection_is_last() {
            return Ok(false);
        }

        let mut fragments = compound.fragments().peekable();
        let tag = compound.tag();

        match (self.mode, &tag) {
            (Mode::Select, Some(tag)) => {
                let name = (!tag.is_wildcard()).then(|| token_text(tag.token()));
                self.steps.push(Step::Collect { combinator, tag: name });
            }
            (Mode::Select, None) => match fragments.peek() {
                Some(Fragment::IdRef(id)) => {
                    let id = token_text(id.name());
                    fragments.next();
                    self.steps.push(Step::IdLookup { combinator, id });
                }
                // `a/@href` projects from the current set
                Some(Fragment::Projection(_)) => {}
                _ => self.steps.push(Step::Collect { combinator, tag: None }),
            },
            (Mode::Filter, Some(tag)) => {
                if !tag.is_wildcard() {
                    self.steps.push(Step::Tag(token_text(tag.token())));
                }
            }
            (Mode::Filter, None) => {}
        }

        for fragment in fragments {
            if !self.check_projection_is_last() {
                return Ok(false);
            }
            match fragment {
                Fragment::Class(class) => self.steps.push(Step::Class(token_text(class.name()))),
                Fragment::IdRef(id) => self.steps.push(Step::Id(token_text(id.name()))),
                Fragment::Attr(attr) => self.steps.push(Step::Attribute(lower_attr(&attr))),
                Fragment::Pseudo(pseudo) => {
                    if let Some(p) = self.lower_pseudo(&pseudo)? {
                        self.steps.push(Step::Pseudo(p));
                    }
                }
                Fragment::Projection(projection) => {
                    self.projection = Some((token_text(projection.name()), projection.text_range()));
                }
            }
        }
        Ok(true)
    }

    fn check_projection_is_last(&mut self) -> bool {
        let Some((_, range)) = &self.projection else {
            return true;
        };
        self.diagnostics
            .report(DiagnosticKind::MisplacedProjection, *range)
            .emit();
        false
    }

    fn lower_pseudo(&mut self, pseudo: &ast::Pseudo) -> Result<Option<Pseudo>, Error> {
        let Some(name_token) = pseudo.name() else {
            return Ok(None);
        };
        let name = name_token.text();
        let arg = pseudo.arg();

        let argless = match name {
            "first-child" => Some(Pseudo::FirstChild),
            "last-child" => Some(Pseudo::LastChild),
            "only-child" => Some(Pseudo::OnlyChild),
            "empty" => Some(Pseudo::Empty),
            "checked" => Some(Pseudo::Checked),
            "odd" => Some(Pseudo::NthChild(NthExpr::ODD)),
            "even" => Some(Pseudo::NthChild(NthExpr::EVEN)),
            "first" => Some(Pseudo::First),
            "last" => Some(Pseudo::Last),
            _ => None,
        };
        if let Some(p) = argless {
            if let Some(arg) = arg {
                self.diagnostics
                    .report(DiagnosticKind::UnexpectedPseudoArgument, arg.text_range())
                    .message(name)
                    .emit();
                return Ok(None);
            }
            return Ok(Some(p));
        }

        if !is_known_with_argument(name) {
            self.diagnostics
                .report(DiagnosticKind::UnknownPseudoClass, name_token.text_range())
                .message(name)
                .emit();
            self.unknown_pseudo.get_or_insert_with(|| name.into());
            return Ok(None);
        }

        let Some(arg) = arg.filter(|a| !a.text().trim().is_empty()) else {
            let range = pseudo.arg().map_or(pseudo.text_range(), |a| a.text_range());
            self.diagnostics
                .report(DiagnosticKind::ExpectedPseudoArgument, range)
                .message(format!("`:{name}(...)`"))
                .emit();
            return Ok(None);
        };
        let text = arg.text();
        let range = arg.inner_range();

        let lowered = match name {
            "nth-child" => match NthExpr::parse(&text) {
                Some(expr) => Some(Pseudo::NthChild(expr)),
                None => self.invalid_position(&text, range),
            },
            "nth" => match text.trim().parse::<usize>() {
                Ok(n) if n >= 1 => Some(Pseudo::Nth(n)),
                _ => self.invalid_position(&text, range),
            },
            "contains" => Some(Pseudo::Contains(strip_quotes(&text).into())),
            "nodeValue" => Some(Pseudo::NodeValue(strip_quotes(&text).into())),
            "not" => self.nested(name, &text, Mode::Filter, range)?.map(Pseudo::Not),
            "next" => self.nested(name, &text, Mode::Filter, range)?.map(Pseudo::Next),
            "prev" => self.nested(name, &text, Mode::Filter, range)?.map(Pseudo::Prev),
            _ => {
                let mut programs = Vec::new();
                for alternative in split_alternatives(&text) {
                    match self.nested(name, alternative, Mode::Select, range)? {
                        Some(program) => programs.push(program),
                        None => return Ok(None),
                    }
                }
                Some(Pseudo::Has(programs))
            }
        };
        Ok(lowered)
    }

    fn invalid_position(&mut self, text: &str, range: TextRange) -> Option<Pseudo> {
        self.diagnostics
            .report(DiagnosticKind::InvalidNthArgument, range)
            .message(text.trim())
            .emit();
        None
    }

    /// Compiles a nested selector through the resolver. Failures are
    /// re-reported on the argument span with the nested error's kind.
    fn nested(
        &mut self,
        name: &str,
        text: &str,
        mode: Mode,
        range: TextRange,
    ) -> Result<Option<Arc<Program>>, Error> {
        match self.resolver.resolve(text.trim(), mode, self.depth + 1) {
            Ok(program) => Ok(Some(program)),
            Err(Error::RecursionLimitExceeded) => Err(Error::RecursionLimitExceeded),
            Err(err) => {
                if let Error::UnknownPredicate { name: inner, .. } = &err {
                    self.unknown_pseudo.get_or_insert_with(|| inner.as_str().into());
                }
                if let Some(primary) = err.diagnostics().and_then(|d| d.primary()) {
                    self.diagnostics
                        .report(primary.kind(), range)
                        .verbatim(format!("in `:{name}(...)`: {}", primary.message()))
                        .emit();
                }
                Ok(None)
            }
        }
    }
}

fn is_known_with_argument(name: &str) -> bool {
    matches!(
        name,
        "nth-child" | "nth" | "contains" | "nodeValue" | "not" | "next" | "prev" | "has"
    )
}

fn lower_attr(attr: &ast::Attr) -> AttrTest {
    let op = attr
        .operator()
        .and_then(|t| AttrOp::from_symbol(t.text()));
    let value = attr
        .value()
        .map(|v| if v.is_quoted() { unescape(&v.raw_text()) } else { v.raw_text() })
        .unwrap_or_default();
    AttrTest {
        name: token_text(attr.name()),
        op,
        value: value.into(),
        source: if attr.is_style() {
            AttrSource::Style
        } else {
            AttrSource::Attribute
        },
    }
}

fn token_text(token: Option<SyntaxToken>) -> Box<str> {
    token.map(|t| t.text().into()).unwrap_or_default()
}

/// Drops backslashes, keeping the escaped character.
fn unescape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            if let Some(escaped) = chars.next() {
                out.push(escaped);
            }
        } else {
            out.push(c);
        }
    }
    out
}

/// Removes one pair of matching quotes around a text argument.
fn strip_quotes(s: &str) -> String {
    let s = s.trim();
    for quote in ['"', '\''] {
        if s.len() >= 2 && s.starts_with(quote) && s.ends_with(quote) {
            return unescape(&s[1..s.len() - 1]);
        }
    }
    s.to_owned()
}
