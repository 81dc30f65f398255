//! Typed AST wrappers over CST nodes.
//!
//! Each struct wraps a `SyntaxNode` and provides typed accessors.
//! Cast is infallible for correct `SyntaxKind` - validation happens elsewhere.

use rowan::TextRange;

use super::cst::{SyntaxKind, SyntaxNode, SyntaxToken};

macro_rules! ast_node {
    ($name:ident, $kind:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub struct $name(SyntaxNode);

        impl $name {
            pub fn cast(node: SyntaxNode) -> Option<Self> {
                (node.kind() == SyntaxKind::$kind).then(|| Self(node))
            }

            pub fn as_cst(&self) -> &SyntaxNode {
                &self.0
            }

            pub fn text_range(&self) -> TextRange {
                self.0.text_range()
            }
        }
    };
}

ast_node!(Root, Root);
ast_node!(Selector, Selector);
ast_node!(Compound, Compound);
ast_node!(Combinator, Combinator);
ast_node!(Tag, Tag);
ast_node!(IdRef, IdRef);
ast_node!(Class, Class);
ast_node!(Pseudo, Pseudo);
ast_node!(PseudoArg, PseudoArg);
ast_node!(Attr, Attr);
ast_node!(AttrValue, AttrValue);
ast_node!(Projection, Projection);

/// Element of a selector path, in source order.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathItem {
    Compound(Compound),
    Combinator(Combinator),
}

/// Anything that may follow the leading tag of a compound.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Fragment {
    Class(Class),
    IdRef(IdRef),
    Pseudo(Pseudo),
    Attr(Attr),
    Projection(Projection),
}

impl Fragment {
    pub fn cast(node: SyntaxNode) -> Option<Self> {
        match node.kind() {
            SyntaxKind::Class => Class::cast(node).map(Fragment::Class),
            SyntaxKind::IdRef => IdRef::cast(node).map(Fragment::IdRef),
            SyntaxKind::Pseudo => Pseudo::cast(node).map(Fragment::Pseudo),
            SyntaxKind::Attr => Attr::cast(node).map(Fragment::Attr),
            SyntaxKind::Projection => Projection::cast(node).map(Fragment::Projection),
            _ => None,
        }
    }

    pub fn as_cst(&self) -> &SyntaxNode {
        match self {
            Fragment::Class(n) => n.as_cst(),
            Fragment::IdRef(n) => n.as_cst(),
            Fragment::Pseudo(n) => n.as_cst(),
            Fragment::Attr(n) => n.as_cst(),
            Fragment::Projection(n) => n.as_cst(),
        }
    }

    pub fn text_range(&self) -> TextRange {
        self.as_cst().text_range()
    }
}

fn first_token_of(node: &SyntaxNode, kind: SyntaxKind) -> Option<SyntaxToken> {
    node.children_with_tokens()
        .filter_map(|e| e.into_token())
        .find(|t| t.kind() == kind)
}

impl Root {
    pub fn selectors(&self) -> impl Iterator<Item = Selector> + '_ {
        self.0.children().filter_map(Selector::cast)
    }
}

impl Selector {
    pub fn items(&self) -> impl Iterator<Item = PathItem> + '_ {
        self.0.children().filter_map(|n| match n.kind() {
            SyntaxKind::Compound => Compound::cast(n).map(PathItem::Compound),
            SyntaxKind::Combinator => Combinator::cast(n).map(PathItem::Combinator),
            _ => None,
        })
    }

    pub fn compounds(&self) -> impl Iterator<Item = Compound> + '_ {
        self.0.children().filter_map(Compound::cast)
    }
}

impl Compound {
    pub fn tag(&self) -> Option<Tag> {
        self.0.children().find_map(Tag::cast)
    }

    pub fn fragments(&self) -> impl Iterator<Item = Fragment> + '_ {
        self.0.children().filter_map(Fragment::cast)
    }
}

impl Combinator {
    /// The explicit `>` or `/`. `None` for a bare whitespace run.
    pub fn operator(&self) -> Option<SyntaxToken> {
        self.0
            .children_with_tokens()
            .filter_map(|e| e.into_token())
            .find(|t| matches!(t.kind(), SyntaxKind::Gt | SyntaxKind::Slash))
    }
}

impl Tag {
    /// `Star` or `Id` token.
    pub fn token(&self) -> Option<SyntaxToken> {
        self.0.first_token()
    }

    pub fn is_wildcard(&self) -> bool {
        self.token().is_some_and(|t| t.kind() == SyntaxKind::Star)
    }
}

impl IdRef {
    pub fn name(&self) -> Option<SyntaxToken> {
        first_token_of(&self.0, SyntaxKind::Id)
    }
}

impl Class {
    pub fn name(&self) -> Option<SyntaxToken> {
        first_token_of(&self.0, SyntaxKind::Id)
    }
}

impl Projection {
    pub fn name(&self) -> Option<SyntaxToken> {
        first_token_of(&self.0, SyntaxKind::Id)
    }
}

impl Pseudo {
    pub fn name(&self) -> Option<SyntaxToken> {
        first_token_of(&self.0, SyntaxKind::Id)
    }

    pub fn arg(&self) -> Option<PseudoArg> {
        self.0.children().find_map(PseudoArg::cast)
    }
}

impl PseudoArg {
    /// Verbatim text between the parentheses.
    pub fn text(&self) -> String {
        self.inner_tokens().map(|t| t.text().to_owned()).collect()
    }

    /// Range of the text between the parentheses.
    pub fn inner_range(&self) -> TextRange {
        let mut tokens = self.inner_tokens();
        let Some(first) = tokens.next() else {
            let end = self
                .0
                .first_token()
                .map_or(self.0.text_range().end(), |t| t.text_range().end());
            return TextRange::empty(end);
        };
        let last = tokens.last().unwrap_or_else(|| first.clone());
        first.text_range().cover(last.text_range())
    }

    fn inner_tokens(&self) -> impl Iterator<Item = SyntaxToken> + '_ {
        let tokens: Vec<SyntaxToken> = self
            .0
            .children_with_tokens()
            .filter_map(|e| e.into_token())
            .collect();
        let closed = tokens.len() > 1
            && tokens.last().is_some_and(|t| t.kind() == SyntaxKind::ParenClose);
        let end = if closed { tokens.len() - 1 } else { tokens.len() };
        tokens.into_iter().take(end).skip(1)
    }
}

impl Attr {
    /// `{name op value}` tests the inline style instead of an attribute.
    pub fn is_style(&self) -> bool {
        self.0
            .first_token()
            .is_some_and(|t| t.kind() == SyntaxKind::BraceOpen)
    }

    pub fn name(&self) -> Option<SyntaxToken> {
        first_token_of(&self.0, SyntaxKind::Id)
    }

    pub fn operator(&self) -> Option<SyntaxToken> {
        self.0
            .children_with_tokens()
            .filter_map(|e| e.into_token())
            .find(|t| t.kind().is_attr_op())
    }

    pub fn value(&self) -> Option<AttrValue> {
        self.0.children().find_map(AttrValue::cast)
    }
}

impl AttrValue {
    pub fn is_quoted(&self) -> bool {
        self.0
            .first_token()
            .is_some_and(|t| matches!(t.kind(), SyntaxKind::DoubleQuote | SyntaxKind::SingleQuote))
    }

    /// Value text without surrounding quotes. Escapes are left in place.
    pub fn raw_text(&self) -> String {
        if self.is_quoted() {
            return first_token_of(&self.0, SyntaxKind::StrVal)
                .map(|t| t.text().to_owned())
                .unwrap_or_default();
        }
        self.0.text().to_string()
    }
}
