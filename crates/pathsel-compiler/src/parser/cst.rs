//! Syntax kinds for selector text.
//!
//! `SyntaxKind` serves dual roles: token kinds (from lexer) and node kinds (from parser).
//! Logos derives token recognition; node kinds lack token/regex attributes.
//! `SelLang` implements Rowan's `Language` trait for tree construction.

use logos::Logos;
use rowan::Language;

/// All token and node kinds. Tokens first, then nodes, then `__LAST` sentinel.
/// `#[repr(u16)]` enables safe transmute in `kind_from_raw`.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u16)]
pub enum SyntaxKind {
    #[token("(")]
    ParenOpen = 0,

    #[token(")")]
    ParenClose,

    #[token("[")]
    BracketOpen,

    #[token("]")]
    BracketClose,

    /// Opens an inline-style test: `{display=none}`
    #[token("{")]
    BraceOpen,

    #[token("}")]
    BraceClose,

    #[token("#")]
    Hash,

    #[token(".")]
    Dot,

    #[token(":")]
    Colon,

    /// Attribute marker inside brackets, or a trailing `@name` projection
    #[token("@")]
    At,

    #[token(">")]
    Gt,

    /// Path separator, gathers direct children like `>`
    #[token("/")]
    Slash,

    #[token(",")]
    Comma,

    #[token("*")]
    Star,

    #[token("=")]
    Equals,

    #[token("!=")]
    NotEquals,

    #[token("^=")]
    CaretEquals,

    #[token("$=")]
    DollarEquals,

    #[token("*=")]
    StarEquals,

    #[token("%=")]
    PercentEquals,

    #[regex(r#""(?:[^"\\]|\\.)*""#)]
    #[regex(r"'(?:[^'\\]|\\.)*'")]
    #[doc(hidden)]
    StringLiteral, // Lexer-internal only

    DoubleQuote,
    SingleQuote,
    /// String content between quotes
    StrVal,

    /// Tag, class, id, attribute and pseudo-class names
    #[regex(r"[A-Za-z0-9_\-]+")]
    Id,

    /// Significant: a whitespace run between compounds is the descendant combinator
    #[regex(r"[ \t\r\n\f]+")]
    Whitespace,

    /// Coalesced unrecognized characters
    Garbage,
    Error,

    // --- Node kinds (non-terminals) ---
    Root,
    Selector,
    Compound,
    Combinator,
    Tag,
    IdRef,
    Class,
    Pseudo,
    PseudoArg,
    Attr,
    AttrValue,
    Projection,

    // Must be last - used for bounds checking in `kind_from_raw`
    #[doc(hidden)]
    __LAST,
}

use SyntaxKind::*;

impl SyntaxKind {
    #[inline]
    pub fn is_error(self) -> bool {
        matches!(self, Error | Garbage)
    }

    /// Operators allowed between an attribute name and its value.
    #[inline]
    pub fn is_attr_op(self) -> bool {
        token_sets::ATTR_OPS.contains(self)
    }
}

impl From<SyntaxKind> for rowan::SyntaxKind {
    #[inline]
    fn from(kind: SyntaxKind) -> Self {
        Self(kind as u16)
    }
}

/// Language tag for Rowan's tree types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SelLang {}

impl Language for SelLang {
    type Kind = SyntaxKind;

    fn kind_from_raw(raw: rowan::SyntaxKind) -> Self::Kind {
        assert!(raw.0 < __LAST as u16);
        // SAFETY: We've verified the value is in bounds, and SyntaxKind is repr(u16)
        unsafe { std::mem::transmute::<u16, SyntaxKind>(raw.0) }
    }

    fn kind_to_raw(kind: Self::Kind) -> rowan::SyntaxKind {
        kind.into()
    }
}

pub type SyntaxNode = rowan::SyntaxNode<SelLang>;
pub type SyntaxToken = rowan::SyntaxToken<SelLang>;
pub type SyntaxElement = rowan::NodeOrToken<SyntaxNode, SyntaxToken>;

/// 64-bit bitset of `SyntaxKind`s for O(1) membership testing.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct TokenSet(u64);

impl TokenSet {
    pub const EMPTY: TokenSet = TokenSet(0);

    /// Panics at compile time if any kind's discriminant >= 64.
    #[inline]
    pub const fn new(kinds: &[SyntaxKind]) -> Self {
        let mut bits = 0u64;
        let mut i = 0;
        while i < kinds.len() {
            let kind = kinds[i] as u16;
            assert!(kind < 64, "SyntaxKind value exceeds TokenSet capacity");
            bits |= 1 << kind;
            i += 1;
        }
        TokenSet(bits)
    }

    #[inline]
    pub const fn contains(&self, kind: SyntaxKind) -> bool {
        let kind = kind as u16;
        if kind >= 64 {
            return false;
        }
        self.0 & (1 << kind) != 0
    }

    #[inline]
    pub const fn union(self, other: TokenSet) -> TokenSet {
        TokenSet(self.0 | other.0)
    }
}

impl std::fmt::Debug for TokenSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut list = f.debug_set();
        for i in 0..(__LAST as u16).min(64) {
            if self.0 & (1 << i) != 0 {
                // SAFETY: i < __LAST, and SyntaxKind is repr(u16)
                let kind: SyntaxKind = unsafe { std::mem::transmute(i) };
                list.entry(&kind);
            }
        }
        list.finish()
    }
}

/// Pre-defined token sets for the parser.
pub mod token_sets {
    use super::*;

    /// Tokens that may start a compound.
    pub const COMPOUND_FIRST: TokenSet =
        TokenSet::new(&[Star, Id, Hash, Dot, Colon, BracketOpen, BraceOpen, At]);

    /// Fragments that may follow the leading tag of a compound.
    pub const FRAGMENT_FIRST: TokenSet =
        TokenSet::new(&[Hash, Dot, Colon, BracketOpen, BraceOpen, At]);

    pub const COMBINATOR_FIRST: TokenSet = TokenSet::new(&[Whitespace, Gt, Slash]);

    pub const ATTR_OPS: TokenSet = TokenSet::new(&[
        Equals,
        NotEquals,
        CaretEquals,
        DollarEquals,
        StarEquals,
        PercentEquals,
    ]);

    pub const QUOTES: TokenSet = TokenSet::new(&[DoubleQuote, SingleQuote]);
}
