use std::sync::Arc;

use crate::nth::NthExpr;
use crate::program::Program;

/// Pseudo-class filter, resolved by name at compile time.
#[derive(Debug, Clone, PartialEq)]
pub enum Pseudo {
    FirstChild,
    LastChild,
    OnlyChild,
    /// Element position among element siblings. `:odd`/`:even` lower here too.
    NthChild(NthExpr),
    /// No element and no text children.
    Empty,
    /// Serialized inner markup contains the text.
    Contains(Box<str>),
    /// First child's raw value equals the text.
    NodeValue(Box<str>),
    Checked,
    Not(Arc<Program>),
    /// 1-based position within the current candidate sequence.
    Nth(usize),
    First,
    Last,
    /// Alternatives, each run in select mode rooted at the candidate.
    Has(Vec<Arc<Program>>),
    Next(Arc<Program>),
    Prev(Arc<Program>),
}

impl Pseudo {
    pub fn name(&self) -> &'static str {
        match self {
            Self::FirstChild => "first-child",
            Self::LastChild => "last-child",
            Self::OnlyChild => "only-child",
            Self::NthChild(_) => "nth-child",
            Self::Empty => "empty",
            Self::Contains(_) => "contains",
            Self::NodeValue(_) => "nodeValue",
            Self::Checked => "checked",
            Self::Not(_) => "not",
            Self::Nth(_) => "nth",
            Self::First => "first",
            Self::Last => "last",
            Self::Has(_) => "has",
            Self::Next(_) => "next",
            Self::Prev(_) => "prev",
        }
    }

    pub(crate) fn nested(&self) -> &[Arc<Program>] {
        match self {
            Self::Not(p) | Self::Next(p) | Self::Prev(p) => std::slice::from_ref(p),
            Self::Has(list) => list,
            _ => &[],
        }
    }
}
