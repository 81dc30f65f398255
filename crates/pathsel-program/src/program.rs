use std::sync::Arc;

use crate::attr_op::AttrOp;
use crate::pseudo::Pseudo;

/// How a program treats its input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Mode {
    /// Hierarchical: starts from a root node and walks the tree.
    Select,
    /// Predicate-only: narrows a caller-supplied node list, no traversal.
    Filter,
}

impl Mode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Select => "select",
            Self::Filter => "filter",
        }
    }
}

/// Relation between consecutive compounds of a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Combinator {
    /// Whitespace: any descendant.
    Descendant,
    /// `>`: direct children.
    Child,
    /// `/`: path separator, direct children like `>`.
    Scoped,
}

impl Combinator {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Descendant => " ",
            Self::Child => ">",
            Self::Scoped => "/",
        }
    }

    /// Whether only direct children are gathered.
    pub fn is_direct(self) -> bool {
        matches!(self, Self::Child | Self::Scoped)
    }
}

/// Where an attribute test reads its value from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttrSource {
    /// `[name...]`: the element attribute.
    Attribute,
    /// `{name...}`: an inline style property.
    Style,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttrTest {
    pub name: Box<str>,
    pub op: Option<AttrOp>,
    pub value: Box<str>,
    pub source: AttrSource,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    /// Replaces the set with the children or descendants whose tag matches.
    /// `None` is the universal `*`.
    Collect {
        combinator: Combinator,
        tag: Option<Box<str>>,
    },
    /// Replaces the set with at most one element carrying `id`, searched
    /// among the children or descendants of the current set.
    IdLookup { combinator: Combinator, id: Box<str> },
    /// Keeps elements with this tag (ASCII case-insensitive).
    Tag(Box<str>),
    /// Keeps the first element carrying this id.
    Id(Box<str>),
    Class(Box<str>),
    Attribute(AttrTest),
    Pseudo(Pseudo),
}

/// A compiled selector. Never mutated after construction.
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    text: Box<str>,
    mode: Mode,
    steps: Vec<Step>,
    projection: Option<Box<str>>,
}

impl Program {
    pub fn new(
        text: impl Into<Box<str>>,
        mode: Mode,
        steps: Vec<Step>,
        projection: Option<Box<str>>,
    ) -> Self {
        Self {
            text: text.into(),
            mode,
            steps,
            projection,
        }
    }

    /// Selector text the program was compiled from.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Attribute named by a trailing `@name`, read by value accessors.
    pub fn projection(&self) -> Option<&str> {
        self.projection.as_deref()
    }

    /// Nested programs referenced by pseudo-class steps.
    pub fn nested(&self) -> impl Iterator<Item = &Arc<Program>> {
        self.steps.iter().flat_map(|step| match step {
            Step::Pseudo(p) => p.nested(),
            _ => &[][..],
        })
    }
}
