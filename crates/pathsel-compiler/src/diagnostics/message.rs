use rowan::TextRange;

/// Diagnostic kinds ordered by priority (highest priority first).
///
/// When two diagnostics have overlapping spans, the higher-priority one
/// suppresses the lower-priority one. An unclosed bracket, for example,
/// swallows the rest of the selector, and every error reported inside it
/// is noise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DiagnosticKind {
    // These cause cascading errors throughout the rest of the selector
    UnclosedParen,
    UnclosedBracket,
    UnclosedBrace,

    // User omitted something required - root cause errors
    ExpectedSelector,
    ExpectedName,
    ExpectedAttrName,
    ExpectedPseudoArgument,

    // User wrote something that doesn't belong
    UnexpectedToken,
    InvalidAttrOperator,
    MisplacedTag,
    MisplacedProjection,
    UnexpectedAlternatives,

    // Combinator placement
    LeadingCombinator,
    TrailingCombinator,
    DoubledCombinator,
    CombinatorInFilter,

    // Valid syntax, invalid meaning
    UnknownPseudoClass,
    UnexpectedPseudoArgument,
    InvalidNthArgument,
}

impl DiagnosticKind {
    pub fn default_severity(&self) -> Severity {
        Severity::Error
    }

    /// Whether this kind suppresses `other` when spans overlap.
    ///
    /// Lower discriminant = higher priority.
    pub fn suppresses(&self, other: &DiagnosticKind) -> bool {
        self < other
    }

    /// Unclosed delimiters: they cause cascading errors but should yield to
    /// a root-cause error at the same position.
    pub fn is_structural_error(&self) -> bool {
        matches!(
            self,
            Self::UnclosedParen | Self::UnclosedBracket | Self::UnclosedBrace
        )
    }

    pub fn is_root_cause_error(&self) -> bool {
        matches!(
            self,
            Self::ExpectedSelector
                | Self::ExpectedName
                | Self::ExpectedAttrName
                | Self::ExpectedPseudoArgument
        )
    }

    pub fn is_combinator_error(&self) -> bool {
        matches!(
            self,
            Self::LeadingCombinator
                | Self::TrailingCombinator
                | Self::DoubledCombinator
                | Self::CombinatorInFilter
        )
    }

    pub fn default_hint(&self) -> Option<&'static str> {
        match self {
            Self::CombinatorInFilter => Some("filters test nodes one by one; use select for paths"),
            Self::InvalidAttrOperator => Some("supported: `=` `!=` `^=` `$=` `*=` `%=`"),
            Self::InvalidNthArgument => Some("e.g. `3`, `odd`, `even` or `2n+1`"),
            Self::MisplacedProjection => Some("`@name` must end the selector: `a/@href`"),
            Self::UnexpectedAlternatives => Some("compile each comma-separated part on its own"),
            _ => None,
        }
    }

    /// Base message for this diagnostic kind, used when no custom message is provided.
    pub fn fallback_message(&self) -> &'static str {
        match self {
            Self::UnclosedParen => "missing closing `)`",
            Self::UnclosedBracket => "missing closing `]`",
            Self::UnclosedBrace => "missing closing `}`",

            Self::ExpectedSelector => "expected a selector",
            Self::ExpectedName => "expected a name",
            Self::ExpectedAttrName => "expected an attribute name",
            Self::ExpectedPseudoArgument => "expected an argument",

            Self::UnexpectedToken => "unexpected token",
            Self::InvalidAttrOperator => "unknown attribute operator",
            Self::MisplacedTag => "tag name must start the compound",
            Self::MisplacedProjection => "attribute projection must be last",
            Self::UnexpectedAlternatives => "expected a single selector",

            Self::LeadingCombinator => "selector cannot start with a combinator",
            Self::TrailingCombinator => "selector cannot end with a combinator",
            Self::DoubledCombinator => "combinator has no selector before it",
            Self::CombinatorInFilter => "combinators are not allowed in filters",

            Self::UnknownPseudoClass => "unknown pseudo-class",
            Self::UnexpectedPseudoArgument => "pseudo-class takes no argument",
            Self::InvalidNthArgument => "invalid position",
        }
    }

    /// Template for custom messages. Contains `{}` placeholder for caller-provided detail.
    pub fn custom_message(&self) -> String {
        match self {
            Self::UnknownPseudoClass => "`:{}` is not a known pseudo-class".to_string(),
            Self::UnexpectedPseudoArgument => "`:{}` takes no argument".to_string(),
            Self::InvalidNthArgument => "invalid position `{}`".to_string(),
            Self::InvalidAttrOperator => "unknown attribute operator `{}`".to_string(),
            Self::UnexpectedToken => "unexpected `{}`".to_string(),
            Self::UnclosedParen | Self::UnclosedBracket | Self::UnclosedBrace => {
                format!("{}; {{}}", self.fallback_message())
            }
            _ => format!("{}: {{}}", self.fallback_message()),
        }
    }

    /// - `None` → `fallback_message()`
    /// - `Some(detail)` → `custom_message()` with `{}` replaced by detail
    pub fn message(&self, msg: Option<&str>) -> String {
        match msg {
            None => self.fallback_message().to_string(),
            Some(detail) => self.custom_message().replace("{}", detail),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Severity {
    #[default]
    Error,
    Warning,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fix {
    pub(crate) replacement: String,
    pub(crate) description: String,
}

impl Fix {
    pub fn new(replacement: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            replacement: replacement.into(),
            description: description.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelatedInfo {
    pub(crate) range: TextRange,
    pub(crate) message: String,
}

impl RelatedInfo {
    pub fn new(range: TextRange, message: impl Into<String>) -> Self {
        Self {
            range,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagnosticMessage {
    pub(crate) kind: DiagnosticKind,
    /// The range shown to the user (underlined in output).
    pub(crate) range: TextRange,
    /// Range used for suppression; defaults to `range`, widened to the
    /// enclosing delimiter for errors reported inside one.
    pub(crate) suppression_range: TextRange,
    pub(crate) message: String,
    pub(crate) fix: Option<Fix>,
    pub(crate) related: Vec<RelatedInfo>,
    pub(crate) hints: Vec<String>,
}

impl DiagnosticMessage {
    pub(crate) fn new(kind: DiagnosticKind, range: TextRange, message: impl Into<String>) -> Self {
        Self {
            kind,
            range,
            suppression_range: range,
            message: message.into(),
            fix: None,
            related: Vec::new(),
            hints: kind.default_hint().map(str::to_string).into_iter().collect(),
        }
    }

    pub(crate) fn with_default_message(kind: DiagnosticKind, range: TextRange) -> Self {
        Self::new(kind, range, kind.fallback_message())
    }

    pub fn kind(&self) -> DiagnosticKind {
        self.kind
    }

    pub fn range(&self) -> TextRange {
        self.range
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn severity(&self) -> Severity {
        self.kind.default_severity()
    }

    pub(crate) fn is_error(&self) -> bool {
        self.severity() == Severity::Error
    }

    pub(crate) fn is_warning(&self) -> bool {
        self.severity() == Severity::Warning
    }
}

impl std::fmt::Display for DiagnosticMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} at {}..{}: {}",
            self.severity(),
            u32::from(self.range.start()),
            u32::from(self.range.end()),
            self.message
        )?;
        if let Some(fix) = &self.fix {
            write!(f, " (fix: {})", fix.description)?;
        }
        for related in &self.related {
            write!(
                f,
                " (related: {} at {}..{})",
                related.message,
                u32::from(related.range.start()),
                u32::from(related.range.end())
            )?;
        }
        for hint in &self.hints {
            write!(f, " (hint: {})", hint)?;
        }
        Ok(())
    }
}
