//! Attribute comparison operators.

/// Operator of an attribute test such as `[@href^='http']`.
///
/// A test without an operator (`[@href]`) checks presence only and carries
/// `None` instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttrOp {
    /// `=`
    Eq,
    /// `!=`, also matches elements without the attribute
    Ne,
    /// `^=`
    StartsWith,
    /// `$=`
    EndsWith,
    /// `*=`
    Contains,
    /// `%=`, numeric divisibility
    Modulo,
}

impl AttrOp {
    pub fn from_symbol(s: &str) -> Option<Self> {
        Some(match s {
            "=" => Self::Eq,
            "!=" => Self::Ne,
            "^=" => Self::StartsWith,
            "$=" => Self::EndsWith,
            "*=" => Self::Contains,
            "%=" => Self::Modulo,
            _ => return None,
        })
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Eq => "=",
            Self::Ne => "!=",
            Self::StartsWith => "^=",
            Self::EndsWith => "$=",
            Self::Contains => "*=",
            Self::Modulo => "%=",
        }
    }

    /// Whether an element lacking the attribute passes the test.
    pub fn matches_missing(self) -> bool {
        self == Self::Ne
    }

    /// Compares a present attribute value against the operand.
    pub fn eval(self, actual: &str, expected: &str) -> bool {
        match self {
            Self::Eq => actual == expected,
            Self::Ne => actual != expected,
            Self::StartsWith => actual.starts_with(expected),
            Self::EndsWith => actual.ends_with(expected),
            Self::Contains => actual.contains(expected),
            Self::Modulo => {
                let (Ok(a), Ok(v)) = (actual.trim().parse::<f64>(), expected.trim().parse::<f64>())
                else {
                    return false;
                };
                v != 0.0 && a % v == 0.0
            }
        }
    }
}
