//! `an+b` position expressions for `:nth-child(...)`.

/// Matches 1-based positions `a*k + b` for some `k >= 0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NthExpr {
    pub a: i32,
    pub b: i32,
}

impl NthExpr {
    pub const ODD: Self = Self { a: 2, b: 1 };
    pub const EVEN: Self = Self { a: 2, b: 0 };

    pub fn new(a: i32, b: i32) -> Self {
        Self { a, b }
    }

    pub fn index(n: i32) -> Self {
        Self { a: 0, b: n }
    }

    /// Parses `odd`, `even`, `3`, `2n+1`, `-n+3`, `n`.
    pub fn parse(s: &str) -> Option<Self> {
        let s: String = s
            .chars()
            .filter(|c| !c.is_ascii_whitespace())
            .collect::<String>()
            .to_ascii_lowercase();

        match s.as_str() {
            "odd" => return Some(Self::ODD),
            "even" => return Some(Self::EVEN),
            "" => return None,
            _ => {}
        }

        if let Ok(n) = s.parse::<i32>() {
            return Some(Self::index(n));
        }

        let (a_str, rest) = s.split_once('n')?;
        let a = match a_str {
            "" | "+" => 1,
            "-" => -1,
            _ => a_str.parse().ok()?,
        };
        let b = if rest.is_empty() {
            0
        } else {
            if !rest.starts_with(['+', '-']) {
                return None;
            }
            rest.parse().ok()?
        };
        Some(Self::new(a, b))
    }

    pub fn matches(&self, position: usize) -> bool {
        let Ok(n) = i32::try_from(position) else {
            return false;
        };
        let (n, a, b) = (i64::from(n), i64::from(self.a), i64::from(self.b));
        if a == 0 {
            return n == b;
        }
        // i64 holds any difference of two i32 values.
        let diff = n - b;
        if a > 0 {
            diff >= 0 && diff % a == 0
        } else {
            diff <= 0 && diff % a == 0
        }
    }
}

impl std::fmt::Display for NthExpr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (self.a, self.b) {
            (2, 1) => write!(f, "odd"),
            (2, 0) => write!(f, "even"),
            (0, b) => write!(f, "{b}"),
            (a, 0) => write!(f, "{a}n"),
            (a, b) => write!(f, "{a}n{b:+}"),
        }
    }
}
