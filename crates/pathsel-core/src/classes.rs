//! Class-list tokens: the whitespace-separated words of a `class` attribute.

/// Splits a class attribute into its tokens. Runs of whitespace count once.
pub fn class_tokens(value: &str) -> impl Iterator<Item = &str> {
    value.split_ascii_whitespace()
}

/// Whole-token membership; `"btn-primary"` does not contain `"btn"`.
pub fn has_class(value: &str, class: &str) -> bool {
    !class.is_empty() && class_tokens(value).any(|t| t == class)
}

/// Appends each token of `added` that `value` lacks.
pub(crate) fn add_tokens(value: &str, added: &str) -> String {
    let mut tokens: Vec<&str> = class_tokens(value).collect();
    for token in class_tokens(added) {
        if !tokens.contains(&token) {
            tokens.push(token);
        }
    }
    tokens.join(" ")
}

/// Drops every token of `removed` from `value`, keeping the rest in order.
pub(crate) fn remove_tokens(value: &str, removed: &str) -> String {
    let removed: Vec<&str> = class_tokens(removed).collect();
    class_tokens(value)
        .filter(|t| !removed.contains(t))
        .collect::<Vec<_>>()
        .join(" ")
}
