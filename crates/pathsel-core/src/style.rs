//! Inline `style` attribute parsing.
//!
//! Only the `name: value; name: value` declaration list is understood. The
//! last declaration for a property wins, the same way the browser resolves a
//! repeated inline declaration.

/// Value of `property` in an inline style declaration list.
///
/// Property names compare ASCII case-insensitively. A camelCase name
/// (`backgroundColor`) is read as its hyphenated form (`background-color`).
pub fn style_property<'a>(style: &'a str, property: &str) -> Option<&'a str> {
    let property = normalize_property_name(property);
    style
        .split(';')
        .filter_map(|decl| decl.split_once(':'))
        .filter(|(name, _)| name.trim().eq_ignore_ascii_case(&property))
        .map(|(_, value)| value.trim())
        .next_back()
}

/// `fontSize` becomes `font-size`; already hyphenated names pass through.
pub fn normalize_property_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    for ch in name.chars() {
        if ch.is_ascii_uppercase() {
            out.push('-');
            out.push(ch.to_ascii_lowercase());
        } else {
            out.push(ch);
        }
    }
    out
}
