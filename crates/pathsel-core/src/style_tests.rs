use crate::{normalize_property_name, style_property};

#[test]
fn reads_declaration() {
    let style = "color: red; display:none";
    assert_eq!(style_property(style, "color"), Some("red"));
    assert_eq!(style_property(style, "display"), Some("none"));
    assert_eq!(style_property(style, "margin"), None);
}

#[test]
fn last_declaration_wins() {
    assert_eq!(style_property("color: red; color: blue;", "color"), Some("blue"));
}

#[test]
fn names_are_case_insensitive() {
    assert_eq!(style_property("COLOR: red", "color"), Some("red"));
}

#[test]
fn camel_case_maps_to_hyphenated() {
    assert_eq!(normalize_property_name("backgroundColor"), "background-color");
    assert_eq!(normalize_property_name("font-size"), "font-size");
    assert_eq!(
        style_property("background-color: #fff", "backgroundColor"),
        Some("#fff")
    );
}

#[test]
fn ignores_malformed_declarations() {
    assert_eq!(style_property("garbage; width: 10px", "width"), Some("10px"));
    assert_eq!(style_property("", "width"), None);
}
