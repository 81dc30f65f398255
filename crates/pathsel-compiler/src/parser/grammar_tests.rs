use super::ast::Fragment;
use super::{dump_cst, parse};

fn cst(input: &str) -> String {
    let (parse, diagnostics) = parse(input);
    assert!(diagnostics.is_empty(), "unexpected diagnostics: {diagnostics}");
    dump_cst(&parse.syntax(), false)
}

fn errors(input: &str) -> String {
    let (_, diagnostics) = parse(input);
    assert!(diagnostics.has_errors(), "expected errors for `{input}`");
    diagnostics.filtered().to_string()
}

#[test]
fn compound_with_class() {
    insta::assert_snapshot!(cst("div.note"), @r#"
    Root
      Selector
        Compound
          Tag
            Id "div"
          Class
            Dot "."
            Id "note"
    "#);
}

#[test]
fn combinators() {
    insta::assert_snapshot!(cst("ul > li a"), @r#"
    Root
      Selector
        Compound
          Tag
            Id "ul"
        Combinator
          Whitespace " "
          Gt ">"
          Whitespace " "
        Compound
          Tag
            Id "li"
        Combinator
          Whitespace " "
        Compound
          Tag
            Id "a"
    "#);
}

#[test]
fn alternatives_keep_surrounding_whitespace_out_of_combinators() {
    insta::assert_snapshot!(cst("a , b "), @r#"
    Root
      Selector
        Compound
          Tag
            Id "a"
        Whitespace " "
      Comma ","
      Selector
        Whitespace " "
        Compound
          Tag
            Id "b"
        Whitespace " "
    "#);
}

#[test]
fn leading_slash_and_projection() {
    insta::assert_snapshot!(cst("/div/@href"), @r#"
    Root
      Selector
        Slash "/"
        Compound
          Tag
            Id "div"
        Combinator
          Slash "/"
        Compound
          Projection
            At "@"
            Id "href"
    "#);
}

#[test]
fn attribute_and_style_tests() {
    insta::assert_snapshot!(cst("[@name^='fo']{display=none}"), @r#"
    Root
      Selector
        Compound
          Attr
            BracketOpen "["
            At "@"
            Id "name"
            CaretEquals "^="
            AttrValue
              SingleQuote "'"
              StrVal "fo"
              SingleQuote "'"
            BracketClose "]"
          Attr
            BraceOpen "{"
            Id "display"
            Equals "="
            AttrValue
              Id "none"
            BraceClose "}"
    "#);
}

#[test]
fn nested_pseudo_argument() {
    insta::assert_snapshot!(cst("li:not(.a, :has(b))"), @r#"
    Root
      Selector
        Compound
          Tag
            Id "li"
          Pseudo
            Colon ":"
            Id "not"
            PseudoArg
              ParenOpen "("
              Dot "."
              Id "a"
              Comma ","
              Whitespace " "
              Colon ":"
              Id "has"
              ParenOpen "("
              Id "b"
              ParenClose ")"
              ParenClose ")"
    "#);
}

#[test]
fn spans_in_raw_dump() {
    let (parse, _) = parse("a>b");
    insta::assert_snapshot!(dump_cst(&parse.syntax(), true), @r#"
    Root [0..3]
      Selector [0..3]
        Compound [0..1]
          Tag [0..1]
            Id [0..1] "a"
        Combinator [1..2]
          Gt [1..2] ">"
        Compound [2..3]
          Tag [2..3]
            Id [2..3] "b"
    "#);
}

#[test]
fn pseudo_argument_text_is_verbatim() {
    let (parse, diagnostics) = parse(r#"p:contains("a)"):not(.x , .y)"#);
    assert!(diagnostics.is_empty());
    let compound = parse.root().selectors().next().unwrap().compounds().next().unwrap();
    let args: Vec<String> = compound
        .fragments()
        .filter_map(|f| match f {
            Fragment::Pseudo(p) => p.arg().map(|a| a.text()),
            _ => None,
        })
        .collect();
    assert_eq!(args, vec![r#""a)""#.to_string(), ".x , .y".to_string()]);
}

#[test]
fn unquoted_attribute_value_drops_trailing_whitespace() {
    let (parse, diagnostics) = parse("[title = a b ]");
    assert!(diagnostics.is_empty());
    let compound = parse.root().selectors().next().unwrap().compounds().next().unwrap();
    let Some(Fragment::Attr(attr)) = compound.fragments().next() else {
        panic!("expected an attribute fragment");
    };
    assert_eq!(attr.name().unwrap().text(), "title");
    assert_eq!(attr.operator().unwrap().text(), "=");
    let value = attr.value().unwrap();
    assert!(!value.is_quoted());
    assert_eq!(value.raw_text(), "a b");
}

#[test]
fn empty_input() {
    insta::assert_snapshot!(errors(""), @"error at 0..0: expected a selector");
}

#[test]
fn empty_alternative() {
    insta::assert_snapshot!(errors("a,"), @"error at 2..2: expected a selector");
}

#[test]
fn trailing_combinator() {
    insta::assert_snapshot!(errors("div >"), @"error at 4..5: selector cannot end with a combinator");
}

#[test]
fn leading_combinator() {
    insta::assert_snapshot!(errors("> a"), @"error at 0..1: selector cannot start with a combinator");
}

#[test]
fn doubled_combinator() {
    insta::assert_snapshot!(errors("a > > b"), @"error at 4..5: combinator has no selector before it");
}

#[test]
fn unexpected_character() {
    insta::assert_snapshot!(errors("div!"), @"error at 3..4: unexpected `!`");
}

#[test]
fn misplaced_tag() {
    insta::assert_snapshot!(errors("[x]div"), @"error at 3..6: tag name must start the compound");
}

#[test]
fn missing_class_name() {
    insta::assert_snapshot!(errors("."), @"error at 1..1: expected a name");
}

#[test]
fn unknown_attribute_operator() {
    insta::assert_snapshot!(errors("[x~=1]"), @"error at 2..3: unknown attribute operator `~=` (hint: supported: `=` `!=` `^=` `$=` `*=` `%=`)");
}

#[test]
fn unclosed_bracket() {
    insta::assert_snapshot!(errors("[x"), @"error at 0..2: missing closing `]` (fix: add `]`) (related: opened here at 0..1)");
}

#[test]
fn unclosed_paren() {
    insta::assert_snapshot!(errors(":not(a"), @"error at 4..6: missing closing `)` (fix: add `)`) (related: opened here at 4..5)");
}

#[test]
fn unclosed_bracket_swallows_inner_errors() {
    let (_, diagnostics) = parse("[x y");
    assert_eq!(diagnostics.len(), 2);
    insta::assert_snapshot!(diagnostics.filtered().to_string(), @"error at 0..4: missing closing `]` (fix: add `]`) (related: opened here at 0..1)");
}
