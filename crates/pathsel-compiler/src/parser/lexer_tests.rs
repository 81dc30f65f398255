use super::cst::SyntaxKind;
use super::lexer::{lex, token_text};

fn snapshot(input: &str) -> String {
    lex(input)
        .iter()
        .map(|t| format!("{:?} {:?}", t.kind, token_text(input, t)))
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn compound_with_fragments() {
    insta::assert_snapshot!(snapshot("div#main.note:first-child"), @r##"
    Id "div"
    Hash "#"
    Id "main"
    Dot "."
    Id "note"
    Colon ":"
    Id "first-child"
    "##);
}

#[test]
fn combinators_keep_whitespace() {
    insta::assert_snapshot!(snapshot("ul  > li a/b"), @r#"
    Id "ul"
    Whitespace "  "
    Gt ">"
    Whitespace " "
    Id "li"
    Whitespace " "
    Id "a"
    Slash "/"
    Id "b"
    "#);
}

#[test]
fn attribute_operators() {
    insta::assert_snapshot!(snapshot("[@a=1][b!=2][c^=3][d$=4][e*=5][f%=6]*"), @r#"
    BracketOpen "["
    At "@"
    Id "a"
    Equals "="
    Id "1"
    BracketClose "]"
    BracketOpen "["
    Id "b"
    NotEquals "!="
    Id "2"
    BracketClose "]"
    BracketOpen "["
    Id "c"
    CaretEquals "^="
    Id "3"
    BracketClose "]"
    BracketOpen "["
    Id "d"
    DollarEquals "$="
    Id "4"
    BracketClose "]"
    BracketOpen "["
    Id "e"
    StarEquals "*="
    Id "5"
    BracketClose "]"
    BracketOpen "["
    Id "f"
    PercentEquals "%="
    Id "6"
    BracketClose "]"
    Star "*"
    "#);
}

#[test]
fn string_literal_is_split() {
    insta::assert_snapshot!(snapshot(r#"[title="a b"]{x=''}"#), @r#"
    BracketOpen "["
    Id "title"
    Equals "="
    DoubleQuote "\""
    StrVal "a b"
    DoubleQuote "\""
    BracketClose "]"
    BraceOpen "{"
    Id "x"
    Equals "="
    SingleQuote "'"
    SingleQuote "'"
    BraceClose "}"
    "#);
}

#[test]
fn garbage_is_coalesced() {
    let tokens = lex("div!~&x");
    let kinds: Vec<_> = tokens.iter().map(|t| t.kind).collect();
    assert_eq!(
        kinds,
        [SyntaxKind::Id, SyntaxKind::Garbage, SyntaxKind::Id]
    );
    assert_eq!(token_text("div!~&x", &tokens[1]), "!~&");
}

#[test]
fn trailing_garbage() {
    let tokens = lex("a;;");
    assert_eq!(tokens.last().map(|t| t.kind), Some(SyntaxKind::Garbage));
    assert_eq!(token_text("a;;", &tokens[1]), ";;");
}

#[test]
fn empty_input() {
    assert!(lex("").is_empty());
}
