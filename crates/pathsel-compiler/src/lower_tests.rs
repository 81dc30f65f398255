use std::sync::Arc;

use pathsel_core::Colors;
use pathsel_program::{Mode, Program, dump};

use crate::{Compiler, DiagnosticKind, Error, Resolve, Uncached, compile};

fn select(text: &str) -> String {
    let program = compile(text, Mode::Select).unwrap();
    dump(&program, Colors::OFF)
}

fn filter(text: &str) -> String {
    let program = compile(text, Mode::Filter).unwrap();
    dump(&program, Colors::OFF)
}

fn primary_kind(err: &Error) -> DiagnosticKind {
    err.diagnostics().unwrap().primary().unwrap().kind()
}

#[test]
fn child_path() {
    insta::assert_snapshot!(select("ul > li.item"), @r"
    select `ul > li.item`
      0 collect   descendant ul
      1 collect   child li
      2 class     .item
    ");
}

#[test]
fn leading_id_becomes_lookup() {
    insta::assert_snapshot!(select("#main a:first-child"), @r"
    select `#main a:first-child`
      0 id-lookup descendant #main
      1 collect   descendant a
      2 pseudo    :first-child
    ");
}

#[test]
fn id_after_tag_is_a_filter() {
    insta::assert_snapshot!(select("div#main"), @r"
    select `div#main`
      0 collect   descendant div
      1 id        #main
    ");
}

#[test]
fn untagged_compound_collects_everything() {
    insta::assert_snapshot!(select("*.x[@n^='fo'] {display=none}"), @r#"
    select `*.x[@n^='fo'] {display=none}`
      0 collect   descendant *
      1 class     .x
      2 attr      [n ^= "fo"]
      3 collect   descendant *
      4 style     {display = "none"}
    "#);
}

#[test]
fn scoped_path_with_projection() {
    insta::assert_snapshot!(select("/div/a/@href"), @r"
    select `/div/a/@href`
      0 collect   descendant div
      1 collect   scoped a
      project @href
    ");
}

#[test]
fn presence_and_quoted_escapes() {
    insta::assert_snapshot!(select(r#"[checked][x="a\"b"]"#), @r#"
    select `[checked][x="a\"b"]`
      0 collect   descendant *
      1 attr      [checked]
      2 attr      [x = "a\"b"]
    "#);
}

#[test]
fn positional_arguments() {
    insta::assert_snapshot!(select("li:nth-child(3n+1):odd:nth(2):last"), @r"
    select `li:nth-child(3n+1):odd:nth(2):last`
      0 collect   descendant li
      1 pseudo    :nth-child(3n+1)
      2 pseudo    :nth-child(odd)
      3 pseudo    :nth(2)
      4 pseudo    :last
    ");
}

#[test]
fn text_arguments_lose_one_pair_of_quotes() {
    insta::assert_snapshot!(select("p:contains('a b'):nodeValue(x)"), @r#"
    select `p:contains('a b'):nodeValue(x)`
      0 collect   descendant p
      1 pseudo    :contains("a b")
      2 pseudo    :nodeValue("x")
    "#);
}

#[test]
fn filter_mode_lowers_leading_tag() {
    insta::assert_snapshot!(filter("li.a:not(.b)"), @r"
    filter `li.a:not(.b)`
      0 tag       li
      1 class     .a
      2 pseudo    :not
        filter `.b`
          0 class     .b
    ");
}

#[test]
fn has_compiles_each_alternative_in_select_mode() {
    insta::assert_snapshot!(select("div:has(a, .b)"), @r"
    select `div:has(a, .b)`
      0 collect   descendant div
      1 pseudo    :has
        select `a`
          0 collect   descendant a
        select `.b`
          0 collect   descendant *
          1 class     .b
    ");
}

#[test]
fn combinator_in_filter() {
    let err = compile("a b", Mode::Filter).unwrap_err();
    assert!(matches!(err, Error::InvalidCombinator { .. }));
    insta::assert_snapshot!(err.to_string(), @"invalid combinator in `a b`: combinators are not allowed in filters");
}

#[test]
fn trailing_combinator_is_a_combinator_error() {
    let err = compile("div >", Mode::Select).unwrap_err();
    assert!(matches!(err, Error::InvalidCombinator { .. }));
    assert_eq!(primary_kind(&err), DiagnosticKind::TrailingCombinator);
}

#[test]
fn unknown_pseudo_class() {
    let err = compile("a:bogus", Mode::Select).unwrap_err();
    let Error::UnknownPredicate { name, .. } = &err else {
        panic!("expected UnknownPredicate, got {err:?}");
    };
    assert_eq!(name, "bogus");
    insta::assert_snapshot!(err.to_string(), @"unknown pseudo-class `:bogus` in `a:bogus`");
}

#[test]
fn unknown_pseudo_class_inside_not() {
    let err = compile("a:not(:bogus)", Mode::Select).unwrap_err();
    let Error::UnknownPredicate { name, diagnostics, .. } = &err else {
        panic!("expected UnknownPredicate, got {err:?}");
    };
    assert_eq!(name, "bogus");
    insta::assert_snapshot!(diagnostics.to_string(), @"error at 6..12: in `:not(...)`: `:bogus` is not a known pseudo-class");
}

#[test]
fn argument_to_argless_pseudo_class() {
    let err = compile("li:first-child(2)", Mode::Select).unwrap_err();
    assert!(matches!(err, Error::Syntax { .. }));
    insta::assert_snapshot!(err.to_string(), @"invalid selector `li:first-child(2)`: `:first-child` takes no argument");
}

#[test]
fn invalid_positions() {
    let err = compile("li:nth-child(x)", Mode::Select).unwrap_err();
    insta::assert_snapshot!(err.to_string(), @"invalid selector `li:nth-child(x)`: invalid position `x`");

    let err = compile("li:nth(0)", Mode::Select).unwrap_err();
    assert_eq!(primary_kind(&err), DiagnosticKind::InvalidNthArgument);
}

#[test]
fn missing_argument() {
    let err = compile("a:not()", Mode::Select).unwrap_err();
    insta::assert_snapshot!(err.to_string(), @"invalid selector `a:not()`: expected an argument: `:not(...)`");

    let err = compile("a:has", Mode::Select).unwrap_err();
    assert_eq!(primary_kind(&err), DiagnosticKind::ExpectedPseudoArgument);
}

#[test]
fn projection_must_be_last() {
    let err = compile("a@href.x", Mode::Select).unwrap_err();
    insta::assert_snapshot!(err.to_string(), @"invalid selector `a@href.x`: attribute projection must be last");

    let err = compile("a/@href/b", Mode::Select).unwrap_err();
    assert_eq!(primary_kind(&err), DiagnosticKind::MisplacedProjection);
}

#[test]
fn alternatives_need_splitting_first() {
    let err = compile("a, b", Mode::Select).unwrap_err();
    assert_eq!(primary_kind(&err), DiagnosticKind::UnexpectedAlternatives);
}

#[test]
fn text_is_trimmed() {
    let program = compile("  .x  ", Mode::Filter).unwrap();
    assert_eq!(program.text(), ".x");
}

fn nested_nots(levels: usize) -> String {
    let mut text = "a".to_string();
    for _ in 0..levels {
        text = format!(":not({text})");
    }
    text
}

#[test]
fn nesting_up_to_the_limit_compiles() {
    assert!(compile(&nested_nots(64), Mode::Filter).is_ok());
}

#[test]
fn nesting_beyond_the_limit_fails() {
    let err = compile(&nested_nots(65), Mode::Filter).unwrap_err();
    assert!(matches!(err, Error::RecursionLimitExceeded));

    let err = Compiler::new(Mode::Filter)
        .max_depth(2)
        .compile(&nested_nots(3), &mut Uncached::new(2))
        .unwrap_err();
    assert!(matches!(err, Error::RecursionLimitExceeded));
}

#[derive(Default)]
struct Recording {
    calls: Vec<(String, Mode, u32)>,
}

impl Resolve for Recording {
    fn resolve(&mut self, text: &str, mode: Mode, depth: u32) -> crate::Result<Arc<Program>> {
        self.calls.push((text.to_string(), mode, depth));
        Compiler::new(mode).depth(depth).compile(text, self).map(Arc::new)
    }
}

#[test]
fn nested_selectors_go_through_the_resolver() {
    let mut resolver = Recording::default();
    Compiler::new(Mode::Select)
        .compile("a:not(.x):has(b, c > d)", &mut resolver)
        .unwrap();
    assert_eq!(
        resolver.calls,
        vec![
            (".x".to_string(), Mode::Filter, 1),
            ("b".to_string(), Mode::Select, 1),
            ("c > d".to_string(), Mode::Select, 1),
        ]
    );
}
