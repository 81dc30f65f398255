//! Tests for CLI dispatch logic.
//!
//! These tests verify:
//! 1. Unified flags: every command accepts every other command's flags
//! 2. Help visibility: hidden flags don't appear in --help
//! 3. Positional shifting: -q and --query-file shift the first positional to source
//! 4. Params extraction: correct fields are extracted from ArgMatches

use std::path::PathBuf;

use super::*;
use crate::cli::commands::{
    ast_command, check_command, dump_command, select_command, trace_command,
};

#[test]
fn select_extracts_selector_and_source() {
    let m = select_command()
        .try_get_matches_from(["select", "ul > li", "page.html", "--compact"])
        .unwrap();
    let params = SelectParams::from_matches(&m);

    assert_eq!(params.selector.as_deref(), Some("ul > li"));
    assert_eq!(params.source_path, Some(PathBuf::from("page.html")));
    assert_eq!(params.host, HostChoice::Generic);
    assert!(params.compact);
}

#[test]
fn select_accepts_trace_and_compile_flags() {
    let result = select_command().try_get_matches_from([
        "select", "li", "page.html", "-vv", "--filter", "--spans",
    ]);
    assert!(
        result.is_ok(),
        "select should accept trace flags: {:?}",
        result.err()
    );
}

#[test]
fn trace_accepts_select_flags() {
    let m = trace_command()
        .try_get_matches_from(["trace", "li", "page.html", "--compact", "-vv"])
        .unwrap();
    let params = TraceParams::from_matches(&m);

    assert_eq!(params.selector.as_deref(), Some("li"));
    assert_eq!(params.source_path, Some(PathBuf::from("page.html")));
    assert_eq!(params.verbose, 2);
}

#[test]
fn compile_commands_accept_source_args() {
    for cmd in [check_command(), ast_command(), dump_command()] {
        let name = cmd.get_name().to_owned();
        let result = cmd.try_get_matches_from([
            name.as_str(),
            "li",
            "page.html",
            "-s",
            "<p>",
            "--native",
            "--compact",
            "-v",
        ]);
        assert!(
            result.is_ok(),
            "{name} should accept source args: {:?}",
            result.err()
        );
    }
}

#[test]
fn native_and_generic_conflict() {
    let result =
        select_command().try_get_matches_from(["select", "li", "page.html", "--native", "--generic"]);
    assert!(result.is_err());
}

#[test]
fn native_flag_selects_native_host() {
    let m = trace_command()
        .try_get_matches_from(["trace", "li", "page.html", "--native"])
        .unwrap();
    assert_eq!(TraceParams::from_matches(&m).host, HostChoice::Native);
}

#[test]
fn query_text_and_file_conflict() {
    let result =
        check_command().try_get_matches_from(["check", "-q", "li", "--query-file", "q.sel"]);
    assert!(result.is_err());
}

#[test]
fn select_shifts_positional_with_inline_query() {
    let m = select_command()
        .try_get_matches_from(["select", "-q", "ul > li", "page.html"])
        .unwrap();
    let params = SelectParams::from_matches(&m);

    // With -q, the single positional becomes the source, not the selector
    assert_eq!(params.selector.as_deref(), Some("ul > li"));
    assert_eq!(params.source_path, Some(PathBuf::from("page.html")));
}

#[test]
fn trace_shifts_positional_with_query_file() {
    let m = trace_command()
        .try_get_matches_from(["trace", "--query-file", "q.sel", "page.html"])
        .unwrap();
    let params = TraceParams::from_matches(&m);

    assert_eq!(params.selector, None);
    assert_eq!(params.query_file, Some(PathBuf::from("q.sel")));
    assert_eq!(params.source_path, Some(PathBuf::from("page.html")));
}

#[test]
fn no_shift_with_two_positionals() {
    let m = select_command()
        .try_get_matches_from(["select", "-q", "li", "ignored", "page.html"])
        .unwrap();
    let params = SelectParams::from_matches(&m);

    assert_eq!(params.selector.as_deref(), Some("li"));
    assert_eq!(params.source_path, Some(PathBuf::from("page.html")));
}

#[test]
fn inline_query_wins_over_positional_for_compile_commands() {
    let m = dump_command()
        .try_get_matches_from(["dump", "a", "-q", "b", "--filter"])
        .unwrap();
    let params = DumpParams::from_matches(&m);

    assert_eq!(params.selector.as_deref(), Some("b"));
    assert!(params.filter);
}

#[test]
fn color_choice_parses() {
    let m = check_command()
        .try_get_matches_from(["check", "li", "--color", "never"])
        .unwrap();
    assert_eq!(CheckParams::from_matches(&m).color, ColorChoice::Never);

    let m = ast_command()
        .try_get_matches_from(["ast", "li", "--spans"])
        .unwrap();
    let params = AstParams::from_matches(&m);
    assert_eq!(params.color, ColorChoice::Auto);
    assert!(params.spans);

    let result = ast_command().try_get_matches_from(["ast", "li", "--color", "sometimes"]);
    assert!(result.is_err());
}

#[test]
fn select_help_hides_unrelated_flags() {
    let help = select_command().render_help().to_string();

    assert!(help.contains("--native"));
    assert!(help.contains("--compact"));
    assert!(!help.contains("Verbosity level"), "select help should not show -v");
    assert!(!help.contains("--filter"), "select help should not show --filter");
    assert!(!help.contains("--spans"), "select help should not show --spans");
}

#[test]
fn trace_help_hides_output_flags() {
    let help = trace_command().render_help().to_string();

    assert!(help.contains("Verbosity level"));
    assert!(!help.contains("--compact"), "trace help should not show --compact");
}

#[test]
fn compile_help_hides_source_args() {
    for mut cmd in [check_command(), ast_command(), dump_command()] {
        let name = cmd.get_name().to_owned();
        let help = cmd.render_help().to_string();

        assert!(!help.contains("[SOURCE]"), "{name} help should not show SOURCE");
        assert!(
            !help.contains("Inline source text"),
            "{name} help should not show -s"
        );
        assert!(!help.contains("--native"), "{name} help should not show --native");
        assert!(!help.contains("--compact"), "{name} help should not show --compact");
    }
}

#[test]
fn cli_requires_a_subcommand() {
    assert!(build_cli().try_get_matches_from(["pathsel"]).is_err());
    assert!(
        build_cli()
            .try_get_matches_from(["pathsel", "check", "li"])
            .is_ok()
    );
}
