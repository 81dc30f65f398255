//! Command builders for the CLI.
//!
//! Every command accepts every flag; the ones it ignores are hidden from
//! `--help`, so switching between `select` and `trace` never needs the
//! command line rewritten.

use clap::Command;

use super::args::*;

/// Selector input: positional text, `-q`, or `--query-file`.
fn with_selector_args(cmd: Command) -> Command {
    cmd.arg(selector_arg())
        .arg(query_text_arg())
        .arg(query_file_arg())
}

/// Add hidden source args (for commands that only compile).
fn with_hidden_source_args(cmd: Command) -> Command {
    cmd.arg(source_path_arg().hide(true))
        .arg(source_text_arg().hide(true))
        .arg(native_arg().hide(true))
        .arg(generic_arg().hide(true))
}

/// Add hidden JSON output args.
fn with_hidden_select_args(cmd: Command) -> Command {
    cmd.arg(compact_arg().hide(true))
}

/// Add hidden trace args.
fn with_hidden_trace_args(cmd: Command) -> Command {
    cmd.arg(verbose_arg().hide(true))
}

/// Add hidden compile-only args.
fn with_hidden_compile_args(cmd: Command) -> Command {
    cmd.arg(filter_arg().hide(true)).arg(spans_arg().hide(true))
}

/// Build the complete CLI with all subcommands.
pub fn build_cli() -> Command {
    Command::new("pathsel")
        .about("Path selectors over HTML documents")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(select_command())
        .subcommand(check_command())
        .subcommand(ast_command())
        .subcommand(dump_command())
        .subcommand(trace_command())
}

/// Run a selector against HTML and print the matches as JSON.
pub fn select_command() -> Command {
    let cmd = Command::new("select")
        .about("Run a selector against HTML and print matches as JSON")
        .override_usage(
            "\
  pathsel select <SELECTOR> <SOURCE>
  pathsel select -q <TEXT> <SOURCE>
  pathsel select <SELECTOR> -s <HTML>",
        )
        .after_help(
            r#"EXAMPLES:
  pathsel select 'ul > li.item' page.html     # matches with byte spans
  pathsel select 'a/@href' page.html          # adds the projected attribute value
  pathsel select '#main a' - < page.html      # source from stdin
  pathsel select 'td:nth-child(2)' page.html --native"#,
        );
    let cmd = with_selector_args(cmd)
        .arg(source_path_arg())
        .arg(source_text_arg())
        .arg(native_arg())
        .arg(generic_arg())
        .arg(compact_arg())
        .arg(color_arg());

    with_hidden_compile_args(with_hidden_trace_args(cmd))
}

/// Validate a selector.
pub fn check_command() -> Command {
    let cmd = Command::new("check")
        .about("Validate a selector")
        .override_usage(
            "\
  pathsel check <SELECTOR>
  pathsel check --query-file <FILE>",
        )
        .after_help(
            r#"EXAMPLES:
  pathsel check 'div > p:not(.x)'      # silent on success
  pathsel check ':nth-child(2n+1)' --filter"#,
        )
        .arg(filter_arg())
        .arg(color_arg());

    with_hidden_trace_args(with_hidden_select_args(with_hidden_source_args(
        with_selector_args(cmd).arg(spans_arg().hide(true)),
    )))
}

/// Show the concrete syntax tree of a selector.
pub fn ast_command() -> Command {
    let cmd = Command::new("ast")
        .about("Show the syntax tree of a selector")
        .override_usage(
            "\
  pathsel ast <SELECTOR>
  pathsel ast -q <TEXT> --spans",
        )
        .after_help(
            r#"EXAMPLES:
  pathsel ast 'ul > li'             # tokens and nodes
  pathsel ast 'a[href^="/"]' --spans"#,
        )
        .arg(spans_arg())
        .arg(color_arg());

    with_hidden_trace_args(with_hidden_select_args(with_hidden_source_args(
        with_selector_args(cmd).arg(filter_arg().hide(true)),
    )))
}

/// Show compiled step lists.
pub fn dump_command() -> Command {
    let cmd = Command::new("dump")
        .about("Show compiled step lists")
        .override_usage(
            "\
  pathsel dump <SELECTOR>
  pathsel dump <SELECTOR> --filter",
        )
        .after_help(
            r#"EXAMPLES:
  pathsel dump 'ul > li:has(a)'     # one program per alternative
  pathsel dump '.x, :first' --filter"#,
        )
        .arg(filter_arg())
        .arg(color_arg());

    with_hidden_trace_args(with_hidden_select_args(with_hidden_source_args(
        with_selector_args(cmd).arg(spans_arg().hide(true)),
    )))
}

/// Trace selector execution step by step.
pub fn trace_command() -> Command {
    let cmd = Command::new("trace")
        .about("Trace selector execution for debugging")
        .override_usage(
            "\
  pathsel trace <SELECTOR> <SOURCE>
  pathsel trace -q <TEXT> <SOURCE> -vv",
        )
        .after_help(
            r#"EXAMPLES:
  pathsel trace 'ul > li:not(.a)' page.html      # top-level steps
  pathsel trace 'ul > li:not(.a)' page.html -v   # nested selectors too
  pathsel trace 'li:first' page.html -vv         # node lists after each step"#,
        );
    let cmd = with_selector_args(cmd)
        .arg(source_path_arg())
        .arg(source_text_arg())
        .arg(native_arg())
        .arg(generic_arg())
        .arg(verbose_arg())
        .arg(color_arg());

    with_hidden_compile_args(with_hidden_select_args(cmd))
}
