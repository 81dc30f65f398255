//! Shared argument builders for CLI commands.
//!
//! Each function returns a `clap::Arg` so commands can compose the same
//! definition, hiding the ones they ignore (via `.hide(true)`).

use std::path::PathBuf;

use clap::{Arg, ArgAction, value_parser};

/// Selector text (positional).
pub fn selector_arg() -> Arg {
    Arg::new("selector")
        .value_name("SELECTOR")
        .help("Selector text, alternatives separated by commas")
}

/// Inline selector text (-q/--query).
pub fn query_text_arg() -> Arg {
    Arg::new("query_text")
        .short('q')
        .long("query")
        .value_name("TEXT")
        .conflicts_with("query_file")
        .help("Selector as a flag (frees the first positional for SOURCE)")
}

/// Selector read from a file (--query-file).
pub fn query_file_arg() -> Arg {
    Arg::new("query_file")
        .long("query-file")
        .value_name("FILE")
        .value_parser(value_parser!(PathBuf))
        .help("Read the selector from a file (use \"-\" for stdin)")
}

/// HTML file to query (positional).
pub fn source_path_arg() -> Arg {
    Arg::new("source_path")
        .value_name("SOURCE")
        .value_parser(value_parser!(PathBuf))
        .help("HTML file to query (use \"-\" for stdin)")
}

/// Inline HTML (-s/--source).
pub fn source_text_arg() -> Arg {
    Arg::new("source_text")
        .short('s')
        .long("source")
        .value_name("HTML")
        .help("Inline source text")
}

/// Color output control (--color).
pub fn color_arg() -> Arg {
    Arg::new("color")
        .long("color")
        .value_name("WHEN")
        .default_value("auto")
        .value_parser(["auto", "always", "never"])
        .help("Colorize output")
}

/// Query a converted document (--native).
pub fn native_arg() -> Arg {
    Arg::new("native")
        .long("native")
        .action(ArgAction::SetTrue)
        .conflicts_with("generic")
        .help("Convert to a native document first (id index, no spans)")
}

/// Query the parsed tree directly (--generic).
pub fn generic_arg() -> Arg {
    Arg::new("generic")
        .long("generic")
        .action(ArgAction::SetTrue)
        .help("Query the parsed HTML tree directly (default)")
}

/// Output compact JSON (--compact).
pub fn compact_arg() -> Arg {
    Arg::new("compact")
        .long("compact")
        .action(ArgAction::SetTrue)
        .help("Output compact JSON (default: pretty when stdout is a TTY)")
}

/// Verbosity level (-v, -vv).
pub fn verbose_arg() -> Arg {
    Arg::new("verbose")
        .short('v')
        .action(ArgAction::Count)
        .help("Verbosity level (-v for nested selectors, -vv for node lists)")
}

/// Compile in filter mode (--filter).
pub fn filter_arg() -> Arg {
    Arg::new("filter")
        .long("filter")
        .action(ArgAction::SetTrue)
        .help("Compile as a filter (tests nodes instead of searching)")
}

/// Show byte ranges (--spans).
pub fn spans_arg() -> Arg {
    Arg::new("spans")
        .long("spans")
        .action(ArgAction::SetTrue)
        .help("Show byte ranges")
}
