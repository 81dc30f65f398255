//! Dispatch logic: extract params from ArgMatches and convert to command args.
//!
//! - `*Params` structs hold what each command reads from clap, ignoring the
//!   hidden flags it only accepts
//! - `Into<*Args>` impls bridge dispatch to the command handlers
//! - `-q`/`--query-file` shift the first positional from SELECTOR to SOURCE

use std::path::PathBuf;

use clap::ArgMatches;
use pathsel_vm::Verbosity;

use super::{ColorChoice, HostChoice};
use crate::commands::ast::AstArgs;
use crate::commands::check::CheckArgs;
use crate::commands::dump::DumpArgs;
use crate::commands::input::{SelectorInput, SourceInput};
use crate::commands::select::SelectArgs;
use crate::commands::trace::TraceArgs;

pub struct SelectParams {
    pub selector: Option<String>,
    pub query_file: Option<PathBuf>,
    pub source_path: Option<PathBuf>,
    pub source_text: Option<String>,
    pub host: HostChoice,
    pub compact: bool,
    pub color: ColorChoice,
    // Note: verbose, filter, spans are parsed but not extracted
}

impl SelectParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        let (selector, query_file, source_path) = selector_and_source(m);
        Self {
            selector,
            query_file,
            source_path,
            source_text: m.get_one::<String>("source_text").cloned(),
            host: parse_host(m),
            compact: m.get_flag("compact"),
            color: parse_color(m),
        }
    }
}

impl From<SelectParams> for SelectArgs {
    fn from(p: SelectParams) -> Self {
        // Pretty by default when stdout is a TTY, unless --compact is passed
        let pretty = !p.compact && std::io::IsTerminal::is_terminal(&std::io::stdout());

        Self {
            selector: SelectorInput {
                text: p.selector,
                file: p.query_file,
            },
            source: SourceInput {
                path: p.source_path,
                text: p.source_text,
            },
            host: p.host,
            pretty,
            color: p.color.should_colorize(),
        }
    }
}

pub struct TraceParams {
    pub selector: Option<String>,
    pub query_file: Option<PathBuf>,
    pub source_path: Option<PathBuf>,
    pub source_text: Option<String>,
    pub host: HostChoice,
    pub verbose: u8,
    pub color: ColorChoice,
    // Note: compact, filter, spans are parsed but not extracted
}

impl TraceParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        let (selector, query_file, source_path) = selector_and_source(m);
        Self {
            selector,
            query_file,
            source_path,
            source_text: m.get_one::<String>("source_text").cloned(),
            host: parse_host(m),
            verbose: m.get_count("verbose"),
            color: parse_color(m),
        }
    }
}

impl From<TraceParams> for TraceArgs {
    fn from(p: TraceParams) -> Self {
        let verbosity = match p.verbose {
            0 => Verbosity::Default,
            1 => Verbosity::Verbose,
            _ => Verbosity::VeryVerbose,
        };

        Self {
            selector: SelectorInput {
                text: p.selector,
                file: p.query_file,
            },
            source: SourceInput {
                path: p.source_path,
                text: p.source_text,
            },
            host: p.host,
            verbosity,
            color: p.color.should_colorize(),
        }
    }
}

pub struct CheckParams {
    pub selector: Option<String>,
    pub query_file: Option<PathBuf>,
    pub filter: bool,
    pub color: ColorChoice,
    // Note: source args, compact, verbose, spans are parsed but not extracted
}

impl CheckParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        let (selector, query_file) = selector_only(m);
        Self {
            selector,
            query_file,
            filter: m.get_flag("filter"),
            color: parse_color(m),
        }
    }
}

impl From<CheckParams> for CheckArgs {
    fn from(p: CheckParams) -> Self {
        Self {
            selector: SelectorInput {
                text: p.selector,
                file: p.query_file,
            },
            filter: p.filter,
            color: p.color.should_colorize(),
        }
    }
}

pub struct AstParams {
    pub selector: Option<String>,
    pub query_file: Option<PathBuf>,
    pub spans: bool,
    pub color: ColorChoice,
}

impl AstParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        let (selector, query_file) = selector_only(m);
        Self {
            selector,
            query_file,
            spans: m.get_flag("spans"),
            color: parse_color(m),
        }
    }
}

impl From<AstParams> for AstArgs {
    fn from(p: AstParams) -> Self {
        Self {
            selector: SelectorInput {
                text: p.selector,
                file: p.query_file,
            },
            spans: p.spans,
            color: p.color.should_colorize(),
        }
    }
}

pub struct DumpParams {
    pub selector: Option<String>,
    pub query_file: Option<PathBuf>,
    pub filter: bool,
    pub color: ColorChoice,
}

impl DumpParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        let (selector, query_file) = selector_only(m);
        Self {
            selector,
            query_file,
            filter: m.get_flag("filter"),
            color: parse_color(m),
        }
    }
}

impl From<DumpParams> for DumpArgs {
    fn from(p: DumpParams) -> Self {
        Self {
            selector: SelectorInput {
                text: p.selector,
                file: p.query_file,
            },
            filter: p.filter,
            color: p.color.should_colorize(),
        }
    }
}

/// Parse --color flag into ColorChoice.
fn parse_color(m: &ArgMatches) -> ColorChoice {
    match m.get_one::<String>("color").map(|s| s.as_str()) {
        Some("always") => ColorChoice::Always,
        Some("never") => ColorChoice::Never,
        _ => ColorChoice::Auto,
    }
}

fn parse_host(m: &ArgMatches) -> HostChoice {
    if m.get_flag("native") {
        HostChoice::Native
    } else {
        HostChoice::Generic
    }
}

/// Selector text (`-q` wins over the positional) and selector file.
fn selector_only(m: &ArgMatches) -> (Option<String>, Option<PathBuf>) {
    let text = m
        .get_one::<String>("query_text")
        .or_else(|| m.get_one::<String>("selector"))
        .cloned();
    (text, m.get_one::<PathBuf>("query_file").cloned())
}

/// Like `selector_only`, plus the source path. When the selector comes from
/// a flag and only one positional is given, that positional is the source.
/// This enables: `pathsel select -q 'li' page.html`
fn selector_and_source(m: &ArgMatches) -> (Option<String>, Option<PathBuf>, Option<PathBuf>) {
    let query_text = m.get_one::<String>("query_text").cloned();
    let query_file = m.get_one::<PathBuf>("query_file").cloned();
    let positional = m.get_one::<String>("selector").cloned();
    let source_path = m.get_one::<PathBuf>("source_path").cloned();

    let flagged = query_text.is_some() || query_file.is_some();
    match (flagged, positional, source_path) {
        (true, Some(shifted), None) => (query_text, query_file, Some(PathBuf::from(shifted))),
        (true, _, source_path) => (query_text, query_file, source_path),
        (false, positional, source_path) => (positional, None, source_path),
    }
}
