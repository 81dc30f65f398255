//! Run a selector against HTML and print the matches as JSON.

use std::ops::Range;

use pathsel_core::Host;
use pathsel_lib::Engine;
use pathsel_program::Mode;

use super::input::{SelectorInput, SourceInput, fail};
use super::output::Match;
use crate::cli::HostChoice;

pub struct SelectArgs {
    pub selector: SelectorInput,
    pub source: SourceInput,
    pub host: HostChoice,
    pub pretty: bool,
    pub color: bool,
}

pub fn run(args: SelectArgs) {
    let selector = args.selector.load().unwrap_or_else(|e| fail(e));
    let tree = args
        .source
        .parse(&args.selector)
        .unwrap_or_else(|e| fail(e));

    let engine = Engine::new();
    let matches = match args.host {
        HostChoice::Generic => collect(&engine, &tree, &selector, |n| Some(tree.span(n))),
        HostChoice::Native => collect(&engine, &tree.to_document(), &selector, |_| None),
    };

    let matches = matches.unwrap_or_else(|e| {
        eprint!("{}", render_error(&e, args.color));
        std::process::exit(1);
    });

    let output = if args.pretty {
        serde_json::to_string_pretty(&matches)
    } else {
        serde_json::to_string(&matches)
    };
    match output {
        Ok(json) => println!("{json}"),
        Err(e) => fail(format_args!("JSON serialization failed: {e}")),
    }
}

/// Runs every alternative and describes each match. Projections are reported
/// per alternative, so `a/@href, img/@src` fills `value` for both.
pub fn collect<H, F>(
    engine: &Engine,
    host: &H,
    selector: &str,
    span: F,
) -> pathsel_lib::Result<Vec<Match>>
where
    H: Host + ?Sized,
    F: Fn(H::Node) -> Option<Range<usize>>,
{
    let programs = engine.compile_all(selector, Mode::Select)?;
    let document = host.document();
    let mut vm = engine.vm(host);
    let mut out = Vec::new();
    for program in &programs {
        for node in vm.select(program, document) {
            if node == document {
                continue;
            }
            out.push(Match::describe(host, node, program.projection(), span(node)));
        }
    }
    tracing::info!(selector, matches = out.len(), "selected");
    Ok(out)
}

/// Compile errors with diagnostics render against the selector text.
pub fn render_error(err: &pathsel_lib::Error, color: bool) -> String {
    let mut out = match err {
        pathsel_lib::Error::Compile(e) if e.diagnostics().is_some() => e.render(color),
        other => format!("error: {other}"),
    };
    if !out.ends_with('\n') {
        out.push('\n');
    }
    out
}
