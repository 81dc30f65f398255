//! Trace selector execution for debugging.

use pathsel_core::{Colors, Host};
use pathsel_lib::Engine;
use pathsel_program::Mode;
use pathsel_vm::{PrintTracer, VM, Verbosity};

use super::input::{SelectorInput, SourceInput, fail};
use super::select::render_error;
use crate::cli::HostChoice;

pub struct TraceArgs {
    pub selector: SelectorInput,
    pub source: SourceInput,
    pub host: HostChoice,
    pub verbosity: Verbosity,
    pub color: bool,
}

pub fn run(args: TraceArgs) {
    let selector = args.selector.load().unwrap_or_else(|e| fail(e));
    let tree = args
        .source
        .parse(&args.selector)
        .unwrap_or_else(|e| fail(e));

    let engine = Engine::new();
    let colors = Colors::new(args.color);
    let traced = match args.host {
        HostChoice::Generic => trace(&engine, &tree, &selector, args.verbosity, colors),
        HostChoice::Native => trace(
            &engine,
            &tree.to_document(),
            &selector,
            args.verbosity,
            colors,
        ),
    };

    let (tracer, count) = traced.unwrap_or_else(|e| {
        eprint!("{}", render_error(&e, args.color));
        std::process::exit(1);
    });

    tracer.print();
    println!("{}---{}", colors.dim, colors.reset);
    println!("{count} match{}", if count == 1 { "" } else { "es" });
}

/// Runs every alternative through one traced VM. Returns the tracer and
/// the number of nodes selected, the document node excluded.
pub fn trace<H: Host + ?Sized>(
    engine: &Engine,
    host: &H,
    selector: &str,
    verbosity: Verbosity,
    colors: Colors,
) -> pathsel_lib::Result<(PrintTracer, usize)> {
    let programs = engine.compile_all(selector, Mode::Select)?;
    let document = host.document();
    let mut vm = VM::builder(host)
        .strategy(engine.config().strategy)
        .tracer(PrintTracer::new(verbosity, colors))
        .build();

    let mut count = 0;
    for program in &programs {
        count += vm
            .select(program, document)
            .into_iter()
            .filter(|&n| n != document)
            .count();
    }
    Ok((vm.into_tracer(), count))
}
