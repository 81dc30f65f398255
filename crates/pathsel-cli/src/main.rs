mod cli;
mod commands;

use cli::{AstParams, CheckParams, DumpParams, SelectParams, TraceParams, build_cli};
use tracing_subscriber::EnvFilter;

fn main() {
    init_logging();

    let matches = build_cli().get_matches();

    match matches.subcommand() {
        Some(("select", m)) => {
            let params = SelectParams::from_matches(m);
            commands::select::run(params.into());
        }
        Some(("check", m)) => {
            let params = CheckParams::from_matches(m);
            commands::check::run(params.into());
        }
        Some(("ast", m)) => {
            let params = AstParams::from_matches(m);
            commands::ast::run(params.into());
        }
        Some(("dump", m)) => {
            let params = DumpParams::from_matches(m);
            commands::dump::run(params.into());
        }
        Some(("trace", m)) => {
            let params = TraceParams::from_matches(m);
            commands::trace::run(params.into());
        }
        _ => unreachable!("clap should have caught this"),
    }
}

/// Log records go to stderr so JSON on stdout stays clean.
fn init_logging() {
    let filter = EnvFilter::try_from_env("PATHSEL_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
