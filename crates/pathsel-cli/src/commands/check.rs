//! Validate a selector.

use pathsel_compiler::split_alternatives;
use pathsel_program::Mode;

use super::input::{SelectorInput, fail};

pub struct CheckArgs {
    pub selector: SelectorInput,
    pub filter: bool,
    pub color: bool,
}

pub fn run(args: CheckArgs) {
    let selector = args.selector.load().unwrap_or_else(|e| fail(e));
    let mode = if args.filter { Mode::Filter } else { Mode::Select };

    let rendered = check(&selector, mode, args.color);
    if !rendered.is_empty() {
        eprint!("{rendered}");
        std::process::exit(1);
    }

    // Silent on success (like cargo check)
}

/// Compiles every alternative and renders the failures, one block each.
/// Empty when all alternatives compile.
pub fn check(selector: &str, mode: Mode, color: bool) -> String {
    let mut out = String::new();
    for alternative in split_alternatives(selector) {
        if let Err(e) = pathsel_compiler::compile(alternative, mode) {
            if !out.is_empty() {
                out.push('\n');
            }
            out.push_str(&e.render(color));
            if !out.ends_with('\n') {
                out.push('\n');
            }
        }
    }
    out
}
