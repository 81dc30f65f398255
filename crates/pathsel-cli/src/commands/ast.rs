//! Show the syntax tree of a selector.

use pathsel_compiler::parser::{dump_cst, parse};

use super::input::{SelectorInput, fail};

pub struct AstArgs {
    pub selector: SelectorInput,
    pub spans: bool,
    pub color: bool,
}

pub fn run(args: AstArgs) {
    let selector = args.selector.load().unwrap_or_else(|e| fail(e));
    let (parsed, diagnostics) = parse(&selector);

    // The tree is complete even when the text has errors.
    if !diagnostics.is_empty() {
        eprint!(
            "{}",
            diagnostics.filtered().render_colored(&selector, args.color)
        );
    }

    print!("{}", dump_cst(&parsed.syntax(), args.spans));
}
