//! Show compiled step lists.

use pathsel_core::Colors;
use pathsel_lib::Engine;
use pathsel_program::{Mode, dump};

use super::input::{SelectorInput, fail};
use super::select::render_error;

pub struct DumpArgs {
    pub selector: SelectorInput,
    pub filter: bool,
    pub color: bool,
}

pub fn run(args: DumpArgs) {
    let selector = args.selector.load().unwrap_or_else(|e| fail(e));
    let mode = if args.filter { Mode::Filter } else { Mode::Select };

    let programs = Engine::new()
        .compile_all(&selector, mode)
        .unwrap_or_else(|e| {
            eprint!("{}", render_error(&e, args.color));
            std::process::exit(1);
        });

    let colors = Colors::new(args.color);
    for (i, program) in programs.iter().enumerate() {
        if i > 0 {
            println!();
        }
        print!("{}", dump(program, colors));
    }
}
