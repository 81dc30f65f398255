//! Human-readable program dump for `pathsel dump` and snapshot tests.
//!
//! ```text
//! select `ul > li.item`
//!   0 collect   descendant ul
//!   1 collect   child li
//!   2 class     .item
//! ```
//!
//! Nested selectors print below their pseudo-class step, indented.

use std::fmt::Write as _;

use pathsel_core::Colors;

use crate::program::{AttrSource, AttrTest, Combinator, Program, Step};
use crate::pseudo::Pseudo;

pub fn dump(program: &Program, colors: Colors) -> String {
    let mut out = String::new();
    dump_program(&mut out, program, 0, colors);
    out
}

fn dump_program(out: &mut String, program: &Program, indent: usize, c: Colors) {
    let pad = "  ".repeat(indent);
    writeln!(
        out,
        "{pad}{}{}{} {}`{}`{}",
        c.dim,
        program.mode().as_str(),
        c.reset,
        c.green,
        program.text(),
        c.reset
    )
    .unwrap();

    let w = program.steps().len().saturating_sub(1).to_string().len();
    for (i, step) in program.steps().iter().enumerate() {
        write!(out, "{pad}  {}{i:>w$}{} ", c.dim, c.reset).unwrap();
        write_step(out, step, c);
        out.push('\n');
        if let Step::Pseudo(p) = step {
            for nested in p.nested() {
                dump_program(out, nested, indent + 2, c);
            }
        }
    }

    if let Some(attr) = program.projection() {
        writeln!(out, "{pad}  {}project{} @{attr}", c.dim, c.reset).unwrap();
    }
}

/// One step on a single line, as shown in dumps and traces.
pub fn format_step(step: &Step, c: Colors) -> String {
    let mut out = String::new();
    write_step(&mut out, step, c);
    out
}

fn write_step(out: &mut String, step: &Step, c: Colors) {
    match step {
        Step::Collect { combinator, tag } => {
            let tag = tag.as_deref().unwrap_or("*");
            write!(
                out,
                "collect   {} {}{tag}{}",
                combinator_name(*combinator),
                c.blue,
                c.reset
            )
            .unwrap();
        }
        Step::IdLookup { combinator, id } => {
            write!(
                out,
                "id-lookup {} #{}{id}{}",
                combinator_name(*combinator),
                c.green,
                c.reset
            )
            .unwrap();
        }
        Step::Tag(tag) => write!(out, "tag       {}{tag}{}", c.blue, c.reset).unwrap(),
        Step::Id(id) => write!(out, "id        #{}{id}{}", c.green, c.reset).unwrap(),
        Step::Class(class) => write!(out, "class     .{}{class}{}", c.green, c.reset).unwrap(),
        Step::Attribute(test) => write_attr(out, test, c),
        Step::Pseudo(pseudo) => {
            write!(out, "pseudo    :{}{}{}", c.blue, pseudo.name(), c.reset).unwrap();
            match pseudo {
                Pseudo::NthChild(expr) => write!(out, "({expr})").unwrap(),
                Pseudo::Nth(n) => write!(out, "({n})").unwrap(),
                Pseudo::Contains(text) | Pseudo::NodeValue(text) => {
                    write!(out, "({}{text:?}{})", c.green, c.reset).unwrap()
                }
                _ => {}
            }
        }
    }
}

fn write_attr(out: &mut String, test: &AttrTest, c: Colors) {
    let (open, close, label) = match test.source {
        AttrSource::Attribute => ('[', ']', "attr     "),
        AttrSource::Style => ('{', '}', "style    "),
    };
    write!(out, "{label} {open}{}", test.name).unwrap();
    if let Some(op) = test.op {
        write!(out, " {} {}{:?}{}", op.as_str(), c.green, test.value, c.reset).unwrap();
    }
    out.push(close);
}

fn combinator_name(combinator: Combinator) -> &'static str {
    match combinator {
        Combinator::Descendant => "descendant",
        Combinator::Child => "child",
        Combinator::Scoped => "scoped",
    }
}
