//! Tracing infrastructure for debugging program execution.
//!
//! # Design: Zero-Cost Abstraction
//!
//! When `NoopTracer` is used every hook is an `#[inline(always)]` empty
//! function and the compiler removes the calls and their arguments. No
//! tracing state lives in the VM itself.
//!
//! `PrintTracer` collects human-readable lines:
//!
//! ```text
//! select `ul > li` on 1
//!   0 collect   descendant ul        1 -> 2
//!   1 collect   child li             2 -> 5
//!   dedup 5 -> 5
//! ```

use std::fmt::Debug;

use pathsel_core::Colors;
use pathsel_program::{Program, Step, format_step};

/// Verbosity level for trace output.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Verbosity {
    /// Default: top-level steps with input and output sizes.
    #[default]
    Default,
    /// Verbose (-v): nested programs too (`:not`, `:has`, `:next`, `:prev`).
    Verbose,
    /// Very verbose (-vv): node lists after every step.
    VeryVerbose,
}

/// Tracer trait for VM execution instrumentation.
///
/// Each method is called at a specific point during execution:
/// - `trace_program` - before the first step, with the input size
/// - `trace_step` - before a step runs
/// - `trace_step_result` - after a step, with its output
/// - `trace_dedup` - after the final deduplication
/// - `trace_enter_nested` / `trace_exit_nested` - around a nested program run
pub trait Tracer {
    fn trace_program(&mut self, program: &Program, input: usize);

    fn trace_step(&mut self, index: usize, step: &Step, input: usize);

    fn trace_step_result<N: Debug>(&mut self, index: usize, output: &[N]);

    fn trace_dedup(&mut self, before: usize, after: usize);

    fn trace_enter_nested(&mut self, program: &Program);

    fn trace_exit_nested(&mut self, output: usize);
}

/// No-op tracer that gets optimized away completely.
pub struct NoopTracer;

impl Tracer for NoopTracer {
    #[inline(always)]
    fn trace_program(&mut self, _program: &Program, _input: usize) {}

    #[inline(always)]
    fn trace_step(&mut self, _index: usize, _step: &Step, _input: usize) {}

    #[inline(always)]
    fn trace_step_result<N: Debug>(&mut self, _index: usize, _output: &[N]) {}

    #[inline(always)]
    fn trace_dedup(&mut self, _before: usize, _after: usize) {}

    #[inline(always)]
    fn trace_enter_nested(&mut self, _program: &Program) {}

    #[inline(always)]
    fn trace_exit_nested(&mut self, _output: usize) {}
}

/// Width of the step column, so counts line up.
const STEP_WIDTH: usize = 32;

/// Tracer that collects formatted lines for display.
pub struct PrintTracer {
    verbosity: Verbosity,
    colors: Colors,
    lines: Vec<String>,
    /// Nesting level of the program being run; 0 is top level.
    depth: usize,
    /// Step lines still waiting for their output size, innermost last.
    pending: Vec<usize>,
}

impl PrintTracer {
    pub fn new(verbosity: Verbosity, colors: Colors) -> Self {
        Self {
            verbosity,
            colors,
            lines: Vec::new(),
            depth: 0,
            pending: Vec::new(),
        }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Print all trace lines.
    pub fn print(&self) {
        for line in &self.lines {
            println!("{}", line);
        }
    }

    fn visible(&self) -> bool {
        self.depth == 0 || self.verbosity != Verbosity::Default
    }

    fn pad(&self) -> String {
        "    ".repeat(self.depth)
    }

    fn count(&self, n: usize) -> String {
        let c = self.colors;
        if n == 0 {
            format!("{}{n}{}", c.red, c.reset)
        } else {
            n.to_string()
        }
    }
}

impl Tracer for PrintTracer {
    fn trace_program(&mut self, program: &Program, input: usize) {
        if !self.visible() {
            return;
        }
        let c = self.colors;
        let line = format!(
            "{}{}{}{} {}`{}`{} on {}",
            self.pad(),
            c.dim,
            program.mode().as_str(),
            c.reset,
            c.green,
            program.text(),
            c.reset,
            self.count(input)
        );
        self.lines.push(line);
    }

    fn trace_step(&mut self, index: usize, step: &Step, input: usize) {
        if !self.visible() {
            return;
        }
        let c = self.colors;
        // Plain text so the padding is computed on visible width
        let text = format_step(step, Colors::OFF);
        self.lines.push(format!(
            "{}  {index} {text:<STEP_WIDTH$} {}{input} ->{}",
            self.pad(),
            c.dim,
            c.reset
        ));
        self.pending.push(self.lines.len() - 1);
    }

    fn trace_step_result<N: Debug>(&mut self, _index: usize, output: &[N]) {
        if !self.visible() {
            return;
        }
        let Some(line) = self.pending.pop() else {
            return;
        };
        let count = self.count(output.len());
        self.lines[line].push(' ');
        self.lines[line].push_str(&count);

        if self.verbosity == Verbosity::VeryVerbose && !output.is_empty() {
            let c = self.colors;
            let nodes: Vec<String> = output.iter().map(|n| format!("{n:?}")).collect();
            self.lines
                .push(format!("{}      {}[{}]{}", self.pad(), c.dim, nodes.join(", "), c.reset));
        }
    }

    fn trace_dedup(&mut self, before: usize, after: usize) {
        if !self.visible() {
            return;
        }
        let c = self.colors;
        self.lines.push(format!(
            "{}  {}dedup{} {before} -> {}",
            self.pad(),
            c.dim,
            c.reset,
            self.count(after)
        ));
    }

    fn trace_enter_nested(&mut self, _program: &Program) {
        self.depth += 1;
    }

    fn trace_exit_nested(&mut self, _output: usize) {
        self.depth = self.depth.saturating_sub(1);
    }
}
