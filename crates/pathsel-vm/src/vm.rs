//! Virtual machine for executing compiled selector programs.

use pathsel_core::Host;
use pathsel_program::{Program, Step};

use crate::primitives::{
    by_attribute, by_class, by_id, by_tag, collect_children, collect_descendants, lookup_id,
};
use crate::set_algebra::{Strategy, deduplicate_with};
use crate::trace::{NoopTracer, Tracer};

/// Runs programs against one host.
///
/// Execution folds the program's steps left to right over a node sequence
/// and deduplicates the final result. Nothing is cached between runs.
pub struct VM<'h, H: Host + ?Sized, T: Tracer = NoopTracer> {
    pub(crate) host: &'h H,
    pub(crate) strategy: Strategy,
    pub(crate) tracer: T,
}

/// Builder for VM instances.
pub struct VMBuilder<'h, H: Host + ?Sized, T: Tracer = NoopTracer> {
    host: &'h H,
    strategy: Strategy,
    tracer: T,
}

impl<'h, H: Host + ?Sized> VMBuilder<'h, H, NoopTracer> {
    pub fn new(host: &'h H) -> Self {
        Self {
            host,
            strategy: Strategy::Auto,
            tracer: NoopTracer,
        }
    }
}

impl<'h, H: Host + ?Sized, T: Tracer> VMBuilder<'h, H, T> {
    /// Set the membership strategy for set algebra.
    pub fn strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Replace the tracer.
    pub fn tracer<U: Tracer>(self, tracer: U) -> VMBuilder<'h, H, U> {
        VMBuilder {
            host: self.host,
            strategy: self.strategy,
            tracer,
        }
    }

    /// Build the VM.
    pub fn build(self) -> VM<'h, H, T> {
        VM {
            host: self.host,
            strategy: self.strategy,
            tracer: self.tracer,
        }
    }
}

impl<'h, H: Host + ?Sized> VM<'h, H, NoopTracer> {
    /// Create a VM builder.
    pub fn builder(host: &'h H) -> VMBuilder<'h, H, NoopTracer> {
        VMBuilder::new(host)
    }

    /// VM with default settings and no tracing.
    pub fn new(host: &'h H) -> Self {
        VMBuilder::new(host).build()
    }
}

impl<'h, H: Host + ?Sized, T: Tracer> VM<'h, H, T> {
    pub fn host(&self) -> &'h H {
        self.host
    }

    pub fn tracer(&self) -> &T {
        &self.tracer
    }

    pub fn into_tracer(self) -> T {
        self.tracer
    }

    /// Runs a program starting from `{root}`.
    pub fn select(&mut self, program: &Program, root: H::Node) -> Vec<H::Node> {
        self.run(program, vec![root])
    }

    /// Runs a program over `nodes`, keeping their order.
    pub fn filter(&mut self, program: &Program, nodes: &[H::Node]) -> Vec<H::Node> {
        self.run(program, nodes.to_vec())
    }

    /// Runs a nested program, bracketed by the nesting hooks.
    pub(crate) fn run_nested(&mut self, program: &Program, input: Vec<H::Node>) -> Vec<H::Node> {
        self.tracer.trace_enter_nested(program);
        let out = self.run(program, input);
        self.tracer.trace_exit_nested(out.len());
        out
    }

    fn run(&mut self, program: &Program, input: Vec<H::Node>) -> Vec<H::Node> {
        self.tracer.trace_program(program, input.len());

        let mut set = input;
        for (i, step) in program.steps().iter().enumerate() {
            if set.is_empty() {
                break;
            }
            self.tracer.trace_step(i, step, set.len());
            set = self.exec_step(step, set);
            self.tracer.trace_step_result(i, &set);
        }

        let before = set.len();
        let set = deduplicate_with(self.host, set, self.strategy);
        self.tracer.trace_dedup(before, set.len());
        set
    }

    fn exec_step(&mut self, step: &Step, set: Vec<H::Node>) -> Vec<H::Node> {
        let host = self.host;
        match step {
            Step::Collect { combinator, tag } => {
                if combinator.is_direct() {
                    collect_children(host, &set, tag.as_deref())
                } else {
                    collect_descendants(host, &set, tag.as_deref(), self.strategy)
                }
            }
            Step::IdLookup { combinator, id } => lookup_id(host, &set, id, combinator.is_direct()),
            Step::Tag(tag) => by_tag(host, &set, tag),
            Step::Id(id) => by_id(host, &set, id),
            Step::Class(class) => by_class(host, &set, class),
            Step::Attribute(test) => by_attribute(host, &set, test),
            Step::Pseudo(pseudo) => self.exec_pseudo(pseudo, set),
        }
    }
}
