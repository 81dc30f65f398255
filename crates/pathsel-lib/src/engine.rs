//! Query entry points: selector text in, ordered nodes out.

use std::collections::HashSet;
use std::sync::Arc;

use pathsel_compiler::{Compiler, split_alternatives};
use pathsel_core::Host;
use pathsel_program::{Mode, Program};
use pathsel_vm::{NoopTracer, Strategy, VM, deduplicate_with, difference_with};

use crate::cache::SelectorCache;
use crate::number::parse_number_prefix;
use crate::{Error, Result};

/// Engine settings.
///
/// Selector text is always trimmed before it is compiled or used as a cache
/// key, so `" a "` and `"a"` share one program.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    /// Deepest allowed nesting of selectors inside pseudo-class arguments.
    pub max_nesting: u32,
    /// Set algebra membership strategy for every run.
    pub strategy: Strategy,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_nesting: Compiler::DEFAULT_MAX_DEPTH,
            strategy: Strategy::Auto,
        }
    }
}

/// Builder for `Engine`.
#[derive(Debug, Default)]
pub struct EngineBuilder {
    config: EngineConfig,
    cache: Option<Arc<SelectorCache>>,
}

impl EngineBuilder {
    pub fn max_nesting(mut self, max_nesting: u32) -> Self {
        self.config.max_nesting = max_nesting;
        self
    }

    pub fn strategy(mut self, strategy: Strategy) -> Self {
        self.config.strategy = strategy;
        self
    }

    /// Share an existing cache instead of creating a new one.
    pub fn cache(mut self, cache: Arc<SelectorCache>) -> Self {
        self.cache = Some(cache);
        self
    }

    pub fn build(self) -> Engine {
        Engine {
            cache: self.cache.unwrap_or_default(),
            config: self.config,
        }
    }
}

/// Compiles selectors through a shared cache and runs them against hosts.
///
/// Cheap to share between threads; every query is synchronous and runs on
/// the calling thread.
#[derive(Debug, Default)]
pub struct Engine {
    cache: Arc<SelectorCache>,
    config: EngineConfig,
}

impl Engine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn builder() -> EngineBuilder {
        EngineBuilder::default()
    }

    pub fn with_cache(cache: Arc<SelectorCache>) -> Self {
        Self::builder().cache(cache).build()
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn cache(&self) -> &Arc<SelectorCache> {
        &self.cache
    }

    /// Compiles one selector (no top-level commas), or returns it from the cache.
    pub fn compile(&self, text: &str, mode: Mode) -> Result<Arc<Program>> {
        self.cache
            .get_or_compile(text, mode, 0, self.config.max_nesting)
            .map_err(|err| {
                tracing::warn!(selector = text.trim(), error = %err, "selector failed to compile");
                Error::from(err)
            })
    }

    /// One program per comma-separated alternative, in source order.
    pub fn compile_all(&self, text: &str, mode: Mode) -> Result<Vec<Arc<Program>>> {
        split_alternatives(text)
            .into_iter()
            .map(|alt| self.compile(alt, mode))
            .collect()
    }

    /// VM configured like this engine, with no tracing.
    pub fn vm<'h, H: Host + ?Sized>(&self, host: &'h H) -> VM<'h, H, NoopTracer> {
        VM::builder(host).strategy(self.config.strategy).build()
    }

    /// Every match of `path` below the document.
    pub fn select<H: Host + ?Sized>(&self, host: &H, path: &str) -> Result<Vec<H::Node>> {
        self.select_from(host, path, host.document())
    }

    /// Runs each alternative from `root` and concatenates the results.
    /// Alternatives are not deduplicated against each other.
    pub fn select_from<H: Host + ?Sized>(
        &self,
        host: &H,
        path: &str,
        root: H::Node,
    ) -> Result<Vec<H::Node>> {
        let programs = self.compile_all(path, Mode::Select)?;
        let mut vm = self.vm(host);
        let mut out = Vec::new();
        for program in &programs {
            out.extend(vm.select(program, root));
        }
        let document = host.document();
        out.retain(|&n| n != document);
        Ok(out)
    }

    /// Nodes of `nodes` matching any alternative, in input order.
    pub fn filter<H: Host + ?Sized>(
        &self,
        host: &H,
        nodes: &[H::Node],
        selector: &str,
    ) -> Result<Vec<H::Node>> {
        let programs = self.compile_all(selector, Mode::Filter)?;
        let mut vm = self.vm(host);
        if let [program] = &programs[..] {
            return Ok(vm.filter(program, nodes));
        }

        let mut matched = HashSet::new();
        for program in &programs {
            matched.extend(vm.filter(program, nodes));
        }
        let kept = nodes
            .iter()
            .copied()
            .filter(|n| matched.contains(n))
            .collect();
        Ok(deduplicate_with(host, kept, self.config.strategy))
    }

    /// Nodes of `nodes` that match no alternative, in input order.
    pub fn filter_non_matching<H: Host + ?Sized>(
        &self,
        host: &H,
        nodes: &[H::Node],
        selector: &str,
    ) -> Result<Vec<H::Node>> {
        let matching = self.filter(host, nodes, selector)?;
        Ok(difference_with(host, &matching, nodes, self.config.strategy))
    }

    pub fn is<H: Host + ?Sized>(&self, host: &H, node: H::Node, selector: &str) -> Result<bool> {
        Ok(!self.filter(host, &[node], selector)?.is_empty())
    }

    /// Whether every node matches. Duplicates in `nodes` make this false.
    pub fn is_all<H: Host + ?Sized>(
        &self,
        host: &H,
        nodes: &[H::Node],
        selector: &str,
    ) -> Result<bool> {
        Ok(self.filter(host, nodes, selector)?.len() == nodes.len())
    }

    /// First match of `path`, if any.
    pub fn select_node<H: Host + ?Sized>(&self, host: &H, path: &str) -> Result<Option<H::Node>> {
        self.select_node_from(host, path, host.document())
    }

    pub fn select_node_from<H: Host + ?Sized>(
        &self,
        host: &H,
        path: &str,
        root: H::Node,
    ) -> Result<Option<H::Node>> {
        Ok(self.first_match(host, path, root)?.map(|(node, _)| node))
    }

    /// Value of the first match: its projected attribute (`a/@href`), or
    /// else the raw value of its first child. `default` when neither exists.
    pub fn select_value<H: Host + ?Sized>(
        &self,
        host: &H,
        path: &str,
        default: &str,
    ) -> Result<String> {
        self.select_value_from(host, path, host.document(), default)
    }

    pub fn select_value_from<H: Host + ?Sized>(
        &self,
        host: &H,
        path: &str,
        root: H::Node,
        default: &str,
    ) -> Result<String> {
        Ok(self
            .first_value(host, path, root)?
            .unwrap_or_else(|| default.to_owned()))
    }

    /// `select_value` read as a number, from its leading numeric prefix.
    pub fn select_number<H: Host + ?Sized>(
        &self,
        host: &H,
        path: &str,
        default: f64,
    ) -> Result<f64> {
        self.select_number_from(host, path, host.document(), default)
    }

    pub fn select_number_from<H: Host + ?Sized>(
        &self,
        host: &H,
        path: &str,
        root: H::Node,
        default: f64,
    ) -> Result<f64> {
        let Some(value) = self.first_value(host, path, root)? else {
            return Ok(default);
        };
        parse_number_prefix(&value).ok_or(Error::InvalidNumber { value })
    }

    fn first_value<H: Host + ?Sized>(
        &self,
        host: &H,
        path: &str,
        root: H::Node,
    ) -> Result<Option<String>> {
        let Some((node, program)) = self.first_match(host, path, root)? else {
            return Ok(None);
        };
        let value = match program.projection() {
            Some(attr) => host.attribute(node, attr),
            None => host.first_child(node).and_then(|c| host.node_value(c)),
        };
        Ok(value.map(str::to_owned))
    }

    /// First node of the concatenated result, with the program that found it.
    fn first_match<H: Host + ?Sized>(
        &self,
        host: &H,
        path: &str,
        root: H::Node,
    ) -> Result<Option<(H::Node, Arc<Program>)>> {
        let programs = self.compile_all(path, Mode::Select)?;
        let document = host.document();
        let mut vm = self.vm(host);
        for program in programs {
            let found = vm
                .select(&program, root)
                .into_iter()
                .find(|&n| n != document);
            if let Some(node) = found {
                return Ok(Some((node, program)));
            }
        }
        Ok(None)
    }
}
