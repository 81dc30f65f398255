//! Process-shareable cache of compiled programs.
//!
//! Keyed by mode and trimmed selector text. Compilation runs outside the
//! lock, so nested selectors resolve through the same cache while their
//! parent compiles. When two threads race on one key, the first published
//! program wins and later ones are dropped.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use pathsel_compiler::{Compiler, Resolve};
use pathsel_program::{Mode, Program};

type Key = (Mode, Box<str>);

/// Counters for cache observability.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub entries: usize,
}

#[derive(Debug, Default)]
pub struct SelectorCache {
    programs: RwLock<HashMap<Key, Arc<Program>>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl SelectorCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached program for `text`, if any. Does not touch the counters.
    pub fn get(&self, text: &str, mode: Mode) -> Option<Arc<Program>> {
        let programs = self.programs.read().unwrap_or_else(PoisonError::into_inner);
        programs.get(&(mode, Box::from(text.trim()))).cloned()
    }

    /// Returns the cached program or compiles, publishes and returns it.
    ///
    /// `depth` is the nesting level of `text` inside another selector.
    pub fn get_or_compile(
        &self,
        text: &str,
        mode: Mode,
        depth: u32,
        max_depth: u32,
    ) -> pathsel_compiler::Result<Arc<Program>> {
        let text = text.trim();
        if let Some(program) = self.get(text, mode) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            tracing::trace!(selector = text, mode = mode.as_str(), "selector cache hit");
            return Ok(program);
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(
            selector = text,
            mode = mode.as_str(),
            depth,
            "selector cache miss, compiling"
        );

        let mut resolver = CacheResolver {
            cache: self,
            max_depth,
        };
        let program = Compiler::new(mode)
            .depth(depth)
            .max_depth(max_depth)
            .compile(text, &mut resolver)?;
        Ok(self.publish(mode, text, program))
    }

    /// Inserts `program` unless another one got there first; returns the
    /// program now stored under the key.
    fn publish(&self, mode: Mode, text: &str, program: Program) -> Arc<Program> {
        let mut programs = self.programs.write().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(
            programs
                .entry((mode, Box::from(text)))
                .or_insert_with(|| Arc::new(program)),
        )
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            entries: self.len(),
        }
    }

    pub fn len(&self) -> usize {
        self.programs
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drops every program and resets the counters.
    pub fn clear(&self) {
        self.programs
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
        self.hits.store(0, Ordering::Relaxed);
        self.misses.store(0, Ordering::Relaxed);
    }
}

/// Resolves nested selectors through the cache.
struct CacheResolver<'c> {
    cache: &'c SelectorCache,
    max_depth: u32,
}

impl Resolve for CacheResolver<'_> {
    fn resolve(
        &mut self,
        text: &str,
        mode: Mode,
        depth: u32,
    ) -> pathsel_compiler::Result<Arc<Program>> {
        self.cache.get_or_compile(text, mode, depth, self.max_depth)
    }
}
