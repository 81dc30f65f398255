//! Runtime VM for executing compiled pathsel programs.
//!
//! Programs run against any `pathsel_core::Host`, producing ordered,
//! duplicate-free node sequences.

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod primitives;

mod pseudo;
mod set_algebra;
mod trace;
mod vm;

#[cfg(test)]
mod test_utils;

#[cfg(test)]
mod set_algebra_tests;
#[cfg(test)]
mod trace_tests;
#[cfg(test)]
mod vm_tests;

pub use set_algebra::{Strategy, deduplicate, deduplicate_with, difference, difference_with};
pub use trace::{NoopTracer, PrintTracer, Tracer, Verbosity};
pub use vm::{VM, VMBuilder};
