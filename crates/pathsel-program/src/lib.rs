//! Compiled selector programs.
//!
//! A program is a flat list of steps folded left to right over a node set:
//! - traversal steps (`Collect`, `IdLookup`) replace the set
//! - filter steps (`Tag`, `Id`, `Class`, `Attribute`, `Pseudo`) narrow it
//!
//! Programs are immutable once built and shared as `Arc<Program>`. Nested
//! selectors (`:not(...)`, `:has(...)`) hold their own compiled programs.

mod attr_op;
mod dump;
mod nth;
mod program;
mod pseudo;


pub use attr_op::AttrOp;
pub use dump::{dump, format_step};
pub use nth::NthExpr;
pub use program::{AttrSource, AttrTest, Combinator, Mode, Program, Step};
pub use pseudo::Pseudo;
