pub mod ast;
pub mod check;
pub mod dump;
pub mod input;
pub mod output;
pub mod select;
pub mod trace;

#[cfg(test)]
mod input_tests;
#[cfg(test)]
mod output_tests;
