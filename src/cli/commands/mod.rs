//! CLI command implementations.

mod cheatsheet;

pub use cheatsheet::run_cheatsheet;
