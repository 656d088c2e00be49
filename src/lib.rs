//! twlint - a static checker for CSS utility class usage in JSX/TSX.
//!
//! twlint discovers class-producing expressions in component sources,
//! evaluates them symbolically (branch-aware, without executing anything),
//! and reports classes that are invalid, duplicated, conflicting, or
//! repeated across every branch of a conditional. Validity comes from a
//! model compiled out of the project's generated stylesheet.
//!
//! ## Module Structure
//!
//! - `cli`: command-line interface layer
//! - `config`: configuration file loading and parsing
//! - `core`: the analysis engine (parse → collect → resolve → analyze)
//! - `issues`: issue type definitions and reporting
//! - `utils`: shared utility functions

pub mod cli;
pub mod config;
pub mod core;
pub mod issues;
pub mod utils;
