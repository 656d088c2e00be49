//! Core data types shared across the analysis pipeline.
//!
//! - `source`: source code location types (SourceContext, SourceLocation)

pub mod source;

pub use source::{SourceContext, SourceLocation};
