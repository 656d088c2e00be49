//! The analysis engine.
//!
//! The pipeline per file is: parse (`parsers`) → pre-pass collection
//! (`collect`) → symbolic evaluation of class expressions (`resolve`) →
//! per-node findings (`analyze`), asking the design-system oracle (`design`)
//! for validity and conflict axes. `context` ties the pipeline to a project
//! on disk.

pub mod analyze;
pub mod collect;
pub mod context;
pub mod data;
pub mod design;
pub mod file_scanner;
pub mod parsers;
pub mod resolve;

pub use analyze::{AnalysisContext, analyze_module, analyze_source};
pub use context::{CheckContext, CheckOutcome};
pub use data::{SourceContext, SourceLocation};
pub use design::{ClassOracle, ConflictGroup, DesignSystem};
