//! Per-file analysis: AST traversal, class-value evaluation, and issue
//! emission.

pub mod conflicts;
pub mod file_analyzer;

use std::sync::Arc;

use anyhow::Result;
use swc_common::SourceMap;

use crate::config::BuilderSpec;
use crate::core::collect::builders::BuilderRegistry;
use crate::core::collect::module_scope::{collect_assigned_names, collect_module_scope};
use crate::core::collect::suppressions::Suppressions;
use crate::core::design::ClassOracle;
use crate::core::parsers::{ParsedTsx, parse_tsx_source};
use crate::core::resolve::scope::ScopeStack;
use crate::issues::Issue;

pub use conflicts::{Finding, analyze_node};
pub use file_analyzer::FileAnalyzer;

/// Everything one analysis request needs besides the source itself. The
/// oracle is the only long-lived piece; the rest comes from configuration.
pub struct AnalysisContext<'a> {
    pub oracle: &'a dyn ClassOracle,
    /// Markup attributes treated as class expressions.
    pub class_attributes: &'a [String],
    /// Recognized joiner functions.
    pub class_functions: &'a [BuilderSpec],
    /// Recognized variant-builder factories.
    pub variant_builders: &'a [BuilderSpec],
}

/// Analyze one parsed file. Returns no diagnostics while the oracle is
/// uninitialized: no stylesheet model means no opinion, not "everything is
/// invalid".
pub fn analyze_module(parsed: &ParsedTsx, file_path: &str, ctx: &AnalysisContext) -> Vec<Issue> {
    if !ctx.oracle.is_initialized() {
        return Vec::new();
    }

    let builders =
        BuilderRegistry::from_module(&parsed.module, ctx.class_functions, ctx.variant_builders);
    let assigned = collect_assigned_names(&parsed.module);
    let mut scopes = ScopeStack::new();
    collect_module_scope(&parsed.module, &builders, &assigned, &mut scopes);
    let suppressions = Suppressions::collect(&parsed.comments, &parsed.source_map);

    FileAnalyzer::new(
        file_path,
        &parsed.source_map,
        ctx.oracle,
        &builders,
        ctx.class_attributes,
        &suppressions,
        &assigned,
        scopes,
    )
    .analyze(&parsed.module)
}

/// Parse and analyze a source string. The entry point for editor hosts and
/// tests; the CLI goes through `CheckContext` instead.
pub fn analyze_source(code: &str, file_path: &str, ctx: &AnalysisContext) -> Result<Vec<Issue>> {
    let parsed = parse_tsx_source(code.to_string(), file_path, Arc::new(SourceMap::default()))?;
    Ok(analyze_module(&parsed, file_path, ctx))
}
