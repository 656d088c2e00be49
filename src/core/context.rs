//! Project-level check orchestration: configuration, the compiled design
//! system, file discovery, and parallel per-file analysis.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use rayon::prelude::*;
use swc_common::SourceMap;

use crate::config::{Config, load_config};
use crate::core::analyze::{AnalysisContext, analyze_module};
use crate::core::design::DesignSystem;
use crate::core::file_scanner::scan_files;
use crate::core::parsers::parse_tsx_source;
use crate::issues::{Issue, ParseErrorIssue};

/// Everything a `check` run needs, built once per invocation.
pub struct CheckContext {
    pub config: Config,
    pub files: Vec<String>,
    pub design: DesignSystem,
    pub skipped_count: usize,
}

pub struct CheckOutcome {
    pub issues: Vec<Issue>,
    pub files_checked: usize,
}

impl CheckContext {
    /// Load configuration, compile the design-system model from the
    /// configured stylesheet, and discover source files. A missing or
    /// unreadable stylesheet is a hard error here: a CLI run with no oracle
    /// would silently report nothing.
    pub fn new(start_dir: &Path, stylesheet: Option<&Path>, verbose: bool) -> Result<Self> {
        let loaded = load_config(start_dir)?;
        let mut config = loaded.config;
        if let Some(path) = stylesheet {
            config.stylesheet = path.to_string_lossy().into_owned();
        }

        let root = start_dir.join(&config.source_root);
        let stylesheet = root.join(&config.stylesheet);
        let design = DesignSystem::load(&stylesheet, &config.extra_variants).with_context(|| {
            format!(
                "cannot build the class model from {} (is the stylesheet compiled?)",
                stylesheet.display()
            )
        })?;

        let scan = scan_files(
            &root.to_string_lossy(),
            &config.includes,
            &config.ignores,
            config.ignore_test_files,
            verbose,
        );
        let mut files: Vec<String> = scan.files.into_iter().collect();
        files.sort();

        Ok(Self {
            config,
            files,
            design,
            skipped_count: scan.skipped_count,
        })
    }

    /// Analyze every discovered file. Files are independent, so this is a
    /// plain parallel map; a file that fails to parse becomes a single
    /// parse-error issue instead of aborting the run.
    pub fn check(&self) -> CheckOutcome {
        let ctx = AnalysisContext {
            oracle: &self.design,
            class_attributes: &self.config.class_attributes,
            class_functions: &self.config.class_functions,
            variant_builders: &self.config.variant_builders,
        };

        let mut issues: Vec<Issue> = self
            .files
            .par_iter()
            .flat_map(|file_path| self.check_file(file_path, &ctx))
            .collect();
        issues.sort();

        CheckOutcome {
            issues,
            files_checked: self.files.len(),
        }
    }

    fn check_file(&self, file_path: &str, ctx: &AnalysisContext) -> Vec<Issue> {
        let code = match fs::read_to_string(file_path) {
            Ok(code) => code,
            Err(e) => {
                return vec![Issue::from(ParseErrorIssue {
                    file_path: file_path.to_string(),
                    error: format!("cannot read file: {e}"),
                })];
            }
        };
        match parse_tsx_source(code, file_path, Arc::new(SourceMap::default())) {
            Ok(parsed) => analyze_module(&parsed, file_path, ctx),
            Err(e) => vec![Issue::from(ParseErrorIssue {
                file_path: file_path.to_string(),
                error: e.to_string(),
            })],
        }
    }
}
