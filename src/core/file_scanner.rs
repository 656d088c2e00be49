//! Discovery of source files to analyze.
//!
//! Includes and ignores accept either literal directory paths or glob
//! patterns; a pattern without `*`/`?` is a literal path, so bracketed route
//! directories like `app/[locale]` need no escaping. Dependency and build
//! output directories are always skipped.

use std::{
    collections::HashSet,
    path::{Path, PathBuf},
};

use colored::Colorize;
use glob::{Pattern, glob};
use walkdir::WalkDir;

use crate::config::TEST_FILE_PATTERNS;

/// Directories that never contain first-party component sources.
const ALWAYS_IGNORED_DIRS: &[&str] = &["node_modules", ".git", "dist", "build", ".next"];

const SOURCE_EXTENSIONS: &[&str] = &["tsx", "jsx", "ts", "js"];

pub struct ScanResult {
    pub files: HashSet<String>,
    pub skipped_count: usize,
}

fn is_glob_pattern(pattern: &str) -> bool {
    pattern.contains('*') || pattern.contains('?')
}

/// Compiled ignore rules: literal path prefixes plus glob patterns.
struct IgnoreSet {
    prefixes: Vec<PathBuf>,
    patterns: Vec<Pattern>,
}

impl IgnoreSet {
    fn build(base_dir: &str, ignores: &[String], ignore_test_files: bool, verbose: bool) -> Self {
        let mut prefixes = Vec::new();
        let mut patterns = Vec::new();

        for raw in ignores {
            if is_glob_pattern(raw) {
                match Pattern::new(raw) {
                    Ok(pattern) => patterns.push(pattern),
                    Err(e) if verbose => {
                        eprintln!("{} invalid ignore pattern '{raw}': {e}", "warning:".bold().yellow());
                    }
                    Err(_) => {}
                }
            } else {
                prefixes.push(Path::new(base_dir).join(raw));
            }
        }

        if ignore_test_files {
            patterns.extend(TEST_FILE_PATTERNS.iter().filter_map(|p| Pattern::new(p).ok()));
        }

        Self { prefixes, patterns }
    }

    fn matches(&self, path: &Path) -> bool {
        if self.prefixes.iter().any(|prefix| path.starts_with(prefix)) {
            return true;
        }
        if path.components().any(|c| {
            c.as_os_str()
                .to_str()
                .is_some_and(|name| ALWAYS_IGNORED_DIRS.contains(&name))
        }) {
            return true;
        }
        let path_str = path.to_string_lossy();
        self.patterns.iter().any(|p| p.matches(&path_str))
    }
}

/// Expand the `includes` list into existing directories under `base_dir`.
/// An empty list scans the base directory itself.
fn roots_to_scan(base_dir: &str, includes: &[String], verbose: bool) -> Vec<PathBuf> {
    if includes.is_empty() {
        return vec![PathBuf::from(base_dir)];
    }

    let mut roots = Vec::new();
    for include in includes {
        if is_glob_pattern(include) {
            let full = Path::new(base_dir).join(include);
            if let Ok(entries) = glob(&full.to_string_lossy()) {
                roots.extend(entries.flatten().filter(|p| p.is_dir()));
            } else if verbose {
                eprintln!("{} invalid include pattern '{include}'", "warning:".bold().yellow());
            }
        } else {
            let path = Path::new(base_dir).join(include);
            if path.exists() {
                roots.push(path);
            } else if verbose {
                eprintln!(
                    "{} include path does not exist: {}",
                    "warning:".bold().yellow(),
                    path.display()
                );
            }
        }
    }
    roots
}

pub fn scan_files(
    base_dir: &str,
    includes: &[String],
    ignores: &[String],
    ignore_test_files: bool,
    verbose: bool,
) -> ScanResult {
    let ignore_set = IgnoreSet::build(base_dir, ignores, ignore_test_files, verbose);

    let mut files: HashSet<String> = HashSet::new();
    let mut skipped_count = 0;

    for root in roots_to_scan(base_dir, includes, verbose) {
        for entry in WalkDir::new(root) {
            let entry = match entry {
                Ok(e) => e,
                Err(e) => {
                    skipped_count += 1;
                    if verbose {
                        eprintln!("{} cannot access path: {e}", "warning:".bold().yellow());
                    }
                    continue;
                }
            };
            let path = entry.path();
            if ignore_set.matches(path) {
                continue;
            }
            if path.is_file() && is_source_file(path) {
                files.insert(path.to_string_lossy().into_owned());
            }
        }
    }

    ScanResult {
        files,
        skipped_count,
    }
}

fn is_source_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| SOURCE_EXTENSIONS.contains(&ext))
}
