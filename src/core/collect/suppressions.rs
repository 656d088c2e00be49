//! Suppression comment directives.
//!
//! `// twlint-disable-next-line` (or the JSX form
//! `{/* twlint-disable-next-line */}`) silences every rule on the following
//! line; naming rules restricts it: `// twlint-disable-next-line
//! duplicate-class class-conflict`.

use std::collections::{HashMap, HashSet};

use swc_common::SourceMap;

use crate::core::parsers::tsx::ExtractedComments;

const DIRECTIVE: &str = "twlint-disable-next-line";

/// Suppressed line numbers, each with an optional rule filter.
/// `None` means every rule is suppressed on that line.
#[derive(Debug, Default)]
pub struct Suppressions {
    by_line: HashMap<usize, Option<HashSet<String>>>,
}

impl Suppressions {
    pub fn collect(comments: &ExtractedComments, source_map: &SourceMap) -> Self {
        let mut by_line = HashMap::new();

        let (leading, trailing) = comments.borrow_all();
        for comment in leading.values().chain(trailing.values()).flatten() {
            let text = comment.text.trim();
            let Some(rest) = text.strip_prefix(DIRECTIVE) else {
                continue;
            };
            let rules: HashSet<String> = rest.split_whitespace().map(str::to_string).collect();
            let line = source_map.lookup_char_pos(comment.span.hi).line;
            let filter = if rules.is_empty() { None } else { Some(rules) };

            // A later directive for the same line widens the earlier one.
            by_line
                .entry(line + 1)
                .and_modify(|existing: &mut Option<HashSet<String>>| {
                    match (existing.as_mut(), &filter) {
                        (Some(set), Some(new)) => set.extend(new.iter().cloned()),
                        _ => *existing = None,
                    }
                })
                .or_insert(filter);
        }

        Self { by_line }
    }

    pub fn is_suppressed(&self, line: usize, rule: &str) -> bool {
        match self.by_line.get(&line) {
            Some(None) => true,
            Some(Some(rules)) => rules.contains(rule),
            None => false,
        }
    }
}
