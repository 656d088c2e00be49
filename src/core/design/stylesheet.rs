//! Stylesheet scanning: class selectors and the properties they set.
//!
//! This is not a CSS parser; it extracts exactly what the design-system model
//! needs from generated utility stylesheets: for every class selector, the
//! unescaped class name and the property names declared in its rule body.
//! Grouping at-rules (`@media`, `@supports`, `@layer`) are descended into;
//! other at-rules (`@keyframes`, `@font-face`, ...) are skipped whole.

use std::sync::LazyLock;

use regex::Regex;

/// One class selector occurrence with the properties its rule declares.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScannedClass {
    pub name: String,
    pub properties: Vec<String>,
}

static CLASS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\.((?:\\.|[\w-])+)").expect("class selector regex"));

/// Scan stylesheet text for class selectors.
pub fn scan_stylesheet(css: &str) -> Vec<ScannedClass> {
    let css = strip_comments(css);
    let mut classes = Vec::new();
    scan_block(&css, &mut classes);
    classes
}

fn scan_block(css: &str, out: &mut Vec<ScannedClass>) {
    let mut rest = css;
    while let Some(open) = rest.find('{') {
        let prelude = &rest[..open];
        let Some(close) = matching_brace(rest, open) else {
            return; // unbalanced tail, ignore
        };
        let body = &rest[open + 1..close];

        let trimmed = prelude.trim_start();
        // A prelude may carry trailing flat statements (`@import ...;`);
        // only the segment after the last `;` names this block.
        let selector = trimmed.rsplit(';').next().unwrap_or(trimmed).trim();

        if let Some(at_rule) = selector.strip_prefix('@') {
            let keyword = at_rule.split_whitespace().next().unwrap_or("");
            if matches!(keyword, "media" | "supports" | "layer" | "container" | "scope") {
                scan_block(body, out);
            }
        } else {
            let properties = scan_properties(body);
            for capture in CLASS_RE.captures_iter(selector) {
                out.push(ScannedClass {
                    name: unescape_ident(&capture[1]),
                    properties: properties.clone(),
                });
            }
            // Nested rules inside a style rule body still contribute names.
            if body.contains('{') {
                scan_block(body, out);
            }
        }

        rest = &rest[close + 1..];
    }
}

fn matching_brace(text: &str, open: usize) -> Option<usize> {
    let mut depth = 0usize;
    for (i, ch) in text[open..].char_indices() {
        match ch {
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(open + i);
                }
            }
            _ => {}
        }
    }
    None
}

/// Property names declared directly in a rule body. Custom properties and
/// anything inside nested blocks are skipped.
fn scan_properties(body: &str) -> Vec<String> {
    let flat = match body.find('{') {
        Some(nested) => &body[..nested],
        None => body,
    };
    flat.split(';')
        .filter_map(|declaration| {
            let name = declaration.split(':').next()?.trim();
            if name.is_empty() || name.starts_with("--") {
                return None;
            }
            let is_ident = name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-')
                && name.chars().next().is_some_and(|c| c.is_ascii_alphabetic() || c == '-');
            is_ident.then(|| name.to_ascii_lowercase())
        })
        .collect()
}

fn strip_comments(css: &str) -> String {
    let mut out = String::with_capacity(css.len());
    let mut rest = css;
    while let Some(start) = rest.find("/*") {
        out.push_str(&rest[..start]);
        match rest[start + 2..].find("*/") {
            Some(end) => rest = &rest[start + 2 + end + 2..],
            None => return out,
        }
    }
    out.push_str(rest);
    out
}

/// Undo CSS identifier escaping: `\:` → `:`, `\2f ` → `/`, etc.
fn unescape_ident(escaped: &str) -> String {
    let chars: Vec<char> = escaped.chars().collect();
    let mut out = String::with_capacity(escaped.len());
    let mut i = 0;
    while i < chars.len() {
        if chars[i] != '\\' || i + 1 >= chars.len() {
            out.push(chars[i]);
            i += 1;
            continue;
        }
        // Hex escape: up to six hex digits, optionally followed by one space.
        let mut j = i + 1;
        while j < chars.len() && j - i <= 6 && chars[j].is_ascii_hexdigit() {
            j += 1;
        }
        if j > i + 1 {
            let hex: String = chars[i + 1..j].iter().collect();
            if let Some(c) = u32::from_str_radix(&hex, 16).ok().and_then(char::from_u32) {
                out.push(c);
                if chars.get(j) == Some(&' ') {
                    j += 1;
                }
                i = j;
                continue;
            }
        }
        out.push(chars[i + 1]);
        i += 2;
    }
    out
}
