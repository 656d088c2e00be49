//! The design-system oracle: which class names exist and which conflict.
//!
//! The analysis core never decides validity itself; it asks a `ClassOracle`.
//! The concrete `DesignSystem` is compiled once from the project's generated
//! stylesheet: every class selector becomes a known class, the CSS properties
//! a base utility sets become its conflict axis, and variant prefixes come
//! from a built-in vocabulary plus configuration and the stylesheet itself.
//!
//! The oracle is the only state that outlives a single analysis request. It
//! is gated behind `is_initialized`: until compilation has happened, analysis
//! returns no diagnostics rather than blocking or guessing.

pub mod stylesheet;

use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use crate::core::design::stylesheet::{ScannedClass, scan_stylesheet};

/// Classification bucket for conflict detection: two different class names
/// applied together conflict iff they carry the same group.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConflictGroup {
    /// Variant prefixes, sorted and deduplicated (`hover:sm:x` and
    /// `sm:hover:x` land in the same group).
    pub variants: Vec<String>,
    /// The utility axis: the sorted set of CSS properties the base utility
    /// sets, joined with `,` (e.g. `"text-align"` or `"padding-left,padding-right"`).
    pub axis: String,
}

/// The validity and conflict oracle consumed by the analysis core.
pub trait ClassOracle: Sync {
    /// Whether the design-system model has been compiled yet. While false,
    /// analysis produces no diagnostics (fail open).
    fn is_initialized(&self) -> bool;

    fn is_valid_class(&self, text: &str) -> bool;

    /// `None` when the class has no known utility axis (unknown base, or a
    /// utility whose properties never conflict).
    fn classify_for_conflicts(&self, text: &str) -> Option<ConflictGroup>;
}

/// Variant prefixes every Tailwind-style design system understands, used on
/// top of whatever the stylesheet itself reveals.
const BUILTIN_VARIANTS: &[&str] = &[
    "hover",
    "focus",
    "focus-within",
    "focus-visible",
    "active",
    "visited",
    "disabled",
    "first",
    "last",
    "odd",
    "even",
    "group-hover",
    "group-focus",
    "peer-hover",
    "peer-focus",
    "dark",
    "motion-safe",
    "motion-reduce",
    "sm",
    "md",
    "lg",
    "xl",
    "2xl",
];

/// Design-system model compiled from a generated stylesheet.
#[derive(Debug, Default)]
pub struct DesignSystem {
    /// Base utility name → conflict axis.
    utilities: HashMap<String, String>,
    /// Every class selector exactly as written (variant prefixes included).
    known_classes: HashSet<String>,
    /// Accepted variant prefixes.
    variants: HashSet<String>,
    initialized: bool,
}

impl DesignSystem {
    /// An uninitialized oracle; analysis against it yields no diagnostics.
    pub fn uninitialized() -> Self {
        Self::default()
    }

    /// Compile the model from stylesheet text.
    pub fn compile(css: &str, extra_variants: &[String]) -> Self {
        let mut system = Self {
            variants: BUILTIN_VARIANTS.iter().map(|v| v.to_string()).collect(),
            initialized: true,
            ..Self::default()
        };
        system
            .variants
            .extend(extra_variants.iter().cloned());
        system.absorb(scan_stylesheet(css));
        system
    }

    /// Compile from a stylesheet file on disk.
    pub fn load(path: &Path, extra_variants: &[String]) -> Result<Self> {
        let css = fs::read_to_string(path)
            .with_context(|| format!("Failed to read stylesheet: {}", path.display()))?;
        Ok(Self::compile(&css, extra_variants))
    }

    /// Recompile in place from new stylesheet text (stylesheet changed).
    pub fn reload(&mut self, css: &str, extra_variants: &[String]) {
        *self = Self::compile(css, extra_variants);
    }

    fn absorb(&mut self, classes: Vec<ScannedClass>) {
        for class in classes {
            let (variant_prefixes, base) = split_variants(&class.name);
            for prefix in &variant_prefixes {
                self.variants.insert((*prefix).to_string());
            }
            if !class.properties.is_empty() {
                let axis = axis_of(&class.properties);
                self.utilities.entry(base.to_string()).or_insert(axis);
            } else {
                self.utilities.entry(base.to_string()).or_default();
            }
            self.known_classes.insert(class.name);
        }
    }
}

impl ClassOracle for DesignSystem {
    fn is_initialized(&self) -> bool {
        self.initialized
    }

    fn is_valid_class(&self, text: &str) -> bool {
        let text = text.strip_prefix('!').unwrap_or(text);
        if self.known_classes.contains(text) {
            return true;
        }
        let (prefixes, base) = split_variants(text);
        if !prefixes.iter().all(|p| self.variants.contains(*p)) {
            return false;
        }
        self.utilities.contains_key(base)
    }

    fn classify_for_conflicts(&self, text: &str) -> Option<ConflictGroup> {
        let text = text.strip_prefix('!').unwrap_or(text);
        let (prefixes, base) = split_variants(text);
        let axis = self.utilities.get(base)?;
        if axis.is_empty() {
            return None;
        }
        let mut variants: Vec<String> = prefixes.iter().map(|p| p.to_string()).collect();
        variants.sort();
        variants.dedup();
        Some(ConflictGroup {
            variants,
            axis: axis.clone(),
        })
    }
}

fn axis_of(properties: &[String]) -> String {
    let mut props: Vec<&str> = properties.iter().map(String::as_str).collect();
    props.sort();
    props.dedup();
    props.join(",")
}

/// Split `hover:sm:text-left` into its variant prefixes and base utility.
/// Colons inside brackets (arbitrary values like `bg-[url(a:b)]`) do not split.
pub fn split_variants(text: &str) -> (Vec<&str>, &str) {
    let mut prefixes = Vec::new();
    let mut depth = 0usize;
    let mut segment_start = 0usize;
    for (i, ch) in text.char_indices() {
        match ch {
            '[' | '(' => depth += 1,
            ']' | ')' => depth = depth.saturating_sub(1),
            ':' if depth == 0 => {
                prefixes.push(&text[segment_start..i]);
                segment_start = i + 1;
            }
            _ => {}
        }
    }
    (prefixes, &text[segment_start..])
}
