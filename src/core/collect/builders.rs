//! Recognition of class-joiner and variant-builder functions.
//!
//! Which call expressions produce class names is configuration, not
//! guesswork: the registry matches import declarations against allow-lists of
//! `{ name, from }` pairs and records the local binding name, so aliased
//! imports (`import { cva as styled } from "class-variance-authority"`) are
//! recognized under their alias. Joiner specs without a `from` also match by
//! bare callee name, covering project-local helpers like `cn`.

use std::collections::{HashMap, HashSet};

use swc_ecma_ast::{ImportSpecifier, Module, ModuleDecl, ModuleExportName, ModuleItem};

use crate::config::BuilderSpec;

/// How a recognized call expression is evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuilderKind {
    /// Variadic joiner (`clsx`, `cn`, ...): every argument is class-bearing
    /// and always evaluated, so arguments stay co-resident.
    Joiner,
    /// Variant-builder factory (`cva`, `tv`): the configuration object is
    /// evaluated structurally at the definition site.
    Factory,
}

/// Per-module lookup table from local names to builder kinds.
#[derive(Debug, Default)]
pub struct BuilderRegistry {
    imported: HashMap<String, BuilderKind>,
    bare_joiners: HashSet<String>,
}

impl BuilderRegistry {
    pub fn from_module(
        module: &Module,
        joiners: &[BuilderSpec],
        factories: &[BuilderSpec],
    ) -> Self {
        let mut registry = Self {
            imported: HashMap::new(),
            bare_joiners: joiners
                .iter()
                .filter(|spec| spec.from.is_none())
                .map(|spec| spec.name.clone())
                .collect(),
        };

        for item in &module.body {
            let ModuleItem::ModuleDecl(ModuleDecl::Import(import)) = item else {
                continue;
            };
            let Some(source) = import.src.value.as_str() else {
                continue;
            };

            for specifier in &import.specifiers {
                match specifier {
                    ImportSpecifier::Named(named) => {
                        let imported = match &named.imported {
                            Some(ModuleExportName::Ident(ident)) => Some(ident.sym.as_str()),
                            Some(ModuleExportName::Str(s)) => s.value.as_str(),
                            None => Some(named.local.sym.as_str()),
                        };
                        let Some(imported) = imported else {
                            continue;
                        };
                        let local = named.local.sym.to_string();
                        if let Some(kind) =
                            match_specs(imported, source, joiners, factories)
                        {
                            registry.imported.insert(local, kind);
                        }
                    }
                    ImportSpecifier::Default(default) => {
                        // Default imports match on the source module alone,
                        // e.g. `import cx from "classnames"`.
                        let local = default.local.sym.to_string();
                        if let Some(kind) = match_default(source, joiners, factories) {
                            registry.imported.insert(local, kind);
                        }
                    }
                    ImportSpecifier::Namespace(_) => {}
                }
            }
        }

        registry
    }

    /// Resolve a callee name to a builder kind. Import-derived bindings win
    /// over bare-name joiners.
    pub fn kind_of(&self, name: &str) -> Option<BuilderKind> {
        self.imported.get(name).copied().or_else(|| {
            self.bare_joiners
                .contains(name)
                .then_some(BuilderKind::Joiner)
        })
    }
}

fn match_specs(
    imported: &str,
    source: &str,
    joiners: &[BuilderSpec],
    factories: &[BuilderSpec],
) -> Option<BuilderKind> {
    if factories.iter().any(|s| s.name == imported && source_matches(s, source)) {
        return Some(BuilderKind::Factory);
    }
    if joiners.iter().any(|s| s.name == imported && source_matches(s, source)) {
        return Some(BuilderKind::Joiner);
    }
    None
}

fn match_default(
    source: &str,
    joiners: &[BuilderSpec],
    factories: &[BuilderSpec],
) -> Option<BuilderKind> {
    if factories.iter().any(|s| s.from.as_deref() == Some(source)) {
        return Some(BuilderKind::Factory);
    }
    if joiners.iter().any(|s| s.from.as_deref() == Some(source)) {
        return Some(BuilderKind::Joiner);
    }
    None
}

/// A spec with a `from` matches that module and its `/lite` sub-path
/// (class-variance-authority ships `cva` from both entry points).
fn source_matches(spec: &BuilderSpec, source: &str) -> bool {
    match &spec.from {
        None => true,
        Some(from) => source == from || source == format!("{from}/lite"),
    }
}
