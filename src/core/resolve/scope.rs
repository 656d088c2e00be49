//! Declaration scope tracking for identifier resolution.
//!
//! The evaluator resolves identifiers against a stack of lexical scopes: the
//! bottom scope holds module-level declarations (filled by a pre-pass so
//! declarations below their use site still resolve), and a new scope is
//! pushed for every function or arrow body during traversal.
//!
//! Resolution is deliberately strict: a binding only resolves when it is a
//! single `const`/`let` declaration with an initializer that is never
//! reassigned. Anything else is "unresolved" and contributes no occurrences.

use std::collections::HashMap;

use swc_ecma_ast::Expr;

/// One tracked `const`/`let` declaration.
#[derive(Debug, Clone)]
pub struct DeclEntry {
    /// Cloned initializer expression; `None` for `let x;` style declarations.
    pub init: Option<Box<Expr>>,
    /// Set when the binding is assigned after declaration or declared twice.
    pub reassigned: bool,
    /// Unique id (the declarator's low byte position) used by the evaluator's
    /// cycle guard.
    pub decl_id: u32,
    /// True when the initializer is a recognized variant-builder factory
    /// call, so call sites on this binding evaluate `class`/`className` only.
    pub factory_product: bool,
}

/// Stack of declaration scopes, innermost last.
#[derive(Debug, Default)]
pub struct ScopeStack {
    scopes: Vec<HashMap<String, DeclEntry>>,
}

impl ScopeStack {
    /// Create a stack with a single module-level scope.
    pub fn new() -> Self {
        Self {
            scopes: vec![HashMap::new()],
        }
    }

    pub fn enter(&mut self) {
        self.scopes.push(HashMap::new());
    }

    /// Pop the innermost scope, keeping at least the module scope.
    pub fn exit(&mut self) {
        if self.scopes.len() > 1 {
            self.scopes.pop();
        }
    }

    /// Insert a declaration into the innermost scope. A second declaration of
    /// the same name in the same scope makes the binding ambiguous.
    pub fn declare(&mut self, name: String, entry: DeclEntry) {
        if let Some(scope) = self.scopes.last_mut() {
            match scope.get_mut(&name) {
                Some(existing) if existing.decl_id != entry.decl_id => {
                    existing.reassigned = true;
                }
                Some(_) => {}
                None => {
                    scope.insert(name, entry);
                }
            }
        }
    }

    /// Look up a binding from innermost to module scope.
    pub fn lookup(&self, name: &str) -> Option<&DeclEntry> {
        self.scopes.iter().rev().find_map(|scope| scope.get(name))
    }

    /// A resolvable binding: declared once, initialized, never reassigned.
    pub fn resolve(&self, name: &str) -> Option<&DeclEntry> {
        self.lookup(name)
            .filter(|entry| !entry.reassigned && entry.init.is_some())
    }

    /// Whether `name` is bound to a local declaration at all, resolvable or
    /// not. Used to tell shadowed joiner names from real joiner calls.
    pub fn is_bound(&self, name: &str) -> bool {
        self.lookup(name).is_some()
    }
}
