//! Module-level declaration collection.
//!
//! Identifiers used inside a component can reference `const`s declared below
//! the component in the same file; by module evaluation order those bindings
//! exist by the time the component runs. A pre-pass over the top-level
//! statements fills the module scope so a variable's position never affects
//! whether it is analyzed.

use std::collections::HashSet;

use swc_ecma_ast::{
    AssignTarget, Callee, Decl, Expr, Module, ModuleDecl, ModuleItem, Pat, SimpleAssignTarget,
    Stmt, UpdateExpr, VarDecl, VarDeclKind,
};
use swc_ecma_visit::{Visit, VisitWith};

use crate::core::collect::builders::{BuilderKind, BuilderRegistry};
use crate::core::resolve::scope::{DeclEntry, ScopeStack};

/// Fill the module scope of `scopes` from top-level declarations (including
/// exported ones). Bindings named in `assigned` are marked unresolvable.
pub fn collect_module_scope(
    module: &Module,
    registry: &BuilderRegistry,
    assigned: &HashSet<String>,
    scopes: &mut ScopeStack,
) {
    for item in &module.body {
        let var = match item {
            ModuleItem::Stmt(Stmt::Decl(Decl::Var(var))) => var,
            ModuleItem::ModuleDecl(ModuleDecl::ExportDecl(export)) => match &export.decl {
                Decl::Var(var) => var,
                _ => continue,
            },
            _ => continue,
        };
        declare_var(var, registry, assigned, scopes);
    }
}

/// Record every declarator with a plain identifier pattern from `var` into
/// the innermost scope. Shared between the module pre-pass and the analyzer's
/// function-body traversal.
pub fn declare_var(
    var: &VarDecl,
    registry: &BuilderRegistry,
    assigned: &HashSet<String>,
    scopes: &mut ScopeStack,
) {
    // `var` hoisting makes position-sensitive values too murky to resolve;
    // only `const` and `let` bindings participate.
    if var.kind == VarDeclKind::Var {
        return;
    }
    for declarator in &var.decls {
        let Pat::Ident(binding) = &declarator.name else {
            continue;
        };
        let name = binding.id.sym.to_string();
        let entry = DeclEntry {
            init: declarator.init.clone(),
            reassigned: assigned.contains(&name),
            decl_id: declarator.span.lo.0,
            factory_product: declarator
                .init
                .as_deref()
                .is_some_and(|init| is_factory_call(init, registry)),
        };
        scopes.declare(name, entry);
    }
}

fn is_factory_call(expr: &Expr, registry: &BuilderRegistry) -> bool {
    let Expr::Call(call) = expr else {
        return false;
    };
    let Callee::Expr(callee) = &call.callee else {
        return false;
    };
    let Expr::Ident(ident) = &**callee else {
        return false;
    };
    registry.kind_of(ident.sym.as_str()) == Some(BuilderKind::Factory)
}

/// Collect every name that is the target of an assignment or update anywhere
/// in the module. Bindings with these names are treated as unresolvable,
/// which errs towards fewer diagnostics.
pub fn collect_assigned_names(module: &Module) -> HashSet<String> {
    let mut collector = AssignCollector::default();
    module.visit_with(&mut collector);
    collector.names
}

#[derive(Default)]
struct AssignCollector {
    names: HashSet<String>,
}

impl Visit for AssignCollector {
    fn visit_assign_target(&mut self, node: &AssignTarget) {
        if let AssignTarget::Simple(SimpleAssignTarget::Ident(ident)) = node {
            self.names.insert(ident.id.sym.to_string());
        }
        node.visit_children_with(self);
    }

    fn visit_update_expr(&mut self, node: &UpdateExpr) {
        if let Expr::Ident(ident) = &*node.arg {
            self.names.insert(ident.sym.to_string());
        }
        node.visit_children_with(self);
    }
}
