//! The per-file AST visitor.
//!
//! One pass over the module does three jobs: it maintains the lexical scope
//! stack for identifier resolution, it evaluates the class attributes of
//! every markup element as one analysis unit, and it analyzes every
//! recognized variant-builder definition as its own unit. Findings are
//! located, filtered through suppression directives, deduplicated per span,
//! and collected as issues.

use std::collections::HashSet;

use swc_common::{BytePos, SourceMap};
use swc_ecma_ast::{
    ArrowExpr, BlockStmt, CallExpr, Function, JSXAttrName, JSXAttrOrSpread, JSXAttrValue, JSXExpr,
    JSXOpeningElement, Module, VarDecl,
};
use swc_ecma_visit::{Visit, VisitWith};

use crate::core::analyze::conflicts::{Finding, analyze_node};
use crate::core::collect::builders::{BuilderKind, BuilderRegistry};
use crate::core::collect::module_scope::declare_var;
use crate::core::collect::suppressions::Suppressions;
use crate::core::data::{SourceContext, SourceLocation};
use crate::core::design::ClassOracle;
use crate::core::resolve::builder::analyze_factory_definition;
use crate::core::resolve::evaluator::{Evaluator, callee_ident};
use crate::core::resolve::literal::from_str_lit;
use crate::core::resolve::occurrence::{ClassOccurrence, ClassValue};
use crate::core::resolve::scope::ScopeStack;
use crate::issues::{
    ClassConflictIssue, DuplicateClassIssue, ExtractableClassIssue, InvalidClassIssue, Issue,
    Report, Rule,
};

pub struct FileAnalyzer<'a> {
    file_path: &'a str,
    source_map: &'a SourceMap,
    oracle: &'a dyn ClassOracle,
    builders: &'a BuilderRegistry,
    class_attributes: &'a [String],
    suppressions: &'a Suppressions,
    assigned: &'a HashSet<String>,
    scopes: ScopeStack,
    issues: Vec<Issue>,
    /// (rule code, file-relative span start, message): one issue per span
    /// per rule however many paths reach the same literal.
    emitted: HashSet<(u16, u32, String)>,
}

impl<'a> FileAnalyzer<'a> {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        file_path: &'a str,
        source_map: &'a SourceMap,
        oracle: &'a dyn ClassOracle,
        builders: &'a BuilderRegistry,
        class_attributes: &'a [String],
        suppressions: &'a Suppressions,
        assigned: &'a HashSet<String>,
        scopes: ScopeStack,
    ) -> Self {
        Self {
            file_path,
            source_map,
            oracle,
            builders,
            class_attributes,
            suppressions,
            assigned,
            scopes,
            issues: Vec::new(),
            emitted: HashSet::new(),
        }
    }

    pub fn analyze(mut self, module: &Module) -> Vec<Issue> {
        module.visit_with(&mut self);
        self.issues
    }

    /// Evaluate every class-bearing attribute of one element. All attributes
    /// share one evaluator so cross-attribute occurrences compare correctly.
    fn gather_values(&self, node: &JSXOpeningElement) -> Vec<ClassValue> {
        let mut evaluator = Evaluator::new(&self.scopes, self.builders);
        let mut values = Vec::new();

        for attr in &node.attrs {
            let JSXAttrOrSpread::JSXAttr(attr) = attr else {
                continue;
            };
            let JSXAttrName::Ident(name) = &attr.name else {
                continue;
            };
            if !self.class_attributes.iter().any(|a| a == name.sym.as_str()) {
                continue;
            }
            match &attr.value {
                Some(JSXAttrValue::Str(s)) => {
                    values.push(ClassValue::from_occurrences(from_str_lit(s)));
                }
                Some(JSXAttrValue::JSXExprContainer(container)) => {
                    if let JSXExpr::Expr(expr) = &container.expr {
                        values.push(evaluator.eval(expr));
                    }
                }
                _ => {}
            }
        }
        values
    }

    fn report_unit(&mut self, values: &[ClassValue]) {
        let findings = analyze_node(values, self.oracle);
        for finding in findings {
            self.emit(finding);
        }
    }

    fn emit(&mut self, finding: Finding) {
        match finding {
            Finding::Invalid { occurrence } => {
                let text = occurrence.text.clone();
                self.push_issue(&occurrence, Rule::InvalidClass, |context| {
                    Issue::from(InvalidClassIssue { context, text })
                });
            }
            Finding::Duplicate { occurrences, .. } => {
                let count = occurrences.len();
                for occ in occurrences {
                    let text = occ.text.clone();
                    self.push_issue(&occ, Rule::DuplicateClass, |context| {
                        Issue::from(DuplicateClassIssue { context, text, count })
                    });
                }
            }
            Finding::Extractable { occurrences, .. } => {
                for occ in occurrences {
                    let text = occ.text.clone();
                    self.push_issue(&occ, Rule::ExtractableClass, |context| {
                        Issue::from(ExtractableClassIssue { context, text })
                    });
                }
            }
            Finding::Conflict { text, other, axis, occurrences } => {
                for occ in occurrences {
                    // Each side of the conflict points at the other.
                    let opposite =
                        if occ.text == text { other.clone() } else { text.clone() };
                    let own = occ.text.clone();
                    let axis = axis.clone();
                    self.push_issue(&occ, Rule::ClassConflict, |context| {
                        Issue::from(ClassConflictIssue {
                            context,
                            text: own,
                            other: opposite,
                            axis,
                        })
                    });
                }
            }
        }
    }

    fn push_issue<F>(&mut self, occ: &ClassOccurrence, rule: Rule, build: F)
    where
        F: FnOnce(SourceContext) -> Issue,
    {
        let context = self.occurrence_context(occ);
        if self.suppressions.is_suppressed(context.location.line, &rule.to_string()) {
            return;
        }
        let issue = build(context);
        let key = (rule.code(), occ.start, issue.message());
        if self.emitted.insert(key) {
            self.issues.push(issue);
        }
    }

    fn occurrence_context(&self, occ: &ClassOccurrence) -> SourceContext {
        let loc = self.source_map.lookup_char_pos(BytePos(occ.start));
        let source_line = loc
            .file
            .get_line(loc.line - 1)
            .map(|cow| cow.to_string())
            .unwrap_or_default();
        let span_start = occ.start - loc.file.start_pos.0;

        SourceContext::new(
            SourceLocation::new(self.file_path, loc.line, loc.col_display + 1),
            span_start,
            occ.length,
            source_line,
        )
    }
}

impl Visit for FileAnalyzer<'_> {
    fn visit_function(&mut self, node: &Function) {
        self.scopes.enter();
        node.visit_children_with(self);
        self.scopes.exit();
    }

    fn visit_arrow_expr(&mut self, node: &ArrowExpr) {
        self.scopes.enter();
        node.visit_children_with(self);
        self.scopes.exit();
    }

    fn visit_block_stmt(&mut self, node: &BlockStmt) {
        self.scopes.enter();
        node.visit_children_with(self);
        self.scopes.exit();
    }

    fn visit_var_decl(&mut self, node: &VarDecl) {
        // Module-level declarations were pre-collected; re-declaring the same
        // declarator is a no-op.
        declare_var(node, self.builders, self.assigned, &mut self.scopes);
        node.visit_children_with(self);
    }

    fn visit_jsx_opening_element(&mut self, node: &JSXOpeningElement) {
        let values = self.gather_values(node);
        if values.iter().any(|v| !v.is_empty()) {
            self.report_unit(&values);
        }
        node.visit_children_with(self);
    }

    fn visit_call_expr(&mut self, node: &CallExpr) {
        // A bare factory call is a definition site; its configuration is a
        // set of standalone analysis units (base+variants, then one per
        // slot).
        if let Some(name) = callee_ident(node)
            && self.builders.kind_of(name) == Some(BuilderKind::Factory)
            && !self.scopes.is_bound(name)
        {
            let units = {
                let mut evaluator = Evaluator::new(&self.scopes, self.builders);
                analyze_factory_definition(node, &mut evaluator)
            };
            for unit in units {
                if !unit.is_empty() {
                    self.report_unit(std::slice::from_ref(&unit));
                }
            }
        }
        node.visit_children_with(self);
    }
}
