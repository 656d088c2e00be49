//! The symbolic evaluator: expression node → branch-tagged class multiset.
//!
//! Walks an arbitrary-shape class expression without executing it and returns
//! every literal class name it can yield, tagged with the conditional arms
//! that must be taken for the name to be present. Anything whose value cannot
//! be known statically (external calls, member access, parameters) is
//! conservatively ignored: it contributes no occurrences and is never
//! penalized.
//!
//! One evaluator instance covers one analysis unit (one markup node, or one
//! builder definition), so conditional ids are unique within the unit and
//! occurrences from different attributes of the same node can be compared.

use std::collections::{HashMap, HashSet};

use swc_ecma_ast::{
    ArrayLit, BinExpr, BinaryOp, CallExpr, Callee, CondExpr, Expr, KeyValueProp, Lit, ObjectLit,
    Prop, PropName, PropOrSpread, Tpl,
};

use crate::core::collect::builders::{BuilderKind, BuilderRegistry};
use crate::core::resolve::literal;
use crate::core::resolve::occurrence::{BranchAlloc, BranchTag, ClassValue, ConditionalId};
use crate::core::resolve::scope::ScopeStack;

pub struct Evaluator<'a> {
    scopes: &'a ScopeStack,
    builders: &'a BuilderRegistry,
    alloc: BranchAlloc,
    /// Declaration ids currently on the resolution chain; re-entering one
    /// means the variable graph is cyclic and the binding is unresolvable.
    resolving: HashSet<u32>,
    /// One declaration is evaluated once per unit; later use sites reuse the
    /// value, conditional ids included, so two references to the same ternary
    /// stay correlated and its arms stay mutually exclusive.
    resolved: HashMap<u32, ClassValue>,
}

impl<'a> Evaluator<'a> {
    pub fn new(scopes: &'a ScopeStack, builders: &'a BuilderRegistry) -> Self {
        Self {
            scopes,
            builders,
            alloc: BranchAlloc::new(),
            resolving: HashSet::new(),
            resolved: HashMap::new(),
        }
    }

    /// Allocate a conditional id for a construct evaluated outside `eval`
    /// (variant axes in builder definitions).
    pub fn fresh_conditional(&mut self) -> ConditionalId {
        self.alloc.fresh()
    }

    pub fn eval(&mut self, expr: &Expr) -> ClassValue {
        match expr {
            Expr::Lit(Lit::Str(s)) => ClassValue::from_occurrences(literal::from_str_lit(s)),
            Expr::Tpl(tpl) => self.eval_template(tpl),
            Expr::Ident(ident) => self.eval_ident(ident.sym.as_str()),

            // Transparent wrappers.
            Expr::Paren(e) => self.eval(&e.expr),
            Expr::TsNonNull(e) => self.eval(&e.expr),
            Expr::TsAs(e) => self.eval(&e.expr),
            Expr::TsConstAssertion(e) => self.eval(&e.expr),
            Expr::TsTypeAssertion(e) => self.eval(&e.expr),
            Expr::TsSatisfies(e) => self.eval(&e.expr),

            Expr::Bin(bin) => self.eval_logical(bin),
            Expr::Cond(cond) => self.eval_ternary(cond),
            Expr::Array(arr) => self.eval_array(arr),
            Expr::Object(obj) => self.eval_class_map(obj),
            Expr::Call(call) => self.eval_call(call),

            // Numbers, booleans, null, member access, unrecognized calls,
            // JSX, and everything else: never guess.
            _ => ClassValue::empty(),
        }
    }

    /// Static segments are extracted per quasi; each interpolation is
    /// evaluated and spliced in at its position with unchanged tags, so the
    /// before/between/after segments stay independently positioned.
    fn eval_template(&mut self, tpl: &Tpl) -> ClassValue {
        let mut value = ClassValue::empty();
        for (i, quasi) in tpl.quasis.iter().enumerate() {
            value.merge(ClassValue::from_occurrences(literal::from_tpl_element(quasi)));
            if let Some(expr) = tpl.exprs.get(i) {
                value.merge(self.eval(expr));
            }
        }
        value
    }

    /// Resolve through the declaration. Spans of the resulting occurrences
    /// point into the initializer, so a reused variable reports at its
    /// declaration rather than at each use site.
    fn eval_ident(&mut self, name: &str) -> ClassValue {
        let Some(entry) = self.scopes.resolve(name) else {
            return ClassValue::empty();
        };
        if entry.factory_product {
            // The binding holds a produced function, not class text.
            return ClassValue::empty();
        }
        let Some(init) = entry.init.as_deref() else {
            return ClassValue::empty();
        };
        if let Some(value) = self.resolved.get(&entry.decl_id) {
            return value.clone();
        }
        if !self.resolving.insert(entry.decl_id) {
            return ClassValue::empty();
        }
        let value = self.eval(init);
        self.resolving.remove(&entry.decl_id);
        self.resolved.insert(entry.decl_id, value.clone());
        value
    }

    fn eval_logical(&mut self, bin: &BinExpr) -> ClassValue {
        match bin.op {
            // `a && b`: falsy `a` is the empty arm of a degenerate ternary,
            // so only `b` contributes, under a fresh conditional.
            BinaryOp::LogicalAnd => {
                let id = self.alloc.fresh();
                let mut value = self.eval(&bin.right);
                value.tag_all(BranchTag::new(id, 0));
                value
            }
            // `a || b` / `a ?? b`: primary and fallback arms of one
            // conditional, mutually exclusive via their tags.
            BinaryOp::LogicalOr | BinaryOp::NullishCoalescing => {
                let id = self.alloc.fresh();
                let mut left = self.eval(&bin.left);
                left.tag_all(BranchTag::new(id, 0));
                let mut right = self.eval(&bin.right);
                right.tag_all(BranchTag::new(id, 1));
                left.merge(right);
                left
            }
            _ => ClassValue::empty(),
        }
    }

    fn eval_ternary(&mut self, cond: &CondExpr) -> ClassValue {
        let id = self.alloc.fresh();
        let mut value = self.eval(&cond.cons);
        value.tag_all(BranchTag::new(id, 0));
        let mut alt = self.eval(&cond.alt);
        alt.tag_all(BranchTag::new(id, 1));
        value.merge(alt);
        value
    }

    /// Arrays are transparent at unbounded depth. Falsy literals fall out of
    /// the default `eval` case; spread elements recurse into the spread
    /// expression.
    fn eval_array(&mut self, arr: &ArrayLit) -> ClassValue {
        let mut value = ClassValue::empty();
        for element in arr.elems.iter().flatten() {
            value.merge(self.eval(&element.expr));
        }
        value
    }

    /// Object literal used as a class-map: `{ 'foo bar': cond, flex }`.
    ///
    /// Keys are candidate class literals. A literal `true` value (or a
    /// shorthand property) makes the key unconditional; a literal falsy value
    /// drops the key; any other value gates the key behind a fresh synthetic
    /// conditional. Array/object values additionally contribute nested
    /// occurrences under the same gate.
    fn eval_class_map(&mut self, obj: &ObjectLit) -> ClassValue {
        let mut value = ClassValue::empty();
        for prop in &obj.props {
            let prop = match prop {
                PropOrSpread::Spread(spread) => {
                    value.merge(self.eval(&spread.expr));
                    continue;
                }
                PropOrSpread::Prop(prop) => prop,
            };
            match &**prop {
                Prop::Shorthand(ident) => {
                    let span = ident.span;
                    value.merge(ClassValue::from_occurrences(vec![
                        crate::core::resolve::occurrence::ClassOccurrence::new(
                            ident.sym.to_string(),
                            span.lo.0,
                            span.hi.0 - span.lo.0,
                        ),
                    ]));
                }
                Prop::KeyValue(kv) => value.merge(self.eval_map_entry(kv)),
                _ => {}
            }
        }
        value
    }

    fn eval_map_entry(&mut self, kv: &KeyValueProp) -> ClassValue {
        let key_occurrences = match &kv.key {
            PropName::Ident(ident) => {
                vec![crate::core::resolve::occurrence::ClassOccurrence::new(
                    ident.sym.to_string(),
                    ident.span.lo.0,
                    ident.span.hi.0 - ident.span.lo.0,
                )]
            }
            PropName::Str(s) => literal::from_str_lit(s),
            // Computed and numeric keys are not class names.
            _ => return ClassValue::empty(),
        };
        let mut value = ClassValue::from_occurrences(key_occurrences);

        match &*kv.value {
            Expr::Lit(Lit::Bool(b)) if b.value => value,
            Expr::Lit(Lit::Bool(_)) | Expr::Lit(Lit::Null(_)) => ClassValue::empty(),
            Expr::Lit(Lit::Num(n)) if n.value == 0.0 => ClassValue::empty(),
            Expr::Ident(ident) if ident.sym.as_str() == "undefined" => ClassValue::empty(),
            other => {
                let id = self.alloc.fresh();
                let tag = BranchTag::new(id, 0);
                value.tag_all(tag);
                // Nested class sources only; a bare condition expression must
                // not resolve to class text through its variable.
                if matches!(other, Expr::Array(_) | Expr::Object(_)) {
                    let mut nested = self.eval(other);
                    nested.tag_all(tag);
                    value.merge(nested);
                }
                value
            }
        }
    }

    fn eval_call(&mut self, call: &CallExpr) -> ClassValue {
        let Some(name) = callee_ident(call) else {
            return ClassValue::empty();
        };

        // A local declaration wins over builder recognition: either it is a
        // function produced by a variant-builder factory, or it shadows a
        // joiner name and the call is opaque.
        if let Some(entry) = self.scopes.lookup(name) {
            if entry.factory_product {
                return self.eval_product_call(call);
            }
            return ClassValue::empty();
        }

        match self.builders.kind_of(name) {
            // All joiner arguments always execute, so results concatenate
            // with no additional branch tagging.
            Some(BuilderKind::Joiner) => {
                let mut value = ClassValue::empty();
                for arg in &call.args {
                    value.merge(self.eval(&arg.expr));
                }
                value
            }
            // A direct factory call yields a function; its configuration is
            // analyzed as its own unit by the file analyzer.
            Some(BuilderKind::Factory) | None => ClassValue::empty(),
        }
    }

    /// Call on a value statically known to come from a variant-builder
    /// factory: only the `class`/`className` property of the argument object
    /// carries class names; selector properties are skipped.
    fn eval_product_call(&mut self, call: &CallExpr) -> ClassValue {
        let Some(arg) = call.args.first() else {
            return ClassValue::empty();
        };
        if arg.spread.is_some() {
            return ClassValue::empty();
        }
        let Expr::Object(obj) = &*arg.expr else {
            return ClassValue::empty();
        };

        let mut value = ClassValue::empty();
        for prop in &obj.props {
            if let PropOrSpread::Prop(prop) = prop
                && let Prop::KeyValue(kv) = &**prop
                && matches!(prop_name(&kv.key), Some("class") | Some("className"))
            {
                value.merge(self.eval(&kv.value));
            }
        }
        value
    }
}

/// The simple identifier a call expression invokes, if any.
pub fn callee_ident(call: &CallExpr) -> Option<&str> {
    let Callee::Expr(callee) = &call.callee else {
        return None;
    };
    match &**callee {
        Expr::Ident(ident) => Some(ident.sym.as_str()),
        _ => None,
    }
}

/// Non-computed property key text.
pub fn prop_name(key: &PropName) -> Option<&str> {
    match key {
        PropName::Ident(ident) => Some(ident.sym.as_str()),
        PropName::Str(s) => s.value.as_str(),
        _ => None,
    }
}
