//! Variant-builder definition analysis (`cva(...)`, `tv(...)`).
//!
//! A factory call is not a class expression; it is a declarative table of
//! class expressions. The definition is analyzed as its own unit: the base
//! classes are unconditional, each variant axis becomes one conditional with
//! one arm per option (the options of an axis are mutually exclusive, options
//! of different axes combine freely), and compound-variant classes join the
//! unit unconditionally since any combination of their selectors can hold.
//! Slot-style definitions produce one independent unit per slot.

use swc_ecma_ast::{CallExpr, Expr, ObjectLit, Prop, PropOrSpread};

use crate::core::resolve::evaluator::{Evaluator, prop_name};
use crate::core::resolve::occurrence::{BranchTag, ClassValue};

/// Keys whose presence marks the first argument as a config object rather
/// than a base class expression.
const CONFIG_KEYS: &[&str] = &["base", "variants", "slots", "compoundVariants", "defaultVariants"];

/// Evaluate a recognized factory call into one `ClassValue` per analysis
/// unit. Malformed sections are skipped individually; whatever does parse is
/// still analyzed.
pub fn analyze_factory_definition(call: &CallExpr, eval: &mut Evaluator) -> Vec<ClassValue> {
    let mut main = ClassValue::empty();
    let mut slots: Vec<ClassValue> = Vec::new();

    let config = match call.args.first() {
        Some(arg) if arg.spread.is_none() => match &*arg.expr {
            // tv style: single config object carrying `base`/`variants`/...
            Expr::Object(obj) if has_config_key(obj) => Some(obj),
            // cva style: first argument is the base, config comes second.
            base => {
                main.merge(eval.eval(base));
                match call.args.get(1) {
                    Some(arg) if arg.spread.is_none() => match &*arg.expr {
                        Expr::Object(obj) => Some(obj),
                        _ => None,
                    },
                    _ => None,
                }
            }
        },
        _ => None,
    };

    if let Some(config) = config {
        for prop in object_props(config) {
            let Some((key, value)) = prop else { continue };
            match key {
                "base" => main.merge(eval.eval(value)),
                "variants" => eval_variants(value, eval, &mut main),
                "compoundVariants" => eval_compound_variants(value, eval, &mut main),
                "slots" => eval_slots(value, eval, &mut slots),
                // Selector defaults, not class sources.
                _ => {}
            }
        }
    }

    let mut units = Vec::with_capacity(1 + slots.len());
    units.push(main);
    units.extend(slots);
    units
}

/// `variants: { axis: { option: classes, ... }, ... }`
fn eval_variants(value: &Expr, eval: &mut Evaluator, main: &mut ClassValue) {
    let Expr::Object(axes) = value else { return };
    for axis in object_props(axes) {
        let Some((_, options)) = axis else { continue };
        let Expr::Object(options) = options else { continue };
        let id = eval.fresh_conditional();
        for (arm, option) in object_props(options).enumerate() {
            let Some((_, classes)) = option else { continue };
            let mut v = eval.eval(classes);
            v.tag_all(BranchTag::new(id, arm.min(u8::MAX as usize) as u8));
            main.merge(v);
        }
    }
}

/// `compoundVariants: [{ size: "sm", intent: "danger", class: "..." }, ...]`
fn eval_compound_variants(value: &Expr, eval: &mut Evaluator, main: &mut ClassValue) {
    let Expr::Array(entries) = value else { return };
    for entry in entries.elems.iter().flatten() {
        let Expr::Object(obj) = &*entry.expr else { continue };
        for prop in object_props(obj) {
            let Some((key, classes)) = prop else { continue };
            if key == "class" || key == "className" {
                main.merge(eval.eval(classes));
            }
        }
    }
}

/// `slots: { root: "...", icon: "..." }` — each slot renders on a different
/// element, so each becomes its own unit.
fn eval_slots(value: &Expr, eval: &mut Evaluator, slots: &mut Vec<ClassValue>) {
    let Expr::Object(obj) = value else { return };
    for prop in object_props(obj) {
        let Some((_, classes)) = prop else { continue };
        slots.push(eval.eval(classes));
    }
}

fn has_config_key(obj: &ObjectLit) -> bool {
    object_props(obj).flatten().any(|(key, _)| CONFIG_KEYS.contains(&key))
}

/// Named key/value props of an object literal; spreads and computed keys
/// yield `None`.
fn object_props(obj: &ObjectLit) -> impl Iterator<Item = Option<(&str, &Expr)>> {
    obj.props.iter().map(|prop| {
        let PropOrSpread::Prop(prop) = prop else {
            return None;
        };
        let Prop::KeyValue(kv) = &**prop else {
            return None;
        };
        Some((prop_name(&kv.key)?, &*kv.value))
    })
}
