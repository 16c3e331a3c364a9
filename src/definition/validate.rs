//! Static checks on a definition, run before any step executes so that a
//! typo in the last step fails before anything is downloaded.

use crate::background::BackgroundSink;
use crate::definition::eval::check_factor;
use crate::definition::types::{Definition, Op, PosExpr, PosFn, SizeExpr, SizeFn};

use serde_yaml::Value;
use std::collections::HashSet;

/// Check the raw keys of every step: an optional `let` plus exactly one
/// operation. Typed parsing alone keeps the first operation key it meets
/// and drops the rest.
pub fn check_step_keys(raw: &Value) -> Result<(), String> {
    let Some(steps) = raw.get("steps").and_then(Value::as_sequence) else {
        return Ok(());
    };

    for (i, step) in steps.iter().enumerate() {
        let Some(map) = step.as_mapping() else {
            continue;
        };
        let fail = |msg: String| format!("step {}: {}", i + 1, msg);

        let mut ops = Vec::new();
        let mut unknown = Vec::new();
        for key in map.keys() {
            match key.as_str() {
                Some("let") => {}
                Some(name) if Op::NAMES.contains(&name) => ops.push(name),
                Some(name) => unknown.push(name.to_string()),
                None => unknown.push(format!("{key:?}")),
            }
        }

        if !unknown.is_empty() {
            return Err(fail(format!("unknown key(s) {}", unknown.join(", "))));
        }
        match ops.len() {
            1 => {}
            0 => return Err(fail("no operation".to_string())),
            _ => return Err(fail(format!("more than one operation ({})", ops.join(", ")))),
        }
    }

    Ok(())
}

/// Check bindings and names. Errors read `step N (op): message`, 1-based.
pub fn validate(definition: &Definition) -> Result<(), String> {
    for name in definition.positions.keys() {
        if definition.sizes.contains_key(name) {
            return Err(format!("\"{name}\" is declared as both a size and a position"));
        }
    }

    let mut bound: HashSet<&str> = HashSet::new();

    for (i, step) in definition.steps.iter().enumerate() {
        let fail = |msg: String| format!("step {} ({}): {}", i + 1, step.op.name(), msg);

        for input in step.op.image_inputs() {
            if !bound.contains(input) {
                return Err(fail(format!("no image named \"{input}\" is bound before this step")));
            }
        }
        check_op_exprs(definition, &bound, &step.op).map_err(fail)?;

        match (&step.bind, step.op.produces_image()) {
            (Some(name), true) => {
                if name.trim().is_empty() {
                    return Err(fail("empty name after let".to_string()));
                }
                if definition.sizes.contains_key(name) {
                    return Err(fail(format!("\"{name}\" is already a declared size")));
                }
                bound.insert(name.as_str());
            }
            (None, true) => return Err(fail("the result needs a name, add `let:`".to_string())),
            (Some(_), false) => {
                return Err(fail("produces no image, remove `let:`".to_string()));
            }
            (None, false) => {}
        }
    }

    Ok(())
}

fn check_op_exprs(definition: &Definition, bound: &HashSet<&str>, op: &Op) -> Result<(), String> {
    match op {
        Op::Blank { size, .. } | Op::Resize { size, .. } => check_size(definition, bound, size),
        Op::Crop { offset, size, .. } => {
            check_pos(definition, bound, offset)?;
            check_size(definition, bound, size)
        }
        Op::Place { offset, .. } => check_pos(definition, bound, offset),
        Op::Background { sink, monitor, .. } => {
            BackgroundSink::from_kind(*sink, monitor.as_deref())
                .map(|_| ())
                .map_err(|e| e.to_string())
        }
        Op::Get { source, variant } => {
            if source.is_empty() || variant.is_empty() {
                Err("source and variant must not be empty".to_string())
            } else {
                Ok(())
            }
        }
        Op::Open(_) | Op::Clean(_) | Op::ToJpg(_) => Ok(()),
    }
}

fn check_size(definition: &Definition, bound: &HashSet<&str>, expr: &SizeExpr) -> Result<(), String> {
    match expr {
        SizeExpr::Literal(_) => Ok(()),
        SizeExpr::Name(name) => {
            if definition.sizes.contains_key(name) || bound.contains(name.as_str()) {
                Ok(())
            } else {
                Err(format!("no size or image named \"{name}\""))
            }
        }
        SizeExpr::Scaled(SizeFn::ScaleToWidth(size, _) | SizeFn::ScaleToHeight(size, _)) => {
            check_size(definition, bound, size)
        }
        SizeExpr::Scaled(SizeFn::ScaleToFit(size, frame)) => {
            check_size(definition, bound, size)?;
            check_size(definition, bound, frame)
        }
        SizeExpr::Scaled(SizeFn::ScaleFactor(size, factor)) => {
            check_factor(*factor)?;
            check_size(definition, bound, size)
        }
    }
}

fn check_pos(definition: &Definition, bound: &HashSet<&str>, expr: &PosExpr) -> Result<(), String> {
    match expr {
        PosExpr::Literal(_) => Ok(()),
        PosExpr::Name(name) => {
            if definition.positions.contains_key(name) {
                Ok(())
            } else {
                Err(format!("no position named \"{name}\""))
            }
        }
        PosExpr::Computed(PosFn::Add(a, b)) => {
            check_pos(definition, bound, a)?;
            check_pos(definition, bound, b)
        }
        PosExpr::Computed(PosFn::CenteringOffset {
            inner,
            outer,
            offset,
        }) => {
            check_size(definition, bound, inner)?;
            check_size(definition, bound, outer)?;
            match offset {
                Some(offset) => check_pos(definition, bound, offset),
                None => Ok(()),
            }
        }
    }
}
