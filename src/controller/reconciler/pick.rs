//! # Field Picker
//!
//! Refreshes a partial document from a full remote document without widening
//! its key set. For every declared key:
//!
//! - nested objects on both sides are picked recursively, so undeclared
//!   sibling sub-fields never leak in
//! - anything else is replaced by the remote value verbatim, `null` when the
//!   remote omits it
//!
//! Declared keys that are not fields of the category are kept as declared.

use serde_json::{Map, Value};

use crate::model::{FieldRegistry, PartialDocument};

/// Merge `full` into the keys declared by `partial`
///
/// # Errors
///
/// Fails only if a remote field cannot be rendered as JSON.
pub fn pick<D: FieldRegistry>(
    full: &D,
    partial: &PartialDocument,
) -> Result<PartialDocument, serde_json::Error> {
    let mut merged = partial.clone();
    for (name, declared) in partial {
        let Some(field) = D::field(name) else {
            continue;
        };
        let remote = field.read(full)?.into_value();
        merged.insert(name.clone(), pick_value(&remote, declared));
    }
    Ok(merged)
}

/// JSON-level pick used for nested objects
pub fn pick_value(full: &Value, partial: &Value) -> Value {
    match (full, partial) {
        (Value::Object(full), Value::Object(partial)) => Value::Object(
            partial
                .iter()
                .map(|(key, declared)| {
                    let picked = full
                        .get(key)
                        .map_or(Value::Null, |remote| pick_value(remote, declared));
                    (key.clone(), picked)
                })
                .collect::<Map<String, Value>>(),
        ),
        (full, _) => full.clone(),
    }
}
