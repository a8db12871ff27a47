//! Deep merge for JSON-shaped settings and variables.

use serde_json::{Map, Value};

/// Merge `src` into `target`.
///
/// Objects merge key by key, recursively. Arrays and scalars from `src`
/// replace whatever `target` had.
pub fn deep_merge(target: &mut Value, src: &Value) {
    match (target, src) {
        (Value::Object(dst), Value::Object(src)) => merge_maps(dst, src),
        (dst, src) => *dst = src.clone(),
    }
}

fn merge_maps(dst: &mut Map<String, Value>, src: &Map<String, Value>) {
    for (key, value) in src {
        let both_objects = value.is_object() && dst.get(key).is_some_and(Value::is_object);
        match dst.get_mut(key) {
            Some(existing) if both_objects => deep_merge(existing, value),
            _ => {
                dst.insert(key.clone(), value.clone());
            }
        }
    }
}

/// Merge a sequence of layers, later layers winning.
pub fn merge_layers<'a>(layers: impl IntoIterator<Item = &'a Value>) -> Value {
    let mut out = Value::Object(Map::new());
    for layer in layers {
        if layer.is_null() {
            continue;
        }
        deep_merge(&mut out, layer);
    }
    out
}
