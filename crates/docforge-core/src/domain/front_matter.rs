//! Front matter injection and generated-file banners.

use serde_json::{Map, Value};

/// First line of every generated `.github` document.
pub const BANNER: &str = "<!-- GENERATED from docs_library; DO NOT EDIT IN .github -->\n";

/// Prepend a `---` delimited metadata block to `body`.
///
/// Arrays render inline with JSON-quoted elements, objects as compact JSON,
/// scalars verbatim. An empty mapping returns `body` unchanged.
pub fn inject(meta: &Map<String, Value>, body: &str) -> String {
    if meta.is_empty() {
        return body.to_string();
    }

    let mut lines = vec!["---".to_string()];
    for (key, value) in meta {
        lines.push(format!("{key}: {}", render_value(value)));
    }
    lines.push("---".to_string());

    format!("{}\n{body}", lines.join("\n"))
}

/// Prefix `body` with the generated-file banner.
pub fn with_banner(body: &str) -> String {
    format!("{BANNER}{body}")
}

fn render_value(value: &Value) -> String {
    match value {
        Value::Array(items) => {
            let items: Vec<String> = items.iter().map(Value::to_string).collect();
            format!("[{}]", items.join(", "))
        }
        Value::Object(_) | Value::Null => value.to_string(),
        Value::String(s) => s.clone(),
        Value::Bool(_) | Value::Number(_) => value.to_string(),
    }
}
