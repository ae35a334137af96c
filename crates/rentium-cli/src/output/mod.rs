pub mod csv_out;
pub mod json;
pub mod minimal;
pub mod table;

use crate::OutputFormat;
use serde_json::Value;

/// Row collections, by JSON pointer under `result`, in the order they are preferred
/// as the primary table of a document.
const ROW_SETS: [(&str, &str); 5] = [
    ("/projection/rows", "Projection"),
    ("/recommendations", "Recommendations"),
    ("/rows", "Scenarios"),
    ("/years", "Amortization"),
    ("", "Rows"),
];

/// Dispatch output to the appropriate formatter.
pub fn format_output(format: &OutputFormat, value: &Value) {
    match format {
        OutputFormat::Json => json::print_json(value),
        OutputFormat::Table => table::print_table(value),
        OutputFormat::Csv => csv_out::print_csv(value),
        OutputFormat::Minimal => minimal::print_minimal(value),
    }
}

/// The `result` member of an output envelope, or the document itself.
pub(crate) fn result_of(value: &Value) -> &Value {
    value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value)
}

/// Every non-empty array of objects in `result`, with its title.
pub(crate) fn row_sets(result: &Value) -> Vec<(&'static str, &[Value])> {
    ROW_SETS
        .iter()
        .filter_map(|(pointer, title)| {
            let rows = result.pointer(pointer)?.as_array()?;
            if rows.first().is_some_and(Value::is_object) {
                Some((*title, rows.as_slice()))
            } else {
                None
            }
        })
        .collect()
}

/// Scalars keyed by dotted path, skipping arrays (they are rendered as row sets).
pub(crate) fn flatten(value: &Value) -> Vec<(String, String)> {
    let mut out = Vec::new();
    flatten_into(value, "", &mut out);
    out
}

fn flatten_into(value: &Value, prefix: &str, out: &mut Vec<(String, String)>) {
    match value {
        Value::Object(map) => {
            for (key, val) in map {
                let path = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{prefix}.{key}")
                };
                flatten_into(val, &path, out);
            }
        }
        Value::Array(items) if items.iter().any(Value::is_object) => {}
        other => out.push((prefix.to_string(), scalar(other))),
    }
}

pub(crate) fn scalar(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        Value::Array(items) => items.iter().map(scalar).collect::<Vec<_>>().join(", "),
        Value::Object(_) => serde_json::to_string(value).unwrap_or_default(),
    }
}
