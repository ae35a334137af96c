use serde_json::Value;
use tabled::{builder::Builder, Table};

use super::{flatten, result_of, row_sets, scalar};

/// Render the scalar fields as a two-column table, then each row set as its own table.
pub fn print_table(value: &Value) {
    let result = result_of(value);

    let fields = flatten(result);
    if !fields.is_empty() {
        let mut builder = Builder::default();
        builder.push_record(["Field", "Value"]);
        for (key, val) in &fields {
            builder.push_record([key.as_str(), val.as_str()]);
        }
        println!("{}", Table::from(builder));
    }

    for (title, rows) in row_sets(result) {
        println!("\n{title}:");
        println!("{}", rows_table(rows));
    }

    if let Some(Value::Array(warnings)) = value.get("warnings") {
        if !warnings.is_empty() {
            println!("\nWarnings:");
            for w in warnings.iter().filter_map(Value::as_str) {
                println!("  - {w}");
            }
        }
    }

    if let Some(Value::String(meth)) = value.get("methodology") {
        println!("\nMethodology: {meth}");
    }
}

fn rows_table(rows: &[Value]) -> Table {
    let headers: Vec<String> = rows
        .first()
        .and_then(Value::as_object)
        .map(|first| first.keys().cloned().collect())
        .unwrap_or_default();

    let mut builder = Builder::default();
    builder.push_record(headers.iter().map(String::as_str));
    for row in rows.iter().filter_map(Value::as_object) {
        builder.push_record(
            headers
                .iter()
                .map(|h| row.get(h.as_str()).map(scalar).unwrap_or_default()),
        );
    }
    Table::from(builder)
}
