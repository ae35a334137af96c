use serde_json::Value;
use std::io;

use super::{flatten, result_of, row_sets, scalar};

/// Write the primary row set as CSV, or `field,value` pairs when there is none.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());
    if let Err(e) = write_csv(&mut wtr, result_of(value)) {
        tracing::error!(error = %e, "failed to write CSV");
    }
}

fn write_csv<W: io::Write>(wtr: &mut csv::Writer<W>, result: &Value) -> csv::Result<()> {
    match row_sets(result).first() {
        Some((_, rows)) => {
            let headers: Vec<&str> = rows
                .first()
                .and_then(Value::as_object)
                .map(|first| first.keys().map(String::as_str).collect())
                .unwrap_or_default();
            wtr.write_record(&headers)?;
            for row in rows.iter().filter_map(Value::as_object) {
                wtr.write_record(
                    headers
                        .iter()
                        .map(|h| row.get(*h).map(scalar).unwrap_or_default()),
                )?;
            }
        }
        None => {
            wtr.write_record(["field", "value"])?;
            for (key, val) in flatten(result) {
                wtr.write_record([key, val])?;
            }
        }
    }
    wtr.flush()?;
    Ok(())
}
