use serde_json::{json, Value};

use rentium_core::fiscal::TaxMode;

/// List the supported tax regimes with their identifiers.
pub fn run_regimes() -> Result<Value, Box<dyn std::error::Error>> {
    let regimes: Vec<Value> = TaxMode::ALL
        .iter()
        .map(|mode| json!({ "id": mode.id(), "label": mode.label() }))
        .collect();
    Ok(json!({ "result": regimes }))
}
