use napi::Result as NapiResult;
use napi_derive::napi;
use serde::Deserialize;

use rentium_core::acquisition::normalizer::normalize_inputs;
use rentium_core::acquisition::{AcquisitionInputs, ProSettings};
use rentium_core::analysis::AnalysisRequest;
use rentium_core::scenarios::Scenario;

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

// ---------------------------------------------------------------------------
// Analysis
// ---------------------------------------------------------------------------

/// Full analysis bundle for `{inputs, settings, unknown_fields}`.
#[napi]
pub fn analyze(request_json: String) -> NapiResult<String> {
    let request = AnalysisRequest::from_json(&request_json).map_err(to_napi_error)?;
    let output = rentium_core::analysis::analyze(&request);
    serde_json::to_string(&output).map_err(to_napi_error)
}

/// Parse an acquisition record and clamp its rates to their domains.
fn parse_inputs(inputs_json: &str) -> NapiResult<AcquisitionInputs> {
    let raw: AcquisitionInputs = serde_json::from_str(inputs_json).map_err(to_napi_error)?;
    Ok(normalize_inputs(&raw, &[]).inputs)
}

#[napi]
pub fn compute_results(inputs_json: String) -> NapiResult<String> {
    let inputs = parse_inputs(&inputs_json)?;
    let results = rentium_core::acquisition::compute_results(&inputs);
    serde_json::to_string(&results).map_err(to_napi_error)
}

#[napi]
pub fn amortization_schedule(inputs_json: String) -> NapiResult<String> {
    let inputs = parse_inputs(&inputs_json)?;
    let schedule = rentium_core::acquisition::loan_schedule(&inputs);
    serde_json::to_string(&schedule).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Scenarios
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct CompareRequest {
    scenarios: Vec<Scenario>,
    #[serde(default)]
    settings: ProSettings,
}

#[napi]
pub fn compare_scenarios(request_json: String) -> NapiResult<String> {
    let request: CompareRequest = serde_json::from_str(&request_json).map_err(to_napi_error)?;
    let output = rentium_core::scenarios::compare_scenarios(&request.scenarios, &request.settings)
        .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Reference data
// ---------------------------------------------------------------------------

/// `[{id, label}]` for every supported tax regime.
#[napi]
pub fn tax_modes() -> NapiResult<String> {
    let modes: Vec<serde_json::Value> = rentium_core::fiscal::TaxMode::ALL
        .iter()
        .map(|m| serde_json::json!({ "id": m.id(), "label": m.label() }))
        .collect();
    serde_json::to_string(&modes).map_err(to_napi_error)
}
