use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use super::scenario::Scenario;
use crate::acquisition::normalizer::{normalize_inputs, normalize_settings};
use crate::acquisition::{compute_results, ProSettings};
use crate::error::RentiumError;
use crate::fiscal::analyze_fiscal;
use crate::projection::project;
use crate::types::{with_metadata, ComputationOutput, Money, Percent};
use crate::RentiumResult;

pub const MAX_COMPARED: usize = 3;
pub const MAX_COMPARISON_YEARS: u32 = 10;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioRow {
    pub id: String,
    pub name: String,
    pub monthly_cashflow: Money,
    pub net_yield: Percent,
    /// Annual tax under the selected regime
    pub annual_tax: Money,
    /// After-tax cashflow summed over the comparison horizon
    pub cumulative_cashflow: Money,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioComparison {
    pub rows: Vec<ScenarioRow>,
    pub horizon: u32,
    /// Index into `rows` of the highest cumulative cashflow
    pub best_index: usize,
    pub best_name: String,
}

/// Compare two or three scenarios under the same tax and growth settings.
pub fn compare_scenarios(
    scenarios: &[Scenario],
    settings: &ProSettings,
) -> RentiumResult<ComputationOutput<ScenarioComparison>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    if scenarios.len() < 2 {
        return Err(RentiumError::InsufficientData(format!(
            "At least 2 scenarios are required for a comparison, got {}",
            scenarios.len()
        )));
    }
    if scenarios.len() > MAX_COMPARED {
        warnings.push(format!(
            "{} scenarios supplied; only the first {MAX_COMPARED} are compared",
            scenarios.len()
        ));
    }

    let mut capped = normalize_settings(settings);
    capped.projection_years = capped.projection_years.min(MAX_COMPARISON_YEARS);

    let rows: Vec<ScenarioRow> = scenarios
        .iter()
        .take(MAX_COMPARED)
        .map(|scenario| {
            let inputs = normalize_inputs(&scenario.inputs, &[]).inputs;
            let results = compute_results(&inputs);
            let fiscal = analyze_fiscal(&inputs, &results, &capped);
            let projection = project(&inputs, &results, &capped);
            ScenarioRow {
                id: scenario.id.clone(),
                name: scenario.name.clone(),
                monthly_cashflow: results.monthly_cashflow,
                net_yield: results.net_yield,
                annual_tax: fiscal.selected_tax,
                cumulative_cashflow: projection.total_cashflow,
            }
        })
        .collect();

    // first row wins ties
    let mut best_index = 0;
    let mut best_total = Decimal::MIN;
    for (i, row) in rows.iter().enumerate() {
        if row.cumulative_cashflow > best_total {
            best_total = row.cumulative_cashflow;
            best_index = i;
        }
    }
    let best_name = rows[best_index].name.clone();

    let output = ScenarioComparison {
        rows,
        horizon: capped.projection_years,
        best_index,
        best_name,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Scenario comparison (capped-horizon cumulative after-tax cashflow)",
        &serde_json::json!({
            "compared": output.rows.len(),
            "horizon_years": output.horizon,
            "tax_mode": capped.tax_mode.id(),
        }),
        warnings,
        elapsed,
        output,
    ))
}
