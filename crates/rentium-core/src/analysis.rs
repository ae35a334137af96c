//! One-shot analysis of an acquisition: every engine, threaded through in order.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::debug;

use crate::acquisition::normalizer::{
    normalize_inputs, normalize_settings, InputMeta, UnknownField,
};
use crate::acquisition::uncertainty::{estimate_uncertainty, UncertaintyRange};
use crate::acquisition::{compute_results, AcquisitionInputs, FinancialResults, ProSettings};
use crate::fiscal::{analyze_fiscal, FiscalAnalysis};
use crate::format::{eur, fixed, percent};
use crate::projection::{project, Projection};
use crate::recommendations::{recommend, Recommendation};
use crate::scoring::{score, Score};
use crate::types::{with_metadata, ComputationOutput};
use crate::RentiumResult;

/// LTV above which the acquisition is flagged as highly leveraged.
const HIGH_LTV: Decimal = dec!(0.9);

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisRequest {
    pub inputs: AcquisitionInputs,
    pub settings: ProSettings,
    /// Fields the user left blank; they receive catalog defaults.
    pub unknown_fields: Vec<UnknownField>,
}

impl AnalysisRequest {
    pub fn from_json(json: &str) -> RentiumResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Everything computed for one acquisition, handed back to the caller in one piece.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Analysis {
    /// Inputs after defaults and clamping
    pub inputs: AcquisitionInputs,
    pub settings: ProSettings,
    pub meta: InputMeta,
    pub results: FinancialResults,
    pub uncertainty: UncertaintyRange,
    pub fiscal: FiscalAnalysis,
    pub projection: Projection,
    pub score: Score,
    pub recommendations: Vec<Recommendation>,
}

pub fn analyze(request: &AnalysisRequest) -> ComputationOutput<Analysis> {
    let start = Instant::now();

    let normalized = normalize_inputs(&request.inputs, &request.unknown_fields);
    let inputs = normalized.inputs;
    let meta = normalized.meta;
    let settings = normalize_settings(&request.settings);

    let results = compute_results(&inputs);
    let uncertainty = estimate_uncertainty(&inputs, meta.defaulted_count());
    let fiscal = analyze_fiscal(&inputs, &results, &settings);
    let projection = project(&inputs, &results, &settings);
    let score = score(&inputs, &results, &settings, &fiscal);
    let recommendations = recommend(&inputs, &settings, &results, &score);

    let warnings = collect_warnings(&inputs, &meta, &results);

    let assumptions = serde_json::json!({
        "confidence": meta.confidence,
        "defaulted": meta.assumptions_text,
        "tax_mode": settings.tax_mode.id(),
        "tax_profile": settings.has_tax_profile(),
        "projection_years": settings.projection_years,
    });

    let analysis = Analysis {
        inputs,
        settings,
        meta,
        results,
        uncertainty,
        fiscal,
        projection,
        score,
        recommendations,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    debug!(
        elapsed_us = elapsed,
        score = %analysis.score.total,
        recommendations = analysis.recommendations.len(),
        "analysis complete"
    );

    with_metadata(
        "Rental acquisition analysis (cashflow, regime taxation, projection, Rentium Score)",
        &assumptions,
        warnings,
        elapsed,
        analysis,
    )
}

fn collect_warnings(
    inputs: &AcquisitionInputs,
    meta: &InputMeta,
    results: &FinancialResults,
) -> Vec<String> {
    let mut warnings = Vec::new();

    if meta.defaulted_count() > 0 {
        warnings.push(format!(
            "{} field(s) estimated from defaults ({} confidence): {}",
            meta.defaulted_count(),
            meta.confidence,
            meta.assumptions_text
        ));
    }
    if results.monthly_cashflow < Decimal::ZERO {
        warnings.push(format!(
            "Negative monthly cashflow: {} / mois",
            eur(results.monthly_cashflow)
        ));
    }
    if results.annual_debt_service > Decimal::ZERO && results.dscr < Decimal::ONE {
        warnings.push(format!(
            "DSCR {} below 1.00: rent does not cover debt service",
            fixed(results.dscr, 2)
        ));
    }
    if results.ltv > HIGH_LTV {
        warnings.push(format!(
            "LTV {} above 90 %",
            percent(results.ltv * dec!(100))
        ));
    }
    if inputs.loan_years == 0 && results.loan_amount > Decimal::ZERO {
        warnings.push("Loan term of 0 years: loan treated as repaid in a single month".into());
    }

    warnings
}
