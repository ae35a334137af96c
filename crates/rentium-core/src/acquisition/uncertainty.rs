use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::cashflow::compute_results;
use super::inputs::AcquisitionInputs;
use super::normalizer::{MANAGEMENT_RANGE, VACANCY_RANGE};
use crate::types::{clamp, Money, Percent};

/// Likely range of monthly cashflow and net yield around the point estimate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UncertaintyRange {
    /// Multiplier applied to every perturbation: 1 + 0.25 per defaulted field
    pub spread: Decimal,
    pub min_cashflow: Money,
    pub max_cashflow: Money,
    pub min_net_yield: Percent,
    pub max_net_yield: Percent,
}

/// Widen the estimate with a prudent and an optimistic variant of the inputs.
///
/// The more fields were defaulted, the wider both variants drift.
pub fn estimate_uncertainty(inputs: &AcquisitionInputs, defaulted_count: usize) -> UncertaintyRange {
    let spread = Decimal::ONE + dec!(0.25) * Decimal::from(defaulted_count as u64);

    let prudent = AcquisitionInputs {
        monthly_rent: inputs.monthly_rent * (Decimal::ONE - dec!(0.03) * spread),
        vacancy_rate: clamp(
            inputs.vacancy_rate + dec!(3) * spread,
            VACANCY_RANGE.0,
            VACANCY_RANGE.1,
        ),
        monthly_charges: inputs.monthly_charges * (Decimal::ONE + dec!(0.10) * spread),
        annual_maintenance: inputs.annual_maintenance * (Decimal::ONE + dec!(0.15) * spread),
        management_rate: clamp(
            inputs.management_rate + spread,
            MANAGEMENT_RANGE.0,
            MANAGEMENT_RANGE.1,
        ),
        ..inputs.clone()
    };

    let optimistic = AcquisitionInputs {
        monthly_rent: inputs.monthly_rent * (Decimal::ONE + dec!(0.02) * spread),
        vacancy_rate: clamp(
            inputs.vacancy_rate - dec!(2) * spread,
            VACANCY_RANGE.0,
            VACANCY_RANGE.1,
        ),
        monthly_charges: inputs.monthly_charges * (Decimal::ONE - dec!(0.05) * spread),
        annual_maintenance: inputs.annual_maintenance * (Decimal::ONE - dec!(0.10) * spread),
        management_rate: clamp(
            inputs.management_rate - spread,
            MANAGEMENT_RANGE.0,
            MANAGEMENT_RANGE.1,
        ),
        ..inputs.clone()
    };

    let a = compute_results(&prudent);
    let b = compute_results(&optimistic);

    UncertaintyRange {
        spread,
        min_cashflow: a.monthly_cashflow.min(b.monthly_cashflow),
        max_cashflow: a.monthly_cashflow.max(b.monthly_cashflow),
        min_net_yield: a.net_yield.min(b.net_yield),
        max_net_yield: a.net_yield.max(b.net_yield),
    }
}
