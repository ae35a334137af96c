//! Break-even solvers, only offered when the baseline loses money each month.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::trace;

use super::strategy::{Baseline, Effort, Recommendation, RecommendationStrategy};
use crate::acquisition::{compute_results, AcquisitionInputs};
use crate::format::{eur, round_display};
use crate::types::Money;

/// Below this share of rent actually collected, a rent target is meaningless.
const MIN_RENT_EFFICIENCY: Decimal = dec!(0.05);

pub const BISECTION_ITERATIONS: u32 = 32;

/// Monthly rent that brings cashflow back to zero, in closed form.
#[derive(Debug, Clone, Copy, Default)]
pub struct NeutralRentTarget;

impl RecommendationStrategy for NeutralRentTarget {
    fn id(&self) -> &str {
        "neutral-rent"
    }

    fn recommend(&self, baseline: &Baseline) -> Option<Recommendation> {
        let cashflow = baseline.results.monthly_cashflow;
        if cashflow >= Decimal::ZERO {
            return None;
        }
        let target = neutral_rent(&baseline.inputs, cashflow)?;

        Some(Recommendation {
            id: self.id().to_string(),
            title: "Objectif cashflow neutre via loyer".to_string(),
            effort: Effort::High,
            assumptions: "Approximation vacance + gestion".to_string(),
            target_value: eur(target),
            delta_cashflow_monthly: -cashflow,
            delta_score: Decimal::ZERO,
            message: format!("Loyer cible estime: {} / mois.", eur(target)),
        })
    }
}

/// Purchase price at which monthly cashflow turns non-negative, by bisection.
#[derive(Debug, Clone, Copy, Default)]
pub struct NeutralPriceTarget;

impl RecommendationStrategy for NeutralPriceTarget {
    fn id(&self) -> &str {
        "neutral-price"
    }

    fn recommend(&self, baseline: &Baseline) -> Option<Recommendation> {
        if baseline.results.monthly_cashflow >= Decimal::ZERO {
            return None;
        }
        let target = neutral_price(&baseline.inputs)?;

        Some(Recommendation {
            id: self.id().to_string(),
            title: "Objectif cashflow neutre via prix".to_string(),
            effort: Effort::High,
            assumptions: "Recherche dichotomique".to_string(),
            target_value: eur(target),
            delta_cashflow_monthly: Decimal::ZERO,
            delta_score: Decimal::ZERO,
            message: format!("Prix cible estime: {}.", eur(target)),
        })
    }
}

/// Rent needed to absorb `cashflow` (negative) once vacancy and management are taken off.
pub fn neutral_rent(inputs: &AcquisitionInputs, cashflow: Money) -> Option<Money> {
    let hundred = dec!(100);
    let efficiency = (Decimal::ONE - inputs.vacancy_rate / hundred)
        * (Decimal::ONE - inputs.management_rate / hundred);
    if efficiency <= MIN_RENT_EFFICIENCY {
        trace!(%efficiency, "rent target skipped: efficiency too low");
        return None;
    }

    let target = (-cashflow)
        .checked_div(efficiency)
        .and_then(|gap| inputs.monthly_rent.checked_add(gap))?;
    if target <= inputs.monthly_rent {
        return None;
    }
    Some(target)
}

/// Highest price in `[price / 2, price)` with non-negative monthly cashflow.
///
/// Runs exactly [`BISECTION_ITERATIONS`] halvings; the result is rounded to whole euros.
pub fn neutral_price(inputs: &AcquisitionInputs) -> Option<Money> {
    let price = inputs.purchase_price;
    if price <= Decimal::ZERO {
        return None;
    }
    let notary_ratio = inputs.notary_fees / price;
    let cashflow_at = |candidate: Money| {
        compute_results(&AcquisitionInputs {
            purchase_price: candidate,
            notary_fees: candidate * notary_ratio,
            ..inputs.clone()
        })
        .monthly_cashflow
    };

    let mut low = price * dec!(0.5);
    let mut high = price;
    if cashflow_at(low) < Decimal::ZERO {
        trace!(%low, "price target skipped: still negative at half price");
        return None;
    }

    for _ in 0..BISECTION_ITERATIONS {
        let mid = (low + high) / dec!(2);
        if cashflow_at(mid) >= Decimal::ZERO {
            low = mid;
        } else {
            high = mid;
        }
    }

    let target = round_display(low, 0);
    if target >= price {
        return None;
    }
    Some(target)
}
