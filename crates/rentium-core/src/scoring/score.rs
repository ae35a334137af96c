//! Rentium Score: a 0-100 composite of six independently capped components.
//!
//! | component | cap | driver |
//! |---|---|---|
//! | cashflow | 30 | monthly cashflow tiers, +2 when cashflow >= 10% of rent |
//! | yield | 20 | net yield tiers |
//! | debt | 20 | DSCR tier (14) + LTV tier (6) |
//! | stress | 15 | two independent re-runs: vacancy +5 pts, interest +1 pt |
//! | cost | 10 | operating charges / collected rent |
//! | tax | 5 | after-tax cashflow stays within 20 EUR/month of pre-tax |

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::acquisition::normalizer::VACANCY_RANGE;
use crate::acquisition::{compute_results, AcquisitionInputs, FinancialResults, ProSettings};
use crate::fiscal::FiscalAnalysis;
use crate::types::{clamp, Money, Percent};

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScoreLabel {
    Excellent,
    Bon,
    Moyen,
    Fragile,
    #[serde(rename = "Risque eleve")]
    RisqueEleve,
}

impl ScoreLabel {
    pub fn from_total(total: Decimal) -> Self {
        if total >= dec!(85) {
            ScoreLabel::Excellent
        } else if total >= dec!(70) {
            ScoreLabel::Bon
        } else if total >= dec!(55) {
            ScoreLabel::Moyen
        } else if total >= dec!(40) {
            ScoreLabel::Fragile
        } else {
            ScoreLabel::RisqueEleve
        }
    }
}

impl fmt::Display for ScoreLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScoreLabel::Excellent => write!(f, "Excellent"),
            ScoreLabel::Bon => write!(f, "Bon"),
            ScoreLabel::Moyen => write!(f, "Moyen"),
            ScoreLabel::Fragile => write!(f, "Fragile"),
            ScoreLabel::RisqueEleve => write!(f, "Risque eleve"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Score {
    pub cashflow_pts: Decimal,
    pub yield_pts: Decimal,
    pub debt_pts: Decimal,
    pub stress_pts: Decimal,
    /// Monthly cashflow with vacancy +5 pts
    pub stress_vacancy_cashflow: Money,
    /// Monthly cashflow with interest rate +1 pt
    pub stress_rate_cashflow: Money,
    pub cost_pts: Decimal,
    pub tax_pts: Decimal,
    pub total: Decimal,
    pub label: ScoreLabel,
}

/// A labelled line of the score breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreComponent {
    pub label: String,
    pub points: Decimal,
    pub cap: Decimal,
}

impl Score {
    pub fn components(&self) -> Vec<ScoreComponent> {
        [
            ("Cashflow & resilience", self.cashflow_pts, dec!(30)),
            ("Rendement & revenus", self.yield_pts, dec!(20)),
            ("Risque dette", self.debt_pts, dec!(20)),
            ("Sensibilite", self.stress_pts, dec!(15)),
            ("Efficience charges", self.cost_pts, dec!(10)),
            ("Coherence fiscale", self.tax_pts, dec!(5)),
        ]
        .into_iter()
        .map(|(label, points, cap)| ScoreComponent {
            label: label.to_string(),
            points,
            cap,
        })
        .collect()
    }
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

pub fn score(
    inputs: &AcquisitionInputs,
    results: &FinancialResults,
    settings: &ProSettings,
    fiscal: &FiscalAnalysis,
) -> Score {
    let cashflow_pts = cashflow_points(results.monthly_cashflow, inputs.monthly_rent);
    let yield_pts = yield_points(results.net_yield);
    let debt_pts = debt_points(results.dscr, results.ltv);
    let (stress_vacancy_cashflow, stress_rate_cashflow) = stress_cashflows(inputs);
    let stress_pts = stress_ramp(stress_vacancy_cashflow) + stress_ramp(stress_rate_cashflow);
    let cost_pts = cost_points(results.annual_operating_charges, results.annual_collected_rent);
    let tax_pts = tax_points(results, fiscal, settings);

    let total = clamp(
        cashflow_pts + yield_pts + debt_pts + stress_pts + cost_pts + tax_pts,
        Decimal::ZERO,
        dec!(100),
    );

    Score {
        cashflow_pts,
        yield_pts,
        debt_pts,
        stress_pts,
        stress_vacancy_cashflow,
        stress_rate_cashflow,
        cost_pts,
        tax_pts,
        total,
        label: ScoreLabel::from_total(total),
    }
}

// ---------------------------------------------------------------------------
// Sub-scores
// ---------------------------------------------------------------------------

fn cashflow_points(monthly_cashflow: Money, monthly_rent: Money) -> Decimal {
    let mut pts = if monthly_cashflow >= dec!(200) {
        dec!(30)
    } else if monthly_cashflow >= dec!(100) {
        dec!(26)
    } else if monthly_cashflow >= Decimal::ZERO {
        dec!(22)
    } else if monthly_cashflow >= dec!(-99) {
        dec!(14)
    } else if monthly_cashflow >= dec!(-199) {
        dec!(8)
    } else {
        dec!(2)
    };

    if monthly_rent > Decimal::ZERO && monthly_cashflow / monthly_rent >= dec!(0.10) {
        pts += dec!(2);
    }
    clamp(pts, Decimal::ZERO, dec!(30))
}

fn yield_points(net_yield: Percent) -> Decimal {
    if net_yield >= dec!(7) {
        dec!(20)
    } else if net_yield >= dec!(6) {
        dec!(17)
    } else if net_yield >= dec!(5) {
        dec!(14)
    } else if net_yield >= dec!(4) {
        dec!(10)
    } else if net_yield >= dec!(3) {
        dec!(6)
    } else {
        dec!(2)
    }
}

fn debt_points(dscr: Decimal, ltv: Decimal) -> Decimal {
    let coverage = if dscr >= dec!(1.4) {
        dec!(14)
    } else if dscr >= dec!(1.25) {
        dec!(12)
    } else if dscr >= dec!(1.1) {
        dec!(9)
    } else if dscr >= dec!(1.0) {
        dec!(6)
    } else {
        dec!(1)
    };

    let ltv_pct = ltv * dec!(100);
    let leverage = if ltv_pct <= dec!(60) {
        dec!(6)
    } else if ltv_pct <= dec!(70) {
        dec!(5)
    } else if ltv_pct <= dec!(80) {
        dec!(4)
    } else if ltv_pct <= dec!(90) {
        dec!(2)
    } else {
        Decimal::ZERO
    };

    clamp(coverage + leverage, Decimal::ZERO, dec!(20))
}

/// Monthly cashflow under each stress, run independently.
fn stress_cashflows(inputs: &AcquisitionInputs) -> (Money, Money) {
    let vacancy_shock = AcquisitionInputs {
        vacancy_rate: clamp(
            inputs.vacancy_rate + dec!(5),
            VACANCY_RANGE.0,
            VACANCY_RANGE.1,
        ),
        ..inputs.clone()
    };
    let rate_shock = AcquisitionInputs {
        interest_rate: inputs.interest_rate + dec!(1.0),
        ..inputs.clone()
    };
    (
        compute_results(&vacancy_shock).monthly_cashflow,
        compute_results(&rate_shock).monthly_cashflow,
    )
}

/// 7.5 points at or above break-even, 0 at -200/month or worse, linear between.
fn stress_ramp(monthly_cashflow: Money) -> Decimal {
    if monthly_cashflow >= Decimal::ZERO {
        dec!(7.5)
    } else if monthly_cashflow <= dec!(-200) {
        Decimal::ZERO
    } else {
        (monthly_cashflow + dec!(200)) / dec!(200) * dec!(7.5)
    }
}

fn cost_points(operating_charges: Money, collected_rent: Money) -> Decimal {
    if collected_rent <= Decimal::ZERO {
        return Decimal::ONE;
    }
    let ratio = operating_charges / collected_rent * dec!(100);
    if ratio <= dec!(20) {
        dec!(10)
    } else if ratio <= dec!(30) {
        dec!(8)
    } else if ratio <= dec!(40) {
        dec!(6)
    } else if ratio <= dec!(50) {
        dec!(3)
    } else {
        Decimal::ONE
    }
}

fn tax_points(results: &FinancialResults, fiscal: &FiscalAnalysis, settings: &ProSettings) -> Decimal {
    if !settings.has_tax_profile() {
        return dec!(3);
    }
    if fiscal.monthly_cashflow_after_tax() >= results.monthly_cashflow - dec!(20) {
        dec!(5)
    } else {
        dec!(2)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fiscal::analyze_fiscal;

    #[test]
    fn test_cashflow_tiers() {
        assert_eq!(cashflow_points(dec!(250), Decimal::ZERO), dec!(30));
        assert_eq!(cashflow_points(dec!(150), Decimal::ZERO), dec!(26));
        assert_eq!(cashflow_points(dec!(0), Decimal::ZERO), dec!(22));
        assert_eq!(cashflow_points(dec!(-99), Decimal::ZERO), dec!(14));
        // between tiers: -99.5 misses the -99 threshold
        assert_eq!(cashflow_points(dec!(-99.5), Decimal::ZERO), dec!(8));
        assert_eq!(cashflow_points(dec!(-199), Decimal::ZERO), dec!(8));
        assert_eq!(cashflow_points(dec!(-500), Decimal::ZERO), dec!(2));
    }

    #[test]
    fn test_cashflow_rent_bonus_and_cap() {
        // 150 / 1000 = 15% of rent: 26 + 2
        assert_eq!(cashflow_points(dec!(150), dec!(1000)), dec!(28));
        // top tier stays capped at 30
        assert_eq!(cashflow_points(dec!(300), dec!(1000)), dec!(30));
        // 50 / 1000 = 5%: no bonus
        assert_eq!(cashflow_points(dec!(50), dec!(1000)), dec!(22));
    }

    #[test]
    fn test_yield_tiers() {
        assert_eq!(yield_points(dec!(7.2)), dec!(20));
        assert_eq!(yield_points(dec!(6)), dec!(17));
        assert_eq!(yield_points(dec!(5.5)), dec!(14));
        assert_eq!(yield_points(dec!(4)), dec!(10));
        assert_eq!(yield_points(dec!(3.1)), dec!(6));
        assert_eq!(yield_points(dec!(-1)), dec!(2));
    }

    #[test]
    fn test_debt_points() {
        assert_eq!(debt_points(dec!(999), Decimal::ZERO), dec!(20));
        assert_eq!(debt_points(dec!(1.3), dec!(0.75)), dec!(16));
        assert_eq!(debt_points(dec!(1.1), dec!(0.9)), dec!(11));
        assert_eq!(debt_points(dec!(1.0), dec!(0.95)), dec!(6));
        assert_eq!(debt_points(dec!(0.8), dec!(1.0)), dec!(1));
    }

    #[test]
    fn test_stress_ramp() {
        assert_eq!(stress_ramp(dec!(10)), dec!(7.5));
        assert_eq!(stress_ramp(Decimal::ZERO), dec!(7.5));
        assert_eq!(stress_ramp(dec!(-100)), dec!(3.75));
        assert_eq!(stress_ramp(dec!(-200)), Decimal::ZERO);
        assert_eq!(stress_ramp(dec!(-350)), Decimal::ZERO);
    }

    #[test]
    fn test_cost_points() {
        assert_eq!(cost_points(dec!(1000), Decimal::ZERO), Decimal::ONE);
        assert_eq!(cost_points(dec!(2000), dec!(10000)), dec!(10));
        assert_eq!(cost_points(dec!(3000), dec!(10000)), dec!(8));
        assert_eq!(cost_points(dec!(3500), dec!(10000)), dec!(6));
        assert_eq!(cost_points(dec!(5000), dec!(10000)), dec!(3));
        assert_eq!(cost_points(dec!(5001), dec!(10000)), Decimal::ONE);
    }

    #[test]
    fn test_labels() {
        assert_eq!(ScoreLabel::from_total(dec!(85)), ScoreLabel::Excellent);
        assert_eq!(ScoreLabel::from_total(dec!(84.9)), ScoreLabel::Bon);
        assert_eq!(ScoreLabel::from_total(dec!(55)), ScoreLabel::Moyen);
        assert_eq!(ScoreLabel::from_total(dec!(40)), ScoreLabel::Fragile);
        assert_eq!(ScoreLabel::from_total(dec!(39.99)), ScoreLabel::RisqueEleve);
        assert_eq!(ScoreLabel::RisqueEleve.to_string(), "Risque eleve");
        assert_eq!(
            serde_json::to_string(&ScoreLabel::RisqueEleve).unwrap(),
            "\"Risque eleve\""
        );
    }

    #[test]
    fn test_debt_free_cash_purchase_scores_high() {
        let inputs = AcquisitionInputs {
            purchase_price: dec!(100000),
            down_payment: dec!(100000),
            loan_years: 20,
            monthly_rent: dec!(900),
            monthly_charges: dec!(50),
            property_tax: dec!(700),
            ..Default::default()
        };
        let settings = ProSettings::default();
        let results = compute_results(&inputs);
        let fiscal = analyze_fiscal(&inputs, &results, &settings);
        let s = score(&inputs, &results, &settings, &fiscal);

        // cashflow ~792/month on 900 rent: 30 (capped)
        assert_eq!(s.cashflow_pts, dec!(30));
        // net yield (10800 - 1300) / 100000 = 9.5%
        assert_eq!(s.yield_pts, dec!(20));
        assert_eq!(s.debt_pts, dec!(20));
        assert_eq!(s.stress_pts, dec!(15));
        // 1300 / 10800 = 12%
        assert_eq!(s.cost_pts, dec!(10));
        // no tax profile
        assert_eq!(s.tax_pts, dec!(3));
        assert_eq!(s.total, dec!(98));
        assert_eq!(s.label, ScoreLabel::Excellent);
        assert_eq!(s.components().len(), 6);
        assert_eq!(s.components()[3].cap, dec!(15));
    }

    #[test]
    fn test_tax_coherence_points() {
        let inputs = AcquisitionInputs {
            purchase_price: dec!(100000),
            down_payment: dec!(100000),
            monthly_rent: dec!(900),
            ..Default::default()
        };
        let results = compute_results(&inputs);

        // 45% on 50% of 10800 = 2430/yr = 202.5/month of tax: far beyond 20
        let heavy = ProSettings {
            marginal_tax_rate: Some(dec!(30)),
            social_tax_rate: dec!(15),
            ..Default::default()
        };
        let fiscal = analyze_fiscal(&inputs, &results, &heavy);
        assert_eq!(tax_points(&results, &fiscal, &heavy), dec!(2));

        // 0% marginal and social: no tax at all
        let light = ProSettings {
            marginal_tax_rate: Some(dec!(0)),
            social_tax_rate: dec!(0),
            ..Default::default()
        };
        let fiscal = analyze_fiscal(&inputs, &results, &light);
        assert_eq!(tax_points(&results, &fiscal, &light), dec!(5));
    }
}
