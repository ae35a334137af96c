//! Fixed input perturbations, each re-run through cashflow, fiscal and score.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::strategy::{Baseline, Effort, Recommendation, RecommendationStrategy};
use crate::acquisition::normalizer::VACANCY_RANGE;
use crate::acquisition::{compute_results, AcquisitionInputs, ProSettings};
use crate::fiscal::{analyze_fiscal, TaxMode};
use crate::format::{eur, fixed, round_display, signed_eur, signed_points};
use crate::scoring::score;
use crate::types::clamp;

const LOAN_YEARS_RANGE: (u32, u32) = (1, 35);

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// A candidate variant of the baseline inputs (and optionally settings).
#[derive(Debug, Clone)]
pub struct Perturbation {
    pub id: String,
    pub title: String,
    pub effort: Effort,
    pub assumptions: String,
    pub target_value: String,
    pub inputs: AcquisitionInputs,
    /// `None` keeps the baseline settings
    pub settings: Option<ProSettings>,
}

impl Perturbation {
    fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        effort: Effort,
        assumptions: &str,
        target_value: impl Into<String>,
        inputs: AcquisitionInputs,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            effort,
            assumptions: assumptions.to_string(),
            target_value: target_value.into(),
            inputs,
            settings: None,
        }
    }

    fn with_settings(mut self, settings: ProSettings) -> Self {
        self.settings = Some(settings);
        self
    }
}

impl RecommendationStrategy for Perturbation {
    fn id(&self) -> &str {
        &self.id
    }

    fn recommend(&self, baseline: &Baseline) -> Option<Recommendation> {
        let settings = self.settings.as_ref().unwrap_or(&baseline.settings);
        let results = compute_results(&self.inputs);
        let fiscal = analyze_fiscal(&self.inputs, &results, settings);
        let candidate = score(&self.inputs, &results, settings, &fiscal);

        let delta_cashflow_monthly = results.monthly_cashflow - baseline.results.monthly_cashflow;
        let delta_score = candidate.total - baseline.score.total;

        Some(Recommendation {
            id: self.id.clone(),
            title: self.title.clone(),
            effort: self.effort,
            assumptions: self.assumptions.clone(),
            target_value: self.target_value.clone(),
            delta_cashflow_monthly,
            delta_score,
            message: format!(
                "{} -> {} / mois, {} pts",
                self.title,
                signed_eur(delta_cashflow_monthly),
                signed_points(delta_score)
            ),
        })
    }
}

// ---------------------------------------------------------------------------
// Candidate levers
// ---------------------------------------------------------------------------

/// Every lever applicable to the baseline, in a fixed order.
pub fn lever_candidates(baseline: &Baseline) -> Vec<Perturbation> {
    let base = &baseline.inputs;
    let mut levers = Vec::new();

    // Price negotiation, notary fees follow the price
    for pct in [1u32, 3, 5] {
        let price = base.purchase_price * (Decimal::ONE - Decimal::from(pct) / dec!(100));
        let notary = if base.purchase_price > Decimal::ZERO {
            base.notary_fees * (price / base.purchase_price)
        } else {
            base.notary_fees
        };
        levers.push(Perturbation::new(
            format!("price-{pct}"),
            format!("Negocier le prix (-{pct}%)"),
            Effort::Med,
            "Nouveau prix + notaire proportionnel",
            eur(price),
            AcquisitionInputs {
                purchase_price: price,
                notary_fees: notary,
                ..base.clone()
            },
        ));
    }

    // Rent increase, capped at +10%
    for step in [25u32, 50, 75] {
        let cap = base.monthly_rent * dec!(1.1);
        let rent = cap.min(base.monthly_rent + Decimal::from(step));
        if rent > base.monthly_rent {
            levers.push(Perturbation::new(
                format!("rent-{step}"),
                format!(
                    "Augmenter le loyer (+{} EUR)",
                    fixed(round_display(rent - base.monthly_rent, 0), 0)
                ),
                Effort::Med,
                "Cap +10%",
                eur(rent),
                AcquisitionInputs {
                    monthly_rent: rent,
                    ..base.clone()
                },
            ));
        }
    }

    for pts in [2u32, 5] {
        let vacancy = clamp(
            base.vacancy_rate - Decimal::from(pts),
            VACANCY_RANGE.0,
            VACANCY_RANGE.1,
        );
        if vacancy < base.vacancy_rate {
            levers.push(Perturbation::new(
                format!("vac-{pts}"),
                format!("Reduire la vacance (-{pts} pts)"),
                Effort::Med,
                "Optimisation remplissage",
                format!("{} %", fixed(vacancy, 1)),
                AcquisitionInputs {
                    vacancy_rate: vacancy,
                    ..base.clone()
                },
            ));
        }
    }

    if base.interest_rate > Decimal::ZERO {
        for step in [dec!(0.25), dec!(0.5)] {
            let rate = (base.interest_rate - step).max(Decimal::ZERO);
            levers.push(Perturbation::new(
                format!("rate-{step}"),
                format!("Optimiser le taux (-{} pt)", fixed(step, 2)),
                Effort::Med,
                "Renegociation/courtier",
                format!("{} %", fixed(rate, 2)),
                AcquisitionInputs {
                    interest_rate: rate,
                    ..base.clone()
                },
            ));
        }
    }

    for years in [2u32, 5] {
        let loan_years = base
            .loan_years
            .saturating_add(years)
            .clamp(LOAN_YEARS_RANGE.0, LOAN_YEARS_RANGE.1);
        levers.push(Perturbation::new(
            format!("dur-{years}"),
            format!("Allonger la duree (+{years} ans)"),
            Effort::Low,
            "Attention au cout total du credit",
            format!("{loan_years} ans"),
            AcquisitionInputs {
                loan_years,
                ..base.clone()
            },
        ));
    }

    for extra in [5000u32, 10000, 20000] {
        let down_payment = base.down_payment + Decimal::from(extra);
        levers.push(Perturbation::new(
            format!("apport-{extra}"),
            format!("Augmenter l'apport (+{})", eur(Decimal::from(extra))),
            Effort::High,
            "Mobilisation de tresorerie",
            eur(down_payment),
            AcquisitionInputs {
                down_payment,
                ..base.clone()
            },
        ));
    }

    for pct in [10u32, 20] {
        let charges = base.monthly_charges * (Decimal::ONE - Decimal::from(pct) / dec!(100));
        levers.push(Perturbation::new(
            format!("charges-{pct}"),
            format!("Reduire charges non recuperables (-{pct}%)"),
            Effort::Med,
            "Optimisation exploitation",
            eur(charges),
            AcquisitionInputs {
                monthly_charges: charges,
                ..base.clone()
            },
        ));
    }

    if base.management_rate > Decimal::ZERO {
        let management = (base.management_rate - dec!(2)).max(Decimal::ZERO);
        levers.push(Perturbation::new(
            "gestion-2",
            "Reduire la gestion (-2 pts)",
            Effort::Med,
            "Renegociation mandat",
            format!("{} %", fixed(management, 1)),
            AcquisitionInputs {
                management_rate: management,
                ..base.clone()
            },
        ));
        levers.push(Perturbation::new(
            "autogestion",
            "Passer en autogestion",
            Effort::High,
            "Temps de gestion supplementaire",
            "0 %",
            AcquisitionInputs {
                management_rate: Decimal::ZERO,
                ..base.clone()
            },
        ));
    }

    if let Some(real) = baseline.settings.tax_mode.real_counterpart() {
        let (id, title, assumptions, target) = match baseline.settings.tax_mode {
            TaxMode::NueMicroFoncier => (
                "tax-nue-reel",
                "Basculer Micro-foncier -> Reel foncier",
                "Si charges et interets eleves",
                "Reel foncier",
            ),
            _ => (
                "tax-lmnp-real",
                "Basculer LMNP Micro-BIC -> LMNP Reel",
                "Si amortissement pertinent",
                "LMNP Reel",
            ),
        };
        levers.push(
            Perturbation::new(id, title, Effort::Med, assumptions, target, base.clone())
                .with_settings(ProSettings {
                    tax_mode: real,
                    ..baseline.settings.clone()
                }),
        );
    }

    levers
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
