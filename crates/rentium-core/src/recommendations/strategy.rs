use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::acquisition::{AcquisitionInputs, FinancialResults, ProSettings};
use crate::scoring::Score;
use crate::types::Money;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Effort {
    Low,
    Med,
    High,
}

impl fmt::Display for Effort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Effort::Low => write!(f, "Low"),
            Effort::Med => write!(f, "Med"),
            Effort::High => write!(f, "High"),
        }
    }
}

/// One ranked improvement lever, with its effect measured against the baseline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub id: String,
    pub title: String,
    pub effort: Effort,
    pub assumptions: String,
    /// Display string for the value the lever aims at, e.g. `190 000 €` or `6.0 %`
    pub target_value: String,
    pub delta_cashflow_monthly: Money,
    pub delta_score: Decimal,
    pub message: String,
}

/// The analysed situation every strategy is measured against.
#[derive(Debug, Clone)]
pub struct Baseline {
    pub inputs: AcquisitionInputs,
    pub settings: ProSettings,
    pub results: FinancialResults,
    pub score: Score,
}

/// A pure improvement lever. Returning `None` means "not applicable here".
pub trait RecommendationStrategy: Send + Sync {
    fn id(&self) -> &str;

    fn recommend(&self, baseline: &Baseline) -> Option<Recommendation>;
}
