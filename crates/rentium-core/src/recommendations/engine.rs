use tracing::debug;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use super::levers::lever_candidates;
use super::strategy::{Baseline, Recommendation, RecommendationStrategy};
use super::targets::{NeutralPriceTarget, NeutralRentTarget};
use crate::acquisition::{AcquisitionInputs, FinancialResults, ProSettings};
use crate::scoring::Score;

pub const MAX_RECOMMENDATIONS: usize = 8;

/// All strategies for a baseline: the fixed levers first, then the break-even solvers.
pub fn strategies(baseline: &Baseline) -> Vec<Box<dyn RecommendationStrategy>> {
    let mut all: Vec<Box<dyn RecommendationStrategy>> = lever_candidates(baseline)
        .into_iter()
        .map(|lever| Box::new(lever) as Box<dyn RecommendationStrategy>)
        .collect();
    all.push(Box::new(NeutralRentTarget));
    all.push(Box::new(NeutralPriceTarget));
    all
}

/// Rank improvement levers for the analysed situation.
///
/// Sorted by score delta then cashflow delta, both descending; ties keep strategy order.
pub fn recommend(
    inputs: &AcquisitionInputs,
    settings: &ProSettings,
    results: &FinancialResults,
    score: &Score,
) -> Vec<Recommendation> {
    let baseline = Baseline {
        inputs: inputs.clone(),
        settings: settings.clone(),
        results: results.clone(),
        score: score.clone(),
    };
    let candidates = strategies(&baseline);

    let mut recommendations = evaluate(&candidates, &baseline);
    let applicable = recommendations.len();

    recommendations.sort_by(|a, b| {
        b.delta_score
            .cmp(&a.delta_score)
            .then_with(|| b.delta_cashflow_monthly.cmp(&a.delta_cashflow_monthly))
    });
    recommendations.truncate(MAX_RECOMMENDATIONS);

    debug!(
        strategies = candidates.len(),
        applicable,
        kept = recommendations.len(),
        "ranked recommendations"
    );
    recommendations
}

#[cfg(feature = "parallel")]
fn evaluate(
    candidates: &[Box<dyn RecommendationStrategy>],
    baseline: &Baseline,
) -> Vec<Recommendation> {
    candidates
        .par_iter()
        .filter_map(|strategy| strategy.recommend(baseline))
        .collect()
}

#[cfg(not(feature = "parallel"))]
fn evaluate(
    candidates: &[Box<dyn RecommendationStrategy>],
    baseline: &Baseline,
) -> Vec<Recommendation> {
    candidates
        .iter()
        .filter_map(|strategy| strategy.recommend(baseline))
        .collect()
}
