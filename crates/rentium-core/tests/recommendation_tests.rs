use rentium_core::acquisition::{compute_results, AcquisitionInputs, ProSettings};
use rentium_core::fiscal::{analyze_fiscal, TaxMode};
use rentium_core::recommendations::targets::{neutral_price, neutral_rent};
use rentium_core::recommendations::{
    recommend, strategies, Baseline, Effort, Recommendation, RecommendationStrategy,
    MAX_RECOMMENDATIONS,
};
use rentium_core::scoring::score;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn run(inputs: &AcquisitionInputs, settings: &ProSettings) -> Vec<Recommendation> {
    let results = compute_results(inputs);
    let fiscal = analyze_fiscal(inputs, &results, settings);
    let s = score(inputs, &results, settings, &fiscal);
    recommend(inputs, settings, &results, &s)
}

/// Loses money at the asking price but breaks even well above half of it.
fn overpriced_flat() -> AcquisitionInputs {
    AcquisitionInputs {
        purchase_price: dec!(200000),
        notary_fees: dec!(16000),
        works: dec!(0),
        down_payment: dec!(20000),
        loan_years: 20,
        interest_rate: dec!(3.1),
        insurance_rate: dec!(0.34),
        monthly_rent: dec!(1100),
        vacancy_rate: dec!(0),
        management_rate: dec!(0),
        monthly_charges: dec!(0),
        property_tax: dec!(1000),
        annual_maintenance: dec!(0),
    }
}

// ===========================================================================
// Ranking
// ===========================================================================

#[test]
fn test_ranked_descending_and_truncated() {
    let recos = run(&overpriced_flat(), &ProSettings::default());
    assert!(recos.len() <= MAX_RECOMMENDATIONS);
    assert!(!recos.is_empty());
    for pair in recos.windows(2) {
        assert!(
            (pair[0].delta_score, pair[0].delta_cashflow_monthly)
                >= (pair[1].delta_score, pair[1].delta_cashflow_monthly),
            "{} ranked before {}",
            pair[0].id,
            pair[1].id
        );
    }
}

#[test]
fn test_recommendations_are_deterministic() {
    let inputs = overpriced_flat();
    let settings = ProSettings {
        tax_mode: TaxMode::LmnpMicro,
        marginal_tax_rate: Some(dec!(30)),
        ..Default::default()
    };
    assert_eq!(run(&inputs, &settings), run(&inputs, &settings));
}

#[test]
fn test_message_format() {
    let recos = run(&overpriced_flat(), &ProSettings::default());
    for r in recos.iter().filter(|r| !r.id.starts_with("neutral-")) {
        assert!(r.message.starts_with(&format!("{} -> ", r.title)), "{}", r.message);
        assert!(r.message.contains(" € / mois, "), "{}", r.message);
        assert!(r.message.ends_with(" pts"), "{}", r.message);
    }
}

#[test]
fn test_larger_down_payment_improves_cashflow() {
    let recos = run(&overpriced_flat(), &ProSettings::default());
    if let Some(apport) = recos.iter().find(|r| r.id == "apport-20000") {
        assert_eq!(apport.effort, Effort::High);
        assert!(apport.delta_cashflow_monthly > Decimal::ZERO);
        assert_eq!(apport.target_value, "40 000 €");
    }
}

// ===========================================================================
// Scenario D: break-even price is reproducible
// ===========================================================================

#[test]
fn test_price_target_identical_across_runs() {
    let inputs = overpriced_flat();
    let first = neutral_price(&inputs).unwrap();
    let second = neutral_price(&inputs).unwrap();
    assert_eq!(first, second);
    assert!(first < inputs.purchase_price);
    assert_eq!(first.fract(), Decimal::ZERO);
}

#[test]
fn test_price_target_in_ranked_list_when_losing_money() {
    let inputs = overpriced_flat();
    let results = compute_results(&inputs);
    assert!(results.monthly_cashflow < Decimal::ZERO);

    let recos = run(&inputs, &ProSettings::default());
    // solver entries carry no score delta, so they may be ranked out; check the solvers directly
    let target = neutral_rent(&inputs, results.monthly_cashflow).unwrap();
    assert_eq!(target, inputs.monthly_rent - results.monthly_cashflow);
    if let Some(price) = recos.iter().find(|r| r.id == "neutral-price") {
        assert_eq!(price.delta_cashflow_monthly, Decimal::ZERO);
        assert!(price.message.starts_with("Prix cible estime: "));
    }
}

// ===========================================================================
// Scenario E: no-op perturbation
// ===========================================================================

#[test]
fn test_noop_candidate_reports_zero_deltas() {
    // no non-recoverable charges: both charges levers leave the inputs as they are
    let inputs = AcquisitionInputs {
        monthly_charges: dec!(0),
        ..overpriced_flat()
    };
    let results = compute_results(&inputs);
    let settings = ProSettings::default();
    let fiscal = analyze_fiscal(&inputs, &results, &settings);
    let s = score(&inputs, &results, &settings, &fiscal);

    let baseline = Baseline {
        inputs: inputs.clone(),
        settings: settings.clone(),
        results,
        score: s,
    };
    let all: Vec<Box<dyn RecommendationStrategy>> = strategies(&baseline);
    let charges = all.iter().find(|st| st.id() == "charges-20").unwrap();
    let reco = charges.recommend(&baseline).unwrap();
    assert_eq!(reco.delta_cashflow_monthly, Decimal::ZERO);
    assert_eq!(reco.delta_score, Decimal::ZERO);
}

#[test]
fn test_solvers_silent_when_cashflow_positive() {
    let inputs = AcquisitionInputs {
        down_payment: dec!(216000),
        ..overpriced_flat()
    };
    let recos = run(&inputs, &ProSettings::default());
    assert!(recos.iter().all(|r| !r.id.starts_with("neutral-")));
}
