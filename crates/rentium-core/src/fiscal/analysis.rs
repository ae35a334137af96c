use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::regime::{taxable_base, TaxMode};
use crate::acquisition::amortization::{build_schedule, first_year_interest};
use crate::acquisition::{AcquisitionInputs, FinancialResults, ProSettings};
use crate::types::{Money, Rate};

/// Year-one tax position under every regime, with the selected one applied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FiscalAnalysis {
    pub mode: TaxMode,
    /// (marginal + social) / 100, or 0 without a tax profile
    pub tax_rate: Rate,
    pub has_tax_profile: bool,
    pub taxable_lmnp_micro: Money,
    pub taxable_lmnp_real: Money,
    pub taxable_nue_micro_foncier: Money,
    pub taxable_nue_reel_foncier: Money,
    pub selected_tax: Money,
    pub selected_taxable_base: Money,
    pub annual_cashflow_after_tax: Money,
}

impl FiscalAnalysis {
    pub fn taxable_for(&self, mode: TaxMode) -> Money {
        match mode {
            TaxMode::LmnpMicro => self.taxable_lmnp_micro,
            TaxMode::LmnpReal => self.taxable_lmnp_real,
            TaxMode::NueMicroFoncier => self.taxable_nue_micro_foncier,
            TaxMode::NueReelFoncier => self.taxable_nue_reel_foncier,
        }
    }

    pub fn monthly_cashflow_after_tax(&self) -> Money {
        self.annual_cashflow_after_tax / Decimal::from(12)
    }
}

/// Compute the taxable base under each regime and the tax due under the selected one.
///
/// Deductible interest is the first year of the amortization schedule.
pub fn analyze_fiscal(
    inputs: &AcquisitionInputs,
    results: &FinancialResults,
    settings: &ProSettings,
) -> FiscalAnalysis {
    let has_tax_profile = settings.has_tax_profile();
    let tax_rate = settings.tax_rate();

    let schedule = build_schedule(
        results.loan_amount,
        inputs.interest_rate,
        inputs.loan_years,
        results.monthly_payment,
    );
    let interest_year1 = first_year_interest(&schedule);

    let base = |mode: TaxMode| {
        taxable_base(
            mode,
            results.annual_collected_rent,
            results.annual_operating_charges,
            interest_year1,
            settings.annual_depreciation,
        )
    };

    let mode = settings.tax_mode;
    let selected_taxable_base = base(mode);
    let selected_tax = if has_tax_profile {
        selected_taxable_base * tax_rate
    } else {
        Decimal::ZERO
    };

    FiscalAnalysis {
        mode,
        tax_rate,
        has_tax_profile,
        taxable_lmnp_micro: base(TaxMode::LmnpMicro),
        taxable_lmnp_real: base(TaxMode::LmnpReal),
        taxable_nue_micro_foncier: base(TaxMode::NueMicroFoncier),
        taxable_nue_reel_foncier: base(TaxMode::NueReelFoncier),
        selected_tax,
        selected_taxable_base,
        annual_cashflow_after_tax: results.annual_cashflow - selected_tax,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::acquisition::compute_results;
    use rust_decimal_macros::dec;

    fn debt_free() -> AcquisitionInputs {
        AcquisitionInputs {
            purchase_price: dec!(100000),
            down_payment: dec!(100000),
            loan_years: 20,
            monthly_rent: dec!(1000),
            monthly_charges: dec!(100),
            ..Default::default()
        }
    }

    fn with_profile(mode: TaxMode) -> ProSettings {
        ProSettings {
            tax_mode: mode,
            marginal_tax_rate: Some(dec!(30)),
            social_tax_rate: dec!(17.2),
            annual_depreciation: dec!(2000),
            ..Default::default()
        }
    }

    #[test]
    fn test_micro_bic_tax() {
        let inputs = debt_free();
        let results = compute_results(&inputs);
        let fiscal = analyze_fiscal(&inputs, &results, &with_profile(TaxMode::LmnpMicro));

        assert_eq!(fiscal.tax_rate, dec!(0.472));
        assert_eq!(fiscal.taxable_lmnp_micro, dec!(6000));
        assert_eq!(fiscal.selected_taxable_base, dec!(6000));
        // 6000 * 0.472
        assert_eq!(fiscal.selected_tax, dec!(2832));
        // 12000 - 1200 - 2832
        assert_eq!(fiscal.annual_cashflow_after_tax, dec!(7968));
        assert_eq!(fiscal.monthly_cashflow_after_tax(), dec!(664));
    }

    #[test]
    fn test_all_bases_without_debt() {
        let inputs = debt_free();
        let results = compute_results(&inputs);
        let fiscal = analyze_fiscal(&inputs, &results, &with_profile(TaxMode::NueReelFoncier));

        assert_eq!(fiscal.taxable_lmnp_real, dec!(8800));
        assert_eq!(fiscal.taxable_nue_micro_foncier, dec!(8400));
        assert_eq!(fiscal.taxable_nue_reel_foncier, dec!(10800));
        assert_eq!(fiscal.selected_taxable_base, fiscal.taxable_for(TaxMode::NueReelFoncier));
    }

    #[test]
    fn test_no_tax_profile_forces_zero_tax() {
        let inputs = debt_free();
        let results = compute_results(&inputs);
        let settings = ProSettings {
            marginal_tax_rate: None,
            ..with_profile(TaxMode::NueMicroFoncier)
        };
        let fiscal = analyze_fiscal(&inputs, &results, &settings);

        assert!(!fiscal.has_tax_profile);
        assert_eq!(fiscal.tax_rate, Decimal::ZERO);
        assert_eq!(fiscal.selected_tax, Decimal::ZERO);
        // the base is still reported
        assert_eq!(fiscal.selected_taxable_base, dec!(8400));
        assert_eq!(fiscal.annual_cashflow_after_tax, results.annual_cashflow);
    }

    #[test]
    fn test_real_regime_deducts_first_year_interest() {
        let inputs = AcquisitionInputs {
            down_payment: dec!(0),
            interest_rate: dec!(4),
            ..debt_free()
        };
        let results = compute_results(&inputs);
        let fiscal = analyze_fiscal(&inputs, &results, &with_profile(TaxMode::NueReelFoncier));

        let schedule = build_schedule(
            results.loan_amount,
            inputs.interest_rate,
            inputs.loan_years,
            results.monthly_payment,
        );
        let expected = dec!(10800) - schedule[0].interest;
        assert!((fiscal.taxable_nue_reel_foncier - expected).abs() < dec!(0.000001));
        assert!((fiscal.taxable_lmnp_real - (expected - dec!(2000))).abs() < dec!(0.000001));
        assert!(fiscal.taxable_nue_reel_foncier < dec!(10800));
    }
}
