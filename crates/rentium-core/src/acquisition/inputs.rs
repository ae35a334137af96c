use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::lenient;
use crate::fiscal::TaxMode;
use crate::types::{Money, Percent, Rate};

/// Acquisition record as entered by the investor. One snapshot per computation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AcquisitionInputs {
    /// Net seller price
    #[serde(deserialize_with = "lenient::decimal")]
    pub purchase_price: Money,
    /// Notary fees (frais de notaire)
    #[serde(deserialize_with = "lenient::decimal")]
    pub notary_fees: Money,
    /// Renovation works budget
    #[serde(deserialize_with = "lenient::decimal")]
    pub works: Money,
    /// Cash contributed by the investor (apport)
    #[serde(deserialize_with = "lenient::decimal")]
    pub down_payment: Money,
    /// Loan term in whole years
    #[serde(deserialize_with = "lenient::count")]
    pub loan_years: u32,
    /// Nominal annual interest rate, in percent
    #[serde(deserialize_with = "lenient::decimal")]
    pub interest_rate: Percent,
    /// Annual borrower insurance, in percent of the loan amount
    #[serde(deserialize_with = "lenient::decimal")]
    pub insurance_rate: Percent,
    #[serde(deserialize_with = "lenient::decimal")]
    pub monthly_rent: Money,
    /// Vacancy, in percent of the year. Domain [0, 50].
    #[serde(deserialize_with = "lenient::decimal")]
    pub vacancy_rate: Percent,
    /// Letting agent fee, in percent of collected rent. Domain [0, 20].
    #[serde(deserialize_with = "lenient::decimal")]
    pub management_rate: Percent,
    /// Non-recoverable monthly charges
    #[serde(deserialize_with = "lenient::decimal")]
    pub monthly_charges: Money,
    /// Annual property tax (taxe fonciere)
    #[serde(deserialize_with = "lenient::decimal")]
    pub property_tax: Money,
    #[serde(deserialize_with = "lenient::decimal")]
    pub annual_maintenance: Money,
}

/// Tax and long-horizon assumptions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProSettings {
    pub tax_mode: TaxMode,
    /// Marginal income tax bracket (TMI). `None` means no tax profile.
    #[serde(deserialize_with = "lenient::optional_decimal")]
    pub marginal_tax_rate: Option<Percent>,
    /// Social levies (prelevements sociaux)
    #[serde(deserialize_with = "lenient::decimal")]
    pub social_tax_rate: Percent,
    #[serde(deserialize_with = "lenient::decimal")]
    pub annual_depreciation: Money,
    /// Domain [1, 35]
    #[serde(deserialize_with = "lenient::count")]
    pub projection_years: u32,
    #[serde(deserialize_with = "lenient::decimal")]
    pub annual_rent_growth: Percent,
    #[serde(deserialize_with = "lenient::decimal")]
    pub annual_charge_growth: Percent,
    #[serde(deserialize_with = "lenient::decimal")]
    pub annual_property_growth: Percent,
    /// Agency and exit costs on resale, in percent. Domain [0, 30].
    #[serde(deserialize_with = "lenient::decimal")]
    pub exit_cost_rate: Percent,
}

impl Default for ProSettings {
    fn default() -> Self {
        Self {
            tax_mode: TaxMode::default(),
            marginal_tax_rate: None,
            social_tax_rate: dec!(17.2),
            annual_depreciation: Decimal::ZERO,
            projection_years: 20,
            annual_rent_growth: Decimal::ZERO,
            annual_charge_growth: Decimal::ZERO,
            annual_property_growth: Decimal::ZERO,
            exit_cost_rate: Decimal::ZERO,
        }
    }
}

impl ProSettings {
    pub fn has_tax_profile(&self) -> bool {
        self.marginal_tax_rate.is_some()
    }

    /// Combined income + social tax rate as a fraction; zero without a tax profile.
    pub fn tax_rate(&self) -> Rate {
        match self.marginal_tax_rate {
            Some(marginal) => (marginal + self.social_tax_rate) / dec!(100),
            None => Decimal::ZERO,
        }
    }
}
