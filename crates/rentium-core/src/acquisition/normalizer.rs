use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::inputs::{AcquisitionInputs, ProSettings};
use crate::types::{clamp, Percent};

pub const VACANCY_RANGE: (Percent, Percent) = (dec!(0), dec!(50));
pub const MANAGEMENT_RANGE: (Percent, Percent) = (dec!(0), dec!(20));
pub const EXIT_COST_RANGE: (Percent, Percent) = (dec!(0), dec!(30));
pub const PROJECTION_YEARS_RANGE: (u32, u32) = (1, 35);

/// 2026 market averages for a 20-year fixed-rate mortgage.
pub const AVERAGE_INTEREST_RATE_2026: Percent = dec!(3.1);
pub const AVERAGE_INSURANCE_RATE_2026: Percent = dec!(0.34);

// ---------------------------------------------------------------------------
// Unknown-field catalog
// ---------------------------------------------------------------------------

/// Fields the investor may leave as "I don't know".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnknownField {
    #[serde(alias = "vacancyRate")]
    VacancyRate,
    #[serde(alias = "managementRate")]
    ManagementRate,
    #[serde(alias = "monthlyCharges")]
    MonthlyCharges,
    #[serde(alias = "propertyTax")]
    PropertyTax,
    #[serde(alias = "annualMaintenance")]
    AnnualMaintenance,
}

impl UnknownField {
    /// Catalog order, which is also the order defaults are reported in.
    pub const CATALOG: [UnknownField; 5] = [
        UnknownField::VacancyRate,
        UnknownField::ManagementRate,
        UnknownField::MonthlyCharges,
        UnknownField::PropertyTax,
        UnknownField::AnnualMaintenance,
    ];

    pub fn default_value(self) -> Decimal {
        match self {
            UnknownField::VacancyRate => dec!(8),
            UnknownField::ManagementRate => dec!(7),
            UnknownField::MonthlyCharges => dec!(110),
            UnknownField::PropertyTax => dec!(1300),
            UnknownField::AnnualMaintenance => dec!(1000),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            UnknownField::VacancyRate => "Vacance locative",
            UnknownField::ManagementRate => "Gestion locative",
            UnknownField::MonthlyCharges => "Charges non recuperables",
            UnknownField::PropertyTax => "Taxe fonciere",
            UnknownField::AnnualMaintenance => "Entretien",
        }
    }

    pub fn unit(self) -> &'static str {
        match self {
            UnknownField::VacancyRate | UnknownField::ManagementRate => "%",
            UnknownField::MonthlyCharges => "EUR/mois",
            UnknownField::PropertyTax | UnknownField::AnnualMaintenance => "EUR/an",
        }
    }

    fn apply_default(self, inputs: &mut AcquisitionInputs) {
        let value = self.default_value();
        match self {
            UnknownField::VacancyRate => inputs.vacancy_rate = value,
            UnknownField::ManagementRate => inputs.management_rate = value,
            UnknownField::MonthlyCharges => inputs.monthly_charges = value,
            UnknownField::PropertyTax => inputs.property_tax = value,
            UnknownField::AnnualMaintenance => inputs.annual_maintenance = value,
        }
    }
}

/// How much of the record was typed rather than defaulted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    Elevee,
    Moyenne,
    Faible,
}

impl Confidence {
    pub fn from_defaulted_count(count: usize) -> Self {
        match count {
            0 => Confidence::Elevee,
            1 | 2 => Confidence::Moyenne,
            _ => Confidence::Faible,
        }
    }
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Confidence::Elevee => write!(f, "elevee"),
            Confidence::Moyenne => write!(f, "moyenne"),
            Confidence::Faible => write!(f, "faible"),
        }
    }
}

// ---------------------------------------------------------------------------
// Normalized record
// ---------------------------------------------------------------------------

/// A defaulted field as shown to the investor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assumption {
    pub field: UnknownField,
    pub label: String,
    pub value: Decimal,
    pub unit: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputMeta {
    pub unknown_fields: Vec<UnknownField>,
    pub confidence: Confidence,
    pub assumptions: Vec<Assumption>,
    /// `"<label>: <value> <unit>"` entries joined by `" | "`; empty when nothing was defaulted.
    pub assumptions_text: String,
}

impl InputMeta {
    pub fn defaulted_count(&self) -> usize {
        self.unknown_fields.len()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedInputs {
    pub inputs: AcquisitionInputs,
    pub meta: InputMeta,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Substitute catalog defaults for unknown fields, then clamp rates to their domains.
pub fn normalize_inputs(raw: &AcquisitionInputs, unknown: &[UnknownField]) -> NormalizedInputs {
    let mut inputs = raw.clone();
    let mut unknown_fields = Vec::new();

    for field in UnknownField::CATALOG {
        if unknown.contains(&field) {
            field.apply_default(&mut inputs);
            unknown_fields.push(field);
        }
    }

    inputs.vacancy_rate = clamp(inputs.vacancy_rate, VACANCY_RANGE.0, VACANCY_RANGE.1);
    inputs.management_rate = clamp(
        inputs.management_rate,
        MANAGEMENT_RANGE.0,
        MANAGEMENT_RANGE.1,
    );

    let assumptions: Vec<Assumption> = unknown_fields
        .iter()
        .map(|&field| Assumption {
            field,
            label: field.label().to_string(),
            value: field.default_value(),
            unit: field.unit().to_string(),
        })
        .collect();

    let assumptions_text = assumptions
        .iter()
        .map(|a| format!("{}: {} {}", a.label, a.value, a.unit))
        .collect::<Vec<_>>()
        .join(" | ");

    NormalizedInputs {
        meta: InputMeta {
            confidence: Confidence::from_defaulted_count(unknown_fields.len()),
            unknown_fields,
            assumptions,
            assumptions_text,
        },
        inputs,
    }
}

pub fn normalize_settings(settings: &ProSettings) -> ProSettings {
    let mut settings = settings.clone();
    settings.projection_years = settings
        .projection_years
        .clamp(PROJECTION_YEARS_RANGE.0, PROJECTION_YEARS_RANGE.1);
    settings.exit_cost_rate = clamp(
        settings.exit_cost_rate,
        EXIT_COST_RANGE.0,
        EXIT_COST_RANGE.1,
    );
    settings
}

/// Prefill the loan and insurance rates with the 2026 market averages.
pub fn apply_average_rates(inputs: &AcquisitionInputs) -> AcquisitionInputs {
    AcquisitionInputs {
        interest_rate: AVERAGE_INTEREST_RATE_2026,
        insurance_rate: AVERAGE_INSURANCE_RATE_2026,
        ..inputs.clone()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn typed_inputs() -> AcquisitionInputs {
        AcquisitionInputs {
            purchase_price: dec!(150000),
            vacancy_rate: dec!(4),
            management_rate: dec!(6),
            monthly_charges: dec!(40),
            property_tax: dec!(900),
            annual_maintenance: dec!(500),
            ..Default::default()
        }
    }

    #[test]
    fn test_rates_clamped_to_domain() {
        let raw = AcquisitionInputs {
            vacancy_rate: dec!(75),
            management_rate: dec!(-3),
            ..typed_inputs()
        };
        let out = normalize_inputs(&raw, &[]);
        assert_eq!(out.inputs.vacancy_rate, dec!(50));
        assert_eq!(out.inputs.management_rate, dec!(0));
        assert_eq!(out.meta.confidence, Confidence::Elevee);
        assert!(out.meta.assumptions_text.is_empty());
    }

    #[test]
    fn test_unknown_fields_take_catalog_defaults() {
        let out = normalize_inputs(
            &typed_inputs(),
            &[UnknownField::PropertyTax, UnknownField::VacancyRate],
        );
        assert_eq!(out.inputs.vacancy_rate, dec!(8));
        assert_eq!(out.inputs.property_tax, dec!(1300));
        // typed values survive
        assert_eq!(out.inputs.management_rate, dec!(6));
        assert_eq!(out.inputs.monthly_charges, dec!(40));

        // reported in catalog order, not request order
        assert_eq!(
            out.meta.unknown_fields,
            vec![UnknownField::VacancyRate, UnknownField::PropertyTax]
        );
        assert_eq!(out.meta.confidence, Confidence::Moyenne);
        assert_eq!(
            out.meta.assumptions_text,
            "Vacance locative: 8 % | Taxe fonciere: 1300 EUR/an"
        );
    }

    #[test]
    fn test_confidence_tiers() {
        assert_eq!(Confidence::from_defaulted_count(0), Confidence::Elevee);
        assert_eq!(Confidence::from_defaulted_count(1), Confidence::Moyenne);
        assert_eq!(Confidence::from_defaulted_count(2), Confidence::Moyenne);
        assert_eq!(Confidence::from_defaulted_count(3), Confidence::Faible);
        assert_eq!(Confidence::from_defaulted_count(5), Confidence::Faible);

        let out = normalize_inputs(&typed_inputs(), &UnknownField::CATALOG);
        assert_eq!(out.meta.confidence, Confidence::Faible);
        assert_eq!(out.meta.assumptions.len(), 5);
        assert_eq!(out.inputs.annual_maintenance, dec!(1000));
        assert_eq!(out.inputs.monthly_charges, dec!(110));
    }

    #[test]
    fn test_duplicate_unknown_flags_count_once() {
        let out = normalize_inputs(
            &typed_inputs(),
            &[UnknownField::MonthlyCharges, UnknownField::MonthlyCharges],
        );
        assert_eq!(out.meta.defaulted_count(), 1);
    }

    #[test]
    fn test_unknown_field_accepts_form_names() {
        let fields: Vec<UnknownField> =
            serde_json::from_str(r#"["vacancyRate", "property_tax"]"#).unwrap();
        assert_eq!(
            fields,
            vec![UnknownField::VacancyRate, UnknownField::PropertyTax]
        );
    }

    #[test]
    fn test_settings_clamped() {
        let settings = ProSettings {
            projection_years: 0,
            exit_cost_rate: dec!(45),
            ..Default::default()
        };
        let out = normalize_settings(&settings);
        assert_eq!(out.projection_years, 1);
        assert_eq!(out.exit_cost_rate, dec!(30));

        let long = normalize_settings(&ProSettings {
            projection_years: 60,
            ..Default::default()
        });
        assert_eq!(long.projection_years, 35);
    }

    #[test]
    fn test_average_rates_preset() {
        let out = apply_average_rates(&typed_inputs());
        assert_eq!(out.interest_rate, dec!(3.1));
        assert_eq!(out.insurance_rate, dec!(0.34));
        assert_eq!(out.purchase_price, dec!(150000));
    }
}
