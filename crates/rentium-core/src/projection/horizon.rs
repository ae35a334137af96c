use rust_decimal::Decimal;
use rust_decimal::MathematicalOps;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::acquisition::amortization::build_schedule;
use crate::acquisition::{AcquisitionInputs, FinancialResults, ProSettings};
use crate::fiscal::taxable_base;
use crate::types::Money;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// One year of the holding period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionRow {
    pub year: u32,
    /// Collected rent for the year
    pub rent: Money,
    /// Operating charges for the year
    pub charges: Money,
    /// Loan payments plus (constant) borrower insurance
    pub credit: Money,
    pub tax: Money,
    pub cashflow_after_tax: Money,
    pub cumulative_cashflow: Money,
    pub remaining_balance: Money,
    /// Resale value net of exit costs and loan payoff
    pub net_sale_value: Money,
    pub total_with_exit: Money,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Projection {
    pub rows: Vec<ProjectionRow>,
    /// Cumulative after-tax cashflow at the horizon
    pub total_cashflow: Money,
    /// Cumulative cashflow plus net resale value at the horizon
    pub total_with_exit: Money,
    pub horizon: u32,
}

// ---------------------------------------------------------------------------
// Projection
// ---------------------------------------------------------------------------

/// `base * factor^exponent`, saturating at the Decimal bounds.
fn compound(base: Money, factor: Decimal, exponent: u32) -> Money {
    match factor.checked_powi(i64::from(exponent)) {
        Some(growth) => base.saturating_mul(growth),
        None => base.saturating_mul(Decimal::MAX),
    }
}

/// Project after-tax cashflow and exit value year by year.
///
/// Rent and charges compound from year 1 (`(1+g)^(year-1)`); property value
/// compounds from acquisition (`(1+g)^year`). Borrower insurance is held at its
/// year-one amount for the whole horizon. Loan figures come from the amortization
/// schedule and drop to zero once the loan is repaid. Growth rates are not
/// bounded, so every figure saturates at the Decimal range instead of overflowing.
pub fn project(
    inputs: &AcquisitionInputs,
    results: &FinancialResults,
    settings: &ProSettings,
) -> Projection {
    let hundred = dec!(100);
    let rent_growth = Decimal::ONE + settings.annual_rent_growth / hundred;
    let charge_growth = Decimal::ONE + settings.annual_charge_growth / hundred;
    let property_growth = Decimal::ONE + settings.annual_property_growth / hundred;
    let exit_factor = Decimal::ONE - settings.exit_cost_rate / hundred;
    let tax_rate = settings.tax_rate();

    let schedule = build_schedule(
        results.loan_amount,
        inputs.interest_rate,
        inputs.loan_years,
        results.monthly_payment,
    );

    let horizon = settings.projection_years;
    let mut rows = Vec::with_capacity(horizon as usize);
    let mut cumulative_cashflow = Decimal::ZERO;

    for year in 1..=horizon {
        let rent = compound(results.annual_collected_rent, rent_growth, year - 1);
        let charges = compound(results.annual_operating_charges, charge_growth, year - 1);

        let (payment, interest, remaining_balance) = schedule
            .get((year - 1) as usize)
            .map_or((Decimal::ZERO, Decimal::ZERO, Decimal::ZERO), |y| {
                (y.payment, y.interest, y.balance)
            });
        let credit = payment.saturating_add(results.annual_insurance);

        let taxable = taxable_base(
            settings.tax_mode,
            rent,
            charges,
            interest,
            settings.annual_depreciation,
        );
        let tax = taxable.saturating_mul(tax_rate);

        let cashflow_after_tax = rent
            .saturating_sub(charges)
            .saturating_sub(credit)
            .saturating_sub(tax);
        cumulative_cashflow = cumulative_cashflow.saturating_add(cashflow_after_tax);

        let property_value = compound(results.total_cost, property_growth, year);
        let net_sale_value = property_value
            .saturating_mul(exit_factor)
            .saturating_sub(remaining_balance);

        rows.push(ProjectionRow {
            year,
            rent,
            charges,
            credit,
            tax,
            cashflow_after_tax,
            cumulative_cashflow,
            remaining_balance,
            net_sale_value,
            total_with_exit: cumulative_cashflow.saturating_add(net_sale_value),
        });
    }

    let (total_cashflow, total_with_exit) = rows
        .last()
        .map_or((Decimal::ZERO, Decimal::ZERO), |r| {
            (r.cumulative_cashflow, r.total_with_exit)
        });

    Projection {
        rows,
        total_cashflow,
        total_with_exit,
        horizon,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
