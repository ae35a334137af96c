use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::amortization::{annuity_payment, build_schedule, AmortizationYear};
use super::inputs::AcquisitionInputs;
use crate::types::{Money, Percent};

/// DSCR reported when there is no debt service to cover.
pub const DSCR_NO_DEBT: Decimal = dec!(999);

/// Year-one financial snapshot of an acquisition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialResults {
    /// Price + notary fees + works
    pub total_cost: Money,
    pub loan_amount: Money,
    /// Loan instalment excluding insurance
    pub monthly_payment: Money,
    pub monthly_insurance: Money,
    pub annual_insurance: Money,
    /// Rent net of vacancy
    pub annual_collected_rent: Money,
    /// Charges, property tax, maintenance and management fee (no insurance)
    pub annual_operating_charges: Money,
    /// Operating charges plus borrower insurance
    pub annual_charges: Money,
    /// Loan payments plus insurance
    pub annual_debt_service: Money,
    pub annual_cashflow: Money,
    pub monthly_cashflow: Money,
    /// Gross rent over total cost, in percent (0 when total cost is 0)
    pub gross_yield: Percent,
    /// Collected rent net of all charges over total cost, in percent (0 when total cost is 0)
    pub net_yield: Percent,
    pub noi_annual: Money,
    /// NOI / debt service; `DSCR_NO_DEBT` when there is no debt service
    pub dscr: Decimal,
    /// Loan over total cost as a fraction (0 when total cost is 0)
    pub ltv: Decimal,
    /// Annual cashflow over down payment, in percent; `None` without a down payment
    pub cash_on_cash: Option<Percent>,
}

/// Derive the financial snapshot from normalized inputs.
pub fn compute_results(inputs: &AcquisitionInputs) -> FinancialResults {
    let hundred = dec!(100);
    let twelve = dec!(12);

    let total_cost = inputs.purchase_price + inputs.notary_fees + inputs.works;
    let loan_amount = (total_cost - inputs.down_payment).max(Decimal::ZERO);
    let months = inputs.loan_years.saturating_mul(12).max(1);

    let monthly_payment = annuity_payment(loan_amount, inputs.interest_rate, months);
    let monthly_insurance = loan_amount * (inputs.insurance_rate / hundred) / twelve;
    let annual_insurance = monthly_insurance * twelve;

    let annual_collected_rent =
        inputs.monthly_rent * twelve * (Decimal::ONE - inputs.vacancy_rate / hundred);
    let annual_operating_charges = inputs.monthly_charges * twelve
        + inputs.property_tax
        + inputs.annual_maintenance
        + annual_collected_rent * (inputs.management_rate / hundred);
    let annual_charges = annual_operating_charges + annual_insurance;
    let annual_debt_service = (monthly_payment + monthly_insurance) * twelve;

    let noi_annual = annual_collected_rent - annual_operating_charges;
    let annual_cashflow = noi_annual - annual_debt_service;
    let monthly_cashflow = annual_cashflow / twelve;

    let (gross_yield, net_yield, ltv) = if total_cost > Decimal::ZERO {
        (
            inputs.monthly_rent * twelve / total_cost * hundred,
            (annual_collected_rent - annual_charges) / total_cost * hundred,
            loan_amount / total_cost,
        )
    } else {
        (Decimal::ZERO, Decimal::ZERO, Decimal::ZERO)
    };

    let dscr = if annual_debt_service > Decimal::ZERO {
        noi_annual / annual_debt_service
    } else {
        DSCR_NO_DEBT
    };

    let cash_on_cash = if inputs.down_payment > Decimal::ZERO {
        Some(annual_cashflow / inputs.down_payment * hundred)
    } else {
        None
    };

    FinancialResults {
        total_cost,
        loan_amount,
        monthly_payment,
        monthly_insurance,
        annual_insurance,
        annual_collected_rent,
        annual_operating_charges,
        annual_charges,
        annual_debt_service,
        annual_cashflow,
        monthly_cashflow,
        gross_yield,
        net_yield,
        noi_annual,
        dscr,
        ltv,
        cash_on_cash,
    }
}

/// Amortization table for the financed part of an acquisition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanSchedule {
    pub loan_amount: Money,
    pub monthly_payment: Money,
    pub monthly_insurance: Money,
    /// Interest over the whole term
    pub total_interest: Money,
    pub years: Vec<AmortizationYear>,
}

pub fn loan_schedule(inputs: &AcquisitionInputs) -> LoanSchedule {
    let results = compute_results(inputs);
    let years = build_schedule(
        results.loan_amount,
        inputs.interest_rate,
        inputs.loan_years,
        results.monthly_payment,
    );
    LoanSchedule {
        loan_amount: results.loan_amount,
        monthly_payment: results.monthly_payment,
        monthly_insurance: results.monthly_insurance,
        total_interest: years.iter().map(|y| y.interest).sum(),
        years,
    }
}
