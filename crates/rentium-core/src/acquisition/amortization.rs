use rust_decimal::Decimal;
use rust_decimal::MathematicalOps;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::types::{Money, Percent, Rate};

/// Longest schedule ever simulated; loan terms beyond it are reported up to this year.
pub const MAX_SCHEDULE_YEARS: u32 = 100;

/// One calendar year of the loan, aggregated from twelve monthly instalments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmortizationYear {
    pub year: u32,
    /// Sum of the fixed monthly payments (insurance excluded)
    pub payment: Money,
    /// Sum of the interest part of those payments
    pub interest: Money,
    /// Outstanding principal at year end
    pub balance: Money,
}

/// Monthly rate from an annual percentage: r / 1200.
pub fn monthly_rate(annual_rate: Percent) -> Rate {
    annual_rate / dec!(1200)
}

/// Fixed monthly annuity: P * mr / (1 - (1 + mr)^-n), or P / n without interest.
///
/// When `(1 + mr)^n` exceeds the Decimal range the discount term is zero and the
/// payment is the interest-only limit `P * mr`.
pub fn annuity_payment(principal: Money, annual_rate: Percent, months: u32) -> Money {
    if principal <= Decimal::ZERO || months == 0 {
        return Decimal::ZERO;
    }

    let mr = monthly_rate(annual_rate);
    if mr > Decimal::ZERO {
        let interest_only = principal.saturating_mul(mr);
        match (Decimal::ONE + mr).checked_powi(i64::from(months)) {
            Some(compound) => {
                let discount = Decimal::ONE.checked_div(compound).unwrap_or(Decimal::ZERO);
                let denominator = Decimal::ONE - discount;
                interest_only.checked_div(denominator).unwrap_or(interest_only)
            }
            None => interest_only,
        }
    } else {
        principal / Decimal::from(months)
    }
}

/// Simulate the loan month by month and aggregate one entry per year.
///
/// Returns an empty schedule when there is nothing to amortize. Terms longer than
/// [`MAX_SCHEDULE_YEARS`] are cut at that year.
pub fn build_schedule(
    principal: Money,
    annual_rate: Percent,
    years: u32,
    monthly_payment: Money,
) -> Vec<AmortizationYear> {
    let years = years.min(MAX_SCHEDULE_YEARS);
    let months = years * 12;
    if principal <= Decimal::ZERO || months == 0 {
        return Vec::new();
    }

    let mr = monthly_rate(annual_rate);
    let mut balance = principal;
    let mut schedule: Vec<AmortizationYear> = Vec::with_capacity(years as usize);

    for month in 0..months {
        let interest = balance.saturating_mul(mr);
        let principal_paid = monthly_payment.saturating_sub(interest);
        balance = balance.saturating_sub(principal_paid).max(Decimal::ZERO);

        let year = month / 12 + 1;
        if schedule.len() < year as usize {
            schedule.push(AmortizationYear {
                year,
                payment: Decimal::ZERO,
                interest: Decimal::ZERO,
                balance: Decimal::ZERO,
            });
        }
        if let Some(entry) = schedule.last_mut() {
            entry.payment = entry.payment.saturating_add(monthly_payment);
            entry.interest = entry.interest.saturating_add(interest);
            entry.balance = balance;
        }
    }

    schedule
}

/// Interest paid during the first loan year, 0 for an empty schedule.
pub fn first_year_interest(schedule: &[AmortizationYear]) -> Money {
    schedule.first().map_or(Decimal::ZERO, |y| y.interest)
}
