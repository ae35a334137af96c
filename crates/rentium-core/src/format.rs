//! Display helpers for French-facing messages (fr-FR conventions, plain spaces).

use rust_decimal::{Decimal, RoundingStrategy};

/// Round half away from zero, as shown to users.
pub fn round_display(value: Decimal, dp: u32) -> Decimal {
    let rounded = value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero);
    if rounded.is_zero() {
        // drop a negative zero
        Decimal::ZERO
    } else {
        rounded
    }
}

/// Fixed number of decimals, e.g. `fixed(dec!(0.5), 2) == "0.50"`.
pub fn fixed(value: Decimal, dp: u32) -> String {
    format!("{:.*}", dp as usize, round_display(value, dp))
}

/// Whole euros with a thousands separator: `12 345 €`.
pub fn eur(value: Decimal) -> String {
    let rounded = round_display(value, 0);
    let digits = rounded.abs().trunc().to_string();

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(' ');
        }
        grouped.push(ch);
    }

    if rounded.is_sign_negative() {
        format!("-{grouped} €")
    } else {
        format!("{grouped} €")
    }
}

/// `+120 €` / `-45 €`. The sign follows the unrounded value, so `-0.4` is `-0 €`.
pub fn signed_eur(value: Decimal) -> String {
    if value >= Decimal::ZERO {
        format!("+{}", eur(value))
    } else {
        format!("-{}", eur(value.abs()))
    }
}

/// Score deltas with one decimal: `+2.5` / `-1.0`
pub fn signed_points(value: Decimal) -> String {
    if value >= Decimal::ZERO {
        format!("+{}", fixed(value, 1))
    } else {
        format!("-{}", fixed(value.abs(), 1))
    }
}

/// `5.25 %`
pub fn percent(value: Decimal) -> String {
    format!("{} %", fixed(value, 2))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_eur_grouping() {
        assert_eq!(eur(dec!(0)), "0 €");
        assert_eq!(eur(dec!(950)), "950 €");
        assert_eq!(eur(dec!(5000)), "5 000 €");
        assert_eq!(eur(dec!(1234567.5)), "1 234 568 €");
        assert_eq!(eur(dec!(-45.4)), "-45 €");
        assert_eq!(eur(dec!(-0.4)), "0 €");
    }

    #[test]
    fn test_signed_helpers() {
        assert_eq!(signed_eur(dec!(120.2)), "+120 €");
        assert_eq!(signed_eur(dec!(-1500)), "-1 500 €");
        assert_eq!(signed_points(dec!(2.5)), "+2.5");
        assert_eq!(signed_points(dec!(0)), "+0.0");
        assert_eq!(signed_points(dec!(-1)), "-1.0");
    }

    #[test]
    fn test_small_negative_deltas_keep_their_sign() {
        assert_eq!(signed_eur(dec!(-0.4)), "-0 €");
        assert_eq!(signed_eur(dec!(-0.5)), "-1 €");
        assert_eq!(signed_eur(dec!(0.4)), "+0 €");
        assert_eq!(signed_points(dec!(-0.03)), "-0.0");
    }

    #[test]
    fn test_fixed_and_percent() {
        assert_eq!(fixed(dec!(0.25), 2), "0.25");
        assert_eq!(fixed(dec!(0.5), 2), "0.50");
        assert_eq!(fixed(dec!(7.35), 1), "7.4");
        assert_eq!(percent(dec!(5)), "5.00 %");
    }
}
