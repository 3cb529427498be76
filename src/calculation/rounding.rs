//! Rounding and bounding helpers shared by the calculators.

use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds an amount to whole VND, ties away from zero.
///
/// # Examples
///
/// ```
/// use salary_engine::calculation::round_vnd;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// assert_eq!(round_vnd(Decimal::from_str("2400000.5").unwrap()), Decimal::from(2_400_001));
/// assert_eq!(round_vnd(Decimal::from_str("2400000.49").unwrap()), Decimal::from(2_400_000));
/// ```
pub fn round_vnd(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

/// Clamps `value` into `[min, max]`.
///
/// Computed as `max(min, min(value, max))`, so `min` wins if the bounds cross.
pub fn clamp(value: Decimal, min: Decimal, max: Decimal) -> Decimal {
    min.max(value.min(max))
}

/// Formats a whole VND amount with `.` thousands separators ("5.000.000").
pub(crate) fn format_vnd(amount: Decimal) -> String {
    let rounded = round_vnd(amount);
    let digits = rounded.abs().trunc().to_string();

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(digit);
    }

    if rounded.is_sign_negative() && !rounded.is_zero() {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

/// Formats a rate fraction as a whole percentage ("5%").
pub(crate) fn format_percent(rate: Decimal) -> String {
    format!("{}%", (rate * Decimal::ONE_HUNDRED).round_dp(0).normalize())
}
