//! Rounding helpers shared by the calculation stages.
//!
//! Monetary results are kept in cents (two decimal places, half away from
//! zero); effective rates keep four decimal places.

use rust_decimal::{Decimal, RoundingStrategy};

/// Number of decimal places kept for monetary values.
pub const MONEY_SCALE: u32 = 2;

/// Number of decimal places kept for effective rates.
pub const RATE_SCALE: u32 = 4;

/// Rounds a monetary value to cents, half away from zero, always with two places.
///
/// ```
/// use folha_engine::calculation::round_money;
/// use rust_decimal::Decimal;
///
/// assert_eq!(round_money(Decimal::new(518819, 3)).to_string(), "518.82");
/// assert_eq!(round_money(Decimal::ZERO).to_string(), "0.00");
/// ```
pub fn round_money(value: Decimal) -> Decimal {
    let mut rounded = value.round_dp_with_strategy(MONEY_SCALE, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(MONEY_SCALE);
    rounded
}

/// Truncates a monetary value to cents, so the result never exceeds the input.
pub fn floor_money(value: Decimal) -> Decimal {
    let mut truncated = value.round_dp_with_strategy(MONEY_SCALE, RoundingStrategy::ToZero);
    truncated.rescale(MONEY_SCALE);
    truncated
}

/// Returns `numerator / denominator` rounded to four places, or zero when the
/// denominator is zero.
pub fn effective_rate(numerator: Decimal, denominator: Decimal) -> Decimal {
    if denominator.is_zero() {
        return Decimal::ZERO;
    }
    (numerator / denominator).round_dp_with_strategy(RATE_SCALE, RoundingStrategy::MidpointAwayFromZero)
}
