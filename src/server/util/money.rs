//! Fixed-point conversions between stored integer minor units and `Decimal`.
//!
//! Prices are stored as cents and ratings as hundredths; both are exposed to the rest
//! of the server as `Decimal` values with two decimal places.

use rust_decimal::{Decimal, RoundingStrategy};

/// Number of decimal places kept for prices and ratings.
pub const SCALE: u32 = 2;

/// Converts stored minor units (cents, hundredths) to a two-place decimal.
pub fn from_minor(units: i64) -> Decimal {
    Decimal::new(units, SCALE)
}

/// Rounds half away from zero to two places.
pub fn round2(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(SCALE, RoundingStrategy::MidpointAwayFromZero)
}

/// Converts a decimal to minor units, rounding to two places first.
///
/// # Returns
/// - `Some(i64)` - Value in minor units
/// - `None` - Value does not fit in an `i64`
pub fn to_minor(value: Decimal) -> Option<i64> {
    let mut rounded = round2(value);
    rounded.rescale(SCALE);
    i64::try_from(rounded.mantissa()).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_cents_both_ways() {
        assert_eq!(from_minor(12_550).to_string(), "125.50");
        assert_eq!(to_minor(Decimal::new(12_550, 2)), Some(12_550));
        assert_eq!(to_minor(Decimal::from(5)), Some(500));
    }

    #[test]
    fn rounds_half_away_from_zero() {
        assert_eq!(round2(Decimal::new(46_665, 4)).to_string(), "4.67");
        assert_eq!(round2(Decimal::new(1_005, 3)).to_string(), "1.01");
        assert_eq!(to_minor(Decimal::new(12_345, 4)), Some(123));
    }
}
