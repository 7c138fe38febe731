//! Night count and total price for a stay.

use rust_decimal::Decimal;

use crate::server::{
    error::booking::BookingError,
    model::booking::StayRange,
    util::money,
};

/// Price of a stay, fixed at booking time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quote {
    pub nights: i32,
    /// `nights * price_per_night`, two decimal places.
    pub total_price: Decimal,
}

/// Prices a validated stay.
///
/// # Returns
/// - `Ok(Quote)` - Nights and total
/// - `Err(BookingError::InvalidDateRange)` - Night count does not fit the stored column
pub fn quote(price_per_night: Decimal, range: &StayRange) -> Result<Quote, BookingError> {
    let nights = i32::try_from(range.nights()).map_err(|_| BookingError::InvalidDateRange)?;

    Ok(Quote {
        nights,
        total_price: money::round2(price_per_night * Decimal::from(nights)),
    })
}
