use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::server::{error::error_response, model::booking::BookingStatus};

/// Rejections raised by the booking engine.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum BookingError {
    /// Checkout is on or before check-in.
    #[error("Check-out date must be after check-in date.")]
    InvalidDateRange,

    #[error("This listing is not available for booking.")]
    ListingInactive,

    /// Another non-cancelled booking overlaps the requested nights.
    #[error("The selected dates overlap with an existing booking.")]
    DateRangeUnavailable,

    /// The status table does not allow moving from `from` to `to`.
    #[error("Cannot change booking status from {from} to {to}.")]
    InvalidTransition {
        from: BookingStatus,
        to: BookingStatus,
    },
}

impl BookingError {
    /// Request field the error is reported against.
    fn field(&self) -> &'static str {
        match self {
            Self::InvalidDateRange => "end_date",
            Self::ListingInactive => "listing_id",
            Self::DateRangeUnavailable => "dates",
            Self::InvalidTransition { .. } => "status",
        }
    }
}

/// Converts booking errors into HTTP responses.
///
/// # Returns
/// - 409 Conflict - For `DateRangeUnavailable`
/// - 422 Unprocessable Entity - For invalid ranges, inactive listings and disallowed transitions
impl IntoResponse for BookingError {
    fn into_response(self) -> Response {
        let status = match self {
            Self::DateRangeUnavailable => StatusCode::CONFLICT,
            _ => StatusCode::UNPROCESSABLE_ENTITY,
        };

        error_response(status, self.to_string(), Some(self.field()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_errors_to_status_codes() {
        let transition = BookingError::InvalidTransition {
            from: BookingStatus::Completed,
            to: BookingStatus::Pending,
        };

        assert_eq!(
            transition.into_response().status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            BookingError::DateRangeUnavailable.into_response().status(),
            StatusCode::CONFLICT
        );
    }
}
