//! Booking domain models and parameters.
//!
//! Provides the booking status machine, the half-open stay range used by the
//! availability and pricing checks, and parameter types for booking operations.

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sea_orm::DbErr;
use uuid::Uuid;

use crate::{
    model::booking::{
        BookingDto, BookingListQuery, BookingStatusDto, CreateBookingDto, PaginatedBookingsDto,
    },
    server::{
        error::{booking::BookingError, AppError},
        util::{money, validate},
    },
};

/// Longest accepted guest note, in characters.
pub const MAX_GUEST_NOTES_LEN: usize = 1000;

/// Lifecycle state of a booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Cancelled,
    Completed,
}

impl BookingStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Cancelled => "cancelled",
            Self::Completed => "completed",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "pending" => Some(Self::Pending),
            "confirmed" => Some(Self::Confirmed),
            "cancelled" => Some(Self::Cancelled),
            "completed" => Some(Self::Completed),
            _ => None,
        }
    }

    /// Whether an explicit status change from `self` to `next` is allowed.
    ///
    /// Allowed: pending to confirmed or cancelled, confirmed to cancelled or completed.
    /// Same-status requests are handled by the caller as no-ops.
    pub fn can_transition_to(self, next: BookingStatus) -> bool {
        matches!(
            (self, next),
            (Self::Pending, Self::Confirmed)
                | (Self::Pending, Self::Cancelled)
                | (Self::Confirmed, Self::Cancelled)
                | (Self::Confirmed, Self::Completed)
        )
    }

    pub fn into_dto(self) -> BookingStatusDto {
        match self {
            Self::Pending => BookingStatusDto::Pending,
            Self::Confirmed => BookingStatusDto::Confirmed,
            Self::Cancelled => BookingStatusDto::Cancelled,
            Self::Completed => BookingStatusDto::Completed,
        }
    }

    pub fn from_dto(dto: BookingStatusDto) -> Self {
        match dto {
            BookingStatusDto::Pending => Self::Pending,
            BookingStatusDto::Confirmed => Self::Confirmed,
            BookingStatusDto::Cancelled => Self::Cancelled,
            BookingStatusDto::Completed => Self::Completed,
        }
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A half-open range of nights `[start, end)`.
///
/// Construction guarantees `end > start`, so every range covers at least one night.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StayRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl StayRange {
    /// # Returns
    /// - `Ok(StayRange)` - `end` is after `start`
    /// - `Err(BookingError::InvalidDateRange)` - `end` is on or before `start`
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, BookingError> {
        if end <= start {
            return Err(BookingError::InvalidDateRange);
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Number of nights, always positive.
    pub fn nights(&self) -> i64 {
        (self.end - self.start).num_days()
    }

    /// Half-open overlap: touching ranges do not overlap.
    pub fn overlaps(&self, other: &StayRange) -> bool {
        self.start < other.end && self.end > other.start
    }
}

/// A booking with its frozen price.
#[derive(Debug, Clone, PartialEq)]
pub struct Booking {
    pub id: Uuid,
    pub listing_id: Uuid,
    /// Host of the booked listing, used for policy checks.
    pub host_id: Uuid,
    pub guest_id: Uuid,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub nights: i32,
    pub total_price: Decimal,
    pub status: BookingStatus,
    pub guest_notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Booking {
    /// Converts an entity model to a domain model at the repository boundary.
    ///
    /// # Arguments
    /// - `entity` - The booking entity from the database
    /// - `host_id` - Host of the booking's listing
    ///
    /// # Returns
    /// - `Ok(Booking)` - Converted domain model
    /// - `Err(DbErr::Custom)` - Stored status is not a known status
    pub fn from_entity(entity: entity::booking::Model, host_id: Uuid) -> Result<Self, DbErr> {
        let status = BookingStatus::parse(&entity.status).ok_or_else(|| {
            DbErr::Custom(format!(
                "Booking {} has unknown status {}",
                entity.id, entity.status
            ))
        })?;

        Ok(Self {
            id: entity.id,
            listing_id: entity.listing_id,
            host_id,
            guest_id: entity.guest_id,
            start_date: entity.start_date,
            end_date: entity.end_date,
            nights: entity.nights,
            total_price: money::from_minor(entity.total_price_cents),
            status,
            guest_notes: entity.guest_notes,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        })
    }

    pub fn into_dto(self) -> BookingDto {
        BookingDto {
            id: self.id,
            listing_id: self.listing_id,
            guest_id: self.guest_id,
            start_date: self.start_date,
            end_date: self.end_date,
            nights: self.nights,
            total_price: self.total_price,
            status: self.status.into_dto(),
            guest_notes: self.guest_notes,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Parameters for creating a booking.
#[derive(Debug, Clone)]
pub struct CreateBookingParams {
    pub listing_id: Uuid,
    pub guest_id: Uuid,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub guest_notes: Option<String>,
}

impl CreateBookingParams {
    /// Validates a create request and converts it to parameters.
    ///
    /// # Arguments
    /// - `guest_id` - Authenticated user making the booking
    /// - `dto` - Request body
    /// - `today` - Current date; stays may not start before it
    ///
    /// # Returns
    /// - `Ok(CreateBookingParams)` - Valid request
    /// - `Err(AppError::Validation)` - Start date in the past or notes too long
    /// - `Err(BookingError::InvalidDateRange)` - End date not after start date
    pub fn from_dto(
        guest_id: Uuid,
        dto: CreateBookingDto,
        today: NaiveDate,
    ) -> Result<Self, AppError> {
        if dto.start_date < today {
            return Err(AppError::validation(
                "start_date",
                "The start date must be a date after or equal to today.",
            ));
        }
        StayRange::new(dto.start_date, dto.end_date)?;
        if let Some(notes) = &dto.guest_notes {
            validate::max_len("guest_notes", notes, MAX_GUEST_NOTES_LEN)?;
        }

        Ok(Self {
            listing_id: dto.listing_id,
            guest_id,
            start_date: dto.start_date,
            end_date: dto.end_date,
            guest_notes: dto.guest_notes,
        })
    }
}

/// Row values for inserting a priced booking.
#[derive(Debug, Clone)]
pub struct NewBooking {
    pub listing_id: Uuid,
    pub guest_id: Uuid,
    pub range: StayRange,
    pub nights: i32,
    pub total_price_cents: i64,
    pub guest_notes: Option<String>,
}

/// A booking with everything a notification mentions.
#[derive(Debug, Clone)]
pub struct BookingWithParties {
    pub booking: entity::booking::Model,
    pub listing: entity::listing::Model,
    pub guest: entity::user::Model,
    pub host: entity::user::Model,
}

/// Which bookings a listing query may return.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingScope {
    All,
    /// Bookings on listings owned by this host.
    HostedBy(Uuid),
    /// Bookings made by this guest.
    GuestOf(Uuid),
}

/// Filters and pagination for listing bookings.
#[derive(Debug, Clone, Default)]
pub struct BookingFilter {
    pub status: Option<BookingStatus>,
    pub listing_id: Option<Uuid>,
    pub starts_on_or_after: Option<NaiveDate>,
    pub ends_on_or_before: Option<NaiveDate>,
    pub page: u64,
    pub per_page: u64,
}

impl BookingFilter {
    pub fn from_query(query: BookingListQuery) -> Self {
        Self {
            status: query.status.map(BookingStatus::from_dto),
            listing_id: query.listing_id,
            starts_on_or_after: query.start_date,
            ends_on_or_before: query.end_date,
            page: query.page,
            per_page: query.per_page.unwrap_or(15).clamp(1, 100),
        }
    }
}

#[derive(Debug, Clone)]
pub struct PaginatedBookings {
    pub bookings: Vec<Booking>,
    pub total: u64,
    pub page: u64,
    pub per_page: u64,
    pub total_pages: u64,
}

impl PaginatedBookings {
    pub fn into_dto(self) -> PaginatedBookingsDto {
        PaginatedBookingsDto {
            bookings: self.bookings.into_iter().map(Booking::into_dto).collect(),
            total: self.total,
            page: self.page,
            per_page: self.per_page,
            total_pages: self.total_pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn enforces_transition_table() {
        use BookingStatus::*;

        assert!(Pending.can_transition_to(Confirmed));
        assert!(Pending.can_transition_to(Cancelled));
        assert!(Confirmed.can_transition_to(Cancelled));
        assert!(Confirmed.can_transition_to(Completed));

        assert!(!Completed.can_transition_to(Pending));
        assert!(!Cancelled.can_transition_to(Confirmed));
        assert!(!Pending.can_transition_to(Completed));
        assert!(!Confirmed.can_transition_to(Pending));
    }

    #[test]
    fn stay_range_rejects_empty_and_reversed() {
        assert_eq!(
            StayRange::new(date(2025, 1, 10), date(2025, 1, 10)),
            Err(BookingError::InvalidDateRange)
        );
        assert_eq!(
            StayRange::new(date(2025, 1, 10), date(2025, 1, 9)),
            Err(BookingError::InvalidDateRange)
        );
    }

    #[test]
    fn touching_ranges_do_not_overlap() {
        let first = StayRange::new(date(2025, 1, 10), date(2025, 1, 15)).unwrap();
        let inside = StayRange::new(date(2025, 1, 12), date(2025, 1, 14)).unwrap();
        let after = StayRange::new(date(2025, 1, 15), date(2025, 1, 18)).unwrap();

        assert!(first.overlaps(&inside));
        assert!(inside.overlaps(&first));
        assert!(!first.overlaps(&after));
        assert_eq!(first.nights(), 5);
    }

    #[test]
    fn create_params_reject_past_start() {
        let dto = CreateBookingDto {
            listing_id: Uuid::new_v4(),
            start_date: date(2025, 1, 9),
            end_date: date(2025, 1, 12),
            guest_notes: None,
        };

        let result = CreateBookingParams::from_dto(Uuid::new_v4(), dto, date(2025, 1, 10));

        assert!(matches!(result, Err(AppError::Validation { field, .. }) if field == "start_date"));
    }

    #[test]
    fn create_params_reject_long_notes() {
        let dto = CreateBookingDto {
            listing_id: Uuid::new_v4(),
            start_date: date(2025, 1, 10),
            end_date: date(2025, 1, 12),
            guest_notes: Some("x".repeat(MAX_GUEST_NOTES_LEN + 1)),
        };

        let result = CreateBookingParams::from_dto(Uuid::new_v4(), dto, date(2025, 1, 10));

        assert!(matches!(result, Err(AppError::Validation { field, .. }) if field == "guest_notes"));
    }
}
