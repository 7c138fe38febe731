//! Booking lifecycle: creation, status transitions, notes and deletion.
//!
//! Creation runs the availability check and the insert in one transaction after
//! taking the listing's write lock, so two overlapping requests for the same listing
//! cannot both succeed. Lifecycle events are dispatched only after the change commits.

pub mod availability;
pub mod pricing;

use chrono::NaiveDate;
use sea_orm::{DatabaseConnection, TransactionTrait};
use uuid::Uuid;

use crate::server::{
    data::{booking::BookingRepository, listing::ListingRepository},
    error::{booking::BookingError, AppError},
    model::{
        booking::{
            Booking, BookingFilter, BookingScope, BookingStatus, CreateBookingParams,
            NewBooking, PaginatedBookings, StayRange, MAX_GUEST_NOTES_LEN,
        },
        event::BookingEvent,
    },
    service::notification::EventDispatcher,
    util::{money, validate},
};

/// Result of checking a stay before booking it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StayCheck {
    /// Listing is active and no live booking overlaps the range.
    pub available: bool,
    pub quote: pricing::Quote,
}

pub struct BookingService<'a> {
    db: &'a DatabaseConnection,
    events: &'a EventDispatcher,
}

impl<'a> BookingService<'a> {
    pub fn new(db: &'a DatabaseConnection, events: &'a EventDispatcher) -> Self {
        Self { db, events }
    }

    /// Creates a pending booking.
    ///
    /// Locks the listing row, verifies the listing is active and the range is free,
    /// prices the stay and inserts the booking, all in one transaction. Any failure
    /// rolls the transaction back so nothing is persisted.
    ///
    /// # Arguments
    /// - `params` - Validated booking request
    ///
    /// # Returns
    /// - `Ok(Booking)` - The created booking in `pending`
    /// - `Err(BookingError::InvalidDateRange)` - End date not after start date
    /// - `Err(AppError::NotFound)` - Listing does not exist
    /// - `Err(BookingError::ListingInactive)` - Listing is not accepting bookings
    /// - `Err(BookingError::DateRangeUnavailable)` - Range overlaps a live booking
    /// - `Err(AppError::DbErr)` - Database error
    pub async fn create(&self, params: CreateBookingParams) -> Result<Booking, AppError> {
        let range = StayRange::new(params.start_date, params.end_date)?;

        let txn = self.db.begin().await?;

        let listing = ListingRepository::new(&txn)
            .lock_for_booking(params.listing_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Listing not found".to_string()))?;

        if !listing.is_active {
            return Err(BookingError::ListingInactive.into());
        }

        if !availability::is_available(&txn, listing.id, &range).await? {
            return Err(BookingError::DateRangeUnavailable.into());
        }

        let quote = pricing::quote(money::from_minor(listing.price_per_night_cents), &range)?;
        let total_price_cents = money::to_minor(quote.total_price).ok_or_else(|| {
            AppError::InternalError(format!(
                "Total price {} for listing {} does not fit in cents",
                quote.total_price, listing.id
            ))
        })?;

        let booking = BookingRepository::new(&txn)
            .create(NewBooking {
                listing_id: listing.id,
                guest_id: params.guest_id,
                range,
                nights: quote.nights,
                total_price_cents,
                guest_notes: params.guest_notes,
            })
            .await?;

        txn.commit().await?;

        tracing::info!(
            "Booking {} created for listing {} ({} to {})",
            booking.id,
            listing.id,
            booking.start_date,
            booking.end_date
        );
        self.events.dispatch(BookingEvent::Created(booking.id));

        Ok(Booking::from_entity(booking, listing.host_id)?)
    }

    /// Gets a live booking by ID.
    ///
    /// # Returns
    /// - `Ok(Some(Booking))` - Booking found
    /// - `Ok(None)` - No such booking, or it was deleted
    /// - `Err(AppError)` - Database error
    pub async fn get(&self, id: Uuid) -> Result<Option<Booking>, AppError> {
        let Some((booking, listing)) = BookingRepository::new(self.db).find_by_id(id).await?
        else {
            return Ok(None);
        };

        Ok(Some(Booking::from_entity(booking, listing.host_id)?))
    }

    /// Gets a page of bookings visible in `scope`.
    pub async fn list(
        &self,
        scope: BookingScope,
        filter: BookingFilter,
    ) -> Result<PaginatedBookings, AppError> {
        let (rows, total) = BookingRepository::new(self.db)
            .get_paginated(scope, &filter)
            .await?;

        let bookings = rows
            .into_iter()
            .map(|(booking, listing)| Booking::from_entity(booking, listing.host_id))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(PaginatedBookings {
            bookings,
            total,
            page: filter.page,
            per_page: filter.per_page,
            total_pages: total.div_ceil(filter.per_page),
        })
    }

    /// Moves a booking to `next`.
    ///
    /// Requesting the current status is a no-op and emits nothing. Moving to
    /// `confirmed` emits `Confirmed`, moving to `cancelled` emits `Cancelled`.
    ///
    /// The write only applies if the booking is still in the status the transition
    /// was checked against. When a concurrent change got there first, the check is
    /// repeated against the status that change left behind.
    ///
    /// # Returns
    /// - `Ok(Booking)` - Booking after the change
    /// - `Err(AppError::NotFound)` - No such booking
    /// - `Err(BookingError::InvalidTransition)` - The status table forbids the move
    pub async fn change_status(&self, id: Uuid, next: BookingStatus) -> Result<Booking, AppError> {
        let mut current = self.require(id).await?;

        loop {
            if current.status == next {
                return Ok(current);
            }
            if !current.status.can_transition_to(next) {
                return Err(BookingError::InvalidTransition {
                    from: current.status,
                    to: next,
                }
                .into());
            }

            let Some(updated) = BookingRepository::new(self.db)
                .transition_status(id, current.status, next)
                .await?
            else {
                current = self.require(id).await?;
                continue;
            };

            tracing::info!(
                "Booking {} moved from {} to {}",
                id,
                current.status,
                next
            );
            match next {
                BookingStatus::Confirmed => self.events.dispatch(BookingEvent::Confirmed(id)),
                BookingStatus::Cancelled => self.events.dispatch(BookingEvent::Cancelled(id)),
                BookingStatus::Pending | BookingStatus::Completed => {}
            }

            return Ok(Booking::from_entity(updated, current.host_id)?);
        }
    }

    /// Replaces the guest notes on a booking.
    ///
    /// # Returns
    /// - `Ok(Booking)` - Updated booking
    /// - `Err(AppError::Validation)` - Notes longer than 1000 characters
    /// - `Err(AppError::NotFound)` - No such booking
    pub async fn update_notes(
        &self,
        id: Uuid,
        guest_notes: Option<String>,
    ) -> Result<Booking, AppError> {
        if let Some(notes) = &guest_notes {
            validate::max_len("guest_notes", notes, MAX_GUEST_NOTES_LEN)?;
        }
        let current = self.require(id).await?;

        let updated = BookingRepository::new(self.db)
            .update_notes(id, guest_notes)
            .await?
            .ok_or_else(booking_not_found)?;

        Ok(Booking::from_entity(updated, current.host_id)?)
    }

    /// Cancels a booking if needed, then soft deletes it.
    ///
    /// Both writes share one transaction. The cancel only applies to a booking that
    /// is not already cancelled, so of a delete and a concurrent cancel exactly one
    /// emits `Cancelled`, after commit.
    ///
    /// # Returns
    /// - `Ok(())` - Booking cancelled and removed
    /// - `Err(AppError::NotFound)` - No such booking
    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let txn = self.db.begin().await?;
        let repo = BookingRepository::new(&txn);

        let cancelled = repo.cancel_if_live(id).await?;
        if !repo.soft_delete(id).await? {
            return Err(booking_not_found());
        }
        txn.commit().await?;

        tracing::info!("Booking {} deleted", id);
        if cancelled {
            self.events.dispatch(BookingEvent::Cancelled(id));
        }

        Ok(())
    }

    /// Checks a prospective stay without reserving it.
    ///
    /// # Returns
    /// - `Ok(StayCheck)` - Whether the range is free, and its price
    /// - `Err(BookingError::InvalidDateRange)` - End date not after start date
    /// - `Err(AppError::NotFound)` - No such listing
    pub async fn check_stay(
        &self,
        listing_id: Uuid,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<StayCheck, AppError> {
        let range = StayRange::new(start, end)?;
        let listing = ListingRepository::new(self.db)
            .find_by_id(listing_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Listing not found".to_string()))?;

        let available =
            listing.is_active && availability::is_available(self.db, listing_id, &range).await?;
        let quote = pricing::quote(money::from_minor(listing.price_per_night_cents), &range)?;

        Ok(StayCheck { available, quote })
    }

    async fn require(&self, id: Uuid) -> Result<Booking, AppError> {
        self.get(id).await?.ok_or_else(booking_not_found)
    }
}

fn booking_not_found() -> AppError {
    AppError::NotFound("Booking not found".to_string())
}
