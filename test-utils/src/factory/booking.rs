//! Booking factory for creating test booking entities.

use chrono::{Duration, NaiveDate, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};
use uuid::Uuid;

/// Factory for creating test bookings with customizable fields.
///
/// Inserts rows directly, bypassing availability checks, so tests can set up
/// arbitrary existing state.
///
/// # Example
///
/// ```rust,ignore
/// let booking = BookingFactory::new(&db, listing.id, guest.id)
///     .dates(start, end)
///     .status("cancelled")
///     .build()
///     .await?;
/// ```
pub struct BookingFactory<'a> {
    db: &'a DatabaseConnection,
    listing_id: Uuid,
    guest_id: Uuid,
    start_date: NaiveDate,
    end_date: NaiveDate,
    price_per_night_cents: i64,
    status: String,
    guest_notes: Option<String>,
}

impl<'a> BookingFactory<'a> {
    /// Creates a new BookingFactory with default values.
    ///
    /// Defaults:
    /// - dates: a 3-night stay starting 30 days from today
    /// - price: 100.00 per night
    /// - status: `"pending"`
    /// - guest_notes: none
    pub fn new(db: &'a DatabaseConnection, listing_id: Uuid, guest_id: Uuid) -> Self {
        let start_date = Utc::now().date_naive() + Duration::days(30);
        Self {
            db,
            listing_id,
            guest_id,
            start_date,
            end_date: start_date + Duration::days(3),
            price_per_night_cents: 10_000,
            status: "pending".to_string(),
            guest_notes: None,
        }
    }

    /// Sets the half-open stay `[start_date, end_date)`.
    pub fn dates(mut self, start_date: NaiveDate, end_date: NaiveDate) -> Self {
        self.start_date = start_date;
        self.end_date = end_date;
        self
    }

    pub fn price_cents(mut self, cents: i64) -> Self {
        self.price_per_night_cents = cents;
        self
    }

    pub fn status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }

    pub fn guest_notes(mut self, notes: impl Into<String>) -> Self {
        self.guest_notes = Some(notes.into());
        self
    }

    /// Builds and inserts the booking entity into the database.
    pub async fn build(self) -> Result<entity::booking::Model, DbErr> {
        let now = Utc::now();
        let nights = (self.end_date - self.start_date).num_days();
        entity::booking::ActiveModel {
            id: ActiveValue::Set(Uuid::new_v4()),
            listing_id: ActiveValue::Set(self.listing_id),
            guest_id: ActiveValue::Set(self.guest_id),
            start_date: ActiveValue::Set(self.start_date),
            end_date: ActiveValue::Set(self.end_date),
            nights: ActiveValue::Set(nights as i32),
            total_price_cents: ActiveValue::Set(nights * self.price_per_night_cents),
            status: ActiveValue::Set(self.status),
            guest_notes: ActiveValue::Set(self.guest_notes),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            deleted_at: ActiveValue::Set(None),
        }
        .insert(self.db)
        .await
    }
}

/// Creates a pending booking with default dates.
pub async fn create_booking(
    db: &DatabaseConnection,
    listing_id: Uuid,
    guest_id: Uuid,
) -> Result<entity::booking::Model, DbErr> {
    BookingFactory::new(db, listing_id, guest_id).build().await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::TestBuilder;
    use crate::factory::helpers::create_booking_dependencies;

    #[tokio::test]
    async fn derives_nights_and_total_from_dates() -> Result<(), DbErr> {
        let test = TestBuilder::new()
            .with_booking_tables()
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();

        let (_host, listing, guest) = create_booking_dependencies(db).await?;
        let start = NaiveDate::from_ymd_opt(2030, 3, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2030, 3, 5).unwrap();

        let booking = BookingFactory::new(db, listing.id, guest.id)
            .dates(start, end)
            .price_cents(8_050)
            .build()
            .await?;

        assert_eq!(booking.nights, 4);
        assert_eq!(booking.total_price_cents, 32_200);
        assert_eq!(booking.status, "pending");

        Ok(())
    }
}
