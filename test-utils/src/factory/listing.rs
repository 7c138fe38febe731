//! Listing factory for creating test listing entities.

use crate::factory::helpers::next_id;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};
use uuid::Uuid;

/// Factory for creating test listings with customizable fields.
///
/// # Example
///
/// ```rust,ignore
/// let listing = ListingFactory::new(&db, host.id)
///     .city("Lisbon")
///     .price_cents(12_550)
///     .build()
///     .await?;
/// ```
pub struct ListingFactory<'a> {
    db: &'a DatabaseConnection,
    host_id: Uuid,
    title: String,
    city: String,
    price_per_night_cents: i64,
    max_guests: i32,
    rating_hundredths: i32,
    review_count: i32,
    is_active: bool,
}

impl<'a> ListingFactory<'a> {
    /// Creates a new ListingFactory with default values.
    ///
    /// Defaults:
    /// - title: `"Listing {id}"`
    /// - city: `"Springfield"`
    /// - price: 100.00 per night
    /// - max_guests: 2
    /// - rating: 0 with no reviews
    /// - active
    pub fn new(db: &'a DatabaseConnection, host_id: Uuid) -> Self {
        let id = next_id();
        Self {
            db,
            host_id,
            title: format!("Listing {}", id),
            city: "Springfield".to_string(),
            price_per_night_cents: 10_000,
            max_guests: 2,
            rating_hundredths: 0,
            review_count: 0,
            is_active: true,
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn city(mut self, city: impl Into<String>) -> Self {
        self.city = city.into();
        self
    }

    /// Sets the nightly price in cents.
    pub fn price_cents(mut self, cents: i64) -> Self {
        self.price_per_night_cents = cents;
        self
    }

    pub fn max_guests(mut self, max_guests: i32) -> Self {
        self.max_guests = max_guests;
        self
    }

    /// Sets the stored aggregate rating (hundredths) and review count.
    pub fn rating(mut self, rating_hundredths: i32, review_count: i32) -> Self {
        self.rating_hundredths = rating_hundredths;
        self.review_count = review_count;
        self
    }

    pub fn active(mut self, is_active: bool) -> Self {
        self.is_active = is_active;
        self
    }

    /// Builds and inserts the listing entity into the database.
    pub async fn build(self) -> Result<entity::listing::Model, DbErr> {
        let now = Utc::now();
        entity::listing::ActiveModel {
            id: ActiveValue::Set(Uuid::new_v4()),
            host_id: ActiveValue::Set(self.host_id),
            title: ActiveValue::Set(self.title),
            description: ActiveValue::Set("A cosy place to stay".to_string()),
            price_per_night_cents: ActiveValue::Set(self.price_per_night_cents),
            city: ActiveValue::Set(self.city),
            address: ActiveValue::Set(None),
            max_guests: ActiveValue::Set(self.max_guests),
            bedrooms: ActiveValue::Set(1),
            bathrooms: ActiveValue::Set(1),
            rating_hundredths: ActiveValue::Set(self.rating_hundredths),
            review_count: ActiveValue::Set(self.review_count),
            is_active: ActiveValue::Set(self.is_active),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            deleted_at: ActiveValue::Set(None),
        }
        .insert(self.db)
        .await
    }
}

/// Creates an active listing with default values for the given host.
pub async fn create_listing(
    db: &DatabaseConnection,
    host_id: Uuid,
) -> Result<entity::listing::Model, DbErr> {
    ListingFactory::new(db, host_id).build().await
}
