//! Amenity factory for creating amenities and listing links.

use crate::factory::helpers::next_id;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};
use uuid::Uuid;

/// Creates an amenity with a unique name and slug derived from `name`.
///
/// # Arguments
/// - `db` - Database connection
/// - `name` - Display name; a counter suffix keeps name and slug unique
pub async fn create_amenity(
    db: &DatabaseConnection,
    name: &str,
) -> Result<entity::amenity::Model, DbErr> {
    let id = next_id();
    entity::amenity::ActiveModel {
        id: ActiveValue::Set(Uuid::new_v4()),
        name: ActiveValue::Set(format!("{} {}", name, id)),
        slug: ActiveValue::Set(format!("{}-{}", name.to_lowercase().replace(' ', "-"), id)),
        description: ActiveValue::Set(None),
        created_at: ActiveValue::Set(Utc::now()),
    }
    .insert(db)
    .await
}

/// Links an amenity to a listing.
pub async fn attach_amenity(
    db: &DatabaseConnection,
    amenity_id: Uuid,
    listing_id: Uuid,
) -> Result<entity::amenity_listing::Model, DbErr> {
    entity::amenity_listing::ActiveModel {
        amenity_id: ActiveValue::Set(amenity_id),
        listing_id: ActiveValue::Set(listing_id),
    }
    .insert(db)
    .await
}
