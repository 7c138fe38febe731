pub use sea_orm_migration::prelude::*;

mod m20251218_000001_create_user_table;
mod m20251218_000002_create_user_role_table;
mod m20251218_000003_create_access_token_table;
mod m20251218_000004_create_listing_table;
mod m20251218_000005_create_amenity_table;
mod m20251218_000006_create_amenity_listing_table;
mod m20251218_000007_create_booking_table;
mod m20251218_000008_create_review_table;
mod m20251218_000009_create_media_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20251218_000001_create_user_table::Migration),
            Box::new(m20251218_000002_create_user_role_table::Migration),
            Box::new(m20251218_000003_create_access_token_table::Migration),
            Box::new(m20251218_000004_create_listing_table::Migration),
            Box::new(m20251218_000005_create_amenity_table::Migration),
            Box::new(m20251218_000006_create_amenity_listing_table::Migration),
            Box::new(m20251218_000007_create_booking_table::Migration),
            Box::new(m20251218_000008_create_review_table::Migration),
            Box::new(m20251218_000009_create_media_table::Migration),
        ]
    }
}
