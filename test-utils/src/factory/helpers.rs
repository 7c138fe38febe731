//! Shared helper utilities for factory methods.

use sea_orm::{DatabaseConnection, DbErr};

/// Counter for generating unique names in tests.
static COUNTER: std::sync::atomic::AtomicU64 = std::sync::atomic::AtomicU64::new(1);

/// Gets the next unique counter value for test data.
///
/// # Returns
/// - `u64` - Next unique counter value
pub fn next_id() -> u64 {
    COUNTER.fetch_add(1, std::sync::atomic::Ordering::SeqCst)
}

/// Creates a host user and an active listing owned by that host.
///
/// # Arguments
/// - `db` - Database connection
///
/// # Returns
/// - `Ok((host, listing))` - Created host user and listing
/// - `Err(DbErr)` - Database error during creation
pub async fn create_listing_with_host(
    db: &DatabaseConnection,
) -> Result<(entity::user::Model, entity::listing::Model), DbErr> {
    let host = crate::factory::user::UserFactory::new(db)
        .role("host")
        .build()
        .await?;
    let listing = crate::factory::listing::create_listing(db, host.id).await?;

    Ok((host, listing))
}

/// Creates a host, a listing, and a separate guest user.
///
/// Useful for booking tests that need the full set of participants.
///
/// # Returns
/// - `Ok((host, listing, guest))` - Created entities
/// - `Err(DbErr)` - Database error during creation
pub async fn create_booking_dependencies(
    db: &DatabaseConnection,
) -> Result<
    (
        entity::user::Model,
        entity::listing::Model,
        entity::user::Model,
    ),
    DbErr,
> {
    let (host, listing) = create_listing_with_host(db).await?;
    let guest = crate::factory::user::UserFactory::new(db)
        .role("guest")
        .build()
        .await?;

    Ok((host, listing, guest))
}
