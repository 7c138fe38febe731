use sea_orm::{ConnectionTrait, DbErr};
use uuid::Uuid;

use crate::server::{data::booking::BookingRepository, model::booking::StayRange};

/// Whether `range` is free on the listing.
///
/// A range is free when no booking other than cancelled or deleted ones overlaps it.
/// Run this on the same transaction as the insert that depends on it, after
/// `ListingRepository::lock_for_booking`.
pub async fn is_available<C: ConnectionTrait>(
    db: &C,
    listing_id: Uuid,
    range: &StayRange,
) -> Result<bool, DbErr> {
    let overlapping = BookingRepository::new(db)
        .has_overlap(listing_id, range)
        .await?;

    Ok(!overlapping)
}
