use super::*;

/// Tests that a soft-deleted booking disappears from lookups and frees its dates.
///
/// Expected: find_by_id returns None, the range no longer overlaps, a second delete reports false
#[tokio::test]
async fn hides_booking_and_frees_dates() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_booking_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (_host, listing, guest) = create_booking_dependencies(db).await?;
    let booking = BookingFactory::new(db, listing.id, guest.id)
        .dates(date(2025, 1, 10), date(2025, 1, 15))
        .build()
        .await?;

    let repo = BookingRepository::new(db);
    assert!(repo.soft_delete(booking.id).await?);

    assert!(repo.find_by_id(booking.id).await?.is_none());
    assert!(!repo.soft_delete(booking.id).await?);
    assert!(
        !repo
            .has_overlap(listing.id, &range(date(2025, 1, 10), date(2025, 1, 15)))
            .await?
    );

    Ok(())
}

/// Tests that notification lookups still see soft-deleted bookings.
///
/// Expected: Some(BookingWithParties)
#[tokio::test]
async fn notification_lookup_includes_deleted() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_booking_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (host, listing, guest) = create_booking_dependencies(db).await?;
    let booking = test_utils::factory::create_booking(db, listing.id, guest.id).await?;

    let repo = BookingRepository::new(db);
    repo.soft_delete(booking.id).await?;

    let parties = repo.find_for_notification(booking.id).await?.unwrap();
    assert_eq!(parties.guest.id, guest.id);
    assert_eq!(parties.host.id, host.id);

    Ok(())
}
