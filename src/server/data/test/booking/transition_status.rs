use super::*;

/// Tests that a transition applies while the booking is still in the expected status.
///
/// Expected: Some(booking) in the new status
#[tokio::test]
async fn applies_from_expected_status() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_booking_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (_host, listing, guest) = create_booking_dependencies(db).await?;
    let booking = BookingFactory::new(db, listing.id, guest.id).build().await?;

    let updated = BookingRepository::new(db)
        .transition_status(booking.id, BookingStatus::Pending, BookingStatus::Confirmed)
        .await?
        .unwrap();

    assert_eq!(updated.status, "confirmed");

    Ok(())
}

/// Tests that a transition checked against a stale status is not applied.
///
/// Expected: first move applies, second move from the same status returns None
#[tokio::test]
async fn rejects_stale_source_status() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_booking_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (_host, listing, guest) = create_booking_dependencies(db).await?;
    let booking = BookingFactory::new(db, listing.id, guest.id).build().await?;
    let repo = BookingRepository::new(db);

    let cancelled = repo
        .transition_status(booking.id, BookingStatus::Pending, BookingStatus::Cancelled)
        .await?;
    let confirmed = repo
        .transition_status(booking.id, BookingStatus::Pending, BookingStatus::Confirmed)
        .await?;

    assert!(cancelled.is_some());
    assert!(confirmed.is_none());
    let (stored, _) = repo.find_by_id(booking.id).await?.unwrap();
    assert_eq!(stored.status, "cancelled");

    Ok(())
}

/// Tests that soft-deleted bookings cannot change status.
///
/// Expected: None
#[tokio::test]
async fn ignores_deleted_booking() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_booking_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (_host, listing, guest) = create_booking_dependencies(db).await?;
    let booking = BookingFactory::new(db, listing.id, guest.id).build().await?;
    let repo = BookingRepository::new(db);
    repo.soft_delete(booking.id).await?;

    let result = repo
        .transition_status(booking.id, BookingStatus::Pending, BookingStatus::Confirmed)
        .await?;

    assert!(result.is_none());

    Ok(())
}

/// Tests that only the first cancel of a booking reports the change.
///
/// Expected: true, then false
#[tokio::test]
async fn cancels_once() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_booking_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (_host, listing, guest) = create_booking_dependencies(db).await?;
    let booking = BookingFactory::new(db, listing.id, guest.id)
        .status("confirmed")
        .build()
        .await?;
    let repo = BookingRepository::new(db);

    assert!(repo.cancel_if_live(booking.id).await?);
    assert!(!repo.cancel_if_live(booking.id).await?);

    Ok(())
}
