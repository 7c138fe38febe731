use super::*;

/// Tests that a stay inside an existing booking is reported as overlapping.
///
/// Expected: Ok(true)
#[tokio::test]
async fn detects_contained_range() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_booking_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (_host, listing, guest) = create_booking_dependencies(db).await?;
    BookingFactory::new(db, listing.id, guest.id)
        .dates(date(2025, 1, 10), date(2025, 1, 15))
        .build()
        .await?;

    let repo = BookingRepository::new(db);
    let overlaps = repo
        .has_overlap(listing.id, &range(date(2025, 1, 12), date(2025, 1, 14)))
        .await?;

    assert!(overlaps);

    Ok(())
}

/// Tests that ranges touching at checkout/checkin do not overlap.
///
/// A booking ending on the 15th frees the night of the 15th, so a stay starting
/// that day (or ending on the 10th) is fine.
///
/// Expected: Ok(false) for both sides
#[tokio::test]
async fn back_to_back_ranges_do_not_overlap() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_booking_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (_host, listing, guest) = create_booking_dependencies(db).await?;
    BookingFactory::new(db, listing.id, guest.id)
        .dates(date(2025, 1, 10), date(2025, 1, 15))
        .build()
        .await?;

    let repo = BookingRepository::new(db);

    assert!(
        !repo
            .has_overlap(listing.id, &range(date(2025, 1, 15), date(2025, 1, 18)))
            .await?
    );
    assert!(
        !repo
            .has_overlap(listing.id, &range(date(2025, 1, 7), date(2025, 1, 10)))
            .await?
    );

    Ok(())
}

/// Tests that cancelled bookings do not block their dates.
///
/// Expected: Ok(false)
#[tokio::test]
async fn ignores_cancelled_bookings() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_booking_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (_host, listing, guest) = create_booking_dependencies(db).await?;
    BookingFactory::new(db, listing.id, guest.id)
        .dates(date(2025, 1, 10), date(2025, 1, 15))
        .status("cancelled")
        .build()
        .await?;

    let overlaps = BookingRepository::new(db)
        .has_overlap(listing.id, &range(date(2025, 1, 10), date(2025, 1, 15)))
        .await?;

    assert!(!overlaps);

    Ok(())
}

/// Tests that confirmed bookings block their dates like pending ones.
///
/// Expected: Ok(true)
#[tokio::test]
async fn confirmed_bookings_block_dates() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_booking_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (_host, listing, guest) = create_booking_dependencies(db).await?;
    BookingFactory::new(db, listing.id, guest.id)
        .dates(date(2025, 1, 10), date(2025, 1, 15))
        .status("confirmed")
        .build()
        .await?;

    let overlaps = BookingRepository::new(db)
        .has_overlap(listing.id, &range(date(2025, 1, 14), date(2025, 1, 20)))
        .await?;

    assert!(overlaps);

    Ok(())
}

/// Tests that bookings on other listings are not considered.
///
/// Expected: Ok(false)
#[tokio::test]
async fn ignores_other_listings() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_booking_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (host, listing, guest) = create_booking_dependencies(db).await?;
    let other = test_utils::factory::create_listing(db, host.id).await?;
    BookingFactory::new(db, other.id, guest.id)
        .dates(date(2025, 1, 10), date(2025, 1, 15))
        .build()
        .await?;

    let overlaps = BookingRepository::new(db)
        .has_overlap(listing.id, &range(date(2025, 1, 10), date(2025, 1, 15)))
        .await?;

    assert!(!overlaps);

    Ok(())
}
