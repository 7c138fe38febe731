use super::*;

/// Tests that the lock returns the listing when it exists.
///
/// Expected: Ok(Some(listing))
#[tokio::test]
async fn returns_listing_inside_transaction() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_booking_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let host = create_user(db).await?;
    let listing = create_listing(db, host.id).await?;

    let txn = db.begin().await?;
    let locked = ListingRepository::new(&txn)
        .lock_for_booking(listing.id)
        .await?;
    txn.commit().await?;

    assert_eq!(locked.map(|l| l.id), Some(listing.id));

    Ok(())
}

/// Tests that soft-deleted listings cannot be locked for booking.
///
/// Expected: Ok(None)
#[tokio::test]
async fn returns_none_for_deleted_listing() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_booking_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let host = create_user(db).await?;
    let listing = create_listing(db, host.id).await?;
    ListingRepository::new(db).soft_delete(listing.id).await?;

    let txn = db.begin().await?;
    let locked = ListingRepository::new(&txn)
        .lock_for_booking(listing.id)
        .await?;
    txn.rollback().await?;

    assert!(locked.is_none());

    Ok(())
}
