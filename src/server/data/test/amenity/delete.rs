use super::*;

/// Tests that deleting an amenity detaches it from listings.
///
/// Expected: Ok(true) and no remaining links
#[tokio::test]
async fn removes_listing_links() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_listing_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let host = create_user(db).await?;
    let listing = create_listing(db, host.id).await?;
    let wifi = create_amenity(db, "Wifi").await?;
    attach_amenity(db, wifi.id, listing.id).await?;

    let deleted = AmenityRepository::new(db).delete(wifi.id).await?;
    let linked = ListingRepository::new(db)
        .amenities_for(&[listing.id])
        .await?;

    assert!(deleted);
    assert!(linked.is_empty());

    Ok(())
}

/// Tests deleting a missing amenity.
///
/// Expected: Ok(false)
#[tokio::test]
async fn returns_false_when_missing() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_listing_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let deleted = AmenityRepository::new(db)
        .delete(uuid::Uuid::new_v4())
        .await?;

    assert!(!deleted);

    Ok(())
}
