use super::*;

/// Tests that updating with an amenity list replaces the existing links.
///
/// Expected: only the new amenity remains linked
#[tokio::test]
async fn update_replaces_amenity_set() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_listing_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let host = create_user(db).await?;
    let listing = create_listing(db, host.id).await?;
    let wifi = create_amenity(db, "Wifi").await?;
    let parking = create_amenity(db, "Parking").await?;
    attach_amenity(db, wifi.id, listing.id).await?;

    let repo = ListingRepository::new(db);
    repo.update(
        listing.id,
        UpdateListingParams {
            amenities: Some(vec![parking.id]),
            ..Default::default()
        },
    )
    .await?;

    let mut linked = repo.amenities_for(&[listing.id]).await?;
    let ids: Vec<_> = linked
        .remove(&listing.id)
        .unwrap_or_default()
        .into_iter()
        .map(|a| a.id)
        .collect();

    assert_eq!(ids, vec![parking.id]);

    Ok(())
}

/// Tests that an update without an amenity list keeps the current links.
///
/// Expected: the original amenity is still linked and the title changed
#[tokio::test]
async fn update_without_amenities_keeps_links() -> Result<(), DbErr> {
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

    let repo = ListingRepository::new(db);
    let updated = repo
        .update(
            listing.id,
            UpdateListingParams {
                title: Some("Sea view loft".to_string()),
                ..Default::default()
            },
        )
        .await?;

    let linked = repo.amenities_for(&[listing.id]).await?;

    assert_eq!(updated.title, "Sea view loft");
    assert_eq!(linked.get(&listing.id).map(Vec::len), Some(1));

    Ok(())
}

/// Tests batch loading amenities for several listings.
///
/// Expected: amenities sorted by name per listing; listings without any are absent
#[tokio::test]
async fn loads_amenities_sorted_by_name() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_listing_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let host = create_user(db).await?;
    let listing = create_listing(db, host.id).await?;
    let bare = create_listing(db, host.id).await?;
    let wifi = create_amenity(db, "Wifi").await?;
    let kitchen = create_amenity(db, "Kitchen").await?;
    attach_amenity(db, wifi.id, listing.id).await?;
    attach_amenity(db, kitchen.id, listing.id).await?;

    let linked = ListingRepository::new(db)
        .amenities_for(&[listing.id, bare.id])
        .await?;

    let names: Vec<_> = linked[&listing.id].iter().map(|a| a.id).collect();
    assert_eq!(names, vec![kitchen.id, wifi.id]);
    assert!(!linked.contains_key(&bare.id));

    Ok(())
}
