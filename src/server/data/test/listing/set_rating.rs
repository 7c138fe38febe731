use super::*;

/// Tests writing the derived rating summary.
///
/// Expected: stored rating and review count match what was written
#[tokio::test]
async fn stores_rating_summary() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_listing_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let host = create_user(db).await?;
    let listing = create_listing(db, host.id).await?;

    let repo = ListingRepository::new(db);
    repo.set_rating(listing.id, 467, 3).await?;

    let stored = repo.find_by_id(listing.id).await?.unwrap();
    assert_eq!(stored.rating_hundredths, 467);
    assert_eq!(stored.review_count, 3);

    Ok(())
}
