use super::*;

/// Tests that only approved reviews on the listing contribute ratings.
///
/// Expected: ratings of the two approved listing reviews
#[tokio::test]
async fn returns_approved_listing_ratings_only() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_all_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (host, listing) = create_listing_with_host(db).await?;
    let other = create_listing(db, host.id).await?;
    let author = create_user(db).await?;

    create_review(db, author.id, listing.id, 5).await?;
    create_review(db, host.id, listing.id, 3).await?;
    ReviewFactory::new(db, create_user(db).await?.id, listing.id)
        .rating(1)
        .approved(false)
        .build()
        .await?;
    create_review(db, author.id, other.id, 2).await?;
    ReviewFactory::new(db, author.id, listing.id)
        .target_user(host.id)
        .rating(4)
        .build()
        .await?;

    let mut ratings = ReviewRepository::new(db)
        .approved_ratings_for_listing(listing.id)
        .await?;
    ratings.sort();

    assert_eq!(ratings, vec![3, 5]);

    Ok(())
}

/// Tests a listing without reviews.
///
/// Expected: empty list
#[tokio::test]
async fn returns_empty_without_reviews() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_all_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (_host, listing) = create_listing_with_host(db).await?;

    let ratings = ReviewRepository::new(db)
        .approved_ratings_for_listing(listing.id)
        .await?;

    assert!(ratings.is_empty());

    Ok(())
}
