use super::*;

/// Tests that an author's review is found by target kind and id.
///
/// Expected: the listing review for the listing target, nothing for the user target
#[tokio::test]
async fn matches_kind_and_id() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_all_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (_host, listing) = create_listing_with_host(db).await?;
    let author = create_user(db).await?;
    let review = create_review(db, author.id, listing.id, 4).await?;

    let repo = ReviewRepository::new(db);
    let found = repo
        .find_by_author_and_target(author.id, &Target::Listing(listing.id))
        .await?;
    let same_id_as_user = repo
        .find_by_author_and_target(author.id, &Target::User(listing.id))
        .await?;

    assert_eq!(found.map(|r| r.id), Some(review.id));
    assert!(same_id_as_user.is_none());

    Ok(())
}
