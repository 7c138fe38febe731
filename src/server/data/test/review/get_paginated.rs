use super::*;

/// Tests that hidden reviews are left out when only approved ones are requested.
///
/// Expected: 1 approved of 2 total on the target
#[tokio::test]
async fn approved_only_hides_unapproved() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_all_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (_host, listing) = create_listing_with_host(db).await?;
    let approved = create_review(db, create_user(db).await?.id, listing.id, 5).await?;
    ReviewFactory::new(db, create_user(db).await?.id, listing.id)
        .approved(false)
        .build()
        .await?;

    let repo = ReviewRepository::new(db);
    let filter = ReviewFilter {
        target: Some(Target::Listing(listing.id)),
        approved_only: true,
        page: 0,
        per_page: 10,
    };
    let (reviews, total) = repo.get_paginated(&filter).await?;

    assert_eq!(total, 1);
    assert_eq!(reviews[0].id, approved.id);

    let (_, everything) = repo
        .get_paginated(&ReviewFilter {
            approved_only: false,
            ..filter
        })
        .await?;
    assert_eq!(everything, 2);

    Ok(())
}
