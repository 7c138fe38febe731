use super::*;

/// Tests the uniqueness check on name and slug.
///
/// Expected: taken for an existing slug, free when the owner is excluded
#[tokio::test]
async fn detects_taken_slug_except_for_owner() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_listing_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let wifi = create_amenity(db, "Wifi").await?;
    let repo = AmenityRepository::new(db);

    assert!(repo.name_or_slug_taken(None, Some(wifi.slug.as_str()), None).await?);
    assert!(
        !repo
            .name_or_slug_taken(Some(wifi.name.as_str()), Some(wifi.slug.as_str()), Some(wifi.id))
            .await?
    );
    assert!(!repo.name_or_slug_taken(Some("Sauna"), Some("sauna"), None).await?);
    assert!(!repo.name_or_slug_taken(None, None, None).await?);

    Ok(())
}
