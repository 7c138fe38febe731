use std::time::Duration;

use test_utils::{builder::TestBuilder, factory::create_amenity};

use crate::{
    model::listing::ListingSearchQuery,
    server::{
        error::AppError,
        model::amenity::{CreateAmenityParams, UpdateAmenityParams},
        service::{amenity::AmenityService, cache::ListingCache, listing::ListingService},
        storage::LocalDiskStore,
    },
};

fn params(name: &str, slug: &str) -> CreateAmenityParams {
    CreateAmenityParams {
        name: name.to_string(),
        slug: slug.to_string(),
        description: None,
    }
}

/// Expected: Err(Validation) for a taken slug, Ok for a fresh one
#[tokio::test]
async fn create_rejects_taken_slug() -> Result<(), AppError> {
    let test = TestBuilder::new().with_listing_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let cache = ListingCache::new(Duration::from_secs(60));
    let service = AmenityService::new(db, &cache);

    service.create(params("Hot tub", "hot-tub")).await?;

    let duplicate = service.create(params("Jacuzzi", "hot-tub")).await;
    assert!(matches!(
        duplicate,
        Err(AppError::Validation { ref field, .. }) if field == "slug"
    ));

    let sauna = service.create(params("Sauna", "sauna")).await?;
    assert_eq!(sauna.slug, "sauna");

    Ok(())
}

/// Expected: renaming an amenity drops cached listing searches
#[tokio::test]
async fn update_invalidates_listing_cache() -> Result<(), AppError> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let cache = ListingCache::new(Duration::from_secs(60));
    let store = LocalDiskStore::new(std::env::temp_dir(), "/storage");
    let wifi = create_amenity(db, "Wifi").await?;

    ListingService::new(db, &cache, &store)
        .search(&ListingSearchQuery::default())
        .await?;
    assert_eq!(cache.len().await, 1);

    let renamed = AmenityService::new(db, &cache)
        .update(
            wifi.id,
            UpdateAmenityParams {
                name: Some("Fast wifi".to_string()),
                slug: None,
                description: None,
            },
        )
        .await?
        .unwrap();

    assert_eq!(renamed.name, "Fast wifi");
    assert_eq!(cache.len().await, 0);

    Ok(())
}
