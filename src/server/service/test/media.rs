use std::path::PathBuf;

use test_utils::{builder::TestBuilder, factory::helpers::create_listing_with_host};
use uuid::Uuid;

use crate::server::{
    error::{media::MediaError, AppError},
    model::target::Target,
    service::media::{MediaService, LISTING_COLLECTION, MAX_UPLOAD_BYTES},
    storage::LocalDiskStore,
};

fn temp_root() -> PathBuf {
    std::env::temp_dir().join(format!("media-{}", Uuid::new_v4()))
}

/// Expected: file written under the root, rows ordered by upload, URL built from base
#[tokio::test]
async fn upload_stores_file_and_orders_rows() -> Result<(), AppError> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let root = temp_root();
    let store = LocalDiskStore::new(&root, "https://cdn.test/storage");
    let (_host, listing) = create_listing_with_host(db).await?;
    let service = MediaService::new(db, &store);

    let first = service
        .upload(listing.id, "front.JPG".to_string(), b"jpeg-bytes")
        .await?;
    let second = service
        .upload(listing.id, "tour.mp4".to_string(), b"mp4-bytes")
        .await?;

    assert_eq!(first.order, 0);
    assert_eq!(second.order, 1);
    assert_eq!(first.owner, Target::Listing(listing.id));
    assert_eq!(first.collection, LISTING_COLLECTION);
    assert_eq!(first.mime_type.as_deref(), Some("image/jpeg"));
    assert_eq!(second.mime_type.as_deref(), Some("video/mp4"));
    assert_eq!(first.file_size, Some(10));
    assert!(first.file_path.ends_with(".jpg"));
    assert_eq!(
        first.url,
        format!("https://cdn.test/storage/{}", first.file_path)
    );
    assert_eq!(
        tokio::fs::read(root.join(&first.file_path)).await?,
        b"jpeg-bytes"
    );

    let listed: Vec<Uuid> = service
        .for_owner(&Target::Listing(listing.id))
        .await?
        .into_iter()
        .map(|media| media.id)
        .collect();
    assert_eq!(listed, vec![first.id, second.id]);

    tokio::fs::remove_dir_all(root).await?;

    Ok(())
}

/// Expected: unsupported, empty and oversized files are rejected before storing
#[tokio::test]
async fn rejects_invalid_uploads() -> Result<(), AppError> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let root = temp_root();
    let store = LocalDiskStore::new(&root, "/storage");
    let (_host, listing) = create_listing_with_host(db).await?;
    let service = MediaService::new(db, &store);

    let pdf = service
        .upload(listing.id, "menu.pdf".to_string(), b"pdf")
        .await;
    assert!(matches!(
        pdf,
        Err(AppError::MediaErr(MediaError::UnsupportedType(_)))
    ));

    let empty = service.upload(listing.id, "a.png".to_string(), b"").await;
    assert!(matches!(
        empty,
        Err(AppError::MediaErr(MediaError::MissingFile))
    ));

    let huge = vec![0u8; MAX_UPLOAD_BYTES + 1];
    let oversized = service.upload(listing.id, "a.png".to_string(), &huge).await;
    assert!(matches!(
        oversized,
        Err(AppError::MediaErr(MediaError::TooLarge(_)))
    ));

    assert!(!root.exists());

    Ok(())
}

/// Expected: Err(NotFound) and nothing written for an unknown listing
#[tokio::test]
async fn rejects_upload_to_unknown_listing() -> Result<(), AppError> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let root = temp_root();
    let store = LocalDiskStore::new(&root, "/storage");

    let result = MediaService::new(db, &store)
        .upload(Uuid::new_v4(), "a.png".to_string(), b"png")
        .await;

    assert!(matches!(result, Err(AppError::NotFound(_))));
    assert!(!root.exists());

    Ok(())
}

/// Expected: delete removes the blob and hides the row; a second delete reports false
#[tokio::test]
async fn delete_removes_blob_and_row() -> Result<(), AppError> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let root = temp_root();
    let store = LocalDiskStore::new(&root, "/storage");
    let (_host, listing) = create_listing_with_host(db).await?;
    let service = MediaService::new(db, &store);

    let media = service
        .upload(listing.id, "room.png".to_string(), b"png")
        .await?;
    let path = root.join(&media.file_path);
    assert!(path.exists());

    assert!(service.delete(media.id).await?);
    assert!(!path.exists());
    assert!(service.get(media.id).await?.is_none());
    assert!(!service.delete(media.id).await?);

    tokio::fs::remove_dir_all(root).await?;

    Ok(())
}
