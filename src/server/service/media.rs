//! Media uploads for listings.

use std::path::Path;

use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::server::{
    data::{listing::ListingRepository, media::MediaRepository},
    error::{media::MediaError, AppError},
    model::{
        media::{Media, NewMedia},
        target::Target,
    },
    storage::BlobStore,
};

/// Largest accepted upload.
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Collection every listing upload is filed under.
pub const LISTING_COLLECTION: &str = "listing-media";

/// Accepted extensions and the MIME type recorded for each.
const ALLOWED_TYPES: [(&str, &str); 7] = [
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("png", "image/png"),
    ("gif", "image/gif"),
    ("webp", "image/webp"),
    ("mp4", "video/mp4"),
    ("mov", "video/quicktime"),
];

/// Resolves a file name to its lowercase extension and MIME type.
///
/// # Returns
/// - `Ok((extension, mime))` - Extension is allowed
/// - `Err(MediaError::UnsupportedType)` - Missing or disallowed extension
pub fn classify(file_name: &str) -> Result<(String, &'static str), MediaError> {
    let extension = Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .ok_or_else(|| MediaError::UnsupportedType(file_name.to_string()))?;

    match ALLOWED_TYPES.iter().find(|(allowed, _)| *allowed == extension) {
        Some((_, mime)) => Ok((extension, *mime)),
        None => Err(MediaError::UnsupportedType(extension)),
    }
}

pub struct MediaService<'a> {
    db: &'a DatabaseConnection,
    store: &'a dyn BlobStore,
}

impl<'a> MediaService<'a> {
    pub fn new(db: &'a DatabaseConnection, store: &'a dyn BlobStore) -> Self {
        Self { db, store }
    }

    /// Stores an upload and records it against a listing.
    ///
    /// The blob is written first; if the row insert then fails, the blob is removed.
    ///
    /// # Arguments
    /// - `listing_id` - Listing the file belongs to
    /// - `file_name` - Client file name, used for the extension and kept for display
    /// - `bytes` - File contents
    ///
    /// # Returns
    /// - `Ok(Media)` - Stored media with its public URL
    /// - `Err(AppError::NotFound)` - No such listing
    /// - `Err(MediaError)` - Empty, oversized or unsupported file, or blob store failure
    pub async fn upload(
        &self,
        listing_id: Uuid,
        file_name: String,
        bytes: &[u8],
    ) -> Result<Media, AppError> {
        if bytes.is_empty() {
            return Err(MediaError::MissingFile.into());
        }
        if bytes.len() > MAX_UPLOAD_BYTES {
            return Err(MediaError::TooLarge(bytes.len()).into());
        }
        let (extension, mime_type) = classify(&file_name)?;

        ListingRepository::new(self.db)
            .find_by_id(listing_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Listing not found".to_string()))?;

        let owner = Target::Listing(listing_id);
        let file_path = format!(
            "media/listings/{}/{}.{}",
            listing_id,
            Uuid::new_v4(),
            extension
        );

        self.store
            .put(&file_path, bytes)
            .await
            .map_err(MediaError::Storage)?;

        let repo = MediaRepository::new(self.db);
        let inserted = async {
            let order = repo.count_for_owner(&owner, LISTING_COLLECTION).await?;
            repo.create(
                NewMedia {
                    owner,
                    file_name,
                    file_path: file_path.clone(),
                    mime_type: Some(mime_type.to_string()),
                    file_size: bytes.len() as i64,
                    disk: self.store.disk().to_string(),
                    collection: LISTING_COLLECTION.to_string(),
                },
                i32::try_from(order).unwrap_or(i32::MAX),
            )
            .await
        }
        .await;

        let media = match inserted {
            Ok(media) => media,
            Err(e) => {
                if let Err(cleanup) = self.store.delete(&file_path).await {
                    tracing::warn!("Failed to remove orphaned upload {}: {}", file_path, cleanup);
                }
                return Err(e.into());
            }
        };

        tracing::info!("Stored media {} for listing {}", media.id, listing_id);
        self.to_media(media)
    }

    pub async fn get(&self, id: Uuid) -> Result<Option<Media>, AppError> {
        MediaRepository::new(self.db)
            .find_by_id(id)
            .await?
            .map(|media| self.to_media(media))
            .transpose()
    }

    /// Live media of an owner in display order.
    pub async fn for_owner(&self, owner: &Target) -> Result<Vec<Media>, AppError> {
        MediaRepository::new(self.db)
            .for_owner(owner)
            .await?
            .into_iter()
            .map(|media| self.to_media(media))
            .collect()
    }

    /// Removes the blob, then soft deletes the row.
    ///
    /// # Returns
    /// - `Ok(true)` - Media deleted
    /// - `Ok(false)` - No such media
    pub async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let repo = MediaRepository::new(self.db);
        let Some(media) = repo.find_by_id(id).await? else {
            return Ok(false);
        };

        self.store
            .delete(&media.file_path)
            .await
            .map_err(MediaError::Storage)?;
        repo.soft_delete(id).await?;

        Ok(true)
    }

    fn to_media(&self, media: entity::media::Model) -> Result<Media, AppError> {
        let id = media.id;
        let url = self.store.url(&media.file_path);

        Media::from_entity(media, url).ok_or_else(|| {
            AppError::InternalError(format!("Media {} has an unknown owner type", id))
        })
    }
}
