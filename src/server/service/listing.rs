//! Listing management and the cached listing search.

use std::collections::HashSet;

use sea_orm::{DatabaseConnection, TransactionTrait};
use uuid::Uuid;

use crate::{
    model::listing::ListingSearchQuery,
    server::{
        data::{
            amenity::AmenityRepository, listing::ListingRepository, media::MediaRepository,
            review::ReviewRepository,
        },
        error::AppError,
        model::{
            amenity::Amenity,
            listing::{
                CreateListingParams, Listing, ListingDetail, ListingSearch, PaginatedListings,
                UpdateListingParams,
            },
            media::Media,
            review::Review,
            target::Target,
        },
        service::cache::{ListingCache, LISTINGS_TAG},
        storage::BlobStore,
    },
};

/// Cache key for a listing index query.
///
/// # Returns
/// - `Ok(String)` - `listings:index:` followed by the query as JSON
/// - `Err(AppError::InternalError)` - Query could not be serialized
pub fn search_cache_key(query: &ListingSearchQuery) -> Result<String, AppError> {
    let canonical = serde_json::to_string(query)
        .map_err(|e| AppError::InternalError(format!("Failed to encode search key: {}", e)))?;

    Ok(format!("listings:index:{}", canonical))
}

pub struct ListingService<'a> {
    db: &'a DatabaseConnection,
    cache: &'a ListingCache,
    store: &'a dyn BlobStore,
}

impl<'a> ListingService<'a> {
    pub fn new(
        db: &'a DatabaseConnection,
        cache: &'a ListingCache,
        store: &'a dyn BlobStore,
    ) -> Self {
        Self { db, cache, store }
    }

    /// Runs the listing index query through the search cache.
    ///
    /// # Arguments
    /// - `query` - Raw query parameters; also the cache key
    ///
    /// # Returns
    /// - `Ok(PaginatedListings)` - Cached or freshly loaded page
    /// - `Err(AppError::Validation)` - Malformed filter values
    /// - `Err(AppError::DbErr)` - Database error on a cache miss
    pub async fn search(&self, query: &ListingSearchQuery) -> Result<PaginatedListings, AppError> {
        let search = ListingSearch::from_query(query)?;
        let key = search_cache_key(query)?;

        self.cache
            .remember(&key, &[LISTINGS_TAG], || self.load_page(&search))
            .await
    }

    /// Creates a listing and links its amenities.
    ///
    /// # Returns
    /// - `Ok(Listing)` - The created listing with amenities
    /// - `Err(AppError::Validation)` - An amenity id does not exist
    pub async fn create(&self, params: CreateListingParams) -> Result<Listing, AppError> {
        self.ensure_amenities_exist(&params.amenities).await?;

        let txn = self.db.begin().await?;
        let listing = ListingRepository::new(&txn).create(params).await?;
        txn.commit().await?;

        tracing::info!("Listing {} created by host {}", listing.id, listing.host_id);
        self.cache.invalidate_tag(LISTINGS_TAG).await;

        self.hydrate(listing).await
    }

    /// Gets a listing with its amenities.
    pub async fn find(&self, id: Uuid) -> Result<Option<Listing>, AppError> {
        match ListingRepository::new(self.db).find_by_id(id).await? {
            Some(listing) => Ok(Some(self.hydrate(listing).await?)),
            None => Ok(None),
        }
    }

    /// Gets a listing with amenities, approved reviews and media.
    ///
    /// # Returns
    /// - `Ok(Some(ListingDetail))` - Listing found
    /// - `Ok(None)` - No such listing, or it was deleted
    pub async fn get(&self, id: Uuid) -> Result<Option<ListingDetail>, AppError> {
        let Some(listing) = self.find(id).await? else {
            return Ok(None);
        };

        let reviews = ReviewRepository::new(self.db)
            .approved_for_listing(id)
            .await?
            .into_iter()
            .map(Review::from_entity)
            .collect::<Result<Vec<_>, _>>()?;

        let media = MediaRepository::new(self.db)
            .for_owner(&Target::Listing(id))
            .await?
            .into_iter()
            .filter_map(|media| {
                let url = self.store.url(&media.file_path);
                Media::from_entity(media, url)
            })
            .collect();

        Ok(Some(ListingDetail {
            listing,
            reviews,
            media,
        }))
    }

    /// Applies a partial update; a given amenity list replaces the current set.
    ///
    /// # Returns
    /// - `Ok(Listing)` - Updated listing
    /// - `Err(AppError::NotFound)` - No such listing
    /// - `Err(AppError::Validation)` - An amenity id does not exist
    pub async fn update(&self, id: Uuid, params: UpdateListingParams) -> Result<Listing, AppError> {
        if let Some(amenities) = &params.amenities {
            self.ensure_amenities_exist(amenities).await?;
        }

        let txn = self.db.begin().await?;
        let repo = ListingRepository::new(&txn);
        repo.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Listing not found".to_string()))?;
        let listing = repo.update(id, params).await?;
        txn.commit().await?;

        self.cache.invalidate_tag(LISTINGS_TAG).await;

        self.hydrate(listing).await
    }

    /// Soft deletes a listing.
    ///
    /// # Returns
    /// - `Ok(())` - Listing deleted
    /// - `Err(AppError::NotFound)` - No such listing
    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let repo = ListingRepository::new(self.db);
        repo.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Listing not found".to_string()))?;

        repo.soft_delete(id).await?;

        tracing::info!("Listing {} deleted", id);
        self.cache.invalidate_tag(LISTINGS_TAG).await;

        Ok(())
    }

    async fn load_page(&self, search: &ListingSearch) -> Result<PaginatedListings, AppError> {
        let repo = ListingRepository::new(self.db);
        let (rows, total) = repo.search(search).await?;

        let ids: Vec<Uuid> = rows.iter().map(|listing| listing.id).collect();
        let mut amenities = repo.amenities_for(&ids).await?;

        let listings = rows
            .into_iter()
            .map(|listing| {
                let linked = amenities
                    .remove(&listing.id)
                    .unwrap_or_default()
                    .into_iter()
                    .map(Amenity::from_entity)
                    .collect();
                Listing::from_entity(listing, linked)
            })
            .collect();

        Ok(PaginatedListings {
            listings,
            total,
            page: search.page,
            per_page: search.per_page,
            total_pages: total.div_ceil(search.per_page),
        })
    }

    async fn hydrate(&self, listing: entity::listing::Model) -> Result<Listing, AppError> {
        let amenities = ListingRepository::new(self.db)
            .amenities_for(&[listing.id])
            .await?
            .remove(&listing.id)
            .unwrap_or_default()
            .into_iter()
            .map(Amenity::from_entity)
            .collect();

        Ok(Listing::from_entity(listing, amenities))
    }

    async fn ensure_amenities_exist(&self, ids: &[Uuid]) -> Result<(), AppError> {
        let unique: HashSet<Uuid> = ids.iter().copied().collect();
        if unique.is_empty() {
            return Ok(());
        }

        let ids: Vec<Uuid> = unique.into_iter().collect();
        let found = AmenityRepository::new(self.db).count_existing(&ids).await?;
        if found != ids.len() as u64 {
            return Err(AppError::validation(
                "amenities",
                "The selected amenities are invalid.",
            ));
        }

        Ok(())
    }
}
