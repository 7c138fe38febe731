use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::server::{
    data::amenity::AmenityRepository,
    error::AppError,
    model::amenity::{Amenity, CreateAmenityParams, UpdateAmenityParams},
    service::cache::{ListingCache, LISTINGS_TAG},
};

pub struct AmenityService<'a> {
    db: &'a DatabaseConnection,
    cache: &'a ListingCache,
}

impl<'a> AmenityService<'a> {
    pub fn new(db: &'a DatabaseConnection, cache: &'a ListingCache) -> Self {
        Self { db, cache }
    }

    /// Gets all amenities ordered by name.
    pub async fn get_all(&self) -> Result<Vec<Amenity>, AppError> {
        let amenities = AmenityRepository::new(self.db).get_all().await?;

        Ok(amenities.into_iter().map(Amenity::from_entity).collect())
    }

    pub async fn get(&self, id: Uuid) -> Result<Option<Amenity>, AppError> {
        let amenity = AmenityRepository::new(self.db).find_by_id(id).await?;

        Ok(amenity.map(Amenity::from_entity))
    }

    /// Creates an amenity.
    ///
    /// # Returns
    /// - `Ok(Amenity)` - The created amenity
    /// - `Err(AppError::Validation)` - Name or slug already in use
    pub async fn create(&self, params: CreateAmenityParams) -> Result<Amenity, AppError> {
        let repo = AmenityRepository::new(self.db);
        if repo
            .name_or_slug_taken(Some(&params.name), Some(&params.slug), None)
            .await?
        {
            return Err(taken());
        }

        let amenity = repo.create(params).await?;

        Ok(Amenity::from_entity(amenity))
    }

    /// Updates an amenity; cached listing pages embed amenities, so they are dropped.
    ///
    /// # Returns
    /// - `Ok(Some(Amenity))` - Updated amenity
    /// - `Ok(None)` - No such amenity
    /// - `Err(AppError::Validation)` - New name or slug already in use
    pub async fn update(
        &self,
        id: Uuid,
        params: UpdateAmenityParams,
    ) -> Result<Option<Amenity>, AppError> {
        let repo = AmenityRepository::new(self.db);
        if repo
            .name_or_slug_taken(params.name.as_deref(), params.slug.as_deref(), Some(id))
            .await?
        {
            return Err(taken());
        }

        let amenity = repo.update(id, params).await?;
        if amenity.is_some() {
            self.cache.invalidate_tag(LISTINGS_TAG).await;
        }

        Ok(amenity.map(Amenity::from_entity))
    }

    /// Deletes an amenity and detaches it from every listing.
    ///
    /// # Returns
    /// - `Ok(true)` - Amenity deleted
    /// - `Ok(false)` - No such amenity
    pub async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let deleted = AmenityRepository::new(self.db).delete(id).await?;
        if deleted {
            self.cache.invalidate_tag(LISTINGS_TAG).await;
        }

        Ok(deleted)
    }
}

fn taken() -> AppError {
    AppError::validation("slug", "The name or slug has already been taken.")
}
