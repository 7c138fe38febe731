use sea_orm::{DatabaseConnection, DbErr, SqlErr, TransactionTrait};
use uuid::Uuid;

use crate::server::{
    data::{listing::ListingRepository, review::ReviewRepository, user::UserRepository},
    error::{review::ReviewError, AppError},
    model::{
        review::{
            CreateReviewParams, ListingRating, PaginatedReviews, Review, ReviewFilter,
            UpdateReviewParams,
        },
        target::Target,
    },
    service::{
        cache::{ListingCache, LISTINGS_TAG},
        rating::RatingAggregator,
    },
};

pub struct ReviewService<'a> {
    db: &'a DatabaseConnection,
    cache: &'a ListingCache,
}

impl<'a> ReviewService<'a> {
    pub fn new(db: &'a DatabaseConnection, cache: &'a ListingCache) -> Self {
        Self { db, cache }
    }

    /// Creates an approved review.
    ///
    /// The duplicate check and insert share a transaction; a unique-index violation
    /// from a concurrent insert is reported as a duplicate too. Listing ratings are
    /// recomputed after commit.
    ///
    /// # Returns
    /// - `Ok(Review)` - The created review
    /// - `Err(AppError::NotFound)` - Target listing or user does not exist
    /// - `Err(ReviewError::Duplicate)` - Author already reviewed the target
    pub async fn create(&self, params: CreateReviewParams) -> Result<Review, AppError> {
        self.ensure_target_exists(&params.target).await?;
        let target = params.target;

        let txn = self.db.begin().await?;
        let repo = ReviewRepository::new(&txn);

        if repo
            .find_by_author_and_target(params.user_id, &target)
            .await?
            .is_some()
        {
            return Err(ReviewError::Duplicate.into());
        }

        let review = repo.create(params).await.map_err(duplicate_or_db)?;
        txn.commit().await?;

        tracing::info!(
            "Review {} created on {} {}",
            review.id,
            target.tag(),
            target.id()
        );
        self.refresh_rating(&target).await?;

        Ok(Review::from_entity(review)?)
    }

    pub async fn get(&self, id: Uuid) -> Result<Option<Review>, AppError> {
        let review = ReviewRepository::new(self.db).find_by_id(id).await?;

        Ok(review.map(Review::from_entity).transpose()?)
    }

    /// Gets a page of reviews matching `filter`, newest first.
    pub async fn list(&self, filter: ReviewFilter) -> Result<PaginatedReviews, AppError> {
        let (rows, total) = ReviewRepository::new(self.db)
            .get_paginated(&filter)
            .await?;

        let reviews = rows
            .into_iter()
            .map(Review::from_entity)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(PaginatedReviews {
            reviews,
            total,
            page: filter.page,
            per_page: filter.per_page,
            total_pages: total.div_ceil(filter.per_page),
        })
    }

    /// Approved reviews of a listing, newest first.
    pub async fn list_for_listing(&self, listing_id: Uuid) -> Result<Vec<Review>, AppError> {
        let rows = ReviewRepository::new(self.db)
            .approved_for_listing(listing_id)
            .await?;

        Ok(rows
            .into_iter()
            .map(Review::from_entity)
            .collect::<Result<Vec<_>, _>>()?)
    }

    /// Updates rating and comment, then refreshes the target's rating.
    ///
    /// # Returns
    /// - `Ok(Review)` - Updated review
    /// - `Err(AppError::NotFound)` - No such review
    pub async fn update(&self, id: Uuid, params: UpdateReviewParams) -> Result<Review, AppError> {
        self.require(id).await?;

        let updated = ReviewRepository::new(self.db).update(id, params).await?;
        let review = Review::from_entity(updated)?;
        self.refresh_rating(&review.target).await?;

        Ok(review)
    }

    /// Approves or hides a review, then refreshes the target's rating.
    pub async fn moderate(&self, id: Uuid, is_approved: bool) -> Result<Review, AppError> {
        self.require(id).await?;

        let updated = ReviewRepository::new(self.db)
            .set_approved(id, is_approved)
            .await?;
        let review = Review::from_entity(updated)?;

        tracing::info!("Review {} moderated, approved: {}", id, is_approved);
        self.refresh_rating(&review.target).await?;

        Ok(review)
    }

    /// Deletes a review, then refreshes the target's rating.
    ///
    /// # Returns
    /// - `Ok(())` - Review deleted
    /// - `Err(AppError::NotFound)` - No such review
    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let review = self.require(id).await?;

        ReviewRepository::new(self.db).delete(id).await?;
        self.refresh_rating(&review.target).await?;

        Ok(())
    }

    async fn require(&self, id: Uuid) -> Result<Review, AppError> {
        self.get(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Review not found".to_string()))
    }

    async fn ensure_target_exists(&self, target: &Target) -> Result<(), AppError> {
        match target {
            Target::Listing(id) => {
                ListingRepository::new(self.db)
                    .find_by_id(*id)
                    .await?
                    .ok_or_else(|| AppError::NotFound("Listing not found".to_string()))?;
            }
            Target::User(id) => {
                UserRepository::new(self.db)
                    .find_by_id(*id)
                    .await?
                    .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;
            }
        }

        Ok(())
    }

    /// Recomputes the listing rating for listing targets and drops cached searches.
    async fn refresh_rating(&self, target: &Target) -> Result<Option<ListingRating>, AppError> {
        let Some(listing_id) = target.listing_id() else {
            return Ok(None);
        };

        let rating = RatingAggregator::new(self.db)
            .recompute_listing_rating(listing_id)
            .await?;
        self.cache.invalidate_tag(LISTINGS_TAG).await;

        Ok(Some(rating))
    }
}

fn duplicate_or_db(err: DbErr) -> AppError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => ReviewError::Duplicate.into(),
        _ => err.into(),
    }
}
