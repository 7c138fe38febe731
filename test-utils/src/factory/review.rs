//! Review factory for creating test review entities.

use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};
use uuid::Uuid;

/// Factory for creating test reviews.
///
/// Targets a listing by default; use `target_user` to review a user instead.
pub struct ReviewFactory<'a> {
    db: &'a DatabaseConnection,
    user_id: Uuid,
    reviewable_type: String,
    reviewable_id: Uuid,
    rating: i32,
    comment: Option<String>,
    is_approved: bool,
}

impl<'a> ReviewFactory<'a> {
    /// Creates a new ReviewFactory for an approved 5-star listing review.
    pub fn new(db: &'a DatabaseConnection, user_id: Uuid, listing_id: Uuid) -> Self {
        Self {
            db,
            user_id,
            reviewable_type: "listing".to_string(),
            reviewable_id: listing_id,
            rating: 5,
            comment: Some("Great stay".to_string()),
            is_approved: true,
        }
    }

    /// Points the review at a user instead of a listing.
    pub fn target_user(mut self, user_id: Uuid) -> Self {
        self.reviewable_type = "user".to_string();
        self.reviewable_id = user_id;
        self
    }

    pub fn rating(mut self, rating: i32) -> Self {
        self.rating = rating;
        self
    }

    pub fn approved(mut self, is_approved: bool) -> Self {
        self.is_approved = is_approved;
        self
    }

    /// Builds and inserts the review entity into the database.
    pub async fn build(self) -> Result<entity::review::Model, DbErr> {
        let now = Utc::now();
        entity::review::ActiveModel {
            id: ActiveValue::Set(Uuid::new_v4()),
            user_id: ActiveValue::Set(self.user_id),
            reviewable_type: ActiveValue::Set(self.reviewable_type),
            reviewable_id: ActiveValue::Set(self.reviewable_id),
            rating: ActiveValue::Set(self.rating),
            comment: ActiveValue::Set(self.comment),
            is_approved: ActiveValue::Set(self.is_approved),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
        }
        .insert(self.db)
        .await
    }
}

/// Creates an approved listing review with the given rating.
pub async fn create_review(
    db: &DatabaseConnection,
    user_id: Uuid,
    listing_id: Uuid,
    rating: i32,
) -> Result<entity::review::Model, DbErr> {
    ReviewFactory::new(db, user_id, listing_id)
        .rating(rating)
        .build()
        .await
}
