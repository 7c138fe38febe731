//! Review domain models and parameters.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sea_orm::DbErr;
use uuid::Uuid;

use crate::{
    model::review::{
        CreateReviewDto, PaginatedReviewsDto, ReviewDto, ReviewListQuery, UpdateReviewDto,
    },
    server::{
        error::{review::ReviewError, AppError},
        model::target::Target,
        util::validate,
    },
};

pub const MAX_COMMENT_LEN: usize = 2000;

#[derive(Debug, Clone, PartialEq)]
pub struct Review {
    pub id: Uuid,
    pub user_id: Uuid,
    pub target: Target,
    pub rating: i32,
    pub comment: Option<String>,
    pub is_approved: bool,
    pub created_at: DateTime<Utc>,
}

impl Review {
    /// Converts an entity model to a domain model at the repository boundary.
    ///
    /// # Returns
    /// - `Ok(Review)` - Converted domain model
    /// - `Err(DbErr::Custom)` - Stored target tag is unknown
    pub fn from_entity(entity: entity::review::Model) -> Result<Self, DbErr> {
        let target = Target::from_tagged(&entity.reviewable_type, entity.reviewable_id)
            .ok_or_else(|| {
                DbErr::Custom(format!(
                    "Review {} has unknown target type {}",
                    entity.id, entity.reviewable_type
                ))
            })?;

        Ok(Self {
            id: entity.id,
            user_id: entity.user_id,
            target,
            rating: entity.rating,
            comment: entity.comment,
            is_approved: entity.is_approved,
            created_at: entity.created_at,
        })
    }

    pub fn into_dto(self) -> ReviewDto {
        ReviewDto {
            id: self.id,
            user_id: self.user_id,
            reviewable_type: self.target.tag().to_string(),
            reviewable_id: self.target.id(),
            rating: self.rating,
            comment: self.comment,
            is_approved: self.is_approved,
            created_at: self.created_at,
        }
    }
}

fn validate_rating(rating: i32) -> Result<(), AppError> {
    if !(1..=5).contains(&rating) {
        return Err(AppError::validation(
            "rating",
            "The rating must be between 1 and 5.",
        ));
    }
    Ok(())
}

fn validate_comment(comment: &Option<String>) -> Result<(), AppError> {
    if let Some(comment) = comment {
        validate::max_len("comment", comment, MAX_COMMENT_LEN)?;
    }
    Ok(())
}

#[derive(Debug, Clone)]
pub struct CreateReviewParams {
    pub user_id: Uuid,
    pub target: Target,
    pub rating: i32,
    pub comment: Option<String>,
}

impl CreateReviewParams {
    /// Validates a create request and resolves its target.
    ///
    /// # Returns
    /// - `Ok(CreateReviewParams)` - Valid request
    /// - `Err(ReviewError::UnknownTargetType)` - `reviewable_type` is not `listing` or `user`
    /// - `Err(AppError::Validation)` - Rating out of range or comment too long
    pub fn from_dto(user_id: Uuid, dto: CreateReviewDto) -> Result<Self, AppError> {
        let target = Target::from_tagged(&dto.reviewable_type, dto.reviewable_id)
            .ok_or_else(|| ReviewError::UnknownTargetType(dto.reviewable_type.clone()))?;

        Self::new(user_id, target, dto.rating, dto.comment)
    }

    pub fn new(
        user_id: Uuid,
        target: Target,
        rating: i32,
        comment: Option<String>,
    ) -> Result<Self, AppError> {
        validate_rating(rating)?;
        validate_comment(&comment)?;

        Ok(Self {
            user_id,
            target,
            rating,
            comment,
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct UpdateReviewParams {
    pub rating: Option<i32>,
    pub comment: Option<String>,
}

impl UpdateReviewParams {
    pub fn from_dto(dto: UpdateReviewDto) -> Result<Self, AppError> {
        if let Some(rating) = dto.rating {
            validate_rating(rating)?;
        }
        validate_comment(&dto.comment)?;

        Ok(Self {
            rating: dto.rating,
            comment: dto.comment,
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct ReviewFilter {
    pub target: Option<Target>,
    pub approved_only: bool,
    pub page: u64,
    pub per_page: u64,
}

impl ReviewFilter {
    /// # Arguments
    /// - `query` - Raw query parameters
    /// - `approved_only` - Restrict to approved reviews (non-admin callers)
    pub fn from_query(query: ReviewListQuery, approved_only: bool) -> Result<Self, AppError> {
        let target = match (query.reviewable_type, query.reviewable_id) {
            (Some(tag), Some(id)) => Some(
                Target::from_tagged(&tag, id).ok_or(ReviewError::UnknownTargetType(tag))?,
            ),
            _ => None,
        };

        Ok(Self {
            target,
            approved_only,
            page: query.page,
            per_page: query.per_page.unwrap_or(15).clamp(1, 100),
        })
    }
}

#[derive(Debug, Clone)]
pub struct PaginatedReviews {
    pub reviews: Vec<Review>,
    pub total: u64,
    pub page: u64,
    pub per_page: u64,
    pub total_pages: u64,
}

impl PaginatedReviews {
    pub fn into_dto(self) -> PaginatedReviewsDto {
        PaginatedReviewsDto {
            reviews: self.reviews.into_iter().map(Review::into_dto).collect(),
            total: self.total,
            page: self.page,
            per_page: self.per_page,
            total_pages: self.total_pages,
        }
    }
}

/// Aggregate rating derived from a listing's approved reviews.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListingRating {
    /// Mean rating rounded to two places, zero without reviews.
    pub rating: Decimal,
    pub review_count: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_out_of_range_rating() {
        let target = Target::Listing(Uuid::new_v4());

        assert!(CreateReviewParams::new(Uuid::new_v4(), target, 0, None).is_err());
        assert!(CreateReviewParams::new(Uuid::new_v4(), target, 6, None).is_err());
        assert!(CreateReviewParams::new(Uuid::new_v4(), target, 5, None).is_ok());
    }

    #[test]
    fn rejects_unknown_target_type() {
        let dto = CreateReviewDto {
            reviewable_type: "booking".to_string(),
            reviewable_id: Uuid::new_v4(),
            rating: 4,
            comment: None,
        };

        let result = CreateReviewParams::from_dto(Uuid::new_v4(), dto);

        assert!(matches!(
            result,
            Err(AppError::ReviewErr(ReviewError::UnknownTargetType(_)))
        ));
    }
}
