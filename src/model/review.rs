use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ReviewDto {
    pub id: Uuid,
    pub user_id: Uuid,
    /// `listing` or `user`.
    pub reviewable_type: String,
    pub reviewable_id: Uuid,
    pub rating: i32,
    pub comment: Option<String>,
    pub is_approved: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateReviewDto {
    pub reviewable_type: String,
    pub reviewable_id: Uuid,
    pub rating: i32,
    pub comment: Option<String>,
}

/// Body for reviewing a listing through `/api/listings/{id}/reviews`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateListingReviewDto {
    pub rating: i32,
    pub comment: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdateReviewDto {
    pub rating: Option<i32>,
    pub comment: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ModerateReviewDto {
    pub is_approved: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, IntoParams)]
pub struct ReviewListQuery {
    pub reviewable_type: Option<String>,
    pub reviewable_id: Option<Uuid>,
    #[serde(default)]
    pub page: u64,
    pub per_page: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PaginatedReviewsDto {
    pub reviews: Vec<ReviewDto>,
    pub total: u64,
    pub page: u64,
    pub per_page: u64,
    pub total_pages: u64,
}
