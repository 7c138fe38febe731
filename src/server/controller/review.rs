use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use uuid::Uuid;

use crate::{
    model::{
        api::ErrorDto,
        review::{
            CreateListingReviewDto, CreateReviewDto, ModerateReviewDto, PaginatedReviewsDto,
            ReviewDto, ReviewListQuery, UpdateReviewDto,
        },
    },
    server::{
        error::AppError,
        middleware::auth::AuthGuard,
        model::{
            review::{CreateReviewParams, Review, ReviewFilter, UpdateReviewParams},
            target::Target,
            user::{Actor, Role},
        },
        policy::{self, Action, PolicyTarget},
        service::review::ReviewService,
        state::AppState,
    },
};

/// Tag for grouping review endpoints in OpenAPI documentation
pub static REVIEW_TAG: &str = "review";

fn review_target(review: &Review) -> PolicyTarget {
    PolicyTarget::Review {
        author_id: review.user_id,
        is_approved: review.is_approved,
    }
}

/// Admins and support staff also see hidden reviews.
fn sees_hidden(actor: Option<&Actor>) -> bool {
    actor.is_some_and(|a| a.is_admin() || a.has_role(Role::Support))
}

async fn load_authorized(
    service: &ReviewService<'_>,
    actor: Option<&Actor>,
    id: Uuid,
    action: Action,
) -> Result<Review, AppError> {
    let review = service
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Review not found".to_string()))?;
    policy::ensure(actor, action, &review_target(&review))?;

    Ok(review)
}

/// Get a page of reviews, optionally for a single target.
///
/// # Access Control
/// - Public; hidden reviews are only listed for `admin` and `support`
#[utoipa::path(
    get,
    path = "/api/reviews",
    tag = REVIEW_TAG,
    params(ReviewListQuery),
    responses(
        (status = 200, description = "Reviews", body = PaginatedReviewsDto),
        (status = 422, description = "Unknown reviewable type", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_reviews(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<ReviewListQuery>,
) -> Result<impl IntoResponse, AppError> {
    let actor = AuthGuard::new(&state.db, &headers).optional().await?;

    let filter = ReviewFilter::from_query(query, !sees_hidden(actor.as_ref()))?;
    let page = ReviewService::new(&state.db, &state.listing_cache)
        .list(filter)
        .await?;

    Ok((StatusCode::OK, Json(page.into_dto())))
}

/// Review a listing or a user.
///
/// # Access Control
/// - `guest` or `admin`
///
/// # Returns
/// - `201 Created` - The new review
/// - `404 Not Found` - Reviewed listing or user does not exist
/// - `409 Conflict` - Caller already reviewed this target
/// - `422 Unprocessable Entity` - Rating out of range or unknown target type
#[utoipa::path(
    post,
    path = "/api/reviews",
    tag = REVIEW_TAG,
    request_body = CreateReviewDto,
    responses(
        (status = 201, description = "Review created", body = ReviewDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not allowed", body = ErrorDto),
        (status = 404, description = "Target not found", body = ErrorDto),
        (status = 409, description = "Already reviewed", body = ErrorDto),
        (status = 422, description = "Invalid review data", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn create_review(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<CreateReviewDto>,
) -> Result<impl IntoResponse, AppError> {
    let actor = AuthGuard::new(&state.db, &headers).require(&[]).await?;
    policy::ensure(Some(&actor), Action::Create, &PolicyTarget::Reviews)?;

    let params = CreateReviewParams::from_dto(actor.user_id, payload)?;
    let review = ReviewService::new(&state.db, &state.listing_cache)
        .create(params)
        .await?;

    Ok((StatusCode::CREATED, Json(review.into_dto())))
}

/// Get a review by ID.
///
/// # Access Control
/// - Approved reviews are public; hidden ones are visible to their author and admins
#[utoipa::path(
    get,
    path = "/api/reviews/{id}",
    tag = REVIEW_TAG,
    params(("id" = Uuid, Path, description = "Review ID")),
    responses(
        (status = 200, description = "The review", body = ReviewDto),
        (status = 403, description = "Not allowed", body = ErrorDto),
        (status = 404, description = "Review not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_review(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let actor = AuthGuard::new(&state.db, &headers).optional().await?;
    let service = ReviewService::new(&state.db, &state.listing_cache);

    let review = load_authorized(&service, actor.as_ref(), id, Action::View).await?;

    Ok((StatusCode::OK, Json(review.into_dto())))
}

/// Edit the rating or comment of a review.
///
/// # Access Control
/// - The review's author
#[utoipa::path(
    put,
    path = "/api/reviews/{id}",
    tag = REVIEW_TAG,
    params(("id" = Uuid, Path, description = "Review ID")),
    request_body = UpdateReviewDto,
    responses(
        (status = 200, description = "Review updated", body = ReviewDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not allowed", body = ErrorDto),
        (status = 404, description = "Review not found", body = ErrorDto),
        (status = 422, description = "Invalid review data", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn update_review(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateReviewDto>,
) -> Result<impl IntoResponse, AppError> {
    let actor = AuthGuard::new(&state.db, &headers).require(&[]).await?;
    let service = ReviewService::new(&state.db, &state.listing_cache);

    load_authorized(&service, Some(&actor), id, Action::Update).await?;
    let params = UpdateReviewParams::from_dto(payload)?;
    let review = service.update(id, params).await?;

    Ok((StatusCode::OK, Json(review.into_dto())))
}

/// Approve or hide a review.
///
/// # Access Control
/// - `admin` or `support`
#[utoipa::path(
    patch,
    path = "/api/reviews/{id}/moderate",
    tag = REVIEW_TAG,
    params(("id" = Uuid, Path, description = "Review ID")),
    request_body = ModerateReviewDto,
    responses(
        (status = 200, description = "Review moderated", body = ReviewDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not allowed", body = ErrorDto),
        (status = 404, description = "Review not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn moderate_review(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
    Json(payload): Json<ModerateReviewDto>,
) -> Result<impl IntoResponse, AppError> {
    let actor = AuthGuard::new(&state.db, &headers).require(&[]).await?;
    let service = ReviewService::new(&state.db, &state.listing_cache);

    load_authorized(&service, Some(&actor), id, Action::Moderate).await?;
    let review = service.moderate(id, payload.is_approved).await?;

    Ok((StatusCode::OK, Json(review.into_dto())))
}

/// Delete a review.
///
/// # Access Control
/// - The review's author, `admin` or `support`
#[utoipa::path(
    delete,
    path = "/api/reviews/{id}",
    tag = REVIEW_TAG,
    params(("id" = Uuid, Path, description = "Review ID")),
    responses(
        (status = 204, description = "Review deleted"),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not allowed", body = ErrorDto),
        (status = 404, description = "Review not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn delete_review(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let actor = AuthGuard::new(&state.db, &headers).require(&[]).await?;
    let service = ReviewService::new(&state.db, &state.listing_cache);

    load_authorized(&service, Some(&actor), id, Action::Delete).await?;
    service.delete(id).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Get the approved reviews of a listing, newest first.
///
/// # Access Control
/// - Public
#[utoipa::path(
    get,
    path = "/api/listings/{id}/reviews",
    tag = REVIEW_TAG,
    params(("id" = Uuid, Path, description = "Listing ID")),
    responses(
        (status = 200, description = "Approved reviews", body = Vec<ReviewDto>),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_listing_reviews(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let reviews = ReviewService::new(&state.db, &state.listing_cache)
        .list_for_listing(id)
        .await?;

    let dtos: Vec<ReviewDto> = reviews.into_iter().map(Review::into_dto).collect();

    Ok((StatusCode::OK, Json(dtos)))
}

/// Review a listing.
///
/// # Access Control
/// - `guest` or `admin`
///
/// # Returns
/// - `201 Created` - The new review
/// - `404 Not Found` - No such listing
/// - `409 Conflict` - Caller already reviewed this listing
#[utoipa::path(
    post,
    path = "/api/listings/{id}/reviews",
    tag = REVIEW_TAG,
    params(("id" = Uuid, Path, description = "Listing ID")),
    request_body = CreateListingReviewDto,
    responses(
        (status = 201, description = "Review created", body = ReviewDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not allowed", body = ErrorDto),
        (status = 404, description = "Listing not found", body = ErrorDto),
        (status = 409, description = "Already reviewed", body = ErrorDto),
        (status = 422, description = "Invalid review data", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn create_listing_review(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
    Json(payload): Json<CreateListingReviewDto>,
) -> Result<impl IntoResponse, AppError> {
    let actor = AuthGuard::new(&state.db, &headers).require(&[]).await?;
    policy::ensure(Some(&actor), Action::Create, &PolicyTarget::Reviews)?;

    let params = CreateReviewParams::new(
        actor.user_id,
        Target::Listing(id),
        payload.rating,
        payload.comment,
    )?;
    let review = ReviewService::new(&state.db, &state.listing_cache)
        .create(params)
        .await?;

    Ok((StatusCode::CREATED, Json(review.into_dto())))
}
