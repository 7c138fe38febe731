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
        booking::{AvailabilityDto, AvailabilityQuery},
        listing::{
            CreateListingDto, ListingDetailDto, ListingDto, ListingSearchQuery,
            PaginatedListingsDto, UpdateListingDto,
        },
    },
    server::{
        error::AppError,
        middleware::auth::AuthGuard,
        model::listing::{CreateListingParams, Listing, UpdateListingParams},
        policy::{self, Action, PolicyTarget},
        service::{booking::BookingService, listing::ListingService},
        state::AppState,
    },
};

/// Tag for grouping listing endpoints in OpenAPI documentation
pub static LISTING_TAG: &str = "listing";

fn listing_target(listing: &Listing) -> PolicyTarget {
    PolicyTarget::Listing {
        host_id: listing.host_id,
        is_active: listing.is_active,
    }
}

fn service(state: &AppState) -> ListingService<'_> {
    ListingService::new(&state.db, &state.listing_cache, state.blob_store.as_ref())
}

/// Search active listings.
///
/// Results are served from the listing search cache when possible.
///
/// # Access Control
/// - Public
///
/// # Returns
/// - `200 OK` - One page of matching listings
/// - `422 Unprocessable Entity` - Malformed filter values
#[utoipa::path(
    get,
    path = "/api/listings",
    tag = LISTING_TAG,
    params(ListingSearchQuery),
    responses(
        (status = 200, description = "Matching listings", body = PaginatedListingsDto),
        (status = 422, description = "Invalid search parameters", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn search_listings(
    State(state): State<AppState>,
    Query(query): Query<ListingSearchQuery>,
) -> Result<impl IntoResponse, AppError> {
    let page = service(&state).search(&query).await?;

    Ok((StatusCode::OK, Json(page.into_dto())))
}

/// Create a listing owned by the caller.
///
/// # Access Control
/// - `host` or `admin`
///
/// # Returns
/// - `201 Created` - The new listing
/// - `401 Unauthorized` - Missing or unknown token
/// - `403 Forbidden` - Caller is neither host nor admin
/// - `422 Unprocessable Entity` - Invalid listing data
#[utoipa::path(
    post,
    path = "/api/listings",
    tag = LISTING_TAG,
    request_body = CreateListingDto,
    responses(
        (status = 201, description = "Listing created", body = ListingDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not allowed", body = ErrorDto),
        (status = 422, description = "Invalid listing data", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn create_listing(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<CreateListingDto>,
) -> Result<impl IntoResponse, AppError> {
    let actor = AuthGuard::new(&state.db, &headers).require(&[]).await?;
    policy::ensure(Some(&actor), Action::Create, &PolicyTarget::Listings)?;

    let params = CreateListingParams::from_dto(actor.user_id, payload)?;
    let listing = service(&state).create(params).await?;

    Ok((StatusCode::CREATED, Json(listing.into_dto())))
}

/// Get a listing with its amenities, approved reviews and media.
///
/// # Access Control
/// - Active listings are public; inactive ones are visible to their host and admins
///
/// # Returns
/// - `200 OK` - Listing detail
/// - `403 Forbidden` - Listing is inactive and the caller may not see it
/// - `404 Not Found` - No such listing
#[utoipa::path(
    get,
    path = "/api/listings/{id}",
    tag = LISTING_TAG,
    params(("id" = Uuid, Path, description = "Listing ID")),
    responses(
        (status = 200, description = "Listing detail", body = ListingDetailDto),
        (status = 403, description = "Not allowed", body = ErrorDto),
        (status = 404, description = "Listing not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_listing(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let actor = AuthGuard::new(&state.db, &headers).optional().await?;

    let detail = service(&state)
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Listing not found".to_string()))?;
    policy::ensure(actor.as_ref(), Action::View, &listing_target(&detail.listing))?;

    Ok((StatusCode::OK, Json(detail.into_dto())))
}

/// Update a listing; a given amenity list replaces the current set.
///
/// # Access Control
/// - The listing's host or an admin
///
/// # Returns
/// - `200 OK` - Updated listing
/// - `403 Forbidden` - Caller does not own the listing
/// - `404 Not Found` - No such listing
/// - `422 Unprocessable Entity` - Invalid listing data
#[utoipa::path(
    put,
    path = "/api/listings/{id}",
    tag = LISTING_TAG,
    params(("id" = Uuid, Path, description = "Listing ID")),
    request_body = UpdateListingDto,
    responses(
        (status = 200, description = "Listing updated", body = ListingDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not allowed", body = ErrorDto),
        (status = 404, description = "Listing not found", body = ErrorDto),
        (status = 422, description = "Invalid listing data", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn update_listing(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateListingDto>,
) -> Result<impl IntoResponse, AppError> {
    let actor = AuthGuard::new(&state.db, &headers).require(&[]).await?;
    let service = service(&state);

    let listing = service
        .find(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Listing not found".to_string()))?;
    policy::ensure(Some(&actor), Action::Update, &listing_target(&listing))?;

    let params = UpdateListingParams::from_dto(payload)?;
    let listing = service.update(id, params).await?;

    Ok((StatusCode::OK, Json(listing.into_dto())))
}

/// Soft delete a listing.
///
/// # Access Control
/// - The listing's host or an admin
///
/// # Returns
/// - `204 No Content` - Listing deleted
/// - `403 Forbidden` - Caller does not own the listing
/// - `404 Not Found` - No such listing
#[utoipa::path(
    delete,
    path = "/api/listings/{id}",
    tag = LISTING_TAG,
    params(("id" = Uuid, Path, description = "Listing ID")),
    responses(
        (status = 204, description = "Listing deleted"),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not allowed", body = ErrorDto),
        (status = 404, description = "Listing not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn delete_listing(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let actor = AuthGuard::new(&state.db, &headers).require(&[]).await?;
    let service = service(&state);

    let listing = service
        .find(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Listing not found".to_string()))?;
    policy::ensure(Some(&actor), Action::Delete, &listing_target(&listing))?;

    service.delete(id).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Check whether a stay is free and what it would cost.
///
/// # Access Control
/// - Public
///
/// # Returns
/// - `200 OK` - Availability and quote
/// - `404 Not Found` - No such listing
/// - `422 Unprocessable Entity` - End date not after start date
#[utoipa::path(
    get,
    path = "/api/listings/{id}/availability",
    tag = LISTING_TAG,
    params(
        ("id" = Uuid, Path, description = "Listing ID"),
        AvailabilityQuery
    ),
    responses(
        (status = 200, description = "Availability and price", body = AvailabilityDto),
        (status = 404, description = "Listing not found", body = ErrorDto),
        (status = 422, description = "Invalid date range", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn check_availability(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(query): Query<AvailabilityQuery>,
) -> Result<impl IntoResponse, AppError> {
    let check = BookingService::new(&state.db, &state.events)
        .check_stay(id, query.start_date, query.end_date)
        .await?;

    Ok((
        StatusCode::OK,
        Json(AvailabilityDto {
            listing_id: id,
            start_date: query.start_date,
            end_date: query.end_date,
            available: check.available,
            nights: check.quote.nights,
            total_price: check.quote.total_price,
        }),
    ))
}
