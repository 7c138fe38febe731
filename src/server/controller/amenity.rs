use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use uuid::Uuid;

use crate::{
    model::{
        amenity::{AmenityDto, CreateAmenityDto, UpdateAmenityDto},
        api::ErrorDto,
    },
    server::{
        error::AppError,
        middleware::auth::AuthGuard,
        model::amenity::{Amenity, CreateAmenityParams, UpdateAmenityParams},
        policy::{self, Action, PolicyTarget},
        service::amenity::AmenityService,
        state::AppState,
    },
};

/// Tag for grouping amenity endpoints in OpenAPI documentation
pub static AMENITY_TAG: &str = "amenity";

/// Get every amenity ordered by name.
///
/// # Access Control
/// - Public
#[utoipa::path(
    get,
    path = "/api/amenities",
    tag = AMENITY_TAG,
    responses(
        (status = 200, description = "All amenities", body = Vec<AmenityDto>),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_amenities(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let amenities = AmenityService::new(&state.db, &state.listing_cache)
        .get_all()
        .await?;

    let dtos: Vec<AmenityDto> = amenities.into_iter().map(Amenity::into_dto).collect();

    Ok((StatusCode::OK, Json(dtos)))
}

/// Get an amenity by ID.
///
/// # Access Control
/// - Public
#[utoipa::path(
    get,
    path = "/api/amenities/{id}",
    tag = AMENITY_TAG,
    params(("id" = Uuid, Path, description = "Amenity ID")),
    responses(
        (status = 200, description = "The amenity", body = AmenityDto),
        (status = 404, description = "Amenity not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_amenity(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let amenity = AmenityService::new(&state.db, &state.listing_cache)
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Amenity not found".to_string()))?;

    Ok((StatusCode::OK, Json(amenity.into_dto())))
}

/// Create an amenity.
///
/// # Access Control
/// - `admin`
///
/// # Returns
/// - `201 Created` - The new amenity
/// - `403 Forbidden` - Caller is not an admin
/// - `422 Unprocessable Entity` - Invalid data or slug already taken
#[utoipa::path(
    post,
    path = "/api/amenities",
    tag = AMENITY_TAG,
    request_body = CreateAmenityDto,
    responses(
        (status = 201, description = "Amenity created", body = AmenityDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not allowed", body = ErrorDto),
        (status = 422, description = "Invalid amenity data", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn create_amenity(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<CreateAmenityDto>,
) -> Result<impl IntoResponse, AppError> {
    let actor = AuthGuard::new(&state.db, &headers).require(&[]).await?;
    policy::ensure(Some(&actor), Action::Create, &PolicyTarget::Amenity)?;

    let params = CreateAmenityParams::from_dto(payload)?;
    let amenity = AmenityService::new(&state.db, &state.listing_cache)
        .create(params)
        .await?;

    Ok((StatusCode::CREATED, Json(amenity.into_dto())))
}

/// Update an amenity.
///
/// # Access Control
/// - `admin`
///
/// # Returns
/// - `200 OK` - Updated amenity
/// - `404 Not Found` - No such amenity
/// - `422 Unprocessable Entity` - Invalid data or slug already taken
#[utoipa::path(
    put,
    path = "/api/amenities/{id}",
    tag = AMENITY_TAG,
    params(("id" = Uuid, Path, description = "Amenity ID")),
    request_body = UpdateAmenityDto,
    responses(
        (status = 200, description = "Amenity updated", body = AmenityDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not allowed", body = ErrorDto),
        (status = 404, description = "Amenity not found", body = ErrorDto),
        (status = 422, description = "Invalid amenity data", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn update_amenity(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateAmenityDto>,
) -> Result<impl IntoResponse, AppError> {
    let actor = AuthGuard::new(&state.db, &headers).require(&[]).await?;
    policy::ensure(Some(&actor), Action::Update, &PolicyTarget::Amenity)?;

    let params = UpdateAmenityParams::from_dto(payload)?;
    let amenity = AmenityService::new(&state.db, &state.listing_cache)
        .update(id, params)
        .await?
        .ok_or_else(|| AppError::NotFound("Amenity not found".to_string()))?;

    Ok((StatusCode::OK, Json(amenity.into_dto())))
}

/// Delete an amenity and detach it from every listing.
///
/// # Access Control
/// - `admin`
#[utoipa::path(
    delete,
    path = "/api/amenities/{id}",
    tag = AMENITY_TAG,
    params(("id" = Uuid, Path, description = "Amenity ID")),
    responses(
        (status = 204, description = "Amenity deleted"),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not allowed", body = ErrorDto),
        (status = 404, description = "Amenity not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn delete_amenity(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let actor = AuthGuard::new(&state.db, &headers).require(&[]).await?;
    policy::ensure(Some(&actor), Action::Delete, &PolicyTarget::Amenity)?;

    let deleted = AmenityService::new(&state.db, &state.listing_cache)
        .delete(id)
        .await?;

    if !deleted {
        return Err(AppError::NotFound("Amenity not found".to_string()));
    }

    Ok(StatusCode::NO_CONTENT)
}
