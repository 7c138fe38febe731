use axum::{
    extract::{Multipart, Path, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use uuid::Uuid;

use crate::{
    model::{
        api::ErrorDto,
        media::{MediaDto, MediaUploadDto},
    },
    server::{
        data::listing::ListingRepository,
        error::{media::MediaError, AppError},
        middleware::auth::AuthGuard,
        model::{media::Media, target::Target},
        policy::{self, Action, PolicyTarget},
        service::media::MediaService,
        state::AppState,
    },
};

/// Tag for grouping media endpoints in OpenAPI documentation
pub static MEDIA_TAG: &str = "media";

/// Host of the listing that owns `owner`, or `None` for user-owned media.
async fn owner_host(state: &AppState, owner: &Target) -> Result<Option<Uuid>, AppError> {
    let Some(listing_id) = owner.listing_id() else {
        return Ok(None);
    };

    let listing = ListingRepository::new(&state.db)
        .find_by_id(listing_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Listing not found".to_string()))?;

    Ok(Some(listing.host_id))
}

/// Reads the `file` part of an upload.
///
/// # Returns
/// - `Ok((file_name, bytes))` - The uploaded file
/// - `Err(MediaError::MissingFile)` - No `file` part in the body
/// - `Err(MediaError::Multipart)` - Body could not be read
async fn read_file(mut multipart: Multipart) -> Result<(String, Vec<u8>), MediaError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| MediaError::Multipart(e.to_string()))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let file_name = field.file_name().unwrap_or_default().to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| MediaError::Multipart(e.to_string()))?;

        return Ok((file_name, bytes.to_vec()));
    }

    Err(MediaError::MissingFile)
}

/// Get the media of a listing in display order.
///
/// # Access Control
/// - Public
#[utoipa::path(
    get,
    path = "/api/listings/{id}/media",
    tag = MEDIA_TAG,
    params(("id" = Uuid, Path, description = "Listing ID")),
    responses(
        (status = 200, description = "Listing media", body = Vec<MediaDto>),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_listing_media(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let media = MediaService::new(&state.db, state.blob_store.as_ref())
        .for_owner(&Target::Listing(id))
        .await?;

    let dtos: Vec<MediaDto> = media.into_iter().map(Media::into_dto).collect();

    Ok((StatusCode::OK, Json(dtos)))
}

/// Upload an image or video to a listing.
///
/// # Access Control
/// - The listing's host or an admin
///
/// # Returns
/// - `201 Created` - Stored media with its public URL
/// - `403 Forbidden` - Caller does not own the listing
/// - `404 Not Found` - No such listing
/// - `422 Unprocessable Entity` - Missing, oversized or unsupported file
#[utoipa::path(
    post,
    path = "/api/listings/{id}/media",
    tag = MEDIA_TAG,
    params(("id" = Uuid, Path, description = "Listing ID")),
    request_body(content = MediaUploadDto, content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Media stored", body = MediaDto),
        (status = 400, description = "Malformed upload", body = ErrorDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not allowed", body = ErrorDto),
        (status = 404, description = "Listing not found", body = ErrorDto),
        (status = 422, description = "Invalid file", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn upload_listing_media(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
    multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let actor = AuthGuard::new(&state.db, &headers).require(&[]).await?;

    let listing_host_id = owner_host(&state, &Target::Listing(id)).await?;
    policy::ensure(
        Some(&actor),
        Action::Create,
        &PolicyTarget::Media { listing_host_id },
    )?;

    let (file_name, bytes) = read_file(multipart).await?;
    let media = MediaService::new(&state.db, state.blob_store.as_ref())
        .upload(id, file_name, &bytes)
        .await?;

    Ok((StatusCode::CREATED, Json(media.into_dto())))
}

/// Get a media item by ID.
///
/// # Access Control
/// - Public
#[utoipa::path(
    get,
    path = "/api/media/{id}",
    tag = MEDIA_TAG,
    params(("id" = Uuid, Path, description = "Media ID")),
    responses(
        (status = 200, description = "The media item", body = MediaDto),
        (status = 404, description = "Media not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_media(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let media = MediaService::new(&state.db, state.blob_store.as_ref())
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Media not found".to_string()))?;

    Ok((StatusCode::OK, Json(media.into_dto())))
}

/// Delete a media item and its stored file.
///
/// # Access Control
/// - The owning listing's host or an admin
#[utoipa::path(
    delete,
    path = "/api/media/{id}",
    tag = MEDIA_TAG,
    params(("id" = Uuid, Path, description = "Media ID")),
    responses(
        (status = 204, description = "Media deleted"),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not allowed", body = ErrorDto),
        (status = 404, description = "Media not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn delete_media(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let actor = AuthGuard::new(&state.db, &headers).require(&[]).await?;
    let service = MediaService::new(&state.db, state.blob_store.as_ref());

    let media = service
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Media not found".to_string()))?;

    let listing_host_id = owner_host(&state, &media.owner).await?;
    policy::ensure(
        Some(&actor),
        Action::Delete,
        &PolicyTarget::Media { listing_host_id },
    )?;

    service.delete(id).await?;

    Ok(StatusCode::NO_CONTENT)
}
