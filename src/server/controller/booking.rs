use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use uuid::Uuid;

use crate::{
    model::{
        api::ErrorDto,
        booking::{
            BookingDto, BookingListQuery, CreateBookingDto, PaginatedBookingsDto,
            UpdateBookingDto, UpdateBookingStatusDto,
        },
    },
    server::{
        error::AppError,
        middleware::auth::AuthGuard,
        model::{
            booking::{Booking, BookingFilter, BookingScope, BookingStatus, CreateBookingParams},
            user::{Actor, Role},
        },
        policy::{self, Action, PolicyTarget},
        service::booking::BookingService,
        state::AppState,
    },
};

/// Tag for grouping booking endpoints in OpenAPI documentation
pub static BOOKING_TAG: &str = "booking";

fn booking_target(booking: &Booking) -> PolicyTarget {
    PolicyTarget::Booking {
        guest_id: booking.guest_id,
        host_id: booking.host_id,
        status: booking.status,
    }
}

/// Admins see every booking, hosts see bookings on their listings, everyone else
/// sees their own.
fn scope_for(actor: &Actor) -> BookingScope {
    if actor.is_admin() {
        BookingScope::All
    } else if actor.has_role(Role::Host) {
        BookingScope::HostedBy(actor.user_id)
    } else {
        BookingScope::GuestOf(actor.user_id)
    }
}

/// Loads a booking and checks `action` against it.
async fn load_authorized(
    service: &BookingService<'_>,
    actor: &Actor,
    id: Uuid,
    action: Action,
) -> Result<Booking, AppError> {
    let booking = service
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Booking not found".to_string()))?;
    policy::ensure(Some(actor), action, &booking_target(&booking))?;

    Ok(booking)
}

/// Get a page of bookings visible to the caller.
///
/// # Access Control
/// - Authenticated; results are scoped by role
///
/// # Returns
/// - `200 OK` - One page of bookings
/// - `401 Unauthorized` - Missing or unknown token
#[utoipa::path(
    get,
    path = "/api/bookings",
    tag = BOOKING_TAG,
    params(BookingListQuery),
    responses(
        (status = 200, description = "Visible bookings", body = PaginatedBookingsDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn get_bookings(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<BookingListQuery>,
) -> Result<impl IntoResponse, AppError> {
    let actor = AuthGuard::new(&state.db, &headers).require(&[]).await?;

    let page = BookingService::new(&state.db, &state.events)
        .list(scope_for(&actor), BookingFilter::from_query(query))
        .await?;

    Ok((StatusCode::OK, Json(page.into_dto())))
}

/// Book a stay on a listing.
///
/// The booking starts in `pending` with its price fixed at creation time.
///
/// # Access Control
/// - `guest` or `admin`
///
/// # Returns
/// - `201 Created` - The new booking
/// - `404 Not Found` - No such listing
/// - `409 Conflict` - Listing inactive or dates already booked
/// - `422 Unprocessable Entity` - Invalid dates or notes
#[utoipa::path(
    post,
    path = "/api/bookings",
    tag = BOOKING_TAG,
    request_body = CreateBookingDto,
    responses(
        (status = 201, description = "Booking created", body = BookingDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not allowed", body = ErrorDto),
        (status = 404, description = "Listing not found", body = ErrorDto),
        (status = 409, description = "Listing unavailable for these dates", body = ErrorDto),
        (status = 422, description = "Invalid booking data", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn create_booking(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<CreateBookingDto>,
) -> Result<impl IntoResponse, AppError> {
    let actor = AuthGuard::new(&state.db, &headers).require(&[]).await?;
    policy::ensure(Some(&actor), Action::Create, &PolicyTarget::Bookings)?;

    let params = CreateBookingParams::from_dto(actor.user_id, payload, Utc::now().date_naive())?;
    let booking = BookingService::new(&state.db, &state.events)
        .create(params)
        .await?;

    Ok((StatusCode::CREATED, Json(booking.into_dto())))
}

/// Get a booking by ID.
///
/// # Access Control
/// - The booking's guest, the listing's host, or an admin
///
/// # Returns
/// - `200 OK` - The booking
/// - `403 Forbidden` - Caller is not a party to the booking
/// - `404 Not Found` - No such booking
#[utoipa::path(
    get,
    path = "/api/bookings/{id}",
    tag = BOOKING_TAG,
    params(("id" = Uuid, Path, description = "Booking ID")),
    responses(
        (status = 200, description = "The booking", body = BookingDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not allowed", body = ErrorDto),
        (status = 404, description = "Booking not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn get_booking(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let actor = AuthGuard::new(&state.db, &headers).require(&[]).await?;
    let service = BookingService::new(&state.db, &state.events);

    let booking = load_authorized(&service, &actor, id, Action::View).await?;

    Ok((StatusCode::OK, Json(booking.into_dto())))
}

/// Replace a booking's guest notes.
///
/// # Access Control
/// - `admin`
///
/// # Returns
/// - `200 OK` - Updated booking
/// - `403 Forbidden` - Caller is not an admin
/// - `404 Not Found` - No such booking
/// - `422 Unprocessable Entity` - Notes too long
#[utoipa::path(
    put,
    path = "/api/bookings/{id}",
    tag = BOOKING_TAG,
    params(("id" = Uuid, Path, description = "Booking ID")),
    request_body = UpdateBookingDto,
    responses(
        (status = 200, description = "Booking updated", body = BookingDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not allowed", body = ErrorDto),
        (status = 404, description = "Booking not found", body = ErrorDto),
        (status = 422, description = "Invalid booking data", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn update_booking(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateBookingDto>,
) -> Result<impl IntoResponse, AppError> {
    let actor = AuthGuard::new(&state.db, &headers).require(&[]).await?;
    let service = BookingService::new(&state.db, &state.events);

    load_authorized(&service, &actor, id, Action::Update).await?;
    let booking = service.update_notes(id, payload.guest_notes).await?;

    Ok((StatusCode::OK, Json(booking.into_dto())))
}

/// Move a booking through its lifecycle.
///
/// Allowed moves are `pending` to `confirmed` or `cancelled`, and `confirmed` to
/// `completed` or `cancelled`. Requesting the current status changes nothing.
///
/// # Access Control
/// - The listing's host, `admin` or `support`
///
/// # Returns
/// - `200 OK` - Booking after the change
/// - `403 Forbidden` - Caller may not change this booking
/// - `404 Not Found` - No such booking
/// - `422 Unprocessable Entity` - Transition not allowed from the current status
#[utoipa::path(
    patch,
    path = "/api/bookings/{id}/status",
    tag = BOOKING_TAG,
    params(("id" = Uuid, Path, description = "Booking ID")),
    request_body = UpdateBookingStatusDto,
    responses(
        (status = 200, description = "Status changed", body = BookingDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not allowed", body = ErrorDto),
        (status = 404, description = "Booking not found", body = ErrorDto),
        (status = 422, description = "Transition not allowed", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn update_booking_status(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateBookingStatusDto>,
) -> Result<impl IntoResponse, AppError> {
    let actor = AuthGuard::new(&state.db, &headers).require(&[]).await?;
    let service = BookingService::new(&state.db, &state.events);

    load_authorized(&service, &actor, id, Action::ChangeStatus).await?;
    let booking = service
        .change_status(id, BookingStatus::from_dto(payload.status))
        .await?;

    Ok((StatusCode::OK, Json(booking.into_dto())))
}

/// Cancel and remove a booking.
///
/// # Access Control
/// - The guest while the booking is `pending`, or an admin
///
/// # Returns
/// - `204 No Content` - Booking cancelled and deleted
/// - `403 Forbidden` - Caller may not delete this booking
/// - `404 Not Found` - No such booking
#[utoipa::path(
    delete,
    path = "/api/bookings/{id}",
    tag = BOOKING_TAG,
    params(("id" = Uuid, Path, description = "Booking ID")),
    responses(
        (status = 204, description = "Booking deleted"),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not allowed", body = ErrorDto),
        (status = 404, description = "Booking not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn delete_booking(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let actor = AuthGuard::new(&state.db, &headers).require(&[]).await?;
    let service = BookingService::new(&state.db, &state.events);

    load_authorized(&service, &actor, id, Action::Delete).await?;
    service.delete(id).await?;

    Ok(StatusCode::NO_CONTENT)
}
