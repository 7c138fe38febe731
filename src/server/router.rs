use axum::{extract::DefaultBodyLimit, Router};
use tower_http::cors::{Any, CorsLayer};
use utoipa::{
    openapi::{
        security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
        Components,
    },
    Modify, OpenApi,
};
use utoipa_axum::{router::OpenApiRouter, routes};
use utoipa_swagger_ui::SwaggerUi;

use crate::server::{
    controller::{
        amenity::{self, AMENITY_TAG},
        booking::{self, BOOKING_TAG},
        listing::{self, LISTING_TAG},
        media::{self, MEDIA_TAG},
        review::{self, REVIEW_TAG},
    },
    service::media::MAX_UPLOAD_BYTES,
    state::AppState,
};

/// Multipart framing on top of the largest accepted file.
const UPLOAD_BODY_LIMIT: usize = MAX_UPLOAD_BYTES + 2 * 1024 * 1024;

#[derive(OpenApi)]
#[openapi(
    info(title = "Stayhub", description = "Rental marketplace API"),
    modifiers(&BearerAuth),
    tags(
        (name = LISTING_TAG, description = "Listings, search and availability"),
        (name = BOOKING_TAG, description = "Booking lifecycle"),
        (name = REVIEW_TAG, description = "Reviews and moderation"),
        (name = AMENITY_TAG, description = "Amenity catalogue"),
        (name = MEDIA_TAG, description = "Listing images and videos"),
    )
)]
struct ApiDoc;

struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi
            .components
            .get_or_insert_with(Components::new)
            .add_security_scheme(
                "bearer",
                SecurityScheme::Http(HttpBuilder::new().scheme(HttpAuthScheme::Bearer).build()),
            );
    }
}

fn api_router() -> OpenApiRouter<AppState> {
    let uploads = OpenApiRouter::new()
        .routes(routes!(
            media::get_listing_media,
            media::upload_listing_media
        ))
        .layer(DefaultBodyLimit::max(UPLOAD_BODY_LIMIT));

    OpenApiRouter::with_openapi(ApiDoc::openapi())
        .routes(routes!(listing::search_listings, listing::create_listing))
        .routes(routes!(
            listing::get_listing,
            listing::update_listing,
            listing::delete_listing
        ))
        .routes(routes!(listing::check_availability))
        .routes(routes!(
            review::get_listing_reviews,
            review::create_listing_review
        ))
        .routes(routes!(booking::get_bookings, booking::create_booking))
        .routes(routes!(
            booking::get_booking,
            booking::update_booking,
            booking::delete_booking
        ))
        .routes(routes!(booking::update_booking_status))
        .routes(routes!(review::get_reviews, review::create_review))
        .routes(routes!(
            review::get_review,
            review::update_review,
            review::delete_review
        ))
        .routes(routes!(review::moderate_review))
        .routes(routes!(amenity::get_amenities, amenity::create_amenity))
        .routes(routes!(
            amenity::get_amenity,
            amenity::update_amenity,
            amenity::delete_amenity
        ))
        .routes(routes!(media::get_media, media::delete_media))
        .merge(uploads)
}

/// Builds the API routes and the Swagger UI serving their OpenAPI document.
pub fn router() -> Router<AppState> {
    let (router, api) = api_router().split_for_parts();

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    router
        .merge(SwaggerUi::new("/api/docs").url("/api/docs/openapi.json", api))
        .layer(cors)
}
