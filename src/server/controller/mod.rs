//! HTTP request handlers.
//!
//! Each handler resolves the caller from the bearer token, asks `policy` whether the
//! caller may act, delegates to a service and converts the result to a DTO. Handlers
//! carry `utoipa::path` annotations that feed the OpenAPI document served at `/api/docs`.

pub mod amenity;
pub mod booking;
pub mod listing;
pub mod media;
pub mod review;
