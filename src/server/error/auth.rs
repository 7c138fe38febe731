use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::server::error::error_response;

#[derive(Error, Debug)]
pub enum AuthError {
    /// No `Authorization: Bearer` header on a request to a protected endpoint.
    #[error("Missing bearer token")]
    MissingToken,

    /// The bearer token does not match any issued access token.
    #[error("Unknown bearer token")]
    InvalidToken,
}

/// Converts authentication errors into HTTP responses.
///
/// Both variants map to 401 Unauthorized with the same client-facing message so the
/// response does not reveal whether a token exists.
impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        tracing::debug!("Authentication failed: {}", self);

        error_response(StatusCode::UNAUTHORIZED, "Unauthenticated", None)
    }
}
