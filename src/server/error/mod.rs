//! Error types and HTTP response handling.
//!
//! This module provides the application's error hierarchy and conversion logic for
//! transforming errors into HTTP responses. The `AppError` enum serves as the top-level
//! error type that wraps domain-specific errors and implements `IntoResponse` for
//! automatic error handling in API endpoints.

pub mod auth;
pub mod booking;
pub mod config;
pub mod media;
pub mod review;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::{
    model::api::ErrorDto,
    server::error::{
        auth::AuthError, booking::BookingError, config::ConfigError, media::MediaError,
        review::ReviewError,
    },
};

/// Top-level application error type.
///
/// Aggregates all possible error types that can occur in the application and provides
/// automatic conversion to HTTP responses. Domain-specific errors (`AuthError`,
/// `BookingError`, `ReviewError`, `MediaError`) handle their own response mapping,
/// while generic variants provide standard HTTP status codes.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration error during startup or environment variable loading.
    #[error(transparent)]
    ConfigErr(#[from] ConfigError),

    /// Missing or unknown bearer token.
    ///
    /// Delegates to `AuthError::into_response()` (401 Unauthorized).
    #[error(transparent)]
    AuthErr(#[from] AuthError),

    /// Booking engine rejection (invalid range, inactive listing, overlap, transition).
    #[error(transparent)]
    BookingErr(#[from] BookingError),

    /// Review rejection (duplicate review, unknown target type).
    #[error(transparent)]
    ReviewErr(#[from] ReviewError),

    /// Media upload rejection or blob store failure.
    #[error(transparent)]
    MediaErr(#[from] MediaError),

    /// Database operation error from SeaORM.
    ///
    /// Results in 500 Internal Server Error with error details logged server-side.
    #[error(transparent)]
    DbErr(#[from] sea_orm::DbErr),

    /// Cron scheduler error.
    #[error(transparent)]
    SchedulerErr(#[from] tokio_cron_scheduler::JobSchedulerError),

    /// Filesystem or socket error.
    #[error(transparent)]
    IoErr(#[from] std::io::Error),

    /// Resource not found error.
    ///
    /// Results in 404 Not Found with the provided error message.
    #[error("{0}")]
    NotFound(String),

    /// Malformed or out-of-range input attributed to a request field.
    ///
    /// Results in 422 Unprocessable Entity.
    ///
    /// # Fields
    /// - `field` - Name of the offending request field
    /// - `message` - Human readable description
    #[error("{field}: {message}")]
    Validation { field: String, message: String },

    /// Policy denial.
    ///
    /// Results in 403 Forbidden. The message is logged, the client gets a generic body.
    #[error("{0}")]
    Forbidden(String),

    /// Request conflicts with current state.
    ///
    /// Results in 409 Conflict with the provided error message.
    #[error("{0}")]
    Conflict(String),

    /// Internal server error with custom message.
    ///
    /// Results in 500 Internal Server Error. The provided message is logged
    /// but a generic message is returned to the client.
    #[error("{0}")]
    InternalError(String),
}

impl AppError {
    /// Shorthand for a field-attributed validation error.
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Builds a JSON error response.
///
/// # Arguments
/// - `status` - HTTP status code
/// - `error` - Client-facing message
/// - `field` - Request field the error is attributed to, if any
pub(crate) fn error_response(
    status: StatusCode,
    error: impl Into<String>,
    field: Option<&str>,
) -> Response {
    (
        status,
        Json(ErrorDto {
            error: error.into(),
            field: field.map(str::to_string),
        }),
    )
        .into_response()
}

/// Converts application errors into HTTP responses.
///
/// # Returns
/// - 403 Forbidden - For `Forbidden`
/// - 404 Not Found - For `NotFound`
/// - 409 Conflict - For `Conflict`
/// - 422 Unprocessable Entity - For `Validation`
/// - Variable - For domain errors, delegated to their own `into_response()`
/// - 500 Internal Server Error - For all other error types (DbErr, IoErr, etc.)
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            Self::AuthErr(err) => err.into_response(),
            Self::BookingErr(err) => err.into_response(),
            Self::ReviewErr(err) => err.into_response(),
            Self::MediaErr(err) => err.into_response(),
            Self::NotFound(msg) => error_response(StatusCode::NOT_FOUND, msg, None),
            Self::Validation { field, message } => {
                error_response(StatusCode::UNPROCESSABLE_ENTITY, message, Some(&field))
            }
            Self::Forbidden(msg) => {
                tracing::debug!("Access denied: {}", msg);
                error_response(
                    StatusCode::FORBIDDEN,
                    "You are not allowed to perform this action",
                    None,
                )
            }
            Self::Conflict(msg) => error_response(StatusCode::CONFLICT, msg, None),
            Self::InternalError(msg) => {
                tracing::error!("Internal error: {}", msg);
                error_response(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error",
                    None,
                )
            }
            err => InternalServerError(err).into_response(),
        }
    }
}

/// Wrapper type for converting any displayable error into a 500 Internal Server Error response.
///
/// Logs the error message and returns a generic "Internal server error" message to the
/// client to avoid leaking implementation details.
pub struct InternalServerError<E>(pub E);

impl<E: std::fmt::Display> IntoResponse for InternalServerError<E> {
    fn into_response(self) -> Response {
        tracing::error!("{}", self.0);

        error_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Internal server error",
            None,
        )
    }
}
