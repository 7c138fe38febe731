use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::server::error::error_response;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ReviewError {
    /// The author already reviewed this target.
    #[error("You have already reviewed this item.")]
    Duplicate,

    /// `reviewable_type` is not one of the known target tags.
    #[error("Unknown reviewable type: {0}")]
    UnknownTargetType(String),
}

impl IntoResponse for ReviewError {
    fn into_response(self) -> Response {
        match self {
            Self::Duplicate => error_response(StatusCode::CONFLICT, self.to_string(), None),
            Self::UnknownTargetType(_) => error_response(
                StatusCode::UNPROCESSABLE_ENTITY,
                self.to_string(),
                Some("reviewable_type"),
            ),
        }
    }
}
