use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::server::error::error_response;

#[derive(Error, Debug)]
pub enum MediaError {
    /// Multipart body has no `file` part.
    #[error("A file is required.")]
    MissingFile,

    /// Upload exceeds the size limit.
    ///
    /// # Fields
    /// - Size of the rejected upload in bytes
    #[error("The file may not be greater than 10 MB (got {0} bytes).")]
    TooLarge(usize),

    /// File extension is not in the allowed list.
    #[error("Unsupported file type: {0}")]
    UnsupportedType(String),

    /// Multipart stream could not be read.
    #[error("Malformed upload: {0}")]
    Multipart(String),

    /// Blob store read/write failure.
    #[error("Blob store error: {0}")]
    Storage(#[from] std::io::Error),
}

/// Converts media errors into HTTP responses.
///
/// Upload validation failures are reported against the `file` field with 422; storage
/// failures are logged and returned as 500.
impl IntoResponse for MediaError {
    fn into_response(self) -> Response {
        match self {
            Self::Storage(err) => {
                tracing::error!("Blob store error: {}", err);
                error_response(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error",
                    None,
                )
            }
            Self::Multipart(_) => error_response(StatusCode::BAD_REQUEST, self.to_string(), None),
            _ => error_response(
                StatusCode::UNPROCESSABLE_ENTITY,
                self.to_string(),
                Some("file"),
            ),
        }
    }
}
