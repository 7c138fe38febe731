use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct MediaDto {
    pub id: Uuid,
    pub file_name: String,
    pub mime_type: Option<String>,
    pub file_size: Option<i64>,
    pub collection: String,
    pub order: i32,
    pub url: String,
}

/// Multipart body of a media upload.
#[derive(Debug, ToSchema)]
#[allow(dead_code)]
pub struct MediaUploadDto {
    /// File contents; at most 10 MB of jpg, jpeg, png, gif, webp, mp4 or mov.
    #[schema(value_type = String, format = Binary)]
    pub file: Vec<u8>,
}
