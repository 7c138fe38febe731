use uuid::Uuid;

use crate::{model::media::MediaDto, server::model::target::Target};

/// A stored media file attached to a listing or user.
#[derive(Debug, Clone, PartialEq)]
pub struct Media {
    pub id: Uuid,
    pub owner: Target,
    pub file_name: String,
    pub file_path: String,
    pub mime_type: Option<String>,
    pub file_size: Option<i64>,
    pub collection: String,
    pub order: i32,
    /// Public URL resolved through the blob store.
    pub url: String,
}

impl Media {
    /// Converts an entity model to a domain model.
    ///
    /// # Returns
    /// - `Some(Media)` - Converted model
    /// - `None` - The stored owner tag is unknown
    pub fn from_entity(entity: entity::media::Model, url: String) -> Option<Self> {
        let owner = Target::from_tagged(&entity.mediable_type, entity.mediable_id)?;
        Some(Self {
            id: entity.id,
            owner,
            file_name: entity.file_name,
            file_path: entity.file_path,
            mime_type: entity.mime_type,
            file_size: entity.file_size,
            collection: entity.collection,
            order: entity.sort_order,
            url,
        })
    }

    pub fn into_dto(self) -> MediaDto {
        MediaDto {
            id: self.id,
            file_name: self.file_name,
            mime_type: self.mime_type,
            file_size: self.file_size,
            collection: self.collection,
            order: self.order,
            url: self.url,
        }
    }
}

/// Row values for a freshly stored upload.
#[derive(Debug, Clone)]
pub struct NewMedia {
    pub owner: Target,
    pub file_name: String,
    pub file_path: String,
    pub mime_type: Option<String>,
    pub file_size: i64,
    pub disk: String,
    pub collection: String,
}
