use uuid::Uuid;

use crate::{
    model::amenity::{AmenityDto, CreateAmenityDto, UpdateAmenityDto},
    server::{error::AppError, util::validate},
};

#[derive(Debug, Clone, PartialEq)]
pub struct Amenity {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
}

impl Amenity {
    pub fn from_entity(entity: entity::amenity::Model) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
            slug: entity.slug,
            description: entity.description,
        }
    }

    pub fn into_dto(self) -> AmenityDto {
        AmenityDto {
            id: self.id,
            name: self.name,
            slug: self.slug,
            description: self.description,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CreateAmenityParams {
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
}

impl CreateAmenityParams {
    pub fn from_dto(dto: CreateAmenityDto) -> Result<Self, AppError> {
        validate::required_text("name", &dto.name, 255)?;
        validate_slug(&dto.slug)?;
        if let Some(description) = &dto.description {
            validate::max_len("description", description, 1000)?;
        }

        Ok(Self {
            name: dto.name,
            slug: dto.slug,
            description: dto.description,
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct UpdateAmenityParams {
    pub name: Option<String>,
    pub slug: Option<String>,
    pub description: Option<String>,
}

impl UpdateAmenityParams {
    pub fn from_dto(dto: UpdateAmenityDto) -> Result<Self, AppError> {
        if let Some(name) = &dto.name {
            validate::required_text("name", name, 255)?;
        }
        if let Some(slug) = &dto.slug {
            validate_slug(slug)?;
        }
        if let Some(description) = &dto.description {
            validate::max_len("description", description, 1000)?;
        }

        Ok(Self {
            name: dto.name,
            slug: dto.slug,
            description: dto.description,
        })
    }
}

/// Slugs are lowercase ASCII letters, digits and single dashes.
fn validate_slug(slug: &str) -> Result<(), AppError> {
    validate::required_text("slug", slug, 255)?;
    let valid = slug
        .split('-')
        .all(|part| !part.is_empty() && part.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit()));
    if !valid {
        return Err(AppError::validation(
            "slug",
            "The slug may only contain lowercase letters, numbers and dashes.",
        ));
    }
    Ok(())
}
