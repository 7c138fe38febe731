use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::model::{amenity::AmenityDto, media::MediaDto, review::ReviewDto};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ListingDto {
    pub id: Uuid,
    pub host_id: Uuid,
    pub title: String,
    pub description: String,
    pub price_per_night: Decimal,
    pub city: String,
    pub address: Option<String>,
    pub max_guests: i32,
    pub bedrooms: i32,
    pub bathrooms: i32,
    pub rating: Decimal,
    pub review_count: i32,
    pub is_active: bool,
    pub amenities: Vec<AmenityDto>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Listing with its approved reviews and media, returned by the show endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ListingDetailDto {
    #[serde(flatten)]
    pub listing: ListingDto,
    pub reviews: Vec<ReviewDto>,
    pub media: Vec<MediaDto>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateListingDto {
    pub title: String,
    pub description: String,
    pub price_per_night: Decimal,
    pub city: String,
    pub address: Option<String>,
    pub max_guests: i32,
    #[serde(default)]
    pub bedrooms: i32,
    #[serde(default)]
    pub bathrooms: i32,
    #[serde(default = "default_active")]
    pub is_active: bool,
    #[serde(default)]
    pub amenities: Vec<Uuid>,
}

fn default_active() -> bool {
    true
}

/// Partial listing update; absent fields are left untouched.
///
/// When `amenities` is present the listing's amenity set is replaced by it.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdateListingDto {
    pub title: Option<String>,
    pub description: Option<String>,
    pub price_per_night: Option<Decimal>,
    pub city: Option<String>,
    pub address: Option<String>,
    pub max_guests: Option<i32>,
    pub bedrooms: Option<i32>,
    pub bathrooms: Option<i32>,
    pub is_active: Option<bool>,
    pub amenities: Option<Vec<Uuid>>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ListingSortDto {
    PriceAsc,
    PriceDesc,
    Rating,
    #[default]
    Newest,
    Oldest,
}

/// Search parameters for the listing index.
///
/// Serialized (without absent fields) to build the cache key, so field order is part
/// of the key format.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListingSearchQuery {
    /// Case-insensitive substring of the city.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[param(value_type = Option<String>)]
    pub price_min: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[param(value_type = Option<String>)]
    pub price_max: Option<Decimal>,
    /// Comma separated amenity ids; listings must have all of them.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amenities: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checkin: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checkout: Option<NaiveDate>,
    /// Minimum aggregate rating.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[param(value_type = Option<String>)]
    pub rating: Option<Decimal>,
    /// Minimum guest capacity.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guests: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[param(value_type = Option<String>)]
    pub sort: Option<ListingSortDto>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub per_page: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PaginatedListingsDto {
    pub listings: Vec<ListingDto>,
    pub total: u64,
    pub page: u64,
    pub per_page: u64,
    pub total_pages: u64,
}
