//! Listing domain models and parameters.
//!
//! Provides the listing model returned by services, the detail view with reviews and
//! media, parameter types for create/update, and the validated search filter used by
//! the listing index.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::{
    model::listing::{
        CreateListingDto, ListingDetailDto, ListingDto, ListingSearchQuery, ListingSortDto,
        PaginatedListingsDto, UpdateListingDto,
    },
    server::{
        error::AppError,
        model::{
            amenity::Amenity,
            booking::StayRange,
            media::Media,
            review::Review,
        },
        util::{money, parse, validate},
    },
};

/// Page size used when the request does not ask for one.
pub const DEFAULT_PER_PAGE: u64 = 15;
const MAX_PER_PAGE: u64 = 100;

#[derive(Debug, Clone, PartialEq)]
pub struct Listing {
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
    pub amenities: Vec<Amenity>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Listing {
    /// Converts an entity model and its amenities to a domain model.
    pub fn from_entity(entity: entity::listing::Model, amenities: Vec<Amenity>) -> Self {
        Self {
            id: entity.id,
            host_id: entity.host_id,
            title: entity.title,
            description: entity.description,
            price_per_night: money::from_minor(entity.price_per_night_cents),
            city: entity.city,
            address: entity.address,
            max_guests: entity.max_guests,
            bedrooms: entity.bedrooms,
            bathrooms: entity.bathrooms,
            rating: money::from_minor(entity.rating_hundredths as i64),
            review_count: entity.review_count,
            is_active: entity.is_active,
            amenities,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }

    pub fn into_dto(self) -> ListingDto {
        ListingDto {
            id: self.id,
            host_id: self.host_id,
            title: self.title,
            description: self.description,
            price_per_night: self.price_per_night,
            city: self.city,
            address: self.address,
            max_guests: self.max_guests,
            bedrooms: self.bedrooms,
            bathrooms: self.bathrooms,
            rating: self.rating,
            review_count: self.review_count,
            is_active: self.is_active,
            amenities: self.amenities.into_iter().map(Amenity::into_dto).collect(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// A listing with its approved reviews and media.
#[derive(Debug, Clone, PartialEq)]
pub struct ListingDetail {
    pub listing: Listing,
    pub reviews: Vec<Review>,
    pub media: Vec<Media>,
}

impl ListingDetail {
    pub fn into_dto(self) -> ListingDetailDto {
        ListingDetailDto {
            listing: self.listing.into_dto(),
            reviews: self.reviews.into_iter().map(Review::into_dto).collect(),
            media: self.media.into_iter().map(Media::into_dto).collect(),
        }
    }
}

fn price_to_cents(field: &str, price: Decimal) -> Result<i64, AppError> {
    if price.is_sign_negative() {
        return Err(AppError::validation(
            field,
            format!("The {} must be at least 0.", field),
        ));
    }
    money::to_minor(price).ok_or_else(|| AppError::validation(field, "The price is too large."))
}

#[derive(Debug, Clone)]
pub struct CreateListingParams {
    pub host_id: Uuid,
    pub title: String,
    pub description: String,
    pub price_per_night_cents: i64,
    pub city: String,
    pub address: Option<String>,
    pub max_guests: i32,
    pub bedrooms: i32,
    pub bathrooms: i32,
    pub is_active: bool,
    pub amenities: Vec<Uuid>,
}

impl CreateListingParams {
    pub fn from_dto(host_id: Uuid, dto: CreateListingDto) -> Result<Self, AppError> {
        validate::required_text("title", &dto.title, 255)?;
        validate::required_text("description", &dto.description, 10_000)?;
        validate::required_text("city", &dto.city, 255)?;
        if let Some(address) = &dto.address {
            validate::max_len("address", address, 255)?;
        }
        validate::at_least("max_guests", dto.max_guests, 1)?;
        validate::at_least("bedrooms", dto.bedrooms, 0)?;
        validate::at_least("bathrooms", dto.bathrooms, 0)?;
        let price_per_night_cents = price_to_cents("price_per_night", dto.price_per_night)?;

        Ok(Self {
            host_id,
            title: dto.title,
            description: dto.description,
            price_per_night_cents,
            city: dto.city,
            address: dto.address,
            max_guests: dto.max_guests,
            bedrooms: dto.bedrooms,
            bathrooms: dto.bathrooms,
            is_active: dto.is_active,
            amenities: dto.amenities,
        })
    }
}

/// Partial update; `None` leaves a field unchanged.
#[derive(Debug, Clone, Default)]
pub struct UpdateListingParams {
    pub title: Option<String>,
    pub description: Option<String>,
    pub price_per_night_cents: Option<i64>,
    pub city: Option<String>,
    pub address: Option<String>,
    pub max_guests: Option<i32>,
    pub bedrooms: Option<i32>,
    pub bathrooms: Option<i32>,
    pub is_active: Option<bool>,
    /// Replacement amenity set.
    pub amenities: Option<Vec<Uuid>>,
}

impl UpdateListingParams {
    pub fn from_dto(dto: UpdateListingDto) -> Result<Self, AppError> {
        if let Some(title) = &dto.title {
            validate::required_text("title", title, 255)?;
        }
        if let Some(description) = &dto.description {
            validate::required_text("description", description, 10_000)?;
        }
        if let Some(city) = &dto.city {
            validate::required_text("city", city, 255)?;
        }
        if let Some(address) = &dto.address {
            validate::max_len("address", address, 255)?;
        }
        if let Some(max_guests) = dto.max_guests {
            validate::at_least("max_guests", max_guests, 1)?;
        }
        if let Some(bedrooms) = dto.bedrooms {
            validate::at_least("bedrooms", bedrooms, 0)?;
        }
        if let Some(bathrooms) = dto.bathrooms {
            validate::at_least("bathrooms", bathrooms, 0)?;
        }
        let price_per_night_cents = dto
            .price_per_night
            .map(|price| price_to_cents("price_per_night", price))
            .transpose()?;

        Ok(Self {
            title: dto.title,
            description: dto.description,
            price_per_night_cents,
            city: dto.city,
            address: dto.address,
            max_guests: dto.max_guests,
            bedrooms: dto.bedrooms,
            bathrooms: dto.bathrooms,
            is_active: dto.is_active,
            amenities: dto.amenities,
        })
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ListingSort {
    PriceAsc,
    PriceDesc,
    /// Highest rating first, ties broken by review count.
    Rating,
    #[default]
    Newest,
    Oldest,
}

impl From<ListingSortDto> for ListingSort {
    fn from(dto: ListingSortDto) -> Self {
        match dto {
            ListingSortDto::PriceAsc => Self::PriceAsc,
            ListingSortDto::PriceDesc => Self::PriceDesc,
            ListingSortDto::Rating => Self::Rating,
            ListingSortDto::Newest => Self::Newest,
            ListingSortDto::Oldest => Self::Oldest,
        }
    }
}

/// Validated listing search filter.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListingSearch {
    pub city: Option<String>,
    pub price_min_cents: Option<i64>,
    pub price_max_cents: Option<i64>,
    /// Listings must carry every one of these amenities.
    pub amenities: Vec<Uuid>,
    /// Listings must be free for this whole stay.
    pub stay: Option<StayRange>,
    pub min_rating_hundredths: Option<i32>,
    pub min_guests: Option<i32>,
    pub sort: ListingSort,
    pub page: u64,
    pub per_page: u64,
}

impl ListingSearch {
    /// Validates raw query parameters.
    ///
    /// The availability filter applies only when both `checkin` and `checkout` are given.
    ///
    /// # Returns
    /// - `Ok(ListingSearch)` - Valid filter
    /// - `Err(AppError::Validation)` - Malformed amenity ids, negative prices, or checkout
    ///   not after checkin
    pub fn from_query(query: &ListingSearchQuery) -> Result<Self, AppError> {
        let amenities = match &query.amenities {
            Some(raw) => parse::parse_uuid_list("amenities", raw)?,
            None => Vec::new(),
        };

        let stay = match (query.checkin, query.checkout) {
            (Some(checkin), Some(checkout)) => Some(stay_range(checkin, checkout)?),
            _ => None,
        };

        let min_rating_hundredths = query
            .rating
            .map(|rating| {
                money::to_minor(rating)
                    .and_then(|value| i32::try_from(value).ok())
                    .ok_or_else(|| AppError::validation("rating", "The rating is out of range."))
            })
            .transpose()?;

        Ok(Self {
            city: query.city.clone().filter(|city| !city.trim().is_empty()),
            price_min_cents: query
                .price_min
                .map(|price| price_to_cents("price_min", price))
                .transpose()?,
            price_max_cents: query
                .price_max
                .map(|price| price_to_cents("price_max", price))
                .transpose()?,
            amenities,
            stay,
            min_rating_hundredths,
            min_guests: query.guests,
            sort: query.sort.map(ListingSort::from).unwrap_or_default(),
            page: query.page.unwrap_or(0),
            per_page: query
                .per_page
                .unwrap_or(DEFAULT_PER_PAGE)
                .clamp(1, MAX_PER_PAGE),
        })
    }
}

fn stay_range(checkin: NaiveDate, checkout: NaiveDate) -> Result<StayRange, AppError> {
    StayRange::new(checkin, checkout).map_err(|_| {
        AppError::validation("checkout", "The checkout date must be after the checkin date.")
    })
}

/// One page of search results; cached as a whole.
#[derive(Debug, Clone, PartialEq)]
pub struct PaginatedListings {
    pub listings: Vec<Listing>,
    pub total: u64,
    pub page: u64,
    pub per_page: u64,
    pub total_pages: u64,
}

impl PaginatedListings {
    pub fn into_dto(self) -> PaginatedListingsDto {
        PaginatedListingsDto {
            listings: self.listings.into_iter().map(Listing::into_dto).collect(),
            total: self.total,
            page: self.page,
            per_page: self.per_page,
            total_pages: self.total_pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_defaults_to_newest_first_page() {
        let search = ListingSearch::from_query(&ListingSearchQuery::default()).unwrap();

        assert_eq!(search.sort, ListingSort::Newest);
        assert_eq!(search.page, 0);
        assert_eq!(search.per_page, DEFAULT_PER_PAGE);
        assert!(search.stay.is_none());
    }

    #[test]
    fn search_converts_prices_and_rating_to_minor_units() {
        let query = ListingSearchQuery {
            price_min: Some(Decimal::new(5_000, 2)),
            price_max: Some(Decimal::new(1_505, 1)),
            rating: Some(Decimal::new(45, 1)),
            ..Default::default()
        };

        let search = ListingSearch::from_query(&query).unwrap();

        assert_eq!(search.price_min_cents, Some(5_000));
        assert_eq!(search.price_max_cents, Some(15_050));
        assert_eq!(search.min_rating_hundredths, Some(450));
    }

    #[test]
    fn search_rejects_checkout_before_checkin() {
        let query = ListingSearchQuery {
            checkin: NaiveDate::from_ymd_opt(2030, 5, 10),
            checkout: NaiveDate::from_ymd_opt(2030, 5, 8),
            ..Default::default()
        };

        let result = ListingSearch::from_query(&query);

        assert!(matches!(result, Err(AppError::Validation { field, .. }) if field == "checkout"));
    }

    #[test]
    fn create_params_reject_negative_price() {
        let dto = CreateListingDto {
            title: "Loft".to_string(),
            description: "Bright loft".to_string(),
            price_per_night: Decimal::new(-100, 2),
            city: "Porto".to_string(),
            address: None,
            max_guests: 2,
            bedrooms: 1,
            bathrooms: 1,
            is_active: true,
            amenities: vec![],
        };

        let result = CreateListingParams::from_dto(Uuid::new_v4(), dto);

        assert!(
            matches!(result, Err(AppError::Validation { field, .. }) if field == "price_per_night")
        );
    }
}
