//! Listing data repository.
//!
//! Provides `ListingRepository` for listing CRUD, amenity links, the stored rating
//! summary, the booking row lock and the search query behind the listing index.

use std::collections::{HashMap, HashSet};

use chrono::Utc;
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr,
    EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
};
use uuid::Uuid;

use crate::server::{
    data::booking::BookingRepository,
    model::listing::{CreateListingParams, ListingSearch, ListingSort, UpdateListingParams},
};

pub struct ListingRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> ListingRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Creates a listing and links the given amenities.
    ///
    /// New listings start with no rating and no reviews.
    pub async fn create(
        &self,
        params: CreateListingParams,
    ) -> Result<entity::listing::Model, DbErr> {
        let now = Utc::now();
        let listing = entity::listing::ActiveModel {
            id: ActiveValue::Set(Uuid::new_v4()),
            host_id: ActiveValue::Set(params.host_id),
            title: ActiveValue::Set(params.title),
            description: ActiveValue::Set(params.description),
            price_per_night_cents: ActiveValue::Set(params.price_per_night_cents),
            city: ActiveValue::Set(params.city),
            address: ActiveValue::Set(params.address),
            max_guests: ActiveValue::Set(params.max_guests),
            bedrooms: ActiveValue::Set(params.bedrooms),
            bathrooms: ActiveValue::Set(params.bathrooms),
            rating_hundredths: ActiveValue::Set(0),
            review_count: ActiveValue::Set(0),
            is_active: ActiveValue::Set(params.is_active),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            deleted_at: ActiveValue::Set(None),
        }
        .insert(self.db)
        .await?;

        self.attach_amenities(listing.id, &params.amenities).await?;

        Ok(listing)
    }

    /// Finds a listing that has not been soft deleted.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<entity::listing::Model>, DbErr> {
        entity::prelude::Listing::find_by_id(id)
            .filter(entity::listing::Column::DeletedAt.is_null())
            .one(self.db)
            .await
    }

    /// Takes the write lock on a listing row and returns it.
    ///
    /// Issues a no-op UPDATE on the row so the surrounding transaction holds the write
    /// lock (row lock on Postgres, database write lock on SQLite) until it commits.
    /// Concurrent bookings for the same listing serialize behind this call, which makes
    /// the availability check and the insert that follows atomic. Must be called on a
    /// transaction.
    ///
    /// # Returns
    /// - `Ok(Some(Model))` - Listing exists and is now locked
    /// - `Ok(None)` - Listing does not exist or is soft deleted
    pub async fn lock_for_booking(
        &self,
        id: Uuid,
    ) -> Result<Option<entity::listing::Model>, DbErr> {
        entity::prelude::Listing::update_many()
            .col_expr(
                entity::listing::Column::UpdatedAt,
                Expr::col(entity::listing::Column::UpdatedAt),
            )
            .filter(entity::listing::Column::Id.eq(id))
            .exec(self.db)
            .await?;

        self.find_by_id(id).await
    }

    /// Applies a partial update; amenities are replaced when present.
    ///
    /// # Returns
    /// - `Ok(Model)` - Updated listing
    /// - `Err(DbErr::RecordNotFound)` - Listing does not exist
    pub async fn update(
        &self,
        id: Uuid,
        params: UpdateListingParams,
    ) -> Result<entity::listing::Model, DbErr> {
        let listing = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| DbErr::RecordNotFound(format!("Listing {} not found", id)))?;

        let mut active: entity::listing::ActiveModel = listing.into();
        if let Some(title) = params.title {
            active.title = ActiveValue::Set(title);
        }
        if let Some(description) = params.description {
            active.description = ActiveValue::Set(description);
        }
        if let Some(price) = params.price_per_night_cents {
            active.price_per_night_cents = ActiveValue::Set(price);
        }
        if let Some(city) = params.city {
            active.city = ActiveValue::Set(city);
        }
        if let Some(address) = params.address {
            active.address = ActiveValue::Set(Some(address));
        }
        if let Some(max_guests) = params.max_guests {
            active.max_guests = ActiveValue::Set(max_guests);
        }
        if let Some(bedrooms) = params.bedrooms {
            active.bedrooms = ActiveValue::Set(bedrooms);
        }
        if let Some(bathrooms) = params.bathrooms {
            active.bathrooms = ActiveValue::Set(bathrooms);
        }
        if let Some(is_active) = params.is_active {
            active.is_active = ActiveValue::Set(is_active);
        }
        active.updated_at = ActiveValue::Set(Utc::now());

        let listing = active.update(self.db).await?;

        if let Some(amenities) = params.amenities {
            self.sync_amenities(id, &amenities).await?;
        }

        Ok(listing)
    }

    /// Marks a listing as deleted, keeping the row.
    pub async fn soft_delete(&self, id: Uuid) -> Result<(), DbErr> {
        let now = Utc::now();
        entity::prelude::Listing::update_many()
            .col_expr(entity::listing::Column::DeletedAt, Expr::value(Some(now)))
            .col_expr(entity::listing::Column::UpdatedAt, Expr::value(now))
            .filter(entity::listing::Column::Id.eq(id))
            .exec(self.db)
            .await?;

        Ok(())
    }

    /// Writes the derived rating summary.
    pub async fn set_rating(
        &self,
        id: Uuid,
        rating_hundredths: i32,
        review_count: i32,
    ) -> Result<(), DbErr> {
        entity::prelude::Listing::update_many()
            .col_expr(
                entity::listing::Column::RatingHundredths,
                Expr::value(rating_hundredths),
            )
            .col_expr(entity::listing::Column::ReviewCount, Expr::value(review_count))
            .filter(entity::listing::Column::Id.eq(id))
            .exec(self.db)
            .await?;

        Ok(())
    }

    /// Links amenities to a listing, skipping duplicates in the input.
    pub async fn attach_amenities(
        &self,
        listing_id: Uuid,
        amenity_ids: &[Uuid],
    ) -> Result<(), DbErr> {
        let unique: HashSet<Uuid> = amenity_ids.iter().copied().collect();
        for amenity_id in unique {
            entity::amenity_listing::ActiveModel {
                amenity_id: ActiveValue::Set(amenity_id),
                listing_id: ActiveValue::Set(listing_id),
            }
            .insert(self.db)
            .await?;
        }

        Ok(())
    }

    /// Replaces a listing's amenity set.
    pub async fn sync_amenities(
        &self,
        listing_id: Uuid,
        amenity_ids: &[Uuid],
    ) -> Result<(), DbErr> {
        entity::prelude::AmenityListing::delete_many()
            .filter(entity::amenity_listing::Column::ListingId.eq(listing_id))
            .exec(self.db)
            .await?;

        self.attach_amenities(listing_id, amenity_ids).await
    }

    /// Loads the amenities of several listings in one query.
    ///
    /// # Returns
    /// - `Ok(HashMap)` - Amenities keyed by listing id, sorted by name; listings without
    ///   amenities are absent from the map
    pub async fn amenities_for(
        &self,
        listing_ids: &[Uuid],
    ) -> Result<HashMap<Uuid, Vec<entity::amenity::Model>>, DbErr> {
        if listing_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let links = entity::prelude::AmenityListing::find()
            .filter(entity::amenity_listing::Column::ListingId.is_in(listing_ids.to_vec()))
            .find_also_related(entity::prelude::Amenity)
            .all(self.db)
            .await?;

        let mut by_listing: HashMap<Uuid, Vec<entity::amenity::Model>> = HashMap::new();
        for (link, amenity) in links {
            if let Some(amenity) = amenity {
                by_listing.entry(link.listing_id).or_default().push(amenity);
            }
        }
        for amenities in by_listing.values_mut() {
            amenities.sort_by(|a, b| a.name.cmp(&b.name));
        }

        Ok(by_listing)
    }

    /// Runs the listing index query.
    ///
    /// Only active, non-deleted listings are returned. The city filter is a `LIKE`
    /// substring match, which SQLite compares case-insensitively for ASCII.
    ///
    /// # Returns
    /// - `Ok((listings, total))` - Requested page and the total number of matches
    /// - `Err(DbErr)` - Database error during query
    pub async fn search(
        &self,
        search: &ListingSearch,
    ) -> Result<(Vec<entity::listing::Model>, u64), DbErr> {
        let mut query = entity::prelude::Listing::find()
            .filter(entity::listing::Column::IsActive.eq(true))
            .filter(entity::listing::Column::DeletedAt.is_null());

        if let Some(city) = &search.city {
            query = query.filter(entity::listing::Column::City.contains(city.as_str()));
        }
        if let Some(min) = search.price_min_cents {
            query = query.filter(entity::listing::Column::PricePerNightCents.gte(min));
        }
        if let Some(max) = search.price_max_cents {
            query = query.filter(entity::listing::Column::PricePerNightCents.lte(max));
        }
        if let Some(rating) = search.min_rating_hundredths {
            query = query.filter(entity::listing::Column::RatingHundredths.gte(rating));
        }
        if let Some(guests) = search.min_guests {
            query = query.filter(entity::listing::Column::MaxGuests.gte(guests));
        }
        if !search.amenities.is_empty() {
            let ids = self.ids_with_all_amenities(&search.amenities).await?;
            query = query.filter(entity::listing::Column::Id.is_in(ids));
        }
        if let Some(stay) = &search.stay {
            let booked = BookingRepository::new(self.db).booked_listing_ids(stay).await?;
            if !booked.is_empty() {
                query = query.filter(entity::listing::Column::Id.is_not_in(booked));
            }
        }

        query = match search.sort {
            ListingSort::PriceAsc => {
                query.order_by_asc(entity::listing::Column::PricePerNightCents)
            }
            ListingSort::PriceDesc => {
                query.order_by_desc(entity::listing::Column::PricePerNightCents)
            }
            ListingSort::Rating => query
                .order_by_desc(entity::listing::Column::RatingHundredths)
                .order_by_desc(entity::listing::Column::ReviewCount),
            ListingSort::Newest => query.order_by_desc(entity::listing::Column::CreatedAt),
            ListingSort::Oldest => query.order_by_asc(entity::listing::Column::CreatedAt),
        };

        let paginator = query.paginate(self.db, search.per_page);
        let total = paginator.num_items().await?;
        let listings = paginator.fetch_page(search.page).await?;

        Ok((listings, total))
    }

    /// Listing ids linked to every one of `amenity_ids`.
    async fn ids_with_all_amenities(&self, amenity_ids: &[Uuid]) -> Result<Vec<Uuid>, DbErr> {
        let wanted: HashSet<Uuid> = amenity_ids.iter().copied().collect();

        let links = entity::prelude::AmenityListing::find()
            .filter(entity::amenity_listing::Column::AmenityId.is_in(wanted.iter().copied()))
            .all(self.db)
            .await?;

        let mut counts: HashMap<Uuid, usize> = HashMap::new();
        for link in links {
            *counts.entry(link.listing_id).or_default() += 1;
        }

        Ok(counts
            .into_iter()
            .filter(|(_, count)| *count == wanted.len())
            .map(|(listing_id, _)| listing_id)
            .collect())
    }
}
