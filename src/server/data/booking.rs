//! Booking data repository.
//!
//! Provides `BookingRepository` for the overlap query behind the availability check,
//! booking inserts, status and notes updates, soft deletes and scoped listing queries.
//! Soft-deleted bookings are invisible to every query here.

use chrono::Utc;
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr,
    EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
};
use uuid::Uuid;

use crate::server::model::booking::{
    BookingFilter, BookingScope, BookingStatus, BookingWithParties, NewBooking, StayRange,
};

pub struct BookingRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> BookingRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Checks whether any live booking on the listing overlaps `range`.
    ///
    /// Cancelled and soft-deleted bookings are ignored. Overlap is half-open:
    /// `existing.start < range.end AND existing.end > range.start`.
    ///
    /// # Arguments
    /// - `listing_id` - Listing to check
    /// - `range` - Requested nights
    ///
    /// # Returns
    /// - `Ok(true)` - At least one overlapping booking exists
    /// - `Ok(false)` - The range is free
    /// - `Err(DbErr)` - Database error during query
    pub async fn has_overlap(
        &self,
        listing_id: Uuid,
        range: &StayRange,
    ) -> Result<bool, DbErr> {
        let count = entity::prelude::Booking::find()
            .filter(entity::booking::Column::ListingId.eq(listing_id))
            .filter(entity::booking::Column::Status.ne(BookingStatus::Cancelled.as_str()))
            .filter(entity::booking::Column::DeletedAt.is_null())
            .filter(entity::booking::Column::StartDate.lt(range.end()))
            .filter(entity::booking::Column::EndDate.gt(range.start()))
            .count(self.db)
            .await?;

        Ok(count > 0)
    }

    /// Ids of listings with a live booking overlapping `range`.
    pub async fn booked_listing_ids(&self, range: &StayRange) -> Result<Vec<Uuid>, DbErr> {
        entity::prelude::Booking::find()
            .select_only()
            .column(entity::booking::Column::ListingId)
            .distinct()
            .filter(entity::booking::Column::Status.ne(BookingStatus::Cancelled.as_str()))
            .filter(entity::booking::Column::DeletedAt.is_null())
            .filter(entity::booking::Column::StartDate.lt(range.end()))
            .filter(entity::booking::Column::EndDate.gt(range.start()))
            .into_tuple::<Uuid>()
            .all(self.db)
            .await
    }

    /// Inserts a priced booking in `pending`.
    pub async fn create(&self, booking: NewBooking) -> Result<entity::booking::Model, DbErr> {
        let now = Utc::now();
        entity::booking::ActiveModel {
            id: ActiveValue::Set(Uuid::new_v4()),
            listing_id: ActiveValue::Set(booking.listing_id),
            guest_id: ActiveValue::Set(booking.guest_id),
            start_date: ActiveValue::Set(booking.range.start()),
            end_date: ActiveValue::Set(booking.range.end()),
            nights: ActiveValue::Set(booking.nights),
            total_price_cents: ActiveValue::Set(booking.total_price_cents),
            status: ActiveValue::Set(BookingStatus::Pending.as_str().to_string()),
            guest_notes: ActiveValue::Set(booking.guest_notes),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            deleted_at: ActiveValue::Set(None),
        }
        .insert(self.db)
        .await
    }

    /// Finds a live booking together with its listing.
    ///
    /// # Returns
    /// - `Ok(Some((booking, listing)))` - Booking found
    /// - `Ok(None)` - No such booking, or it was soft deleted
    pub async fn find_by_id(
        &self,
        id: Uuid,
    ) -> Result<Option<(entity::booking::Model, entity::listing::Model)>, DbErr> {
        let result = entity::prelude::Booking::find_by_id(id)
            .filter(entity::booking::Column::DeletedAt.is_null())
            .find_also_related(entity::prelude::Listing)
            .one(self.db)
            .await?;

        Ok(result.and_then(|(booking, listing)| listing.map(|listing| (booking, listing))))
    }

    /// Loads a booking with its listing, guest and host, including soft-deleted bookings.
    ///
    /// # Returns
    /// - `Ok(Some(BookingWithParties))` - Booking and all related rows found
    /// - `Ok(None)` - Booking or one of its related rows is missing
    pub async fn find_for_notification(
        &self,
        id: Uuid,
    ) -> Result<Option<BookingWithParties>, DbErr> {
        let Some((booking, Some(listing))) = entity::prelude::Booking::find_by_id(id)
            .find_also_related(entity::prelude::Listing)
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };

        let guest = entity::prelude::User::find_by_id(booking.guest_id)
            .one(self.db)
            .await?;
        let host = entity::prelude::User::find_by_id(listing.host_id)
            .one(self.db)
            .await?;

        Ok(guest.zip(host).map(|(guest, host)| BookingWithParties {
            booking,
            listing,
            guest,
            host,
        }))
    }

    /// Moves a live booking from `from` to `to` in a single conditional update.
    ///
    /// The row is only written while it is still live and still in `from`, so two
    /// concurrent transitions out of the same status cannot both apply.
    ///
    /// # Returns
    /// - `Ok(Some(Model))` - Transition applied
    /// - `Ok(None)` - Booking is gone or no longer in `from`
    pub async fn transition_status(
        &self,
        id: Uuid,
        from: BookingStatus,
        to: BookingStatus,
    ) -> Result<Option<entity::booking::Model>, DbErr> {
        let result = entity::prelude::Booking::update_many()
            .col_expr(entity::booking::Column::Status, Expr::value(to.as_str()))
            .col_expr(entity::booking::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(entity::booking::Column::Id.eq(id))
            .filter(entity::booking::Column::Status.eq(from.as_str()))
            .filter(entity::booking::Column::DeletedAt.is_null())
            .exec(self.db)
            .await?;

        if result.rows_affected == 0 {
            return Ok(None);
        }

        Ok(self.find_by_id(id).await?.map(|(booking, _)| booking))
    }

    /// Cancels a live booking unless it is already cancelled.
    ///
    /// # Returns
    /// - `Ok(true)` - This call moved the booking to `cancelled`
    /// - `Ok(false)` - Already cancelled, or gone
    pub async fn cancel_if_live(&self, id: Uuid) -> Result<bool, DbErr> {
        let cancelled = BookingStatus::Cancelled.as_str();
        let result = entity::prelude::Booking::update_many()
            .col_expr(entity::booking::Column::Status, Expr::value(cancelled))
            .col_expr(entity::booking::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(entity::booking::Column::Id.eq(id))
            .filter(entity::booking::Column::Status.ne(cancelled))
            .filter(entity::booking::Column::DeletedAt.is_null())
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    /// Replaces the guest notes of a live booking.
    ///
    /// # Returns
    /// - `Ok(Some(Model))` - Updated booking
    /// - `Ok(None)` - No live booking with this id
    pub async fn update_notes(
        &self,
        id: Uuid,
        guest_notes: Option<String>,
    ) -> Result<Option<entity::booking::Model>, DbErr> {
        let Some((booking, _)) = self.find_by_id(id).await? else {
            return Ok(None);
        };

        let mut active: entity::booking::ActiveModel = booking.into();
        active.guest_notes = ActiveValue::Set(guest_notes);
        active.updated_at = ActiveValue::Set(Utc::now());

        match active.update(self.db).await {
            Ok(updated) => Ok(Some(updated)),
            Err(DbErr::RecordNotUpdated) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Marks a live booking as deleted, keeping the row for audit.
    ///
    /// # Returns
    /// - `Ok(true)` - Booking deleted
    /// - `Ok(false)` - No live booking with this id
    pub async fn soft_delete(&self, id: Uuid) -> Result<bool, DbErr> {
        let now = Utc::now();
        let result = entity::prelude::Booking::update_many()
            .col_expr(entity::booking::Column::DeletedAt, Expr::value(Some(now)))
            .col_expr(entity::booking::Column::UpdatedAt, Expr::value(now))
            .filter(entity::booking::Column::Id.eq(id))
            .filter(entity::booking::Column::DeletedAt.is_null())
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    /// Gets a page of bookings visible in `scope`, newest first.
    ///
    /// # Returns
    /// - `Ok((rows, total))` - Bookings with their listings, and the total match count
    /// - `Err(DbErr)` - Database error during query
    pub async fn get_paginated(
        &self,
        scope: BookingScope,
        filter: &BookingFilter,
    ) -> Result<(Vec<(entity::booking::Model, entity::listing::Model)>, u64), DbErr> {
        let mut query = entity::prelude::Booking::find()
            .filter(entity::booking::Column::DeletedAt.is_null())
            .find_also_related(entity::prelude::Listing);

        query = match scope {
            BookingScope::All => query,
            BookingScope::HostedBy(host_id) => {
                query.filter(entity::listing::Column::HostId.eq(host_id))
            }
            BookingScope::GuestOf(guest_id) => {
                query.filter(entity::booking::Column::GuestId.eq(guest_id))
            }
        };

        if let Some(status) = filter.status {
            query = query.filter(entity::booking::Column::Status.eq(status.as_str()));
        }
        if let Some(listing_id) = filter.listing_id {
            query = query.filter(entity::booking::Column::ListingId.eq(listing_id));
        }
        if let Some(start) = filter.starts_on_or_after {
            query = query.filter(entity::booking::Column::StartDate.gte(start));
        }
        if let Some(end) = filter.ends_on_or_before {
            query = query.filter(entity::booking::Column::EndDate.lte(end));
        }

        let paginator = query
            .order_by_desc(entity::booking::Column::CreatedAt)
            .paginate(self.db, filter.per_page);
        let total = paginator.num_items().await?;
        let rows = paginator
            .fetch_page(filter.page)
            .await?
            .into_iter()
            .filter_map(|(booking, listing)| listing.map(|listing| (booking, listing)))
            .collect();

        Ok((rows, total))
    }
}
