//! Review data repository.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
};
use uuid::Uuid;

use crate::server::model::{
    review::{CreateReviewParams, ReviewFilter, UpdateReviewParams},
    target::{Target, TargetKind},
};

pub struct ReviewRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> ReviewRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Finds the review an author left on a target, if any.
    pub async fn find_by_author_and_target(
        &self,
        user_id: Uuid,
        target: &Target,
    ) -> Result<Option<entity::review::Model>, DbErr> {
        entity::prelude::Review::find()
            .filter(entity::review::Column::UserId.eq(user_id))
            .filter(entity::review::Column::ReviewableType.eq(target.tag()))
            .filter(entity::review::Column::ReviewableId.eq(target.id()))
            .one(self.db)
            .await
    }

    /// Inserts an approved review.
    pub async fn create(
        &self,
        params: CreateReviewParams,
    ) -> Result<entity::review::Model, DbErr> {
        let now = Utc::now();
        entity::review::ActiveModel {
            id: ActiveValue::Set(Uuid::new_v4()),
            user_id: ActiveValue::Set(params.user_id),
            reviewable_type: ActiveValue::Set(params.target.tag().to_string()),
            reviewable_id: ActiveValue::Set(params.target.id()),
            rating: ActiveValue::Set(params.rating),
            comment: ActiveValue::Set(params.comment),
            is_approved: ActiveValue::Set(true),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
        }
        .insert(self.db)
        .await
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<entity::review::Model>, DbErr> {
        entity::prelude::Review::find_by_id(id).one(self.db).await
    }

    /// Applies a partial update to rating and comment.
    ///
    /// # Returns
    /// - `Ok(Model)` - Updated review
    /// - `Err(DbErr::RecordNotFound)` - Review does not exist
    pub async fn update(
        &self,
        id: Uuid,
        params: UpdateReviewParams,
    ) -> Result<entity::review::Model, DbErr> {
        let review = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| DbErr::RecordNotFound(format!("Review {} not found", id)))?;

        let mut active: entity::review::ActiveModel = review.into();
        if let Some(rating) = params.rating {
            active.rating = ActiveValue::Set(rating);
        }
        if let Some(comment) = params.comment {
            active.comment = ActiveValue::Set(Some(comment));
        }
        active.updated_at = ActiveValue::Set(Utc::now());

        active.update(self.db).await
    }

    pub async fn set_approved(
        &self,
        id: Uuid,
        is_approved: bool,
    ) -> Result<entity::review::Model, DbErr> {
        let review = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| DbErr::RecordNotFound(format!("Review {} not found", id)))?;

        let mut active: entity::review::ActiveModel = review.into();
        active.is_approved = ActiveValue::Set(is_approved);
        active.updated_at = ActiveValue::Set(Utc::now());

        active.update(self.db).await
    }

    /// Deletes a review.
    ///
    /// # Returns
    /// - `Ok(true)` - Review existed and was removed
    /// - `Ok(false)` - No such review
    pub async fn delete(&self, id: Uuid) -> Result<bool, DbErr> {
        let result = entity::prelude::Review::delete_by_id(id).exec(self.db).await?;

        Ok(result.rows_affected > 0)
    }

    /// Ratings of every approved review on a listing.
    pub async fn approved_ratings_for_listing(&self, listing_id: Uuid) -> Result<Vec<i32>, DbErr> {
        entity::prelude::Review::find()
            .select_only()
            .column(entity::review::Column::Rating)
            .filter(entity::review::Column::ReviewableType.eq(TargetKind::Listing.tag()))
            .filter(entity::review::Column::ReviewableId.eq(listing_id))
            .filter(entity::review::Column::IsApproved.eq(true))
            .into_tuple::<i32>()
            .all(self.db)
            .await
    }

    /// Approved reviews on a listing, newest first.
    pub async fn approved_for_listing(
        &self,
        listing_id: Uuid,
    ) -> Result<Vec<entity::review::Model>, DbErr> {
        entity::prelude::Review::find()
            .filter(entity::review::Column::ReviewableType.eq(TargetKind::Listing.tag()))
            .filter(entity::review::Column::ReviewableId.eq(listing_id))
            .filter(entity::review::Column::IsApproved.eq(true))
            .order_by_desc(entity::review::Column::CreatedAt)
            .all(self.db)
            .await
    }

    /// Gets a page of reviews, newest first.
    pub async fn get_paginated(
        &self,
        filter: &ReviewFilter,
    ) -> Result<(Vec<entity::review::Model>, u64), DbErr> {
        let mut query = entity::prelude::Review::find();

        if let Some(target) = &filter.target {
            query = query
                .filter(entity::review::Column::ReviewableType.eq(target.tag()))
                .filter(entity::review::Column::ReviewableId.eq(target.id()));
        }
        if filter.approved_only {
            query = query.filter(entity::review::Column::IsApproved.eq(true));
        }

        let paginator = query
            .order_by_desc(entity::review::Column::CreatedAt)
            .paginate(self.db, filter.per_page);
        let total = paginator.num_items().await?;
        let reviews = paginator.fetch_page(filter.page).await?;

        Ok((reviews, total))
    }
}
