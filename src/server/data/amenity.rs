use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, Condition, ConnectionTrait, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder,
};
use uuid::Uuid;

use crate::server::model::amenity::{CreateAmenityParams, UpdateAmenityParams};

pub struct AmenityRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> AmenityRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Gets all amenities ordered by name.
    pub async fn get_all(&self) -> Result<Vec<entity::amenity::Model>, DbErr> {
        entity::prelude::Amenity::find()
            .order_by_asc(entity::amenity::Column::Name)
            .all(self.db)
            .await
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<entity::amenity::Model>, DbErr> {
        entity::prelude::Amenity::find_by_id(id).one(self.db).await
    }

    /// Checks whether another amenity already uses `name` or `slug`.
    ///
    /// # Arguments
    /// - `name` - Candidate name, if it is being set
    /// - `slug` - Candidate slug, if it is being set
    /// - `exclude` - Amenity being updated, ignored in the check
    pub async fn name_or_slug_taken(
        &self,
        name: Option<&str>,
        slug: Option<&str>,
        exclude: Option<Uuid>,
    ) -> Result<bool, DbErr> {
        if name.is_none() && slug.is_none() {
            return Ok(false);
        }

        let mut condition = Condition::any();
        if let Some(name) = name {
            condition = condition.add(entity::amenity::Column::Name.eq(name));
        }
        if let Some(slug) = slug {
            condition = condition.add(entity::amenity::Column::Slug.eq(slug));
        }

        let mut query = entity::prelude::Amenity::find().filter(condition);
        if let Some(id) = exclude {
            query = query.filter(entity::amenity::Column::Id.ne(id));
        }

        Ok(query.count(self.db).await? > 0)
    }

    /// Counts how many of `ids` exist.
    pub async fn count_existing(&self, ids: &[Uuid]) -> Result<u64, DbErr> {
        entity::prelude::Amenity::find()
            .filter(entity::amenity::Column::Id.is_in(ids.to_vec()))
            .count(self.db)
            .await
    }

    pub async fn create(
        &self,
        params: CreateAmenityParams,
    ) -> Result<entity::amenity::Model, DbErr> {
        entity::amenity::ActiveModel {
            id: ActiveValue::Set(Uuid::new_v4()),
            name: ActiveValue::Set(params.name),
            slug: ActiveValue::Set(params.slug),
            description: ActiveValue::Set(params.description),
            created_at: ActiveValue::Set(Utc::now()),
        }
        .insert(self.db)
        .await
    }

    /// Applies a partial update.
    ///
    /// # Returns
    /// - `Ok(Some(Model))` - Updated amenity
    /// - `Ok(None)` - No such amenity
    pub async fn update(
        &self,
        id: Uuid,
        params: UpdateAmenityParams,
    ) -> Result<Option<entity::amenity::Model>, DbErr> {
        let Some(amenity) = self.find_by_id(id).await? else {
            return Ok(None);
        };

        let mut active: entity::amenity::ActiveModel = amenity.into();
        if let Some(name) = params.name {
            active.name = ActiveValue::Set(name);
        }
        if let Some(slug) = params.slug {
            active.slug = ActiveValue::Set(slug);
        }
        if let Some(description) = params.description {
            active.description = ActiveValue::Set(Some(description));
        }

        active.update(self.db).await.map(Some)
    }

    /// Deletes an amenity; its listing links cascade.
    ///
    /// # Returns
    /// - `Ok(true)` - Amenity removed
    /// - `Ok(false)` - No such amenity
    pub async fn delete(&self, id: Uuid) -> Result<bool, DbErr> {
        entity::prelude::AmenityListing::delete_many()
            .filter(entity::amenity_listing::Column::AmenityId.eq(id))
            .exec(self.db)
            .await?;

        let result = entity::prelude::Amenity::delete_by_id(id).exec(self.db).await?;

        Ok(result.rows_affected > 0)
    }
}
