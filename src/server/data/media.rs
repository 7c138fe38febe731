use chrono::Utc;
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr,
    EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
};
use uuid::Uuid;

use crate::server::model::{media::NewMedia, target::Target};

pub struct MediaRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> MediaRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Counts live media of an owner in a collection.
    pub async fn count_for_owner(&self, owner: &Target, collection: &str) -> Result<u64, DbErr> {
        entity::prelude::Media::find()
            .filter(entity::media::Column::MediableType.eq(owner.tag()))
            .filter(entity::media::Column::MediableId.eq(owner.id()))
            .filter(entity::media::Column::Collection.eq(collection))
            .filter(entity::media::Column::DeletedAt.is_null())
            .count(self.db)
            .await
    }

    pub async fn create(
        &self,
        media: NewMedia,
        sort_order: i32,
    ) -> Result<entity::media::Model, DbErr> {
        entity::media::ActiveModel {
            id: ActiveValue::Set(Uuid::new_v4()),
            mediable_type: ActiveValue::Set(media.owner.tag().to_string()),
            mediable_id: ActiveValue::Set(media.owner.id()),
            file_name: ActiveValue::Set(media.file_name),
            file_path: ActiveValue::Set(media.file_path),
            mime_type: ActiveValue::Set(media.mime_type),
            file_size: ActiveValue::Set(Some(media.file_size)),
            disk: ActiveValue::Set(media.disk),
            collection: ActiveValue::Set(media.collection),
            sort_order: ActiveValue::Set(sort_order),
            created_at: ActiveValue::Set(Utc::now()),
            deleted_at: ActiveValue::Set(None),
        }
        .insert(self.db)
        .await
    }

    /// Finds a media item that has not been soft deleted.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<entity::media::Model>, DbErr> {
        entity::prelude::Media::find_by_id(id)
            .filter(entity::media::Column::DeletedAt.is_null())
            .one(self.db)
            .await
    }

    /// Live media of an owner in display order.
    pub async fn for_owner(&self, owner: &Target) -> Result<Vec<entity::media::Model>, DbErr> {
        entity::prelude::Media::find()
            .filter(entity::media::Column::MediableType.eq(owner.tag()))
            .filter(entity::media::Column::MediableId.eq(owner.id()))
            .filter(entity::media::Column::DeletedAt.is_null())
            .order_by_asc(entity::media::Column::SortOrder)
            .all(self.db)
            .await
    }

    pub async fn soft_delete(&self, id: Uuid) -> Result<(), DbErr> {
        entity::prelude::Media::update_many()
            .col_expr(entity::media::Column::DeletedAt, Expr::value(Some(Utc::now())))
            .filter(entity::media::Column::Id.eq(id))
            .exec(self.db)
            .await?;

        Ok(())
    }
}
