use sea_orm_migration::{prelude::*, schema::*};

use super::m20251218_000001_create_user_table::User;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Review::Table)
                    .if_not_exists()
                    .col(pk_uuid(Review::Id))
                    .col(uuid(Review::UserId))
                    .col(string(Review::ReviewableType))
                    .col(uuid(Review::ReviewableId))
                    .col(integer(Review::Rating))
                    .col(text_null(Review::Comment))
                    .col(boolean(Review::IsApproved).default(true))
                    .col(
                        timestamp(Review::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .col(
                        timestamp(Review::UpdatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .check(Expr::col(Review::Rating).between(1, 5))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_review_user_id")
                            .from(Review::Table, Review::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // One review per author and target
        manager
            .create_index(
                Index::create()
                    .name("idx_review_author_target_unique")
                    .table(Review::Table)
                    .col(Review::UserId)
                    .col(Review::ReviewableType)
                    .col(Review::ReviewableId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_review_target_approved")
                    .table(Review::Table)
                    .col(Review::ReviewableType)
                    .col(Review::ReviewableId)
                    .col(Review::IsApproved)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Review::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Review {
    Table,
    Id,
    UserId,
    ReviewableType,
    ReviewableId,
    Rating,
    Comment,
    IsApproved,
    CreatedAt,
    UpdatedAt,
}
