use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Media::Table)
                    .if_not_exists()
                    .col(pk_uuid(Media::Id))
                    .col(string(Media::MediableType))
                    .col(uuid(Media::MediableId))
                    .col(string(Media::FileName))
                    .col(string(Media::FilePath))
                    .col(string_null(Media::MimeType))
                    .col(big_integer_null(Media::FileSize))
                    .col(string(Media::Disk).default("public"))
                    .col(string(Media::Collection).default("default"))
                    .col(integer(Media::SortOrder).default(0))
                    .col(
                        timestamp(Media::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .col(timestamp_null(Media::DeletedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_media_owner_collection")
                    .table(Media::Table)
                    .col(Media::MediableType)
                    .col(Media::MediableId)
                    .col(Media::Collection)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Media::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Media {
    Table,
    Id,
    MediableType,
    MediableId,
    FileName,
    FilePath,
    MimeType,
    FileSize,
    Disk,
    Collection,
    SortOrder,
    CreatedAt,
    DeletedAt,
}
