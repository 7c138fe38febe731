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
                    .table(Listing::Table)
                    .if_not_exists()
                    .col(pk_uuid(Listing::Id))
                    .col(uuid(Listing::HostId))
                    .col(string(Listing::Title))
                    .col(text(Listing::Description))
                    .col(big_integer(Listing::PricePerNightCents))
                    .col(string(Listing::City))
                    .col(string_null(Listing::Address))
                    .col(integer(Listing::MaxGuests).default(1))
                    .col(integer(Listing::Bedrooms).default(0))
                    .col(integer(Listing::Bathrooms).default(0))
                    .col(integer(Listing::RatingHundredths).default(0))
                    .col(integer(Listing::ReviewCount).default(0))
                    .col(boolean(Listing::IsActive).default(true))
                    .col(
                        timestamp(Listing::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .col(
                        timestamp(Listing::UpdatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .col(timestamp_null(Listing::DeletedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_listing_host_id")
                            .from(Listing::Table, Listing::HostId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_listing_city_active")
                    .table(Listing::Table)
                    .col(Listing::City)
                    .col(Listing::IsActive)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_listing_host_active")
                    .table(Listing::Table)
                    .col(Listing::HostId)
                    .col(Listing::IsActive)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_listing_price")
                    .table(Listing::Table)
                    .col(Listing::PricePerNightCents)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Listing::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Listing {
    Table,
    Id,
    HostId,
    Title,
    Description,
    PricePerNightCents,
    City,
    Address,
    MaxGuests,
    Bedrooms,
    Bathrooms,
    RatingHundredths,
    ReviewCount,
    IsActive,
    CreatedAt,
    UpdatedAt,
    DeletedAt,
}
