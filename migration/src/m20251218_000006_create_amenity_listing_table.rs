use sea_orm_migration::{prelude::*, schema::*};

use super::{
    m20251218_000004_create_listing_table::Listing, m20251218_000005_create_amenity_table::Amenity,
};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(AmenityListing::Table)
                    .if_not_exists()
                    .col(uuid(AmenityListing::AmenityId))
                    .col(uuid(AmenityListing::ListingId))
                    .primary_key(
                        Index::create()
                            .col(AmenityListing::AmenityId)
                            .col(AmenityListing::ListingId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_amenity_listing_amenity_id")
                            .from(AmenityListing::Table, AmenityListing::AmenityId)
                            .to(Amenity::Table, Amenity::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_amenity_listing_listing_id")
                            .from(AmenityListing::Table, AmenityListing::ListingId)
                            .to(Listing::Table, Listing::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(AmenityListing::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum AmenityListing {
    Table,
    AmenityId,
    ListingId,
}
