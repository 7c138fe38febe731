use sea_orm_migration::{prelude::*, schema::*};

use super::{
    m20251218_000001_create_user_table::User, m20251218_000004_create_listing_table::Listing,
};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Booking::Table)
                    .if_not_exists()
                    .col(pk_uuid(Booking::Id))
                    .col(uuid(Booking::ListingId))
                    .col(uuid(Booking::GuestId))
                    .col(date(Booking::StartDate))
                    .col(date(Booking::EndDate))
                    .col(integer(Booking::Nights))
                    .col(big_integer(Booking::TotalPriceCents))
                    .col(string(Booking::Status).default("pending"))
                    .col(text_null(Booking::GuestNotes))
                    .col(
                        timestamp(Booking::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .col(
                        timestamp(Booking::UpdatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .col(timestamp_null(Booking::DeletedAt))
                    .check(Expr::col(Booking::EndDate).gt(Expr::col(Booking::StartDate)))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_booking_listing_id")
                            .from(Booking::Table, Booking::ListingId)
                            .to(Listing::Table, Listing::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_booking_guest_id")
                            .from(Booking::Table, Booking::GuestId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Overlap lookups scan by listing and date range
        manager
            .create_index(
                Index::create()
                    .name("idx_booking_listing_dates")
                    .table(Booking::Table)
                    .col(Booking::ListingId)
                    .col(Booking::StartDate)
                    .col(Booking::EndDate)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_booking_guest_status")
                    .table(Booking::Table)
                    .col(Booking::GuestId)
                    .col(Booking::Status)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Booking::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Booking {
    Table,
    Id,
    ListingId,
    GuestId,
    StartDate,
    EndDate,
    Nights,
    TotalPriceCents,
    Status,
    GuestNotes,
    CreatedAt,
    UpdatedAt,
    DeletedAt,
}
