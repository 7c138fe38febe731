use sea_orm::DbErr;
use test_utils::{
    builder::TestBuilder,
    factory::{attach_amenity, create_amenity, create_listing, create_user},
};

use crate::server::data::{amenity::AmenityRepository, listing::ListingRepository};

mod delete;
mod name_or_slug_taken;
