use chrono::NaiveDate;
use sea_orm::{DbErr, TransactionTrait};
use test_utils::{
    builder::TestBuilder,
    factory::{
        attach_amenity, booking::BookingFactory, create_amenity, create_listing, create_user,
        listing::ListingFactory,
    },
};

use crate::server::{
    data::listing::ListingRepository,
    model::{
        booking::StayRange,
        listing::{ListingSearch, ListingSort, UpdateListingParams},
    },
};

mod amenities;
mod lock_for_booking;
mod search;
mod set_rating;

fn search() -> ListingSearch {
    ListingSearch {
        per_page: 15,
        ..Default::default()
    }
}
