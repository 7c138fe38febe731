use chrono::NaiveDate;
use sea_orm::DbErr;
use test_utils::{
    builder::TestBuilder,
    factory::{booking::BookingFactory, helpers::create_booking_dependencies},
};

use crate::server::{
    data::booking::BookingRepository,
    model::booking::{BookingFilter, BookingScope, BookingStatus, StayRange},
};

mod get_paginated;
mod has_overlap;
mod soft_delete;
mod transition_status;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn range(start: NaiveDate, end: NaiveDate) -> StayRange {
    StayRange::new(start, end).unwrap()
}
