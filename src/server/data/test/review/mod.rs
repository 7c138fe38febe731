use sea_orm::DbErr;
use test_utils::{
    builder::TestBuilder,
    factory::{
        create_listing, create_review, create_user, helpers::create_listing_with_host,
        review::ReviewFactory,
    },
};

use crate::server::{
    data::review::ReviewRepository,
    model::{review::ReviewFilter, target::Target},
};

mod approved_ratings_for_listing;
mod find_by_author_and_target;
mod get_paginated;
