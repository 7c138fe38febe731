use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory::user::UserFactory};

use crate::server::{data::user::UserRepository, model::user::Role};

mod admin_exists;
mod find_by_token;
