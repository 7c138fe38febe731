//! SeaORM entity models for the marketplace schema.

pub mod prelude;

pub mod access_token;
pub mod amenity;
pub mod amenity_listing;
pub mod booking;
pub mod listing;
pub mod media;
pub mod review;
pub mod user;
pub mod user_role;
