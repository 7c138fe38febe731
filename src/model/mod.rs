//! Request and response DTOs shared by the HTTP layer.

pub mod amenity;
pub mod api;
pub mod booking;
pub mod listing;
pub mod media;
pub mod review;
