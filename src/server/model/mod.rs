//! Server-side domain models and parameter types.
//!
//! Domain models are converted from entity models at the repository boundary and
//! transformed to DTOs at the controller boundary. Parameter types carry validated
//! input from controllers into services.

pub mod amenity;
pub mod booking;
pub mod event;
pub mod listing;
pub mod media;
pub mod review;
pub mod target;
pub mod user;
