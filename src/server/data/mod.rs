//! Database repository layer for all domain entities.
//!
//! This module contains repository structs that handle database operations for each
//! domain in the application. Repositories are generic over `ConnectionTrait` so the same
//! queries run against the pool or inside a transaction, and return entity models that
//! services convert to domain models.

pub mod amenity;
pub mod booking;
pub mod listing;
pub mod media;
pub mod review;
pub mod user;

#[cfg(test)]
mod test;
