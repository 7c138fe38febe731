//! Service layer for business logic and orchestration.
//!
//! This module contains the service layer of the application, which sits between the
//! controller (API) layer and the data (repository) layer. Services are responsible for:
//!
//! - **Business Logic**: Implementing core business rules and validation
//! - **Orchestration**: Coordinating multiple repository calls, the cache and the blob store
//! - **Domain Models**: Working with domain models rather than DTOs or entity models
//! - **Transaction Management**: Running check-then-write sequences atomically and
//!   emitting lifecycle events only after commit

pub mod amenity;
pub mod booking;
pub mod cache;
pub mod listing;
pub mod media;
pub mod notification;
pub mod rating;
pub mod review;

#[cfg(test)]
mod test;
