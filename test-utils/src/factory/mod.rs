//! Factory methods for creating test data.
//!
//! This module provides factory methods for creating test entities with sensible defaults,
//! reducing boilerplate in tests. Each entity has its own factory module with both a
//! `Factory` struct for customization and a `create_*` convenience function for quick
//! default creation.
//!
//! # Basic Usage
//!
//! ```rust,ignore
//! use test_utils::factory;
//!
//! let host = factory::user::UserFactory::new(&db).role("host").build().await?;
//! let listing = factory::create_listing(&db, host.id).await?;
//! let booking = factory::booking::BookingFactory::new(&db, listing.id, guest.id)
//!     .dates(start, end)
//!     .status("confirmed")
//!     .build()
//!     .await?;
//! ```
//!
//! # Available Factories
//!
//! - `user` - Create users with roles and bearer tokens
//! - `listing` - Create listings
//! - `amenity` - Create amenities and attach them to listings
//! - `booking` - Create bookings
//! - `review` - Create reviews
//! - `helpers` - Convenience methods for creating entities with dependencies

pub mod amenity;
pub mod booking;
pub mod helpers;
pub mod listing;
pub mod review;
pub mod user;

pub use amenity::{attach_amenity, create_amenity};
pub use booking::create_booking;
pub use listing::create_listing;
pub use review::create_review;
pub use user::create_user;
