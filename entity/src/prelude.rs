pub use super::access_token::Entity as AccessToken;
pub use super::amenity::Entity as Amenity;
pub use super::amenity_listing::Entity as AmenityListing;
pub use super::booking::Entity as Booking;
pub use super::listing::Entity as Listing;
pub use super::media::Entity as Media;
pub use super::review::Entity as Review;
pub use super::user::Entity as User;
pub use super::user_role::Entity as UserRole;
