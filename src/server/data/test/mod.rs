mod amenity;
mod booking;
mod listing;
mod review;
mod user;
