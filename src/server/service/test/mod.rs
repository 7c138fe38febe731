mod amenity;
mod media;
