//! Listing rating aggregation.
//!
//! A listing's `rating` and `review_count` are derived from its approved reviews and
//! recomputed from scratch on every trigger, never incremented.

use rust_decimal::Decimal;
use sea_orm::{ConnectionTrait, DbErr};
use uuid::Uuid;

use crate::server::{
    data::{listing::ListingRepository, review::ReviewRepository},
    model::review::ListingRating,
    util::money,
};

/// Mean of `ratings` rounded half away from zero to two places.
///
/// An empty set yields a zero rating with no reviews.
pub fn aggregate(ratings: &[i32]) -> ListingRating {
    if ratings.is_empty() {
        return ListingRating {
            rating: Decimal::ZERO,
            review_count: 0,
        };
    }

    let sum: i64 = ratings.iter().map(|&rating| i64::from(rating)).sum();
    let mean = Decimal::from(sum) / Decimal::from(ratings.len());

    ListingRating {
        rating: money::round2(mean),
        review_count: i32::try_from(ratings.len()).unwrap_or(i32::MAX),
    }
}

pub struct RatingAggregator<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> RatingAggregator<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Recomputes and stores a listing's rating from its approved reviews.
    ///
    /// Must run after the review change that triggered it has committed.
    ///
    /// # Arguments
    /// - `listing_id` - Listing whose rating to refresh
    ///
    /// # Returns
    /// - `Ok(ListingRating)` - The stored rating
    /// - `Err(DbErr)` - Database error during query or update
    pub async fn recompute_listing_rating(&self, listing_id: Uuid) -> Result<ListingRating, DbErr> {
        let ratings = ReviewRepository::new(self.db)
            .approved_ratings_for_listing(listing_id)
            .await?;
        let aggregate = aggregate(&ratings);

        let rating_hundredths = money::to_minor(aggregate.rating)
            .and_then(|value| i32::try_from(value).ok())
            .ok_or_else(|| {
                DbErr::Custom(format!("Rating {} out of range", aggregate.rating))
            })?;

        ListingRepository::new(self.db)
            .set_rating(listing_id, rating_hundredths, aggregate.review_count)
            .await?;

        tracing::debug!(
            "Listing {} rating recomputed: {} from {} reviews",
            listing_id,
            aggregate.rating,
            aggregate.review_count
        );

        Ok(aggregate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_set_is_zero() {
        let rating = aggregate(&[]);

        assert_eq!(rating.rating, Decimal::ZERO);
        assert_eq!(rating.review_count, 0);
    }

    #[test]
    fn rounds_mean_half_up() {
        let rating = aggregate(&[5, 4, 5]);

        assert_eq!(rating.rating.to_string(), "4.67");
        assert_eq!(rating.review_count, 3);
    }

    #[test]
    fn keeps_whole_means_exact() {
        assert_eq!(aggregate(&[4, 4]).rating, Decimal::from(4));
        assert_eq!(aggregate(&[1, 2]).rating, Decimal::new(150, 2));
    }
}
