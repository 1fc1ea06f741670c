//! Cached rating aggregates derived from a product's reviews.
//!
//! The aggregate is a function of the review set only; insertion order does
//! not matter. Callers must run [`apply`] in the same critical section that
//! mutates the reviews (see `services::reviews`).

use rust_decimal::{Decimal, RoundingStrategy};

use grocer_core::{Product, Review};

/// Average rating and review count for a review collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RatingSummary {
    /// Mean star rating rounded half-up to one decimal place; zero when
    /// there are no reviews.
    pub rating: Decimal,
    pub review_count: u32,
}

/// Aggregate `reviews` into a [`RatingSummary`].
#[must_use]
pub fn recompute(reviews: &[Review]) -> RatingSummary {
    if reviews.is_empty() {
        return RatingSummary::default();
    }

    let review_count = u32::try_from(reviews.len()).unwrap_or(u32::MAX);
    let sum: u64 = reviews.iter().map(|r| u64::from(r.rating())).sum();
    let mean = Decimal::from(sum) / Decimal::from(review_count);

    RatingSummary {
        rating: mean.round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero),
        review_count,
    }
}

/// Recompute from `reviews` and store the result in `product`'s cached fields.
pub fn apply(product: &mut Product, reviews: &[Review]) -> RatingSummary {
    let summary = recompute(reviews);
    product.rating = summary.rating;
    product.review_count = summary.review_count;
    summary
}

/// Number of reviews per star, index 0 holding one-star reviews.
#[must_use]
pub fn distribution(reviews: &[Review]) -> [u32; 5] {
    let mut stars = [0_u32; 5];
    for review in reviews {
        let slot = usize::from(review.rating().saturating_sub(1));
        if let Some(count) = stars.get_mut(slot) {
            *count += 1;
        }
    }
    stars
}
