//! Review service.
//!
//! Adds, edits, and deletes product reviews. Every mutation recomputes the
//! product's cached rating while still holding the product's record lock, so
//! the stored rating always matches the stored reviews, including when
//! several shoppers review the same product at once.

mod error;

pub use error::ReviewServiceError;

use chrono::Utc;
use tracing::instrument;

use grocer_core::{ProductId, Review, ReviewId, UserId};

use crate::catalog::{InMemoryCatalog, ProductRecord};
use crate::rating::{self, RatingSummary};

/// Result of a review mutation made under the record lock.
type Outcome = Result<(Review, RatingSummary), ReviewServiceError>;

/// Review service.
pub struct ReviewService<'a> {
    catalog: &'a InMemoryCatalog,
}

impl<'a> ReviewService<'a> {
    /// Create a review service over `catalog`.
    #[must_use]
    pub const fn new(catalog: &'a InMemoryCatalog) -> Self {
        Self { catalog }
    }

    /// Add a review to a product and refresh its cached rating.
    ///
    /// # Errors
    ///
    /// Returns `ReviewServiceError::Invalid` if the rating is not 1-5.
    /// Returns `ReviewServiceError::AlreadyReviewed` if `author` already
    /// reviewed the product.
    /// Returns `ReviewServiceError::Repository` if the product does not exist.
    #[instrument(skip(self, comment))]
    pub fn add_review(
        &self,
        product_id: ProductId,
        author: UserId,
        stars: u8,
        comment: &str,
    ) -> Result<Review, ReviewServiceError> {
        let now = Utc::now();

        let (review, summary) = self.catalog.with_record_mut(product_id, |record| -> Outcome {
            if record.reviews.iter().any(|r| r.author == author) {
                return Err(ReviewServiceError::AlreadyReviewed { product_id, author });
            }

            let id = next_review_id(product_id, record)?;
            let review = Review::new(id, author, stars, comment, now)?;
            record.reviews.push(review.clone());
            let summary = rating::apply(&mut record.product, &record.reviews);
            Ok((review, summary))
        })??;

        log_summary(product_id, summary, "Review added");
        Ok(review)
    }

    /// Replace a review's rating and comment and refresh the cached rating.
    ///
    /// # Errors
    ///
    /// Returns `ReviewServiceError::Invalid` if the rating is not 1-5.
    /// Returns `ReviewServiceError::ReviewNotFound` if the product has no
    /// review with `review_id`.
    /// Returns `ReviewServiceError::Repository` if the product does not exist.
    #[instrument(skip(self, comment))]
    pub fn edit_review(
        &self,
        product_id: ProductId,
        review_id: ReviewId,
        stars: u8,
        comment: &str,
    ) -> Result<Review, ReviewServiceError> {
        let now = Utc::now();

        let (review, summary) = self.catalog.with_record_mut(product_id, |record| -> Outcome {
            let review = record
                .reviews
                .iter_mut()
                .find(|r| r.id == review_id)
                .ok_or(ReviewServiceError::ReviewNotFound {
                    product_id,
                    review_id,
                })?;
            review.edit(stars, comment, now)?;
            let edited = review.clone();

            let summary = rating::apply(&mut record.product, &record.reviews);
            Ok((edited, summary))
        })??;

        log_summary(product_id, summary, "Review edited");
        Ok(review)
    }

    /// Delete a review and refresh the cached rating.
    ///
    /// Returns the removed review.
    ///
    /// # Errors
    ///
    /// Returns `ReviewServiceError::ReviewNotFound` if the product has no
    /// review with `review_id`.
    /// Returns `ReviewServiceError::Repository` if the product does not exist.
    #[instrument(skip(self))]
    pub fn delete_review(
        &self,
        product_id: ProductId,
        review_id: ReviewId,
    ) -> Result<Review, ReviewServiceError> {
        let (review, summary) = self.catalog.with_record_mut(product_id, |record| -> Outcome {
            let index = record
                .reviews
                .iter()
                .position(|r| r.id == review_id)
                .ok_or(ReviewServiceError::ReviewNotFound {
                    product_id,
                    review_id,
                })?;
            let removed = record.reviews.remove(index);

            let summary = rating::apply(&mut record.product, &record.reviews);
            Ok((removed, summary))
        })??;

        log_summary(product_id, summary, "Review deleted");
        Ok(review)
    }

    /// Reviews of a product in insertion order.
    ///
    /// # Errors
    ///
    /// Returns `ReviewServiceError::Repository` if the product does not exist.
    pub fn list_reviews(&self, product_id: ProductId) -> Result<Vec<Review>, ReviewServiceError> {
        Ok(self.catalog.reviews(product_id)?)
    }
}

/// Review ids are allocated per product, one above the highest in use.
fn next_review_id(
    product_id: ProductId,
    record: &ProductRecord,
) -> Result<ReviewId, ReviewServiceError> {
    let highest = record
        .reviews
        .iter()
        .map(|r| r.id.as_i32())
        .max()
        .unwrap_or(0);
    highest
        .checked_add(1)
        .map(ReviewId::new)
        .ok_or(ReviewServiceError::ReviewIdsExhausted { product_id })
}

fn log_summary(product_id: ProductId, summary: RatingSummary, message: &str) {
    tracing::info!(
        product_id = %product_id,
        rating = %summary.rating,
        review_count = summary.review_count,
        "{message}"
    );
}
