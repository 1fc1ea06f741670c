//! Review service error types.

use thiserror::Error;

use grocer_core::{ProductId, ReviewError, ReviewId, UserId};

use crate::catalog::RepositoryError;

/// Errors that can occur during review operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReviewServiceError {
    /// Review failed validation.
    #[error("invalid review: {0}")]
    Invalid(#[from] ReviewError),

    /// The author already reviewed this product.
    #[error("user {author} has already reviewed product {product_id}")]
    AlreadyReviewed {
        product_id: ProductId,
        author: UserId,
    },

    /// No review with this id on the product.
    #[error("review {review_id} not found on product {product_id}")]
    ReviewNotFound {
        product_id: ProductId,
        review_id: ReviewId,
    },

    /// The product's review ids have reached `i32::MAX`.
    #[error("no review ids left on product {product_id}")]
    ReviewIdsExhausted { product_id: ProductId },

    /// Catalog error.
    #[error("catalog error: {0}")]
    Repository(#[from] RepositoryError),
}

impl ReviewServiceError {
    /// Whether the caller can fix the request.
    #[must_use]
    pub const fn is_user_error(&self) -> bool {
        !matches!(
            self,
            Self::Repository(RepositoryError::LockPoisoned(_)) | Self::ReviewIdsExhausted { .. }
        )
    }
}
