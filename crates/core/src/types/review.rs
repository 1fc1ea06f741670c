//! Product reviews.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::id::{ReviewId, UserId};

/// Errors that can occur when building a [`Review`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ReviewError {
    /// Rating is outside the 1-5 star range.
    #[error("rating must be between {min} and {max} stars (got {0})", min = Review::MIN_RATING, max = Review::MAX_RATING)]
    InvalidRating(u8),
}

/// A shopper's review of a single product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    pub id: ReviewId,
    pub author: UserId,
    #[serde(deserialize_with = "deserialize_rating")]
    rating: u8,
    pub comment: String,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Review {
    pub const MIN_RATING: u8 = 1;
    pub const MAX_RATING: u8 = 5;

    /// Create a review.
    ///
    /// # Errors
    ///
    /// Returns `ReviewError::InvalidRating` if `rating` is not 1-5.
    pub fn new(
        id: ReviewId,
        author: UserId,
        rating: u8,
        comment: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Result<Self, ReviewError> {
        Self::check_rating(rating)?;
        Ok(Self {
            id,
            author,
            rating,
            comment: comment.into(),
            created_at,
            updated_at: None,
        })
    }

    /// Star rating (1-5).
    #[must_use]
    pub const fn rating(&self) -> u8 {
        self.rating
    }

    /// Replace the rating and comment, stamping `updated_at`.
    ///
    /// # Errors
    ///
    /// Returns `ReviewError::InvalidRating` if `rating` is not 1-5; the review
    /// is left unchanged.
    pub fn edit(
        &mut self,
        rating: u8,
        comment: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Result<(), ReviewError> {
        Self::check_rating(rating)?;
        self.rating = rating;
        self.comment = comment.into();
        self.updated_at = Some(now);
        Ok(())
    }

    const fn check_rating(rating: u8) -> Result<(), ReviewError> {
        if rating < Self::MIN_RATING || rating > Self::MAX_RATING {
            return Err(ReviewError::InvalidRating(rating));
        }
        Ok(())
    }
}

/// Stored ratings go through the same 1-5 check as [`Review::new`].
fn deserialize_rating<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let rating = u8::deserialize(deserializer)?;
    Review::check_rating(rating).map_err(serde::de::Error::custom)?;
    Ok(rating)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_new_validates_rating() {
        let now = Utc::now();
        assert!(Review::new(ReviewId::new(1), UserId::new(1), 0, "", now).is_err());
        assert!(Review::new(ReviewId::new(1), UserId::new(1), 6, "", now).is_err());
        assert_eq!(
            Review::new(ReviewId::new(1), UserId::new(1), 5, "Fresh", now)
                .unwrap()
                .rating(),
            5
        );
    }

    #[test]
    fn test_edit_keeps_review_on_invalid_rating() {
        let now = Utc::now();
        let mut review = Review::new(ReviewId::new(1), UserId::new(2), 4, "Good", now).unwrap();
        let err = review.edit(9, "Great", now).unwrap_err();
        assert_eq!(err, ReviewError::InvalidRating(9));
        assert_eq!(review.rating(), 4);
        assert_eq!(review.comment, "Good");
        assert!(review.updated_at.is_none());

        review.edit(2, "Bruised", now).unwrap();
        assert_eq!(review.rating(), 2);
        assert_eq!(review.updated_at, Some(now));
    }

    #[test]
    fn test_deserialize_rejects_out_of_range_rating() {
        let json = r#"{"id":1,"author":2,"rating":9,"comment":"","created_at":"2026-03-01T00:00:00Z"}"#;
        let err = serde_json::from_str::<Review>(json).unwrap_err();
        assert!(err.to_string().contains("got 9"), "{err}");

        let json = r#"{"id":1,"author":2,"rating":4,"comment":"Ripe","created_at":"2026-03-01T00:00:00Z"}"#;
        let review: Review = serde_json::from_str(json).unwrap();
        assert_eq!(review.rating(), 4);
    }

    #[test]
    fn test_error_message() {
        assert_eq!(
            ReviewError::InvalidRating(7).to_string(),
            "rating must be between 1 and 5 stars (got 7)"
        );
    }
}
