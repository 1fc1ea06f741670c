//! Unit discount descriptors attached to product snapshots.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Errors raised when authoring a [`Discount`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum DiscountError {
    /// The window ends before it starts.
    #[error("discount window ends ({ends_at}) before it starts ({starts_at})")]
    InvalidWindow {
        /// Window start.
        starts_at: DateTime<Utc>,
        /// Window end.
        ends_at: DateTime<Utc>,
    },
    /// The discount value is out of range for its kind.
    #[error("invalid discount value {value}: {reason}")]
    InvalidValue {
        /// Offending value.
        value: Decimal,
        /// Why it was rejected.
        reason: &'static str,
    },
}

/// How a discount value is applied to the list price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiscountKind {
    /// `value` is a percentage off the list price (0-100).
    Percentage,
    /// `value` is an amount subtracted from the list price.
    Fixed,
}

/// A discount on a single unit of a product.
///
/// The window bounds are optional in the stored form so that records
/// authored elsewhere can still be deserialized; [`Discount::window`] only
/// yields a window when both bounds are present and ordered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Discount {
    pub kind: DiscountKind,
    pub value: Decimal,
    #[serde(default)]
    pub starts_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub ends_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub active: bool,
}

impl Discount {
    /// Author a new active discount.
    ///
    /// # Errors
    ///
    /// Returns `DiscountError::InvalidWindow` if `ends_at` is before
    /// `starts_at`, and `DiscountError::InvalidValue` for a negative value or
    /// a percentage above 100.
    pub fn new(
        kind: DiscountKind,
        value: Decimal,
        starts_at: DateTime<Utc>,
        ends_at: DateTime<Utc>,
    ) -> Result<Self, DiscountError> {
        if ends_at < starts_at {
            return Err(DiscountError::InvalidWindow { starts_at, ends_at });
        }
        Self::check_value(kind, value)?;

        Ok(Self {
            kind,
            value,
            starts_at: Some(starts_at),
            ends_at: Some(ends_at),
            active: true,
        })
    }

    /// The `[start, end]` window, or `None` when a bound is missing or the
    /// end precedes the start.
    #[must_use]
    pub fn window(&self) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
        match (self.starts_at, self.ends_at) {
            (Some(start), Some(end)) if start <= end => Some((start, end)),
            _ => None,
        }
    }

    /// Whether `value` is within the range [`Discount::new`] accepts for
    /// `kind`. Stored discounts are not validated on load.
    #[must_use]
    pub fn value_in_range(&self) -> bool {
        Self::check_value(self.kind, self.value).is_ok()
    }

    fn check_value(kind: DiscountKind, value: Decimal) -> Result<(), DiscountError> {
        if value.is_sign_negative() {
            return Err(DiscountError::InvalidValue {
                value,
                reason: "must not be negative",
            });
        }
        if kind == DiscountKind::Percentage && value > Decimal::ONE_HUNDRED {
            return Err(DiscountError::InvalidValue {
                value,
                reason: "percentage must be at most 100",
            });
        }
        Ok(())
    }

    /// Whether `now` falls inside a well-formed window (bounds inclusive).
    ///
    /// Does not look at `active`.
    #[must_use]
    pub fn in_window(&self, now: DateTime<Utc>) -> bool {
        self.window()
            .is_some_and(|(start, end)| start <= now && now <= end)
    }
}
