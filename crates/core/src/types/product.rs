//! Product snapshots handed out by the catalog.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::discount::Discount;
use super::id::ProductId;

/// A copy of a product's catalog fields taken at a specific moment.
///
/// `rating` and `review_count` are cached aggregates of the product's
/// reviews and are only ever written by the rating recompute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    /// List price before any discount.
    pub price: Decimal,
    /// Units available for sale.
    pub stock: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount: Option<Discount>,
    /// Average review rating (0-5, one decimal place).
    #[serde(default)]
    pub rating: Decimal,
    #[serde(default)]
    pub review_count: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Selling unit (e.g. "kg", "dozen").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl Product {
    /// Create a product with no discount and no reviews.
    #[must_use]
    pub fn new(id: ProductId, name: impl Into<String>, price: Decimal, stock: u32) -> Self {
        Self {
            id,
            name: name.into(),
            price,
            stock,
            discount: None,
            rating: Decimal::ZERO,
            review_count: 0,
            category: None,
            unit: None,
            image: None,
        }
    }

    /// Attach a discount descriptor.
    #[must_use]
    pub fn with_discount(mut self, discount: Discount) -> Self {
        self.discount = Some(discount);
        self
    }

    #[must_use]
    pub const fn in_stock(&self) -> bool {
        self.stock > 0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_minimal_snapshot() {
        let json = r#"{"id":3,"name":"Bananas","price":"1.20","stock":40}"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.id, ProductId::new(3));
        assert_eq!(product.price, Decimal::new(120, 2));
        assert!(product.discount.is_none());
        assert_eq!(product.rating, Decimal::ZERO);
        assert_eq!(product.review_count, 0);
        assert!(product.in_stock());
    }
}
