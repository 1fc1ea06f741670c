//! Cart line items.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use grocer_core::{Product, ProductId};

/// A product snapshot plus the selected quantity.
///
/// Price and stock are copied from the product when the line is created and
/// are not reconciled against later catalog changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    pub id: ProductId,
    pub name: String,
    /// Unit price at the time the item was added.
    pub price: Decimal,
    /// Stock ceiling at the time the item was added.
    pub stock: u32,
    pub quantity: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl CartItem {
    /// Snapshot `product` as a new line with quantity 1.
    #[must_use]
    pub fn snapshot(product: &Product) -> Self {
        Self {
            id: product.id,
            name: product.name.clone(),
            price: product.price,
            stock: product.stock,
            quantity: 1,
            unit: product.unit.clone(),
            image: product.image.clone(),
        }
    }

    /// `price * quantity`.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.price * Decimal::from(self.quantity)
    }
}
