//! Cart error types.

use thiserror::Error;

use grocer_core::ProductId;

/// Errors returned by cart operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CartError {
    /// The requested quantity is above the stock captured in the snapshot.
    /// The cart is left unchanged.
    #[error("only {stock} of product {id} in stock (requested {requested})")]
    StockExceeded {
        id: ProductId,
        stock: u32,
        requested: u64,
    },
}

/// Why a persisted cart payload was discarded on load.
#[derive(Debug, Error)]
pub enum CorruptPersistedState {
    /// Payload is not a JSON array of cart items.
    #[error("malformed cart payload: {0}")]
    Malformed(#[from] serde_json::Error),

    /// Two entries share a product id.
    #[error("duplicate cart entry for product {0}")]
    DuplicateItem(ProductId),

    /// An entry's quantity is outside `1..=stock`.
    #[error("product {id} has quantity {quantity} outside 1..={stock}")]
    QuantityOutOfRange {
        id: ProductId,
        quantity: u32,
        stock: u32,
    },
}
