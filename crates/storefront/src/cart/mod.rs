//! Shopper cart.
//!
//! A [`CartStore`] is built once per session with [`CartStore::load`] and
//! passed by reference to whatever needs it. All mutation goes through its
//! methods, which:
//!
//! 1. validate against the stock captured in the item snapshot,
//! 2. commit the change in memory,
//! 3. notify the injected [`CartNotifier`],
//! 4. write the cart back to the [`KeyValueStore`].
//!
//! Persistence failures are logged and never undo step 2.
//!
//! # Invariants
//!
//! - At most one [`CartItem`] per product id, in insertion order.
//! - Every item satisfies `1 <= quantity <= stock`.

mod error;
mod item;

pub use error::{CartError, CorruptPersistedState};
pub use item::CartItem;

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use rust_decimal::Decimal;

use grocer_core::{Product, ProductId};

use crate::notify::{CartEvent, CartNotifier};
use crate::storage::{KeyValueStore, keys};

/// The shopper's cart, backed by a persisted store.
pub struct CartStore {
    items: Vec<CartItem>,
    store: Arc<dyn KeyValueStore>,
    notifier: Arc<dyn CartNotifier>,
}

impl fmt::Debug for CartStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CartStore")
            .field("items", &self.items)
            .finish_non_exhaustive()
    }
}

impl CartStore {
    /// Restore the cart persisted under [`keys::CART`].
    ///
    /// A missing key yields an empty cart. A payload that does not parse, or
    /// that breaks the cart invariants, is logged, removed from the store,
    /// and also yields an empty cart. This never fails.
    pub fn load(store: Arc<dyn KeyValueStore>, notifier: Arc<dyn CartNotifier>) -> Self {
        let items = match store.get(keys::CART) {
            Ok(Some(payload)) => match parse_persisted(&payload) {
                Ok(items) => items,
                Err(e) => {
                    tracing::warn!(error = %e, "Discarding corrupt persisted cart");
                    if let Err(e) = store.remove(keys::CART) {
                        tracing::warn!(error = %e, "Failed to remove corrupt persisted cart");
                    }
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read persisted cart");
                Vec::new()
            }
        };

        tracing::debug!(items = items.len(), "Cart loaded");

        Self {
            items,
            store,
            notifier,
        }
    }

    /// Add one unit of `product`.
    ///
    /// A product already in the cart has its quantity incremented; otherwise
    /// a new line is appended with quantity 1. The ceiling for an existing
    /// line is the lower of the snapshot's stock and `product.stock`.
    ///
    /// # Errors
    ///
    /// Returns `CartError::StockExceeded` if one more unit would exceed the
    /// stock. The cart is unchanged.
    pub fn add(&mut self, product: &Product) -> Result<(), CartError> {
        let position = self.position(product.id);
        let (current, ceiling) = position
            .and_then(|i| self.items.get(i))
            .map_or((0, product.stock), |item| {
                (item.quantity, item.stock.min(product.stock))
            });

        let requested = u64::from(current) + 1;
        if requested > u64::from(ceiling) {
            return Err(self.reject(product.id, &product.name, ceiling, requested));
        }

        let event = match position.and_then(|i| self.items.get_mut(i)) {
            Some(item) => {
                item.quantity += 1;
                CartEvent::QuantityUpdated {
                    id: item.id,
                    name: item.name.clone(),
                    quantity: item.quantity,
                }
            }
            None => {
                self.items.push(CartItem::snapshot(product));
                CartEvent::ItemAdded {
                    id: product.id,
                    name: product.name.clone(),
                }
            }
        };

        tracing::info!(product_id = %product.id, quantity = requested, "Cart item added");
        self.commit(&event);
        Ok(())
    }

    /// Remove the line for `id`. Returns whether a line was removed.
    ///
    /// Removing an absent product is not an error; the removal notification
    /// is still emitted.
    pub fn remove(&mut self, id: ProductId) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.id != id);
        let removed = self.items.len() != before;

        if removed {
            tracing::info!(product_id = %id, "Cart item removed");
            self.commit(&CartEvent::ItemRemoved { id });
        } else {
            self.notifier.notify(&CartEvent::ItemRemoved { id });
        }
        removed
    }

    /// Set the quantity of the line for `id`.
    ///
    /// A quantity of zero or less removes the line exactly as [`Self::remove`]
    /// does. A positive quantity for a product not in the cart is ignored.
    ///
    /// # Errors
    ///
    /// Returns `CartError::StockExceeded` if `quantity` is above the line's
    /// stock snapshot. The existing quantity is kept.
    pub fn update_quantity(&mut self, id: ProductId, quantity: i64) -> Result<(), CartError> {
        if quantity <= 0 {
            self.remove(id);
            return Ok(());
        }

        let Some(index) = self.position(id) else {
            tracing::debug!(product_id = %id, "Quantity update for product not in cart");
            return Ok(());
        };
        let Some(item) = self.items.get(index) else {
            return Ok(());
        };

        let requested = quantity.unsigned_abs();
        let target = match u32::try_from(quantity) {
            Ok(target) if target <= item.stock => target,
            _ => {
                let (name, stock) = (item.name.clone(), item.stock);
                return Err(self.reject(id, &name, stock, requested));
            }
        };

        let Some(item) = self.items.get_mut(index) else {
            return Ok(());
        };
        item.quantity = target;
        let event = CartEvent::QuantityUpdated {
            id,
            name: item.name.clone(),
            quantity: target,
        };

        tracing::info!(product_id = %id, quantity = target, "Cart quantity updated");
        self.commit(&event);
        Ok(())
    }

    /// Remove every line.
    pub fn clear(&mut self) {
        self.items.clear();
        tracing::info!("Cart cleared");
        self.commit(&CartEvent::CartCleared);
    }

    /// Sum of `price * quantity` over all lines.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.items.iter().map(CartItem::line_total).sum()
    }

    /// Sum of quantities over all lines.
    #[must_use]
    pub fn count(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.quantity)).sum()
    }

    /// Lines in insertion order.
    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    #[must_use]
    pub fn get(&self, id: ProductId) -> Option<&CartItem> {
        self.items.iter().find(|item| item.id == id)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Write the current cart under [`keys::CART`].
    ///
    /// Failures are logged at warn level and otherwise ignored.
    pub fn persist(&self) {
        let payload = match serde_json::to_string(&self.items) {
            Ok(payload) => payload,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to serialize cart");
                return;
            }
        };

        if let Err(e) = self.store.set(keys::CART, &payload) {
            tracing::warn!(error = %e, "Failed to persist cart");
        }
    }

    fn position(&self, id: ProductId) -> Option<usize> {
        self.items.iter().position(|item| item.id == id)
    }

    fn commit(&self, event: &CartEvent) {
        self.notifier.notify(event);
        self.persist();
    }

    fn reject(&self, id: ProductId, name: &str, stock: u32, requested: u64) -> CartError {
        tracing::info!(product_id = %id, stock, requested, "Cart stock exceeded");
        self.notifier.notify(&CartEvent::StockExceeded {
            id,
            name: name.to_owned(),
            stock,
        });
        CartError::StockExceeded {
            id,
            stock,
            requested,
        }
    }
}

/// Decode a persisted cart and check it against the cart invariants.
fn parse_persisted(payload: &str) -> Result<Vec<CartItem>, CorruptPersistedState> {
    let items: Vec<CartItem> = serde_json::from_str(payload)?;

    let mut seen = HashSet::with_capacity(items.len());
    for item in &items {
        if !seen.insert(item.id) {
            return Err(CorruptPersistedState::DuplicateItem(item.id));
        }
        if item.quantity == 0 || item.quantity > item.stock {
            return Err(CorruptPersistedState::QuantityOutOfRange {
                id: item.id,
                quantity: item.quantity,
                stock: item.stock,
            });
        }
    }

    Ok(items)
}
