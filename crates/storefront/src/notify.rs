//! Cart notifications.
//!
//! `CartStore` reports every outcome through an injected [`CartNotifier`].
//! Rendering (toasts, banners) belongs to the UI; this module only defines
//! the event kinds and their product/quantity context.

use grocer_core::ProductId;

use crate::error::add_breadcrumb;

/// Outcome of a cart operation, as shown to the shopper.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartEvent {
    /// A product was added as a new line.
    ItemAdded { id: ProductId, name: String },
    /// An existing line changed quantity.
    QuantityUpdated {
        id: ProductId,
        name: String,
        quantity: u32,
    },
    /// A line was removed (or was already absent).
    ItemRemoved { id: ProductId },
    /// The cart was emptied.
    CartCleared,
    /// The requested quantity is above the snapshot's stock.
    StockExceeded {
        id: ProductId,
        name: String,
        stock: u32,
    },
}

impl CartEvent {
    /// Short machine-readable kind.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::ItemAdded { .. } => "item_added",
            Self::QuantityUpdated { .. } => "quantity_updated",
            Self::ItemRemoved { .. } => "item_removed",
            Self::CartCleared => "cart_cleared",
            Self::StockExceeded { .. } => "stock_exceeded",
        }
    }

    /// Default shopper-facing wording.
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::ItemAdded { name, .. } => format!("{name} added to cart"),
            Self::QuantityUpdated { name, quantity, .. } => {
                format!("{name} quantity updated to {quantity}")
            }
            Self::ItemRemoved { .. } => "Item removed from cart".to_string(),
            Self::CartCleared => "Cart cleared".to_string(),
            Self::StockExceeded { name, stock, .. } => {
                format!("Only {stock} of {name} in stock")
            }
        }
    }

    /// Whether the event reports a rejected operation.
    #[must_use]
    pub const fn is_error(&self) -> bool {
        matches!(self, Self::StockExceeded { .. })
    }
}

/// Receives cart events.
pub trait CartNotifier: Send + Sync {
    fn notify(&self, event: &CartEvent);
}

/// Discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopNotifier;

impl CartNotifier for NoopNotifier {
    fn notify(&self, _event: &CartEvent) {}
}

/// Emits each event as a structured log line.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl CartNotifier for TracingNotifier {
    fn notify(&self, event: &CartEvent) {
        if event.is_error() {
            tracing::warn!(kind = event.kind(), "{}", event.message());
        } else {
            tracing::info!(kind = event.kind(), "{}", event.message());
        }
    }
}

/// Records each event as a Sentry breadcrumb so error reports carry the
/// shopper's recent cart activity.
#[derive(Debug, Clone, Copy, Default)]
pub struct BreadcrumbNotifier;

impl CartNotifier for BreadcrumbNotifier {
    fn notify(&self, event: &CartEvent) {
        let product_id = match event {
            CartEvent::ItemAdded { id, .. }
            | CartEvent::QuantityUpdated { id, .. }
            | CartEvent::ItemRemoved { id }
            | CartEvent::StockExceeded { id, .. } => Some(id.to_string()),
            CartEvent::CartCleared => None,
        };

        match product_id {
            Some(id) => add_breadcrumb(
                "cart",
                &event.message(),
                Some(&[("kind", event.kind()), ("product_id", id.as_str())]),
            ),
            None => add_breadcrumb("cart", &event.message(), Some(&[("kind", event.kind())])),
        }
    }
}
