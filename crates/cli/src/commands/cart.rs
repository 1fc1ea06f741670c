//! Cart commands.
//!
//! Each invocation is one shopper session: the cart is loaded from the
//! file store in the data directory, mutated once, and written back.

use std::sync::Arc;

use chrono::Utc;

use grocer_core::{Price, ProductId};
use grocer_storefront::cart::CartStore;
use grocer_storefront::catalog::Catalog;
use grocer_storefront::config::StorefrontConfig;
use grocer_storefront::error::Result;
use grocer_storefront::notify::{BreadcrumbNotifier, CartEvent, CartNotifier, TracingNotifier};
use grocer_storefront::pricing;
use grocer_storefront::storage::FileStore;

use super::catalog;

/// Prints each event for the shopper and forwards it to the log and Sentry.
struct ConsoleNotifier;

impl CartNotifier for ConsoleNotifier {
    #[allow(clippy::print_stdout)]
    fn notify(&self, event: &CartEvent) {
        println!("{}", event.message());
        TracingNotifier.notify(event);
        BreadcrumbNotifier.notify(event);
    }
}

fn open(config: &StorefrontConfig) -> Result<CartStore> {
    let store = FileStore::open(&config.data_dir)?;
    Ok(CartStore::load(Arc::new(store), Arc::new(ConsoleNotifier)))
}

/// Print cart lines and totals.
///
/// # Errors
///
/// Returns an error if the data directory cannot be created.
#[allow(clippy::print_stdout)]
pub fn show(config: &StorefrontConfig) -> Result<()> {
    let cart = open(config)?;
    let money = |amount| Price::new(amount, config.currency);

    if cart.is_empty() {
        println!("Your cart is empty");
        return Ok(());
    }

    for item in cart.items() {
        let unit = item.unit.as_deref().map(|u| format!("/{u}")).unwrap_or_default();
        println!(
            "{:>4}  {:<32} {:>3} x {}{} = {}",
            item.id,
            item.name,
            item.quantity,
            money(item.price),
            unit,
            money(item.line_total())
        );
    }
    println!("Items: {}  Total: {}", cart.count(), money(cart.total()));
    Ok(())
}

/// Add one unit of `product`, priced at its current effective price.
///
/// # Errors
///
/// Returns an error if the product does not exist or is out of stock for
/// another unit.
pub fn add(config: &StorefrontConfig, product: ProductId) -> Result<()> {
    let catalog = catalog::load(&config.catalog_path)?;
    let mut snapshot = catalog.get_by_id(product)?;
    snapshot.price = pricing::effective_price(&snapshot, Utc::now());

    let mut cart = open(config)?;
    cart.add(&snapshot)?;
    Ok(())
}

/// Set the quantity of `product`.
///
/// # Errors
///
/// Returns an error if `quantity` exceeds the stock captured when the
/// product was added.
pub fn update(config: &StorefrontConfig, product: ProductId, quantity: i64) -> Result<()> {
    let mut cart = open(config)?;
    cart.update_quantity(product, quantity)?;
    Ok(())
}

/// Remove `product` from the cart.
///
/// # Errors
///
/// Returns an error if the data directory cannot be created.
pub fn remove(config: &StorefrontConfig, product: ProductId) -> Result<()> {
    let mut cart = open(config)?;
    cart.remove(product);
    Ok(())
}

/// Empty the cart.
///
/// # Errors
///
/// Returns an error if the data directory cannot be created.
pub fn clear(config: &StorefrontConfig) -> Result<()> {
    let mut cart = open(config)?;
    cart.clear();
    Ok(())
}
