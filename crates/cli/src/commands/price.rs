//! Price lookup command.

use chrono::{DateTime, Utc};

use grocer_core::{Price, ProductId};
use grocer_storefront::catalog::Catalog;
use grocer_storefront::config::StorefrontConfig;
use grocer_storefront::error::Result;
use grocer_storefront::pricing;

use super::catalog;

/// Print the list price, effective price, and sale status of `product`.
///
/// # Errors
///
/// Returns an error if the catalog cannot be loaded or has no such product.
#[allow(clippy::print_stdout)]
pub fn show(config: &StorefrontConfig, product: ProductId, now: DateTime<Utc>) -> Result<()> {
    let catalog = catalog::load(&config.catalog_path)?;
    let snapshot = catalog.get_by_id(product)?;
    let quote = pricing::quote(&snapshot, now);

    let money = |amount| Price::new(amount, config.currency);
    if quote.on_sale {
        println!(
            "{}: {} (was {}, save {})",
            snapshot.name,
            money(quote.effective),
            money(quote.list),
            money(quote.savings())
        );
    } else {
        println!("{}: {}", snapshot.name, money(quote.list));
    }

    if snapshot.review_count > 0 {
        println!(
            "Rated {} / 5 from {} reviews",
            snapshot.rating, snapshot.review_count
        );
    }
    Ok(())
}
