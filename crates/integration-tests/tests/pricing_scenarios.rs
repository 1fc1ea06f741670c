//! Discounted snapshots flowing into the cart.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;

use grocer_core::{Discount, DiscountKind, Product};
use grocer_integration_tests::product;
use grocer_storefront::CartStore;
use grocer_storefront::notify::NoopNotifier;
use grocer_storefront::pricing;
use grocer_storefront::storage::InMemoryStore;

fn discounted(kind: DiscountKind, value: i64, price: i64, now: DateTime<Utc>) -> Product {
    let discount = Discount::new(
        kind,
        Decimal::from(value),
        now - Duration::days(1),
        now + Duration::days(1),
    )
    .unwrap();
    product(1, "Olive oil", price, 10).with_discount(discount)
}

/// Snapshot the product at its price at `now`, the way the storefront
/// captures it when a shopper adds it.
fn snapshot(product: &Product, now: DateTime<Utc>) -> Product {
    let mut snapshot = product.clone();
    snapshot.price = pricing::effective_price(product, now);
    snapshot
}

#[test]
fn active_percentage_discount_prices_the_cart() {
    let now = Utc::now();
    let oil = discounted(DiscountKind::Percentage, 20, 1000, now);

    let quote = pricing::quote(&oil, now);
    assert_eq!(quote.effective, Decimal::from(800));
    assert!(quote.on_sale);
    assert_eq!(quote.savings(), Decimal::from(200));

    let mut cart = CartStore::load(Arc::new(InMemoryStore::new()), Arc::new(NoopNotifier));
    cart.add(&snapshot(&oil, now)).unwrap();
    cart.add(&snapshot(&oil, now)).unwrap();
    assert_eq!(cart.total(), Decimal::from(1600));
}

#[test]
fn discount_outside_window_uses_list_price() {
    let now = Utc::now();
    let oil = discounted(DiscountKind::Percentage, 20, 1000, now);

    for at in [now + Duration::days(2), now - Duration::days(2)] {
        assert_eq!(pricing::effective_price(&oil, at), Decimal::from(1000));
        assert!(!pricing::is_on_sale(&oil, at));
        assert_eq!(pricing::savings(&oil, at), Decimal::ZERO);
    }
}

#[test]
fn fixed_discount_larger_than_price_floors_at_zero() {
    let now = Utc::now();
    let oil = discounted(DiscountKind::Fixed, 150, 100, now);

    assert_eq!(pricing::effective_price(&oil, now), Decimal::ZERO);
    assert_eq!(pricing::savings(&oil, now), Decimal::from(100));
}

#[test]
fn snapshot_price_is_frozen_once_added() {
    let now = Utc::now();
    let oil = discounted(DiscountKind::Percentage, 20, 1000, now);

    let mut cart = CartStore::load(Arc::new(InMemoryStore::new()), Arc::new(NoopNotifier));
    cart.add(&snapshot(&oil, now)).unwrap();

    // The sale ends, but the line keeps the price captured on add.
    let later = now + Duration::days(3);
    cart.add(&snapshot(&oil, later)).unwrap();
    assert_eq!(cart.items()[0].price, Decimal::from(800));
    assert_eq!(cart.total(), Decimal::from(1600));
}
