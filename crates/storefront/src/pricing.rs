//! Effective price and sale status for product snapshots.
//!
//! Everything here is a pure function of the snapshot and the evaluation
//! time. Nothing is cached: a discount window is checked against `now` on
//! every call.
//!
//! A discount that is marked active but has a missing bound, an end before
//! its start, or a value out of range for its kind is treated as inactive
//! rather than reported as an error. Arithmetic that would overflow also
//! falls back to the list price.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use grocer_core::{Discount, DiscountKind, Product};

/// Prices shown for a product at a point in time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceQuote {
    /// List price from the snapshot.
    pub list: Decimal,
    /// Price after any applicable discount.
    pub effective: Decimal,
    pub on_sale: bool,
}

impl PriceQuote {
    /// Amount saved against the list price.
    #[must_use]
    pub fn savings(&self) -> Decimal {
        self.list.checked_sub(self.effective).unwrap_or(Decimal::ZERO)
    }
}

/// The discount that applies to `product` at `now`, if any.
fn applicable_discount(product: &Product, now: DateTime<Utc>) -> Option<&Discount> {
    let discount = product.discount.as_ref().filter(|d| d.active)?;
    if discount.window().is_none() {
        tracing::debug!(
            product_id = %product.id,
            "ignoring active discount with malformed window"
        );
        return None;
    }
    if !discount.value_in_range() {
        tracing::debug!(
            product_id = %product.id,
            value = %discount.value,
            "ignoring active discount with out-of-range value"
        );
        return None;
    }
    discount.in_window(now).then_some(discount)
}

/// Price the shopper pays for one unit of `product` at `now`.
///
/// Never negative and never above the list price.
#[must_use]
pub fn effective_price(product: &Product, now: DateTime<Utc>) -> Decimal {
    let Some(discount) = applicable_discount(product, now) else {
        return product.price;
    };

    let discounted = match discount.kind {
        DiscountKind::Percentage => discount
            .value
            .checked_div(Decimal::ONE_HUNDRED)
            .and_then(|rate| Decimal::ONE.checked_sub(rate))
            .and_then(|factor| product.price.checked_mul(factor)),
        DiscountKind::Fixed => product.price.checked_sub(discount.value),
    };

    let Some(discounted) = discounted else {
        tracing::debug!(product_id = %product.id, "discount arithmetic overflowed");
        return product.price;
    };
    discounted.max(Decimal::ZERO).min(product.price)
}

/// Whether `product` has an active discount whose window contains `now`.
#[must_use]
pub fn is_on_sale(product: &Product, now: DateTime<Utc>) -> bool {
    applicable_discount(product, now).is_some()
}

/// List price minus effective price.
#[must_use]
pub fn savings(product: &Product, now: DateTime<Utc>) -> Decimal {
    quote(product, now).savings()
}

/// List price, effective price and sale status in one evaluation.
#[must_use]
pub fn quote(product: &Product, now: DateTime<Utc>) -> PriceQuote {
    PriceQuote {
        list: product.price,
        effective: effective_price(product, now),
        on_sale: is_on_sale(product, now),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::{Duration, TimeZone};

    use grocer_core::ProductId;

    use super::*;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 5, 15, 12, 0, 0).unwrap()
    }

    fn product(price: i64) -> Product {
        Product::new(ProductId::new(1), "Olive Oil", Decimal::from(price), 10)
    }

    fn discount(kind: DiscountKind, value: i64, start: i64, end: i64) -> Discount {
        Discount::new(
            kind,
            Decimal::from(value),
            now() + Duration::days(start),
            now() + Duration::days(end),
        )
        .unwrap()
    }

    #[test]
    fn test_no_discount_is_list_price() {
        let p = product(1000);
        assert_eq!(effective_price(&p, now()), Decimal::from(1000));
        assert!(!is_on_sale(&p, now()));
    }

    #[test]
    fn test_percentage_in_window() {
        let p = product(1000).with_discount(discount(DiscountKind::Percentage, 20, -1, 1));
        assert_eq!(effective_price(&p, now()), Decimal::from(800));
        assert!(is_on_sale(&p, now()));
        assert_eq!(savings(&p, now()), Decimal::from(200));
    }

    #[test]
    fn test_expired_and_future_windows_use_list_price() {
        let expired = product(1000).with_discount(discount(DiscountKind::Percentage, 20, -10, -1));
        assert_eq!(effective_price(&expired, now()), Decimal::from(1000));
        assert!(!is_on_sale(&expired, now()));

        let upcoming = product(1000).with_discount(discount(DiscountKind::Percentage, 20, 1, 10));
        assert_eq!(effective_price(&upcoming, now()), Decimal::from(1000));
        assert!(!is_on_sale(&upcoming, now()));
    }

    #[test]
    fn test_window_is_evaluated_per_call() {
        let p = product(1000).with_discount(discount(DiscountKind::Percentage, 20, -1, 1));
        assert_eq!(effective_price(&p, now()), Decimal::from(800));
        assert_eq!(
            effective_price(&p, now() + Duration::days(2)),
            Decimal::from(1000)
        );
        assert_eq!(effective_price(&p, now()), Decimal::from(800));
    }

    #[test]
    fn test_fixed_discount_clamps_to_zero() {
        let p = product(100).with_discount(discount(DiscountKind::Fixed, 150, -1, 1));
        assert_eq!(effective_price(&p, now()), Decimal::ZERO);
        assert!(is_on_sale(&p, now()));
    }

    #[test]
    fn test_fixed_discount_subtracts() {
        let p = product(100).with_discount(discount(DiscountKind::Fixed, 15, -1, 1));
        assert_eq!(effective_price(&p, now()), Decimal::from(85));
    }

    #[test]
    fn test_inactive_discount_is_ignored() {
        let mut d = discount(DiscountKind::Percentage, 50, -1, 1);
        d.active = false;
        let p = product(40).with_discount(d);
        assert_eq!(effective_price(&p, now()), Decimal::from(40));
        assert!(!is_on_sale(&p, now()));
    }

    #[test]
    fn test_malformed_window_fails_safe() {
        let reversed = Discount {
            kind: DiscountKind::Percentage,
            value: Decimal::from(30),
            starts_at: Some(now() + Duration::days(1)),
            ends_at: Some(now() - Duration::days(1)),
            active: true,
        };
        let p = product(50).with_discount(reversed);
        assert_eq!(effective_price(&p, now()), Decimal::from(50));
        assert!(!is_on_sale(&p, now()));

        let open_ended = Discount {
            kind: DiscountKind::Fixed,
            value: Decimal::from(5),
            starts_at: Some(now() - Duration::days(1)),
            ends_at: None,
            active: true,
        };
        let p = product(50).with_discount(open_ended);
        assert_eq!(effective_price(&p, now()), Decimal::from(50));
        assert!(!is_on_sale(&p, now()));
    }

    fn unchecked(kind: DiscountKind, value: Decimal) -> Discount {
        Discount {
            kind,
            value,
            starts_at: Some(now() - Duration::days(1)),
            ends_at: Some(now() + Duration::days(1)),
            active: true,
        }
    }

    #[test]
    fn test_out_of_range_values_fail_safe() {
        for discount in [
            unchecked(DiscountKind::Percentage, Decimal::from(150)),
            unchecked(DiscountKind::Percentage, Decimal::from(-10)),
            unchecked(DiscountKind::Fixed, Decimal::from(-3)),
        ] {
            let p = product(20).with_discount(discount);
            assert_eq!(effective_price(&p, now()), Decimal::from(20));
            assert!(!is_on_sale(&p, now()));
            assert_eq!(savings(&p, now()), Decimal::ZERO);
        }
    }

    #[test]
    fn test_huge_stored_discount_does_not_panic() {
        let json = r#"{
            "kind": "percentage",
            "value": "10000000000000000000000000000",
            "starts_at": "2026-05-14T12:00:00Z",
            "ends_at": "2026-05-16T12:00:00Z",
            "active": true
        }"#;
        let discount: Discount = serde_json::from_str(json).unwrap();
        let p = product(1000).with_discount(discount);
        assert_eq!(effective_price(&p, now()), Decimal::from(1000));
        assert!(!is_on_sale(&p, now()));

        let p = Product::new(ProductId::new(2), "Saffron", Decimal::MAX, 1)
            .with_discount(unchecked(DiscountKind::Fixed, Decimal::MAX));
        assert_eq!(effective_price(&p, now()), Decimal::ZERO);

        let p = Product::new(ProductId::new(3), "Debt", Decimal::MIN, 1)
            .with_discount(unchecked(DiscountKind::Fixed, Decimal::MAX));
        assert_eq!(effective_price(&p, now()), Decimal::MIN);
    }

    #[test]
    fn test_effective_price_never_exceeds_list() {
        for (kind, value) in [
            (DiscountKind::Percentage, 0),
            (DiscountKind::Percentage, 35),
            (DiscountKind::Percentage, 100),
            (DiscountKind::Fixed, 0),
            (DiscountKind::Fixed, 7),
            (DiscountKind::Fixed, 500),
        ] {
            let p = product(120).with_discount(discount(kind, value, -1, 1));
            let price = effective_price(&p, now());
            assert!(price <= p.price, "{kind:?} {value} gave {price}");
            assert!(price >= Decimal::ZERO);
        }
    }

    #[test]
    fn test_quote() {
        let p = product(1000).with_discount(discount(DiscountKind::Percentage, 25, -1, 1));
        let q = quote(&p, now());
        assert_eq!(q.list, Decimal::from(1000));
        assert_eq!(q.effective, Decimal::from(750));
        assert!(q.on_sale);
        assert_eq!(q.savings(), Decimal::from(250));
    }
}
