//! Rating recompute under concurrent review writes.

#![allow(clippy::unwrap_used)]

use rust_decimal::Decimal;

use grocer_core::{ProductId, UserId};
use grocer_integration_tests::product;
use grocer_storefront::catalog::{Catalog, InMemoryCatalog, ProductRecord};
use grocer_storefront::rating;
use grocer_storefront::services::reviews::ReviewService;

const PRODUCT: ProductId = ProductId::new(1);

fn catalog() -> InMemoryCatalog {
    InMemoryCatalog::from_records([
        ProductRecord::new(product(1, "Blueberries", 6, 50)),
        ProductRecord::new(product(2, "Raspberries", 7, 50)),
    ])
    .unwrap()
}

#[test]
fn concurrent_reviews_are_all_counted() {
    let catalog = catalog();
    let writers: i32 = 32;

    std::thread::scope(|s| {
        for author in 1..=writers {
            let catalog = &catalog;
            s.spawn(move || {
                let stars = u8::try_from(author % 5 + 1).unwrap();
                ReviewService::new(catalog)
                    .add_review(PRODUCT, UserId::new(author), stars, "")
                    .unwrap();
            });
        }
    });

    let stored = catalog.get_by_id(PRODUCT).unwrap();
    let reviews = ReviewService::new(&catalog).list_reviews(PRODUCT).unwrap();
    assert_eq!(stored.review_count, u32::try_from(writers).unwrap());
    assert_eq!(reviews.len(), usize::try_from(writers).unwrap());
    assert_eq!(stored.rating, rating::recompute(&reviews).rating);

    let mut ids: Vec<i32> = reviews.iter().map(|r| r.id.as_i32()).collect();
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), reviews.len());
}

#[test]
fn concurrent_edits_and_deletes_keep_rating_consistent() {
    let catalog = catalog();
    let service = ReviewService::new(&catalog);
    let added: Vec<_> = (1..=20)
        .map(|author| service.add_review(PRODUCT, UserId::new(author), 3, "").unwrap())
        .collect();

    std::thread::scope(|s| {
        for (i, review) in added.iter().enumerate() {
            let catalog = &catalog;
            s.spawn(move || {
                let service = ReviewService::new(catalog);
                if i % 2 == 0 {
                    service.delete_review(PRODUCT, review.id).unwrap();
                } else {
                    service.edit_review(PRODUCT, review.id, 5, "Fresher").unwrap();
                }
            });
        }
    });

    let stored = catalog.get_by_id(PRODUCT).unwrap();
    assert_eq!(stored.review_count, 10);
    assert_eq!(stored.rating, Decimal::from(5));
}

#[test]
fn rating_follows_reviews_down_to_zero() {
    let catalog = catalog();
    let service = ReviewService::new(&catalog);

    let reviews: Vec<_> = [5, 4, 2]
        .into_iter()
        .zip(1..)
        .map(|(stars, author)| {
            service
                .add_review(PRODUCT, UserId::new(author), stars, "")
                .unwrap()
        })
        .collect();

    let stored = catalog.get_by_id(PRODUCT).unwrap();
    assert_eq!((stored.rating, stored.review_count), (Decimal::new(37, 1), 3));

    for review in reviews {
        service.delete_review(PRODUCT, review.id).unwrap();
    }
    let stored = catalog.get_by_id(PRODUCT).unwrap();
    assert_eq!((stored.rating, stored.review_count), (Decimal::ZERO, 0));

    // Other products are untouched.
    let other = catalog.get_by_id(ProductId::new(2)).unwrap();
    assert_eq!((other.rating, other.review_count), (Decimal::ZERO, 0));
}
