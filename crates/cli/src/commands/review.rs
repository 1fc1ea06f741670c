//! Review commands.
//!
//! Reviews live in the catalog file next to their product. Each mutation
//! runs under the catalog file lock and recomputes the product's cached
//! rating before the file is written.

use grocer_core::{ProductId, ReviewId, UserId};
use grocer_storefront::config::StorefrontConfig;
use grocer_storefront::error::Result;
use grocer_storefront::rating;
use grocer_storefront::services::reviews::ReviewService;

use super::catalog;

/// List the reviews of `product`.
///
/// # Errors
///
/// Returns an error if the catalog cannot be loaded or has no such product.
#[allow(clippy::print_stdout)]
pub fn list(config: &StorefrontConfig, product: ProductId) -> Result<()> {
    let catalog = catalog::load(&config.catalog_path)?;
    let reviews = ReviewService::new(&catalog).list_reviews(product)?;

    let summary = rating::recompute(&reviews);
    println!(
        "{} / 5 from {} reviews",
        summary.rating, summary.review_count
    );
    for (slot, count) in rating::distribution(&reviews).iter().enumerate().rev() {
        println!("  {}★ {count}", slot + 1);
    }
    for review in &reviews {
        println!(
            "#{} by user {} ({}★, {}): {}",
            review.id,
            review.author,
            review.rating(),
            review.created_at.format("%Y-%m-%d"),
            review.comment
        );
    }
    Ok(())
}

/// Add a review and save the catalog.
///
/// # Errors
///
/// Returns an error if the rating is invalid, the author already reviewed
/// the product, or the catalog cannot be loaded or saved.
#[allow(clippy::print_stdout)]
pub fn add(
    config: &StorefrontConfig,
    product: ProductId,
    author: UserId,
    stars: u8,
    comment: &str,
) -> Result<()> {
    let review = catalog::update(&config.catalog_path, |catalog| {
        Ok(ReviewService::new(catalog).add_review(product, author, stars, comment)?)
    })?;

    println!("Added review #{}", review.id);
    Ok(())
}

/// Edit a review and save the catalog.
///
/// # Errors
///
/// Returns an error if the rating is invalid, the review does not exist, or
/// the catalog cannot be loaded or saved.
pub fn edit(
    config: &StorefrontConfig,
    product: ProductId,
    review: ReviewId,
    stars: u8,
    comment: &str,
) -> Result<()> {
    catalog::update(&config.catalog_path, |catalog| {
        ReviewService::new(catalog).edit_review(product, review, stars, comment)?;
        Ok(())
    })
}

/// Delete a review and save the catalog.
///
/// # Errors
///
/// Returns an error if the review does not exist or the catalog cannot be
/// loaded or saved.
pub fn delete(config: &StorefrontConfig, product: ProductId, review: ReviewId) -> Result<()> {
    catalog::update(&config.catalog_path, |catalog| {
        ReviewService::new(catalog).delete_review(product, review)?;
        Ok(())
    })
}
