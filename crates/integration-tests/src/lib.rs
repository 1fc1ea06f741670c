//! Integration tests for Grocer.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p grocer-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `cart_persistence` - Cart sessions over the file-backed store
//! - `pricing_scenarios` - Discounted snapshots flowing into the cart
//! - `concurrent_reviews` - Rating recompute under concurrent review writes
//!
//! This library holds the fixtures those tests share.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::{Path, PathBuf};

use rust_decimal::Decimal;

use grocer_core::{Product, ProductId};

/// A uniquely named directory under the system temp dir, removed on drop.
#[derive(Debug)]
pub struct TempDir {
    path: PathBuf,
}

impl TempDir {
    /// Create a fresh directory whose name starts with `prefix`.
    ///
    /// # Panics
    ///
    /// Panics if the directory cannot be created.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn new(prefix: &str) -> Self {
        let path = std::env::temp_dir().join(format!("{prefix}-{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&path).expect("Failed to create temp dir");
        Self { path }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for TempDir {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.path);
    }
}

/// A product with a whole-unit list price and no discount.
#[must_use]
pub fn product(id: i32, name: &str, price: i64, stock: u32) -> Product {
    Product::new(ProductId::new(id), name, Decimal::from(price), stock)
}
