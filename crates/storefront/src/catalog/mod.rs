//! Catalog collaborator.
//!
//! The storefront core never fetches products itself; it consumes snapshots
//! returned by a [`Catalog`]. [`InMemoryCatalog`] is the bundled
//! implementation. It keeps each product together with its reviews in a
//! [`ProductRecord`] behind a per-product mutex, so writers to one product
//! are serialized while other products stay available.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, RwLock};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use grocer_core::{Product, ProductId, Review};

use crate::rating;

/// Errors that can occur during catalog operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryError {
    /// Requested product does not exist.
    #[error("product {0} not found")]
    NotFound(ProductId),

    /// A lock was poisoned by a panicking writer.
    #[error("catalog lock poisoned during {0}")]
    LockPoisoned(&'static str),

    /// Constraint violation (e.g., duplicate product id).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

/// Source of product snapshots.
pub trait Catalog: Send + Sync {
    /// Snapshot of the product with `id`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if there is no such product.
    fn get_by_id(&self, id: ProductId) -> Result<Product, RepositoryError>;
}

/// A product and the reviews it owns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductRecord {
    pub product: Product,
    #[serde(default)]
    pub reviews: Vec<Review>,
}

impl ProductRecord {
    #[must_use]
    pub const fn new(product: Product) -> Self {
        Self {
            product,
            reviews: Vec::new(),
        }
    }
}

type Slot = Arc<Mutex<ProductRecord>>;

/// In-memory catalog with per-product write serialization.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    records: Arc<RwLock<HashMap<ProductId, Slot>>>,
}

impl InMemoryCatalog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog from exported records.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if two records share a product id.
    pub fn from_records(
        records: impl IntoIterator<Item = ProductRecord>,
    ) -> Result<Self, RepositoryError> {
        let catalog = Self::new();
        for record in records {
            catalog.insert(record)?;
        }
        Ok(catalog)
    }

    /// Add a new product record.
    ///
    /// The cached rating is recomputed from the record's reviews, so a stale
    /// stored aggregate never reaches readers.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the product id already exists.
    pub fn insert(&self, mut record: ProductRecord) -> Result<(), RepositoryError> {
        let stored = (record.product.rating, record.product.review_count);
        let summary = rating::apply(&mut record.product, &record.reviews);
        if stored != (summary.rating, summary.review_count) {
            tracing::warn!(
                product_id = %record.product.id,
                stored_rating = %stored.0,
                stored_count = stored.1,
                rating = %summary.rating,
                review_count = summary.review_count,
                "Replacing stale cached rating"
            );
        }

        let mut records = self
            .records
            .write()
            .map_err(|_| RepositoryError::LockPoisoned("catalog write"))?;

        let id = record.product.id;
        if records.contains_key(&id) {
            return Err(RepositoryError::Conflict(format!(
                "product {id} already exists"
            )));
        }
        records.insert(id, Arc::new(Mutex::new(record)));
        Ok(())
    }

    /// Reviews of `id` in insertion order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if there is no such product.
    pub fn reviews(&self, id: ProductId) -> Result<Vec<Review>, RepositoryError> {
        self.with_record(id, |record| record.reviews.clone())
    }

    /// Run `f` with exclusive access to the record for `id`.
    ///
    /// Calls for the same product are serialized; `f` observes every change
    /// committed by earlier calls.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if there is no such product.
    pub fn with_record_mut<T>(
        &self,
        id: ProductId,
        f: impl FnOnce(&mut ProductRecord) -> T,
    ) -> Result<T, RepositoryError> {
        let slot = self.slot(id)?;
        let mut record = slot
            .lock()
            .map_err(|_| RepositoryError::LockPoisoned("record write"))?;
        Ok(f(&mut record))
    }

    /// Copy of every record, ordered by product id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::LockPoisoned` if a writer panicked.
    pub fn records(&self) -> Result<Vec<ProductRecord>, RepositoryError> {
        let slots: Vec<Slot> = {
            let records = self
                .records
                .read()
                .map_err(|_| RepositoryError::LockPoisoned("catalog read"))?;
            records.values().cloned().collect()
        };

        let mut out = slots
            .iter()
            .map(|slot| {
                slot.lock()
                    .map(|record| record.clone())
                    .map_err(|_| RepositoryError::LockPoisoned("record read"))
            })
            .collect::<Result<Vec<_>, _>>()?;
        out.sort_by_key(|record| record.product.id);
        Ok(out)
    }

    fn with_record<T>(
        &self,
        id: ProductId,
        f: impl FnOnce(&ProductRecord) -> T,
    ) -> Result<T, RepositoryError> {
        let slot = self.slot(id)?;
        let record = slot
            .lock()
            .map_err(|_| RepositoryError::LockPoisoned("record read"))?;
        Ok(f(&record))
    }

    fn slot(&self, id: ProductId) -> Result<Slot, RepositoryError> {
        let records = self
            .records
            .read()
            .map_err(|_| RepositoryError::LockPoisoned("catalog read"))?;
        records.get(&id).cloned().ok_or(RepositoryError::NotFound(id))
    }
}

impl Catalog for InMemoryCatalog {
    fn get_by_id(&self, id: ProductId) -> Result<Product, RepositoryError> {
        self.with_record(id, |record| record.product.clone())
    }
}
