//! Persisted key-value storage for shopper state.
//!
//! The cart survives across sessions by being written under a fixed key of a
//! [`KeyValueStore`]. Two backends are provided:
//!
//! - [`InMemoryStore`] - process-local, shared between clones
//! - [`FileStore`] - one `<key>.json` file per key in a directory

mod file;
mod memory;

pub use file::FileStore;
pub use memory::InMemoryStore;

use thiserror::Error;

/// Storage keys.
pub mod keys {
    /// Key for the persisted shopping cart.
    pub const CART: &str = "cart";
}

/// Errors raised by a [`KeyValueStore`] backend.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Filesystem operation failed.
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Value could not be encoded.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The backing lock was poisoned by a panicking writer.
    #[error("storage lock poisoned during {0}")]
    LockPoisoned(&'static str),

    /// Key contains characters that cannot be mapped to the backend.
    #[error("invalid storage key: {0}")]
    InvalidKey(String),
}

/// A durable string-valued key-value store.
///
/// Values are opaque text; callers own the encoding.
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Write `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be written.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete `key`. Removing an absent key is not an error.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be written.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}
