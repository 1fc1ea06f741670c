//! Unified error handling with Sentry integration.
//!
//! Each component has its own error enum. [`StorefrontError`] gathers them
//! for callers that drive several components (the CLI), and [`report`]
//! captures server-side failures to Sentry before logging them.

use thiserror::Error;

use crate::cart::CartError;
use crate::catalog::RepositoryError;
use crate::config::ConfigError;
use crate::services::reviews::ReviewServiceError;
use crate::storage::StorageError;

/// Top-level error type for the storefront core.
#[derive(Debug, Error)]
pub enum StorefrontError {
    /// Cart operation rejected.
    #[error("Cart error: {0}")]
    Cart(#[from] CartError),

    /// Review operation failed.
    #[error("Review error: {0}")]
    Review(#[from] ReviewServiceError),

    /// Catalog lookup failed.
    #[error("Catalog error: {0}")]
    Repository(#[from] RepositoryError),

    /// Persisted store failed.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Configuration could not be loaded.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Bad input from the caller.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl StorefrontError {
    /// Whether the error is the shopper's to fix rather than an
    /// infrastructure failure.
    #[must_use]
    pub fn is_user_error(&self) -> bool {
        match self {
            Self::Cart(_) | Self::BadRequest(_) => true,
            Self::Review(err) => err.is_user_error(),
            Self::Repository(err) => matches!(err, RepositoryError::NotFound(_)),
            Self::Storage(_) | Self::Config(_) => false,
        }
    }
}

/// Result type alias for `StorefrontError`.
pub type Result<T> = std::result::Result<T, StorefrontError>;

/// Log an error, capturing infrastructure failures to Sentry.
pub fn report(err: &StorefrontError) {
    if err.is_user_error() {
        tracing::warn!(error = %err, "Request rejected");
    } else {
        let event_id = sentry::capture_error(err);
        tracing::error!(
            error = %err,
            sentry_event_id = %event_id,
            "Request error"
        );
    }
}

/// Add a breadcrumb for user actions.
///
/// Breadcrumbs appear in Sentry error reports to show the trail of user actions
/// leading up to an error.
pub fn add_breadcrumb(category: &str, message: &str, data: Option<&[(&str, &str)]>) {
    let mut breadcrumb = sentry::Breadcrumb {
        category: Some(category.to_string()),
        message: Some(message.to_string()),
        level: sentry::Level::Info,
        ..Default::default()
    };

    if let Some(pairs) = data {
        for (key, value) in pairs {
            breadcrumb.data.insert(
                (*key).to_string(),
                serde_json::Value::String((*value).to_string()),
            );
        }
    }

    sentry::add_breadcrumb(breadcrumb);
}
