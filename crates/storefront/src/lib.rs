//! Grocer Storefront - Cart, pricing, and rating core.
//!
//! # Components
//!
//! - [`pricing`] - Effective price and sale status of a product snapshot
//! - [`rating`] - Cached rating aggregate of a product's reviews
//! - [`cart`] - The shopper's cart with stock limits and persistence
//!
//! Collaborators the core talks to through traits:
//!
//! - [`storage`] - Persisted key-value store for the cart
//! - [`notify`] - Notification sink for cart events
//! - [`catalog`] - Source of product snapshots
//!
//! [`services::reviews`] ties the catalog and rating aggregator together.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod config;
pub mod error;
pub mod notify;
pub mod pricing;
pub mod rating;
pub mod services;
pub mod storage;

pub use cart::{CartError, CartItem, CartStore};
pub use error::{Result, StorefrontError};
