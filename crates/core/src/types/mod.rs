//! Core types for Grocer.
//!
//! This module provides type-safe wrappers for catalog concepts.

pub mod discount;
pub mod id;
pub mod price;
pub mod product;
pub mod review;

pub use discount::{Discount, DiscountError, DiscountKind};
pub use id::*;
pub use price::{CurrencyCode, Price};
pub use product::Product;
pub use review::{Review, ReviewError};
