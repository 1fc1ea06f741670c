//! Grocer Core - Shared catalog types.
//!
//! This crate provides the types passed between Grocer components:
//! - `storefront` - Cart, pricing, and rating logic
//! - `cli` - Command-line driver for the storefront core
//!
//! # Architecture
//!
//! The core crate contains only types and validation - no I/O, no storage,
//! no clocks. Callers hand it snapshots and timestamps.
//!
//! # Modules
//!
//! - [`types`] - Typed IDs, prices, product snapshots, discounts, and reviews

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
