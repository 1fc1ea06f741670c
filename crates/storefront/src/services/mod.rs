//! Business logic services for storefront.
//!
//! # Services
//!
//! - `reviews` - Review add/edit/delete with synchronous rating recompute

pub mod reviews;
