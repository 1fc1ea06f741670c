//! Subcommand implementations.

pub mod cart;
pub mod catalog;
pub mod price;
pub mod review;
