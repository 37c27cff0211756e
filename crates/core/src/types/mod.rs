//! Core types for Kiosk.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod price;
pub mod quantity;
pub mod sku;

pub use price::{CurrencyCode, CurrencyError, Price};
pub use quantity::Quantity;
pub use sku::{Sku, SkuError};
