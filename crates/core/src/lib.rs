//! Kiosk Core - cart store and shared types.
//!
//! This crate provides the pieces of the Kiosk storefront that carry no I/O:
//! - [`types`] - Newtype wrappers for skus, quantities and prices
//! - [`cart`] - The in-memory cart store and its derived reads
//!
//! # Architecture
//!
//! The core crate contains only types and pure operations - no HTTP, no
//! templates, no clocks. The storefront crate owns one [`Cart`] per page
//! session and renders it after every mutation.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod types;

pub use cart::{Cart, CartLine};
pub use types::*;
