//! E-commerce Evolution Core - Shared domain and API contract types.
//!
//! This crate describes the shapes exchanged between the storefront and the
//! future REST API:
//! - `storefront` - Server-rendered product page and catalog API
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no HTTP,
//! no persistence. Computed values (order totals, cart subtotals, page
//! counts) live next to the types that carry them so every consumer derives
//! them the same way.
//!
//! # Modules
//!
//! - [`types`] - IDs, money, statuses, products, users, orders, carts, envelopes
//! - [`format`] - Locale-aware currency formatting
//! - [`catalog`] - In-memory product catalog with filtering and pagination

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod format;
pub mod types;

pub use catalog::{Catalog, CatalogError, ProductFilter};
pub use format::{Locale, LocaleError, format_currency, format_currency_default};
pub use types::*;
