//! Business logic services for storefront.
//!
//! # Services
//!
//! - `catalog` - Product data provider (`ProductCatalog`) and the built-in
//!   featured catalog
//! - `cart` - Shopper commands (`ShopperCommand`) and the `CartService` they
//!   are dispatched to
//!
//! Handlers only see the traits; `AppState` holds the implementations as
//! `Arc<dyn ...>` so tests can swap them out.

pub mod cart;
pub mod catalog;

pub use cart::{CartService, CartServiceError, ShopperCommand, TraceCartService};
pub use catalog::{ProductCatalog, StaticCatalog};
