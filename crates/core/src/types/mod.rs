//! Domain and API contract types.
//!
//! These describe the shapes the storefront and a future REST API exchange.
//! JSON field names are camelCase throughout.

pub mod api;
pub mod auth;
pub mod cart;
pub mod email;
pub mod id;
pub mod money;
pub mod order;
pub mod product;
pub mod status;
pub mod user;

pub use api::{ApiError, ApiResponse, PaginatedResponse, PaginationMeta, PaginationParams};
pub use auth::{AuthResponse, LoginRequest, RegisterRequest, TokenType};
pub use cart::{Cart, CartError, CartItem};
pub use email::{Email, EmailError};
pub use id::*;
pub use money::{CurrencyCode, Money, MoneyError};
pub use order::{Order, OrderError, OrderItem, OrderTotals};
pub use product::{
    Product, ProductDimensions, ProductError, ProductImage, ProductSummary, ProductVariant,
};
pub use status::*;
pub use user::{User, UserAddress, UserError};
