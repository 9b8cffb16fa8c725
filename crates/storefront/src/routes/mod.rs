//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Home page (featured products + timeline)
//! GET  /health                 - Health check
//!
//! # Shopper actions (form posts, 204 + HX-Trigger)
//! POST /cart/add               - Add to cart (triggers cart-requested)
//! POST /wishlist/add           - Add to wishlist (triggers wishlist-requested)
//!
//! # Catalog API (JSON)
//! GET  /api/products           - Paginated product summaries
//! GET  /api/products/{id}      - Product detail
//! ```

pub mod api;
pub mod cart;
pub mod home;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the catalog API router.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/products", get(api::list_products))
        .route("/products/{id}", get(api::show_product))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Home page
        .route("/", get(home::home))
        // Shopper actions
        .route("/cart/add", post(cart::add_to_cart))
        .route("/wishlist/add", post(cart::add_to_wishlist))
        // Catalog API
        .nest("/api", api_routes())
}
