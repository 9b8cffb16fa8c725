//! Cart and wishlist route handlers.
//!
//! Product cards post a `product_id` form field here. The handler checks the
//! product exists, dispatches a [`ShopperCommand`] to the cart service and
//! answers `204 No Content` so the page stays as it is. An `HX-Trigger`
//! header lets HTMX listeners react to the request.

use axum::{
    Form,
    extract::{State, rejection::FormRejection},
    http::StatusCode,
    response::{AppendHeaders, IntoResponse, Response},
};
use evolution_core::ProductId;
use serde::Deserialize;
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::services::ShopperCommand;
use crate::state::AppState;

/// HTMX event fired after an add-to-cart request.
pub const CART_REQUESTED_EVENT: &str = "cart-requested";

/// HTMX event fired after an add-to-wishlist request.
pub const WISHLIST_REQUESTED_EVENT: &str = "wishlist-requested";

/// Form posted by the product card buttons.
#[derive(Debug, Deserialize)]
pub struct ProductForm {
    pub product_id: String,
}

impl ProductForm {
    fn product_id(&self) -> Result<ProductId> {
        self.product_id
            .parse()
            .map_err(|_| AppError::BadRequest(format!("Invalid product id: {}", self.product_id)))
    }
}

/// Unwrap the posted form, reporting a missing field or wrong content type
/// as a `400` error.
fn posted_product_id(
    form: std::result::Result<Form<ProductForm>, FormRejection>,
) -> Result<ProductId> {
    let Form(form) = form.map_err(|e| AppError::BadRequest(e.body_text()))?;
    form.product_id()
}

/// Request adding a product to the cart.
#[instrument(skip(state, form))]
pub async fn add_to_cart(
    State(state): State<AppState>,
    form: std::result::Result<Form<ProductForm>, FormRejection>,
) -> Result<Response> {
    let command = ShopperCommand::AddToCart(posted_product_id(form)?);
    dispatch(&state, &command, CART_REQUESTED_EVENT)
}

/// Request adding a product to the wishlist.
#[instrument(skip(state, form))]
pub async fn add_to_wishlist(
    State(state): State<AppState>,
    form: std::result::Result<Form<ProductForm>, FormRejection>,
) -> Result<Response> {
    let command = ShopperCommand::AddToWishlist(posted_product_id(form)?);
    dispatch(&state, &command, WISHLIST_REQUESTED_EVENT)
}

fn dispatch(state: &AppState, command: &ShopperCommand, event: &'static str) -> Result<Response> {
    let product_id = command.product_id();
    if state.catalog().find_product(product_id).is_none() {
        tracing::warn!(%product_id, action = command.action(), "Unknown product");
        return Err(AppError::NotFound(format!("Product {product_id}")));
    }

    state.cart().execute(command)?;

    Ok((
        StatusCode::NO_CONTENT,
        AppendHeaders([("HX-Trigger", event)]),
    )
        .into_response())
}
