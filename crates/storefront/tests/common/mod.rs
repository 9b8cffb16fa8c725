//! Shared helpers for storefront router tests.

#![allow(dead_code, clippy::unwrap_used)]

use std::sync::{Arc, Mutex};

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, Response, header::CONTENT_TYPE},
};
use evolution_storefront::{
    app,
    config::StorefrontConfig,
    services::{CartService, CartServiceError, ShopperCommand, StaticCatalog},
    state::AppState,
};
use tower::ServiceExt;

pub const STATIC_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/static");

/// Cart service that remembers every command it receives.
#[derive(Default)]
pub struct RecordingCart {
    commands: Mutex<Vec<ShopperCommand>>,
}

impl RecordingCart {
    pub fn commands(&self) -> Vec<ShopperCommand> {
        self.commands.lock().unwrap().clone()
    }
}

impl CartService for RecordingCart {
    fn execute(&self, command: &ShopperCommand) -> Result<(), CartServiceError> {
        self.commands.lock().unwrap().push(*command);
        Ok(())
    }
}

/// Cart service whose backend is always down.
pub struct UnavailableCart;

impl CartService for UnavailableCart {
    fn execute(&self, _command: &ShopperCommand) -> Result<(), CartServiceError> {
        Err(CartServiceError::Unavailable("connection refused".to_string()))
    }
}

/// Configuration with every variable unset.
pub fn default_config() -> StorefrontConfig {
    StorefrontConfig::from_lookup(|_| None).unwrap()
}

pub fn state_with(config: StorefrontConfig, cart: Arc<dyn CartService>) -> AppState {
    let catalog = StaticCatalog::new(config.currency).unwrap();
    AppState::new(config, Arc::new(catalog), cart)
}

/// Router with default configuration and a recording cart.
pub fn test_app() -> (Router, Arc<RecordingCart>) {
    let cart = Arc::new(RecordingCart::default());
    let state = state_with(default_config(), cart.clone());
    (app(state, STATIC_DIR), cart)
}

pub fn router(state: AppState) -> Router {
    app(state, STATIC_DIR)
}

pub async fn get(app: &Router, uri: &str) -> Response<Body> {
    app.clone()
        .oneshot(Request::get(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

pub async fn post_form(app: &Router, uri: &str, body: &str) -> Response<Body> {
    app.clone()
        .oneshot(
            Request::post(uri)
                .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap()
}

pub async fn body_string(response: Response<Body>) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// Text of every `<p class="product-price">` element, in page order.
pub fn rendered_prices(html: &str) -> Vec<String> {
    const OPEN: &str = "<p class=\"product-price\">";
    html.split(OPEN)
        .skip(1)
        .filter_map(|rest| rest.split_once("</p>").map(|(price, _)| price.trim().to_string()))
        .collect()
}
