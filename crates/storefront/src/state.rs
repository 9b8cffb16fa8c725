//! Application state shared across handlers.

use std::sync::Arc;

use evolution_core::CatalogError;

use crate::config::StorefrontConfig;
use crate::services::{CartService, ProductCatalog, StaticCatalog, TraceCartService};

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to the
/// configuration, the product catalog and the cart service.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    catalog: Arc<dyn ProductCatalog>,
    cart: Arc<dyn CartService>,
}

impl AppState {
    /// Create application state from explicit services.
    #[must_use]
    pub fn new(
        config: StorefrontConfig,
        catalog: Arc<dyn ProductCatalog>,
        cart: Arc<dyn CartService>,
    ) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                catalog,
                cart,
            }),
        }
    }

    /// Create application state with the built-in catalog and the tracing
    /// cart service.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if the built-in catalog fails validation.
    pub fn with_defaults(config: StorefrontConfig) -> Result<Self, CatalogError> {
        let catalog = StaticCatalog::new(config.currency)?;
        Ok(Self::new(config, Arc::new(catalog), Arc::new(TraceCartService)))
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get the product catalog.
    #[must_use]
    pub fn catalog(&self) -> &dyn ProductCatalog {
        self.inner.catalog.as_ref()
    }

    /// Get the cart service.
    #[must_use]
    pub fn cart(&self) -> &dyn CartService {
        self.inner.cart.as_ref()
    }
}
