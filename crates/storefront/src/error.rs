//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type that captures errors to Sentry before
//! responding to the client. All route handlers should return `Result<T, AppError>`.
//!
//! Errors are rendered as the JSON [`ApiError`] envelope.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use evolution_core::{ApiError, CatalogError};
use thiserror::Error;

use crate::services::CartServiceError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Catalog query or construction failed.
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Cart service rejected or failed a command.
    #[error("Cart error: {0}")]
    Cart(#[from] CartServiceError),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// HTTP status for this error.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::BadRequest(_)
            | Self::Catalog(
                CatalogError::InvalidSortField(_) | CatalogError::InvalidPriceRange { .. },
            ) => StatusCode::BAD_REQUEST,
            Self::Cart(_) => StatusCode::SERVICE_UNAVAILABLE,
            Self::Catalog(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Stable machine-readable code sent as `errorCode`.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "not_found",
            Self::BadRequest(_) => "bad_request",
            Self::Catalog(CatalogError::InvalidSortField(_)) => "invalid_sort_field",
            Self::Catalog(CatalogError::InvalidPriceRange { .. }) => "invalid_price_range",
            Self::Cart(_) => "cart_unavailable",
            Self::Catalog(_) | Self::Internal(_) => "internal_error",
        }
    }

    fn is_server_error(&self) -> bool {
        self.status().is_server_error()
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let mut body = ApiError::new(status.as_u16(), client_message(&self))
            .with_code(self.error_code());

        // Capture server errors to Sentry
        if self.is_server_error() {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
            if !event_id.is_nil() {
                body = body.with_tracking_id(event_id.to_string());
            }
        }

        (status, Json(body)).into_response()
    }
}

/// Message shown to clients. Internal error details are never exposed.
fn client_message(err: &AppError) -> String {
    match err {
        AppError::NotFound(what) => format!("{what} not found"),
        AppError::BadRequest(msg) => msg.clone(),
        AppError::Catalog(
            e @ (CatalogError::InvalidSortField(_) | CatalogError::InvalidPriceRange { .. }),
        ) => e.to_string(),
        AppError::Cart(_) => "Cart is temporarily unavailable".to_string(),
        AppError::Catalog(_) | AppError::Internal(_) => "Internal server error".to_string(),
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

/// Add a breadcrumb for user actions.
///
/// Breadcrumbs appear in Sentry error reports to show the trail of user actions
/// leading up to an error.
///
/// # Example
///
/// ```rust,ignore
/// add_breadcrumb("cart", "Add to cart requested", Some(&[("product_id", "3")]));
/// ```
pub fn add_breadcrumb(category: &str, message: &str, data: Option<&[(&str, &str)]>) {
    let mut breadcrumb = sentry::Breadcrumb {
        category: Some(category.to_string()),
        message: Some(message.to_string()),
        level: sentry::Level::Info,
        ..Default::default()
    };

    if let Some(pairs) = data {
        for (key, value) in pairs {
            breadcrumb.data.insert(
                (*key).to_string(),
                serde_json::Value::String((*value).to_string()),
            );
        }
    }

    sentry::add_breadcrumb(breadcrumb);
}
