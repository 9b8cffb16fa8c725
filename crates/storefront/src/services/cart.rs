//! Shopper commands and the cart service they are dispatched to.
//!
//! The storefront does not keep a cart yet. [`TraceCartService`] records
//! each command as a log event and a Sentry breadcrumb and changes nothing,
//! so repeating a command has no cumulative effect.

use std::fmt;

use evolution_core::ProductId;
use thiserror::Error;

use crate::error::add_breadcrumb;

/// An action a shopper requested from a product card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShopperCommand {
    AddToCart(ProductId),
    AddToWishlist(ProductId),
}

impl ShopperCommand {
    /// The product the command refers to.
    #[must_use]
    pub const fn product_id(&self) -> ProductId {
        match self {
            Self::AddToCart(id) | Self::AddToWishlist(id) => *id,
        }
    }

    /// Short name used in logs and breadcrumbs.
    #[must_use]
    pub const fn action(&self) -> &'static str {
        match self {
            Self::AddToCart(_) => "add_to_cart",
            Self::AddToWishlist(_) => "add_to_wishlist",
        }
    }
}

impl fmt::Display for ShopperCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.action(), self.product_id())
    }
}

/// Errors a cart service may report.
#[derive(Debug, Error)]
pub enum CartServiceError {
    /// The backing cart store could not take the command.
    #[error("cart service unavailable: {0}")]
    Unavailable(String),
}

/// Receives shopper commands.
pub trait CartService: Send + Sync {
    /// Handle one command.
    ///
    /// # Errors
    ///
    /// Returns `CartServiceError` if the command could not be handled.
    fn execute(&self, command: &ShopperCommand) -> Result<(), CartServiceError>;
}

/// Cart service that only records what was requested.
#[derive(Debug, Clone, Copy, Default)]
pub struct TraceCartService;

impl CartService for TraceCartService {
    fn execute(&self, command: &ShopperCommand) -> Result<(), CartServiceError> {
        let product_id = command.product_id().to_string();
        tracing::info!(
            action = command.action(),
            product_id = %product_id,
            "Shopper command received"
        );
        add_breadcrumb(
            "cart",
            command.action(),
            Some(&[("product_id", product_id.as_str())]),
        );
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_command_accessors() {
        let cmd = ShopperCommand::AddToCart(ProductId::new(3));
        assert_eq!(cmd.product_id(), ProductId::new(3));
        assert_eq!(cmd.action(), "add_to_cart");
        assert_eq!(cmd.to_string(), "add_to_cart 3");

        let cmd = ShopperCommand::AddToWishlist(ProductId::new(5));
        assert_eq!(cmd.action(), "add_to_wishlist");
    }

    #[test]
    fn test_trace_service_is_idempotent() {
        let service = TraceCartService;
        let cmd = ShopperCommand::AddToCart(ProductId::new(1));
        for _ in 0..3 {
            service.execute(&cmd).unwrap();
        }
        service
            .execute(&ShopperCommand::AddToWishlist(ProductId::new(1)))
            .unwrap();
    }
}
