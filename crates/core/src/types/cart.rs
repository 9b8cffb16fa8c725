//! Shopping cart contract.
//!
//! `subtotal` and `totalItems` are derived from `items`; every mutating
//! method keeps them in sync.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::id::{ProductId, VariantId};
use super::money::{CurrencyCode, Money, MoneyError};

/// Cart operation failures.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CartError {
    /// A line with zero quantity was added.
    #[error("quantity must be at least 1")]
    ZeroQuantity,
    /// Money arithmetic failed (mixed currencies or overflow).
    #[error(transparent)]
    Money(#[from] MoneyError),
}

/// A line in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub product_id: ProductId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variant_id: Option<VariantId>,
    pub name: String,
    /// Unit price.
    pub price: Money,
    pub quantity: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub added_at: Option<DateTime<Utc>>,
}

impl CartItem {
    fn same_line(&self, other: &Self) -> bool {
        self.product_id == other.product_id && self.variant_id == other.variant_id
    }
}

/// A shopper's cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    pub items: Vec<CartItem>,
    pub subtotal: Money,
    pub total_items: u32,
}

impl Cart {
    /// An empty cart priced in `currency`.
    #[must_use]
    pub const fn new(currency: CurrencyCode) -> Self {
        Self {
            items: Vec::new(),
            subtotal: Money::zero(currency),
            total_items: 0,
        }
    }

    /// Build a cart from items, computing the derived fields.
    ///
    /// # Errors
    ///
    /// Fails if an item is in another currency or totals overflow.
    pub fn from_items(currency: CurrencyCode, items: Vec<CartItem>) -> Result<Self, CartError> {
        let mut cart = Self {
            items,
            ..Self::new(currency)
        };
        cart.recalculate()?;
        Ok(cart)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Add an item, merging quantities with an existing line for the same
    /// product and variant.
    ///
    /// # Errors
    ///
    /// Fails on zero quantity, a currency different from the cart's, or
    /// overflow. The cart is left unchanged on error.
    pub fn add_item(&mut self, item: CartItem) -> Result<(), CartError> {
        if item.quantity == 0 {
            return Err(CartError::ZeroQuantity);
        }

        let mut next = self.items.clone();
        match next.iter_mut().find(|line| line.same_line(&item)) {
            Some(line) => {
                line.quantity = line
                    .quantity
                    .checked_add(item.quantity)
                    .ok_or(MoneyError::Overflow)?;
            }
            None => next.push(item),
        }
        self.replace_items(next)
    }

    /// Remove the line for `product_id`/`variant_id`. Returns the removed line.
    ///
    /// # Errors
    ///
    /// Fails only if recomputing the totals fails.
    pub fn remove_item(
        &mut self,
        product_id: ProductId,
        variant_id: Option<VariantId>,
    ) -> Result<Option<CartItem>, CartError> {
        let Some(position) = self
            .items
            .iter()
            .position(|line| line.product_id == product_id && line.variant_id == variant_id)
        else {
            return Ok(None);
        };
        let mut next = self.items.clone();
        let removed = next.remove(position);
        self.replace_items(next)?;
        Ok(Some(removed))
    }

    /// Recompute `subtotal` and `totalItems` from the items.
    ///
    /// # Errors
    ///
    /// Fails if an item is in another currency or totals overflow.
    pub fn recalculate(&mut self) -> Result<(), CartError> {
        let (subtotal, total_items) = Self::totals(self.subtotal.currency, &self.items)?;
        self.subtotal = subtotal;
        self.total_items = total_items;
        Ok(())
    }

    fn replace_items(&mut self, items: Vec<CartItem>) -> Result<(), CartError> {
        let (subtotal, total_items) = Self::totals(self.subtotal.currency, &items)?;
        self.items = items;
        self.subtotal = subtotal;
        self.total_items = total_items;
        Ok(())
    }

    fn totals(currency: CurrencyCode, items: &[CartItem]) -> Result<(Money, u32), CartError> {
        let mut subtotal = Money::zero(currency);
        let mut total_items: u32 = 0;
        for item in items {
            subtotal = subtotal.checked_add(&item.price.times(item.quantity)?)?;
            total_items = total_items
                .checked_add(item.quantity)
                .ok_or(MoneyError::Overflow)?;
        }
        Ok((subtotal, total_items))
    }
}
