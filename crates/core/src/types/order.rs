//! Order types and their monetary invariants.
//!
//! An order's amounts must satisfy:
//! - `item.totalPrice = item.unitPrice × item.quantity`
//! - `subtotal = Σ item.totalPrice`
//! - `totalAmount = subtotal + taxAmount + shippingAmount − discountAmount`
//!
//! [`Order::validate`] checks them and [`Order::recalculate`] restores them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::id::{OrderId, OrderItemId, ProductId, UserId, VariantId};
use super::money::{Money, MoneyError};
use super::status::{OrderStatus, PaymentMethod, PaymentStatus};
use super::user::UserAddress;

/// Order invariant violations.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum OrderError {
    /// The order has no line items.
    #[error("order must contain at least one item")]
    EmptyItems,
    /// A line item's total is not unit price × quantity.
    #[error("item {index}: total {found} does not match expected {expected}")]
    ItemTotalMismatch {
        index: usize,
        expected: Money,
        found: Money,
    },
    /// Subtotal is not the sum of item totals.
    #[error("subtotal {found} does not match expected {expected}")]
    SubtotalMismatch { expected: Money, found: Money },
    /// Total is not subtotal + tax + shipping − discount.
    #[error("total {found} does not match expected {expected}")]
    TotalMismatch { expected: Money, found: Money },
    /// Money arithmetic failed (mixed currencies or overflow).
    #[error(transparent)]
    Money(#[from] MoneyError),
}

/// A single line of an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<OrderItemId>,
    pub product_id: ProductId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variant_id: Option<VariantId>,
    pub sku: String,
    pub name: String,
    pub quantity: u32,
    pub unit_price: Money,
    pub total_price: Money,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl OrderItem {
    /// Create a line item with `totalPrice` computed from price and quantity.
    ///
    /// # Errors
    ///
    /// Returns [`MoneyError::Overflow`] if the total does not fit.
    pub fn new(
        product_id: ProductId,
        sku: impl Into<String>,
        name: impl Into<String>,
        quantity: u32,
        unit_price: Money,
    ) -> Result<Self, MoneyError> {
        Ok(Self {
            id: None,
            product_id,
            variant_id: None,
            sku: sku.into(),
            name: name.into(),
            quantity,
            total_price: unit_price.times(quantity)?,
            unit_price,
            image_url: None,
        })
    }

    #[must_use]
    pub const fn with_variant(mut self, variant_id: VariantId) -> Self {
        self.variant_id = Some(variant_id);
        self
    }

    /// `unitPrice × quantity`.
    ///
    /// # Errors
    ///
    /// Returns [`MoneyError::Overflow`] if the total does not fit.
    pub fn expected_total(&self) -> Result<Money, MoneyError> {
        self.unit_price.times(self.quantity)
    }
}

/// The four amounts that make up an order total.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderTotals {
    pub subtotal: Money,
    pub tax: Money,
    pub shipping: Money,
    pub discount: Option<Money>,
}

impl OrderTotals {
    /// `subtotal + tax + shipping − discount`.
    ///
    /// # Errors
    ///
    /// Fails if the amounts are in different currencies or overflow.
    pub fn total(&self) -> Result<Money, MoneyError> {
        let gross = self
            .subtotal
            .checked_add(&self.tax)?
            .checked_add(&self.shipping)?;
        match &self.discount {
            Some(discount) => gross.checked_sub(discount),
            None => Ok(gross),
        }
    }
}

/// A placed order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: OrderId,
    pub user_id: UserId,
    pub items: Vec<OrderItem>,
    pub subtotal: Money,
    pub tax_amount: Money,
    pub shipping_amount: Money,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount_amount: Option<Money>,
    pub total_amount: Money,
    pub status: OrderStatus,
    pub payment_method: PaymentMethod,
    pub payment_status: PaymentStatus,
    pub shipping_address: UserAddress,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub billing_address: Option<UserAddress>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tracking_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Order {
    /// The order's stored amounts.
    #[must_use]
    pub const fn totals(&self) -> OrderTotals {
        OrderTotals {
            subtotal: self.subtotal,
            tax: self.tax_amount,
            shipping: self.shipping_amount,
            discount: self.discount_amount,
        }
    }

    /// Sum of line item totals, in the subtotal's currency.
    ///
    /// # Errors
    ///
    /// Fails if an item is in another currency or the sum overflows.
    pub fn items_subtotal(&self) -> Result<Money, MoneyError> {
        Money::sum(
            self.subtotal.currency,
            self.items.iter().map(|item| &item.total_price),
        )
    }

    /// The billing address, falling back to the shipping address.
    #[must_use]
    pub fn billing_or_shipping_address(&self) -> &UserAddress {
        self.billing_address
            .as_ref()
            .unwrap_or(&self.shipping_address)
    }

    /// Check every monetary invariant.
    ///
    /// # Errors
    ///
    /// Returns the first violated invariant.
    pub fn validate(&self) -> Result<(), OrderError> {
        if self.items.is_empty() {
            return Err(OrderError::EmptyItems);
        }

        for (index, item) in self.items.iter().enumerate() {
            let expected = item.expected_total()?;
            if expected != item.total_price {
                return Err(OrderError::ItemTotalMismatch {
                    index,
                    expected,
                    found: item.total_price,
                });
            }
        }

        let expected_subtotal = self.items_subtotal()?;
        if expected_subtotal != self.subtotal {
            return Err(OrderError::SubtotalMismatch {
                expected: expected_subtotal,
                found: self.subtotal,
            });
        }

        let expected_total = self.totals().total()?;
        if expected_total != self.total_amount {
            return Err(OrderError::TotalMismatch {
                expected: expected_total,
                found: self.total_amount,
            });
        }

        Ok(())
    }

    /// Recompute item totals, subtotal and total from unit prices and adjustments.
    ///
    /// # Errors
    ///
    /// Fails on empty items, mixed currencies, or overflow. The order is left
    /// unchanged on error.
    pub fn recalculate(&mut self) -> Result<(), OrderError> {
        if self.items.is_empty() {
            return Err(OrderError::EmptyItems);
        }

        let item_totals = self
            .items
            .iter()
            .map(OrderItem::expected_total)
            .collect::<Result<Vec<_>, _>>()?;
        let subtotal = Money::sum(self.subtotal.currency, &item_totals)?;
        let total = OrderTotals {
            subtotal,
            ..self.totals()
        }
        .total()?;

        for (item, item_total) in self.items.iter_mut().zip(item_totals) {
            item.total_price = item_total;
        }
        self.subtotal = subtotal;
        self.total_amount = total;
        Ok(())
    }
}
