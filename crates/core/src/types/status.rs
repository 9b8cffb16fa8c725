//! String-valued enumerations from the REST contract.
//!
//! Every enum serializes to the exact wire literal (e.g. `"bank_transfer"`),
//! and unknown literals are rejected on deserialization. `Display` and
//! `FromStr` use the same literals so query strings and templates agree with
//! JSON.

use serde::{Deserialize, Serialize};

/// Implements `as_str`, `Display` and `FromStr` from a variant/literal table.
macro_rules! wire_literals {
    ($ty:ident, $what:literal, { $($variant:ident => $lit:literal),+ $(,)? }) => {
        impl $ty {
            /// All variants in declaration order.
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            /// The wire literal for this value.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $lit),+
                }
            }
        }

        impl ::core::fmt::Display for $ty {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl ::core::str::FromStr for $ty {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($lit => Ok(Self::$variant),)+
                    _ => Err(format!(concat!("invalid ", $what, ": {}"), s)),
                }
            }
        }
    };
}

/// Order lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    #[default]
    Pending,
    Confirmed,
    Processing,
    Shipped,
    Delivered,
    Cancelled,
}

wire_literals!(OrderStatus, "order status", {
    Pending => "pending",
    Confirmed => "confirmed",
    Processing => "processing",
    Shipped => "shipped",
    Delivered => "delivered",
    Cancelled => "cancelled",
});

impl OrderStatus {
    /// Whether the order can no longer change.
    #[must_use]
    pub const fn is_final(self) -> bool {
        matches!(self, Self::Delivered | Self::Cancelled)
    }
}

/// How the customer pays for an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    Card,
    Paypal,
    BankTransfer,
    CashOnDelivery,
}

wire_literals!(PaymentMethod, "payment method", {
    Card => "card",
    Paypal => "paypal",
    BankTransfer => "bank_transfer",
    CashOnDelivery => "cash_on_delivery",
});

/// Payment settlement status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    #[default]
    Pending,
    Paid,
    Failed,
    Refunded,
}

wire_literals!(PaymentStatus, "payment status", {
    Pending => "pending",
    Paid => "paid",
    Failed => "failed",
    Refunded => "refunded",
});

/// Account role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    /// Shopper account.
    #[default]
    Customer,
    /// Store management account.
    Admin,
}

wire_literals!(UserRole, "user role", {
    Customer => "customer",
    Admin => "admin",
});

/// Sort direction for list endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

wire_literals!(SortOrder, "sort order", {
    Asc => "asc",
    Desc => "desc",
});
