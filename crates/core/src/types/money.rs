//! Monetary amounts using decimal arithmetic.
//!
//! Amounts are carried as [`Decimal`] so that totals such as
//! `unitPrice × quantity` are exact. On the wire the amount is a JSON number,
//! matching the REST contract `{ "amount": 899.99, "currency": "USD" }`.

use core::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Errors raised by money arithmetic.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum MoneyError {
    /// Two amounts in different currencies were combined.
    #[error("currency mismatch: expected {expected}, found {found}")]
    CurrencyMismatch {
        /// Currency of the left-hand amount.
        expected: CurrencyCode,
        /// Currency of the right-hand amount.
        found: CurrencyCode,
    },
    /// A priced amount was negative.
    #[error("amount cannot be negative: {0}")]
    Negative(Decimal),
    /// The result does not fit in a decimal.
    #[error("amount overflow")]
    Overflow,
}

/// ISO 4217 currency codes accepted by the storefront.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CurrencyCode {
    #[default]
    USD,
    EUR,
    ARS,
    MXN,
    BRL,
    CLP,
}

impl CurrencyCode {
    /// All supported currencies.
    pub const ALL: [Self; 6] = [
        Self::USD,
        Self::EUR,
        Self::ARS,
        Self::MXN,
        Self::BRL,
        Self::CLP,
    ];

    /// The ISO 4217 alphabetic code.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::USD => "USD",
            Self::EUR => "EUR",
            Self::ARS => "ARS",
            Self::MXN => "MXN",
            Self::BRL => "BRL",
            Self::CLP => "CLP",
        }
    }

    /// Number of digits after the decimal point used for display.
    #[must_use]
    pub const fn minor_units(self) -> u32 {
        match self {
            Self::CLP => 0,
            _ => 2,
        }
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl std::str::FromStr for CurrencyCode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.code().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unsupported currency: {s}"))
    }
}

/// An amount of money in a specific currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Money {
    /// Amount in the currency's standard unit (e.g., dollars, not cents).
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    /// ISO 4217 currency code.
    pub currency: CurrencyCode,
}

impl Money {
    /// Create a new amount.
    #[must_use]
    pub const fn new(amount: Decimal, currency: CurrencyCode) -> Self {
        Self { amount, currency }
    }

    /// Create an amount from minor units (e.g., cents): `from_minor(89_999, USD)` is 899.99.
    #[must_use]
    pub fn from_minor(minor: i64, currency: CurrencyCode) -> Self {
        Self::new(Decimal::new(minor, currency.minor_units()), currency)
    }

    /// A zero amount in the given currency.
    #[must_use]
    pub const fn zero(currency: CurrencyCode) -> Self {
        Self::new(Decimal::ZERO, currency)
    }

    /// Create an amount for a priced context (product, line item, cart).
    ///
    /// # Errors
    ///
    /// Returns [`MoneyError::Negative`] if `amount` is below zero.
    pub fn priced(amount: Decimal, currency: CurrencyCode) -> Result<Self, MoneyError> {
        if amount < Decimal::ZERO {
            return Err(MoneyError::Negative(amount));
        }
        Ok(Self::new(amount, currency))
    }

    /// Whether the amount is below zero.
    #[must_use]
    pub fn is_negative(&self) -> bool {
        self.amount < Decimal::ZERO
    }

    /// Add two amounts of the same currency.
    ///
    /// # Errors
    ///
    /// Returns [`MoneyError::CurrencyMismatch`] for different currencies, or
    /// [`MoneyError::Overflow`] if the sum does not fit.
    pub fn checked_add(&self, other: &Self) -> Result<Self, MoneyError> {
        self.ensure_same_currency(other)?;
        let amount = self
            .amount
            .checked_add(other.amount)
            .ok_or(MoneyError::Overflow)?;
        Ok(Self::new(amount, self.currency))
    }

    /// Subtract an amount of the same currency.
    ///
    /// # Errors
    ///
    /// Returns [`MoneyError::CurrencyMismatch`] for different currencies, or
    /// [`MoneyError::Overflow`] if the difference does not fit.
    pub fn checked_sub(&self, other: &Self) -> Result<Self, MoneyError> {
        self.ensure_same_currency(other)?;
        let amount = self
            .amount
            .checked_sub(other.amount)
            .ok_or(MoneyError::Overflow)?;
        Ok(Self::new(amount, self.currency))
    }

    /// Multiply by a quantity.
    ///
    /// # Errors
    ///
    /// Returns [`MoneyError::Overflow`] if the product does not fit.
    pub fn times(&self, quantity: u32) -> Result<Self, MoneyError> {
        let amount = self
            .amount
            .checked_mul(Decimal::from(quantity))
            .ok_or(MoneyError::Overflow)?;
        Ok(Self::new(amount, self.currency))
    }

    /// Sum a sequence of amounts, starting from zero in `currency`.
    ///
    /// # Errors
    ///
    /// Fails on the first amount in a different currency or on overflow.
    pub fn sum<'a>(
        currency: CurrencyCode,
        amounts: impl IntoIterator<Item = &'a Self>,
    ) -> Result<Self, MoneyError> {
        amounts
            .into_iter()
            .try_fold(Self::zero(currency), |acc, m| acc.checked_add(m))
    }

    fn ensure_same_currency(&self, other: &Self) -> Result<(), MoneyError> {
        if self.currency == other.currency {
            Ok(())
        } else {
            Err(MoneyError::CurrencyMismatch {
                expected: self.currency,
                found: other.currency,
            })
        }
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rounded = self.amount.round_dp(self.currency.minor_units());
        write!(f, "{rounded} {}", self.currency)
    }
}
