//! User account and address types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::email::Email;
use super::id::{AddressId, UserId};
use super::status::UserRole;

/// Rule violations for a user record.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum UserError {
    /// More than one address is flagged as default.
    #[error("user {user_id} has {count} default addresses, at most one is allowed")]
    MultipleDefaultAddresses {
        /// Owner of the addresses.
        user_id: UserId,
        /// Number of addresses flagged as default.
        count: usize,
    },
}

/// A postal address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserAddress {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<AddressId>,
    pub full_name: String,
    pub line1: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line2: Option<String>,
    pub city: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    pub postal_code: String,
    /// ISO 3166-1 country code or name.
    pub country: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default)]
    pub is_default: bool,
}

/// A storefront account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    /// Normalized email, unique across users.
    pub email: Email,
    pub first_name: String,
    pub last_name: String,
    pub role: UserRole,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub addresses: Vec<UserAddress>,
    #[serde(default = "default_active")]
    pub is_active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

const fn default_active() -> bool {
    true
}

impl User {
    /// "First Last", skipping blank parts.
    #[must_use]
    pub fn full_name(&self) -> String {
        [self.first_name.trim(), self.last_name.trim()]
            .into_iter()
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// The address flagged as default, if any.
    #[must_use]
    pub fn default_address(&self) -> Option<&UserAddress> {
        self.addresses.iter().find(|a| a.is_default)
    }

    /// Check that at most one address is the default.
    ///
    /// # Errors
    ///
    /// Returns [`UserError::MultipleDefaultAddresses`] when more than one is.
    pub fn validate_addresses(&self) -> Result<(), UserError> {
        let count = self.addresses.iter().filter(|a| a.is_default).count();
        if count > 1 {
            return Err(UserError::MultipleDefaultAddresses {
                user_id: self.id,
                count,
            });
        }
        Ok(())
    }

    /// Flag the address at `index` as default and clear the flag on all others.
    ///
    /// Returns `false` if `index` is out of range, leaving addresses untouched.
    pub fn set_default_address(&mut self, index: usize) -> bool {
        if index >= self.addresses.len() {
            return false;
        }
        for (i, address) in self.addresses.iter_mut().enumerate() {
            address.is_default = i == index;
        }
        true
    }
}
