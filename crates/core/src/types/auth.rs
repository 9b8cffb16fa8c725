//! Authentication request/response contracts.
//!
//! Only the shapes are defined here; no authentication flow exists yet.
//! Passwords and tokens are held as [`SecretString`], so `Debug` output
//! redacts them. They are exposed only when serialized.

use chrono::{DateTime, Utc};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};

use super::email::Email;
use super::user::User;

/// Credentials submitted to log in.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub email: Email,
    #[serde(serialize_with = "expose::secret")]
    pub password: SecretString,
    #[serde(default)]
    pub remember_me: bool,
}

/// Details submitted to create an account.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub email: Email,
    #[serde(serialize_with = "expose::secret")]
    pub password: SecretString,
    pub first_name: String,
    pub last_name: String,
}

/// Access token scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum TokenType {
    #[default]
    Bearer,
}

/// Tokens issued after a successful login or registration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    #[serde(serialize_with = "expose::secret")]
    pub access_token: SecretString,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        serialize_with = "expose::optional_secret"
    )]
    pub refresh_token: Option<SecretString>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_type: Option<TokenType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
    pub user: User,
}

impl AuthResponse {
    /// Whether the access token has expired at `now`. Tokens without an
    /// expiry never expire.
    #[must_use]
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|expires| expires <= now)
    }
}

/// Serializers that write the secret value itself on the wire.
mod expose {
    use secrecy::{ExposeSecret, SecretString};
    use serde::Serializer;

    pub fn secret<S: Serializer>(value: &SecretString, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(value.expose_secret())
    }

    #[allow(clippy::ref_option)]
    pub fn optional_secret<S: Serializer>(
        value: &Option<SecretString>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(secret) => serializer.serialize_some(secret.expose_secret()),
            None => serializer.serialize_none(),
        }
    }
}
