//! Marketplace user accounts.
//!
//! Users authenticate with an email address and a password. The password hash
//! is stored in PHC string form and never leaves the domain through a
//! serialisable type.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Validation errors for user identity fields.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserValidationError {
    /// Email was blank once trimmed.
    #[error("email must not be empty")]
    EmptyEmail,
    /// Email did not have a local part and a domain around a single `@`.
    #[error("email is not a valid address")]
    MalformedEmail,
    /// Identifier was zero or negative.
    #[error("user id must be a positive integer")]
    InvalidId,
}

/// Normalised email address.
///
/// ## Invariants
/// - Trimmed and lower-cased.
/// - Exactly one `@` with non-empty text on both sides.
///
/// # Examples
/// ```
/// use marketplace::domain::Email;
///
/// let email = Email::new("  Ada@Example.COM ").unwrap();
/// assert_eq!(email.as_str(), "ada@example.com");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Email(String);

impl Email {
    /// Validate and normalise an email address.
    pub fn new(raw: &str) -> Result<Self, UserValidationError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(UserValidationError::EmptyEmail);
        }
        match trimmed.split_once('@') {
            Some((local, domain))
                if !local.is_empty() && !domain.is_empty() && !domain.contains('@') =>
            {
                Ok(Self(trimmed.to_lowercase()))
            }
            _ => Err(UserValidationError::MalformedEmail),
        }
    }

    /// Normalised address.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Store-assigned user identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct UserId(i64);

impl UserId {
    /// Validate a raw identifier.
    pub fn new(raw: i64) -> Result<Self, UserValidationError> {
        if raw > 0 {
            Ok(Self(raw))
        } else {
            Err(UserValidationError::InvalidId)
        }
    }

    /// Raw integer value.
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Account data handed to the store on registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    /// Normalised email; unique across accounts.
    pub email: Email,
    /// PHC-formatted hash of the chosen password.
    pub password_hash: String,
}

/// Persisted user account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id: UserId,
    email: Email,
    password_hash: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl User {
    /// Assemble a user from stored values.
    pub fn new(
        id: UserId,
        email: Email,
        password_hash: impl Into<String>,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            email,
            password_hash: password_hash.into(),
            created_at,
            updated_at,
        }
    }

    /// Store-assigned identifier.
    pub fn id(&self) -> UserId {
        self.id
    }

    /// Normalised email.
    pub fn email(&self) -> &Email {
        &self.email
    }

    /// PHC-formatted password hash.
    pub fn password_hash(&self) -> &str {
        &self.password_hash
    }

    /// Registration time.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Last write to the account row.
    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}
