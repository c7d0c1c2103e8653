//! Authentication primitives: registration input, login credentials, tokens.
//!
//! Inbound adapters build these from raw strings before calling the
//! [`crate::domain::ports::UserAccounts`] port, so services only ever see
//! validated values.

use zeroize::Zeroizing;

use super::{Email, UserId, UserValidationError};

/// Minimum accepted password length, in characters.
pub const MIN_PASSWORD_LEN: usize = 8;

/// Errors raised while validating registration input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistrationValidationError {
    /// The email failed validation.
    #[error(transparent)]
    Email(#[from] UserValidationError),
    /// The password is shorter than [`MIN_PASSWORD_LEN`].
    #[error("password must be at least {min} characters")]
    PasswordTooShort {
        /// Required length.
        min: usize,
    },
    /// The confirmation differs from the password.
    #[error("passwords do not match")]
    PasswordMismatch,
}

/// Validated registration request.
///
/// # Examples
/// ```
/// use marketplace::domain::Registration;
///
/// let reg = Registration::try_from_parts("ada@example.com", "hunter2!!", "hunter2!!").unwrap();
/// assert_eq!(reg.email().as_str(), "ada@example.com");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    email: Email,
    password: Zeroizing<String>,
}

impl Registration {
    /// Validate raw registration fields.
    pub fn try_from_parts(
        email: &str,
        password: &str,
        password_confirm: &str,
    ) -> Result<Self, RegistrationValidationError> {
        let email = Email::new(email)?;
        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(RegistrationValidationError::PasswordTooShort {
                min: MIN_PASSWORD_LEN,
            });
        }
        if password != password_confirm {
            return Err(RegistrationValidationError::PasswordMismatch);
        }
        Ok(Self {
            email,
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Normalised email for the new account.
    pub fn email(&self) -> &Email {
        &self.email
    }

    /// Plain-text password, held until it is hashed.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Errors raised while validating login input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoginValidationError {
    /// The email failed validation.
    #[error(transparent)]
    Email(#[from] UserValidationError),
    /// No password was supplied.
    #[error("password must not be empty")]
    EmptyPassword,
}

/// Validated login credentials.
///
/// The password keeps caller-provided whitespace and is wiped on drop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    email: Email,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw email/password inputs.
    pub fn try_from_parts(email: &str, password: &str) -> Result<Self, LoginValidationError> {
        let email = Email::new(email)?;
        if password.is_empty() {
            return Err(LoginValidationError::EmptyPassword);
        }
        Ok(Self {
            email,
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Normalised email to look up.
    pub fn email(&self) -> &Email {
        &self.email
    }

    /// Candidate password, exactly as entered.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Signed bearer token issued on login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessToken {
    token: String,
    expires_in_secs: u64,
}

impl AccessToken {
    /// Wrap an encoded token and its lifetime in seconds.
    pub fn new(token: impl Into<String>, expires_in_secs: u64) -> Self {
        Self {
            token: token.into(),
            expires_in_secs,
        }
    }

    /// Encoded token as sent in the `Authorization` header.
    pub fn as_str(&self) -> &str {
        &self.token
    }

    /// Lifetime granted at issue time.
    pub fn expires_in_secs(&self) -> u64 {
        self.expires_in_secs
    }
}

/// Identity recovered from a valid access token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    /// Subject of the token.
    pub id: UserId,
    /// Email at the time the token was issued.
    pub email: Email,
}
