//! Driving port for account registration and authentication.
//!
//! Inbound adapters call this port so handler tests can substitute a double
//! instead of wiring persistence, hashing, and token signing.

use async_trait::async_trait;

use crate::domain::{
    AccessToken, AuthenticatedUser, Email, Error, LoginCredentials, Registration, User, UserId,
};

/// Domain use-case port for user accounts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserAccounts: Send + Sync {
    /// Create an account; duplicate emails fail with a conflict.
    async fn register(&self, registration: Registration) -> Result<User, Error>;

    /// Check credentials and issue an access token.
    async fn login(&self, credentials: LoginCredentials) -> Result<AccessToken, Error>;

    /// Resolve a bearer token to the user it was issued for.
    async fn authenticate(&self, token: &str) -> Result<AuthenticatedUser, Error>;
}

const FIXTURE_EMAIL: &str = "admin@example.com";
const FIXTURE_PASSWORD: &str = "password";
const FIXTURE_TOKEN: &str = "fixture-token";

/// In-memory accounts used when no database is configured.
///
/// `admin@example.com` / `password` logs in and yields `fixture-token`, which
/// in turn authenticates as user `1`.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureUserAccounts;

fn fixture_identity() -> Result<AuthenticatedUser, Error> {
    let id = UserId::new(1).map_err(|err| Error::internal(err.to_string()))?;
    let email = Email::new(FIXTURE_EMAIL).map_err(|err| Error::internal(err.to_string()))?;
    Ok(AuthenticatedUser { id, email })
}

#[async_trait]
impl UserAccounts for FixtureUserAccounts {
    async fn register(&self, _registration: Registration) -> Result<User, Error> {
        Err(Error::service_unavailable("registration requires a database"))
    }

    async fn login(&self, credentials: LoginCredentials) -> Result<AccessToken, Error> {
        if credentials.email().as_str() == FIXTURE_EMAIL && credentials.password() == FIXTURE_PASSWORD
        {
            Ok(AccessToken::new(FIXTURE_TOKEN, 300))
        } else {
            Err(Error::unauthorized("invalid credentials"))
        }
    }

    async fn authenticate(&self, token: &str) -> Result<AuthenticatedUser, Error> {
        if token == FIXTURE_TOKEN {
            fixture_identity()
        } else {
            Err(Error::unauthorized("invalid token"))
        }
    }
}
