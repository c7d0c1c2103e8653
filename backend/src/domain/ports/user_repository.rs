//! Port abstraction for user account persistence.

use async_trait::async_trait;

use crate::domain::{Email, NewUser, User};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserRepositoryError {
        /// Another account already uses this email.
        DuplicateEmail { email: String } => "the email must be unique",
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
    }
}

/// Account storage keyed by normalised email.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new account, assigning its id and timestamps.
    async fn create(&self, user: &NewUser) -> Result<User, UserRepositoryError>;

    /// Fetch an account by normalised email.
    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, UserRepositoryError>;
}
