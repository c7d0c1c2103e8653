//! Port for issuing and checking bearer access tokens.

use crate::domain::{AccessToken, AuthenticatedUser, User};

use super::define_port_error;

define_port_error! {
    /// Errors raised by token adapters.
    pub enum TokenError {
        /// Token could not be signed.
        Issue { message: String } => "token could not be issued: {message}",
        /// Token is malformed, tampered with, or expired.
        Invalid { message: String } => "token is not valid: {message}",
    }
}

/// Issues access tokens for authenticated users and validates them later.
#[cfg_attr(test, mockall::automock)]
pub trait TokenService: Send + Sync {
    /// Sign an access token for `user`.
    fn issue(&self, user: &User) -> Result<AccessToken, TokenError>;

    /// Verify a token and recover the identity it was issued for.
    fn validate(&self, token: &str) -> Result<AuthenticatedUser, TokenError>;
}
