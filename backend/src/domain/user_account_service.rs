//! Account registration, login, and token authentication.

use std::sync::{Arc, OnceLock};

use async_trait::async_trait;
use tracing::{debug, warn};
use zeroize::Zeroizing;

use crate::domain::ports::{
    PasswordHashError, PasswordHasher, TokenError, TokenService, UserAccounts, UserRepository,
    UserRepositoryError,
};
use crate::domain::{
    AccessToken, AuthenticatedUser, Error, LoginCredentials, NewUser, Registration, User,
};

const INVALID_CREDENTIALS: &str = "invalid credentials";

/// Password hashed once to produce the decoy that unknown emails verify
/// against.
const DECOY_PASSWORD: &str = "decoy-password-for-unknown-accounts";

fn map_repository_error(error: UserRepositoryError) -> Error {
    match error {
        UserRepositoryError::DuplicateEmail { .. } => Error::conflict(error.to_string()),
        UserRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("user repository unavailable: {message}"))
        }
        UserRepositoryError::Query { message } => {
            Error::internal(format!("user repository error: {message}"))
        }
    }
}

fn map_hash_error(error: PasswordHashError) -> Error {
    Error::internal(error.to_string())
}

/// Return the cached decoy hash, hashing [`DECOY_PASSWORD`] on first use.
fn decoy_hash(
    hasher: &dyn PasswordHasher,
    cache: &OnceLock<String>,
) -> Result<String, PasswordHashError> {
    if let Some(hash) = cache.get() {
        return Ok(hash.clone());
    }
    let hash = hasher.hash(DECOY_PASSWORD)?;
    Ok(cache.get_or_init(|| hash).clone())
}

fn map_token_error(error: TokenError) -> Error {
    match error {
        TokenError::Issue { message } => Error::internal(format!("token signing failed: {message}")),
        TokenError::Invalid { .. } => Error::unauthorized("invalid token"),
    }
}

/// User account service implementing [`UserAccounts`].
///
/// Hashing and verification run on Tokio's blocking pool. A login for an
/// unknown email still verifies a password, against a decoy hash, so both
/// failure paths cost one verification.
#[derive(Clone)]
pub struct UserAccountService<R> {
    users: Arc<R>,
    hasher: Arc<dyn PasswordHasher>,
    tokens: Arc<dyn TokenService>,
    decoy: Arc<OnceLock<String>>,
}

impl<R> UserAccountService<R> {
    /// Wire the service to its account store and credential adapters.
    pub fn new(users: Arc<R>, hasher: Arc<dyn PasswordHasher>, tokens: Arc<dyn TokenService>) -> Self {
        Self {
            users,
            hasher,
            tokens,
            decoy: Arc::new(OnceLock::new()),
        }
    }

    async fn with_hasher<T, F>(&self, op: F) -> Result<T, Error>
    where
        F: FnOnce(&dyn PasswordHasher) -> Result<T, PasswordHashError> + Send + 'static,
        T: Send + 'static,
    {
        let hasher = Arc::clone(&self.hasher);
        tokio::task::spawn_blocking(move || op(hasher.as_ref()))
            .await
            .map_err(|err| Error::internal(format!("password hashing task failed: {err}")))?
            .map_err(map_hash_error)
    }
}

#[async_trait]
impl<R> UserAccounts for UserAccountService<R>
where
    R: UserRepository,
{
    async fn register(&self, registration: Registration) -> Result<User, Error> {
        let password = Zeroizing::new(registration.password().to_owned());
        let password_hash = self
            .with_hasher(move |hasher| hasher.hash(&password))
            .await?;

        let user = self
            .users
            .create(&NewUser {
                email: registration.email().clone(),
                password_hash,
            })
            .await
            .map_err(map_repository_error)?;

        debug!(user_id = %user.id(), "user registered");
        Ok(user)
    }

    async fn login(&self, credentials: LoginCredentials) -> Result<AccessToken, Error> {
        let found = self
            .users
            .find_by_email(credentials.email())
            .await
            .map_err(map_repository_error)?;
        let password = Zeroizing::new(credentials.password().to_owned());

        let Some(user) = found else {
            let decoy = Arc::clone(&self.decoy);
            self.with_hasher(move |hasher| {
                let stored = decoy_hash(hasher, &decoy)?;
                hasher.verify(&password, &stored)
            })
            .await?;
            debug!("login for unknown email");
            return Err(Error::unauthorized(INVALID_CREDENTIALS));
        };

        let stored = user.password_hash().to_owned();
        let matches = self
            .with_hasher(move |hasher| hasher.verify(&password, &stored))
            .await?;
        if !matches {
            warn!(user_id = %user.id(), "login with wrong password");
            return Err(Error::unauthorized(INVALID_CREDENTIALS));
        }

        self.tokens.issue(&user).map_err(map_token_error)
    }

    async fn authenticate(&self, token: &str) -> Result<AuthenticatedUser, Error> {
        self.tokens.validate(token).map_err(map_token_error)
    }
}
