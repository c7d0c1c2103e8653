//! HTTP server configuration object and helpers.

use std::net::SocketAddr;
use std::time::Duration;

use marketplace::outbound::persistence::DbPool;
use zeroize::Zeroizing;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) db_pool: Option<DbPool>,
    pub(crate) jwt_secret: Zeroizing<Vec<u8>>,
    pub(crate) token_ttl: Duration,
    pub(crate) store_deadline: Option<Duration>,
}

impl ServerConfig {
    /// Construct a configuration that binds to `bind_addr` and signs tokens
    /// with `jwt_secret`.
    #[must_use]
    pub fn new(bind_addr: SocketAddr, jwt_secret: Zeroizing<Vec<u8>>) -> Self {
        Self {
            bind_addr,
            db_pool: None,
            jwt_secret,
            token_ttl: Duration::from_secs(300),
            store_deadline: None,
        }
    }

    /// Attach a database connection pool for persistence adapters.
    ///
    /// Without a pool the server answers from fixture ports.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    /// Override the access token lifetime.
    #[must_use]
    pub fn with_token_ttl(mut self, ttl: Duration) -> Self {
        self.token_ttl = ttl;
        self
    }

    /// Bound every item store call by `deadline`.
    #[must_use]
    pub fn with_store_deadline(mut self, deadline: Option<Duration>) -> Self {
        self.store_deadline = deadline;
        self
    }

    /// Return the socket address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}
