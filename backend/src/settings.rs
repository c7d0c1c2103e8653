//! Runtime settings loaded via OrthoConfig.
//!
//! Values come from `MARKET_*` environment variables, command-line flags, or a
//! configuration file, in OrthoConfig's usual precedence.

use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use zeroize::Zeroizing;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_TOKEN_TTL_SECS: u64 = 300;
const DEFAULT_DB_MAX_CONNECTIONS: u32 = 10;

/// A setting that has no default was not supplied.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("missing required setting {env_var}")]
pub struct MissingSetting {
    /// Environment variable that would supply it.
    pub env_var: &'static str,
}

/// Marketplace service settings.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "MARKET")]
pub struct MarketSettings {
    /// PostgreSQL connection URL.
    pub database_url: Option<String>,
    /// Interface to bind.
    pub host: Option<String>,
    /// Port to bind.
    pub port: Option<u16>,
    /// HS256 signing secret for access tokens.
    pub jwt_secret: Option<String>,
    /// Access token lifetime in seconds.
    pub token_ttl_secs: Option<u64>,
    /// Upper bound on pooled database connections.
    pub db_max_connections: Option<u32>,
    /// Deadline for each item store call, in milliseconds.
    pub store_deadline_ms: Option<u64>,
}

impl MarketSettings {
    /// # Errors
    ///
    /// Returns [`MissingSetting`] when `MARKET_DATABASE_URL` is unset or blank.
    pub fn database_url(&self) -> Result<&str, MissingSetting> {
        self.database_url
            .as_deref()
            .filter(|url| !url.trim().is_empty())
            .ok_or(MissingSetting {
                env_var: "MARKET_DATABASE_URL",
            })
    }

    /// # Errors
    ///
    /// Returns [`MissingSetting`] when `MARKET_JWT_SECRET` is unset or empty.
    pub fn jwt_secret(&self) -> Result<Zeroizing<Vec<u8>>, MissingSetting> {
        self.jwt_secret
            .as_deref()
            .filter(|secret| !secret.is_empty())
            .map(|secret| Zeroizing::new(secret.as_bytes().to_vec()))
            .ok_or(MissingSetting {
                env_var: "MARKET_JWT_SECRET",
            })
    }

    /// Bind interface, defaulting to all interfaces.
    pub fn host(&self) -> &str {
        self.host.as_deref().unwrap_or(DEFAULT_HOST)
    }

    /// Bind port, defaulting to 8080.
    pub fn port(&self) -> u16 {
        self.port.unwrap_or(DEFAULT_PORT)
    }

    /// Access token lifetime, defaulting to five minutes.
    pub fn token_ttl(&self) -> Duration {
        Duration::from_secs(self.token_ttl_secs.unwrap_or(DEFAULT_TOKEN_TTL_SECS))
    }

    /// Pool size, defaulting to ten.
    pub fn db_max_connections(&self) -> u32 {
        self.db_max_connections
            .unwrap_or(DEFAULT_DB_MAX_CONNECTIONS)
    }

    /// Per-call store deadline; `None` leaves store calls unbounded.
    pub fn store_deadline(&self) -> Option<Duration> {
        self.store_deadline_ms
            .filter(|ms| *ms > 0)
            .map(Duration::from_millis)
    }
}
