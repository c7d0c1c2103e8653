//! Builders for HTTP state ports and readiness dependencies.

use std::sync::Arc;

use actix_web::web;
use async_trait::async_trait;

use marketplace::domain::ports::{ItemCommand, ItemQuery, UserAccounts};
use marketplace::domain::{ItemService, UserAccountService};
use marketplace::inbound::http::health::DependencyCheck;
use marketplace::inbound::http::state::HttpState;
use marketplace::outbound::persistence::{DbPool, DieselItemRepository, DieselUserRepository};
use marketplace::outbound::security::{Argon2PasswordHasher, JwtTokenService};

use super::ServerConfig;

/// Readiness check that borrows a pooled connection and pings Postgres.
pub(super) struct DatabaseCheck {
    pool: DbPool,
}

impl DatabaseCheck {
    pub(super) fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DependencyCheck for DatabaseCheck {
    fn name(&self) -> &'static str {
        "database"
    }

    async fn check(&self) -> Result<(), String> {
        self.pool.ping().await.map_err(|err| err.into_message())
    }
}

fn build_item_ports(config: &ServerConfig, pool: &DbPool) -> (Arc<dyn ItemCommand>, Arc<dyn ItemQuery>) {
    let service = ItemService::new(Arc::new(DieselItemRepository::new(pool.clone())));
    let service = Arc::new(match config.store_deadline {
        Some(deadline) => service.with_deadline(deadline),
        None => service,
    });
    (
        service.clone() as Arc<dyn ItemCommand>,
        service as Arc<dyn ItemQuery>,
    )
}

fn build_user_accounts(config: &ServerConfig, pool: &DbPool) -> Arc<dyn UserAccounts> {
    Arc::new(UserAccountService::new(
        Arc::new(DieselUserRepository::new(pool.clone())),
        Arc::new(Argon2PasswordHasher::new()),
        Arc::new(JwtTokenService::new(&config.jwt_secret, config.token_ttl)),
    ))
}

/// Build the shared HTTP state.
///
/// Uses Diesel-backed services when a pool is configured, otherwise the
/// fixture ports.
pub(super) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let state = match &config.db_pool {
        Some(pool) => {
            let (items, items_query) = build_item_ports(config, pool);
            HttpState::new(items, items_query, build_user_accounts(config, pool))
        }
        None => HttpState::fixtures(),
    };
    web::Data::new(state)
}

#[cfg(test)]
mod tests {
    use std::net::SocketAddr;

    use marketplace::domain::ErrorCode;
    use rstest::rstest;
    use zeroize::Zeroizing;

    use super::*;

    #[rstest]
    #[tokio::test]
    async fn missing_pool_selects_fixture_ports() {
        let addr: SocketAddr = "127.0.0.1:0".parse().expect("socket address");
        let config = ServerConfig::new(addr, Zeroizing::new(b"secret".to_vec()));

        let state = build_http_state(&config);
        let err = state
            .users
            .authenticate("not-the-fixture-token")
            .await
            .expect_err("fixture rejects unknown tokens");

        assert_eq!(err.code(), ErrorCode::Unauthorized);
    }
}
