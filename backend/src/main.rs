//! Marketplace entry-point: loads settings, migrates, and serves the REST API.

mod server;

use std::net::{IpAddr, SocketAddr};

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use marketplace::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};
use marketplace::settings::MarketSettings;
use server::{ServerConfig, create_server, health_state_for};

fn startup_error(message: impl std::fmt::Display) -> std::io::Error {
    error!(error = %message, "startup aborted");
    std::io::Error::other(message.to_string())
}

async fn migrate(database_url: String) -> std::io::Result<()> {
    let applied = tokio::task::spawn_blocking(move || run_pending_migrations(&database_url))
        .await
        .map_err(startup_error)?
        .map_err(startup_error)?;
    info!(applied, "database migrations complete");
    Ok(())
}

fn bind_addr(settings: &MarketSettings) -> std::io::Result<SocketAddr> {
    let host: IpAddr = settings
        .host()
        .parse()
        .map_err(|err| startup_error(format!("invalid host {:?}: {err}", settings.host())))?;
    Ok(SocketAddr::new(host, settings.port()))
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = MarketSettings::load_from_iter(std::env::args_os()).map_err(startup_error)?;
    let database_url = settings.database_url().map_err(startup_error)?.to_owned();
    let jwt_secret = settings.jwt_secret().map_err(startup_error)?;

    migrate(database_url.clone()).await?;

    let pool = DbPool::new(
        PoolConfig::new(database_url).with_max_size(settings.db_max_connections()),
    )
    .await
    .map_err(|err| startup_error(err.into_message()))?;

    let config = ServerConfig::new(bind_addr(&settings)?, jwt_secret)
        .with_db_pool(pool)
        .with_token_ttl(settings.token_ttl())
        .with_store_deadline(settings.store_deadline());
    info!(addr = %config.bind_addr(), "starting marketplace server");

    let health_state = web::Data::new(health_state_for(&config));
    create_server(health_state, config)?.await
}
