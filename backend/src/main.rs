//! Storefront entry-point: loads settings, prepares the database, and serves
//! the REST API.

mod server;

use std::io;

use actix_web::web;
#[cfg(feature = "metrics")]
use actix_web_prom::{PrometheusMetrics, PrometheusMetricsBuilder};
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use server::{ServerConfig, create_server};
use storefront::inbound::http::health::HealthState;
use storefront::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};
use storefront::settings::StorefrontSettings;

/// Build Prometheus middleware, logging and continuing without metrics on
/// failure.
#[cfg(feature = "metrics")]
fn initialize_metrics<F, E>(build: F) -> Option<PrometheusMetrics>
where
    F: FnOnce() -> Result<PrometheusMetrics, E>,
    E: std::fmt::Display,
{
    match build() {
        Ok(metrics) => Some(metrics),
        Err(error) => {
            warn!(%error, "metrics initialisation failed; continuing without metrics");
            None
        }
    }
}

async fn connect(settings: &StorefrontSettings, database_url: &str) -> io::Result<DbPool> {
    if settings.run_migrations() {
        let applied = run_pending_migrations(database_url)
            .await
            .map_err(|error| io::Error::other(format!("migrations failed: {error}")))?;
        info!(applied, "database migrations applied");
    }

    let mut pool_config = PoolConfig::new(database_url);
    if let Some(max_size) = settings.pool_max_size {
        pool_config = pool_config.with_max_size(max_size);
    }
    DbPool::new(pool_config)
        .await
        .map_err(|error| io::Error::other(format!("database pool: {error}")))
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = StorefrontSettings::load()
        .map_err(|error| io::Error::other(format!("invalid settings: {error}")))?;
    let bind_addr = settings
        .bind_addr()
        .map_err(|error| io::Error::new(io::ErrorKind::InvalidInput, error))?;

    let mut config = ServerConfig::new(bind_addr);
    if let Some(database_url) = settings.database_url() {
        config = config.with_db_pool(connect(&settings, database_url).await?);
    }

    #[cfg(feature = "metrics")]
    let config = config.with_metrics(initialize_metrics(|| {
        PrometheusMetricsBuilder::new("storefront")
            .endpoint("/metrics")
            .build()
    }));

    let health_state = web::Data::new(HealthState::new());
    info!(%bind_addr, "starting storefront server");
    create_server(health_state, config)?.await
}
