//! Backend entry-point: wires REST endpoints, session auth, and OpenAPI docs.

mod server;
#[cfg(test)]
mod tests;

use std::env;
use std::net::SocketAddr;

use actix_web::cookie::{Key, SameSite};
use actix_web::web;
#[cfg(feature = "metrics")]
use actix_web_prom::PrometheusMetricsBuilder;
use diesel::Connection;
use diesel::pg::PgConnection;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

use backend::inbound::http::health::HealthState;
use backend::outbound::persistence::{DbPool, PoolConfig};
use server::{ServerConfig, create_server};

/// Embedded migrations from the backend/migrations directory.
const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

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

    let key = load_session_key()?;
    let cookie_secure = env::var("SESSION_COOKIE_SECURE")
        .map(|v| v != "0")
        .unwrap_or(true);
    let bind_addr: SocketAddr = env::var("BIND_ADDR")
        .unwrap_or_else(|_| "0.0.0.0:8080".into())
        .parse()
        .map_err(|error| std::io::Error::other(format!("invalid BIND_ADDR: {error}")))?;

    let mut config = ServerConfig::new(key, cookie_secure, SameSite::Lax, bind_addr);
    match env::var("DATABASE_URL") {
        Ok(database_url) => {
            run_migrations(database_url.clone()).await?;
            let pool = DbPool::new(PoolConfig::new(&database_url))
                .await
                .map_err(|error| {
                    std::io::Error::other(format!("create database pool: {error}"))
                })?;
            config = config.with_db_pool(pool);
        }
        Err(_) => {
            warn!("DATABASE_URL is unset; serving fixture accounts without persistence");
        }
    }

    #[cfg(feature = "metrics")]
    {
        let metrics = initialize_metrics(|| {
            PrometheusMetricsBuilder::new("backend")
                .endpoint("/metrics")
                .build()
        });
        config = config.with_metrics(metrics);
    }

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, config)?;
    server.await
}

/// Load the session signing key, falling back to an ephemeral key only in
/// debug builds or when `SESSION_ALLOW_EPHEMERAL=1`.
fn load_session_key() -> std::io::Result<Key> {
    let key_path =
        env::var("SESSION_KEY_FILE").unwrap_or_else(|_| "/var/run/secrets/session_key".into());
    match std::fs::read(&key_path) {
        Ok(bytes) => Ok(Key::derive_from(&bytes)),
        Err(e) => {
            let allow_dev = env::var("SESSION_ALLOW_EPHEMERAL").ok().as_deref() == Some("1");
            if cfg!(debug_assertions) || allow_dev {
                warn!(path = %key_path, error = %e, "using temporary session key (dev only)");
                Ok(Key::generate())
            } else {
                Err(std::io::Error::other(format!(
                    "failed to read session key at {key_path}: {e}"
                )))
            }
        }
    }
}

/// Apply all pending embedded migrations over a blocking connection.
async fn run_migrations(database_url: String) -> std::io::Result<()> {
    tokio::task::spawn_blocking(move || {
        let mut connection = PgConnection::establish(&database_url)
            .map_err(|error| std::io::Error::other(format!("connect for migrations: {error}")))?;
        connection
            .run_pending_migrations(MIGRATIONS)
            .map(|_| ())
            .map_err(|error| std::io::Error::other(format!("run migrations: {error}")))
    })
    .await
    .map_err(|error| std::io::Error::other(format!("migration task failed: {error}")))?
}

/// Build the Prometheus middleware, logging and disabling metrics on error.
#[cfg(feature = "metrics")]
fn initialize_metrics<E: std::fmt::Display>(
    build: impl FnOnce() -> Result<actix_web_prom::PrometheusMetrics, E>,
) -> Option<actix_web_prom::PrometheusMetrics> {
    match build() {
        Ok(metrics) => Some(metrics),
        Err(error) => {
            warn!(error = %error, "metrics initialisation failed; metrics endpoint disabled");
            None
        }
    }
}
