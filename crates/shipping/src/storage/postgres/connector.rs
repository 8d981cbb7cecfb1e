//! Connection factory for Cloud SQL.
//!
//! The managed connector (Cloud SQL Auth Proxy or the Cloud Run socket
//! mount) exposes the instance as a Unix socket and handles TLS, IAM and
//! credential refresh. When `DB_HOST` is set the pool connects over TCP
//! instead and requires TLS.

use std::time::Duration;

use sqlx::postgres::{PgConnectOptions, PgPool, PgPoolOptions, PgSslMode};

use shipping_core::storage::{RepositoryError, Result};

use crate::config::{DatabaseConfig, DatabaseTarget};

const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(10);
const RETRY_STEP: Duration = Duration::from_millis(500);

/// Builds the connection options for `config`. Pure, no I/O.
pub fn connect_options(config: &DatabaseConfig) -> PgConnectOptions {
    let options = PgConnectOptions::new()
        .username(&config.user)
        .password(&config.password)
        .database(&config.database);

    match &config.target {
        DatabaseTarget::Socket(path) => options.socket(path),
        DatabaseTarget::Tcp { host, port } => options
            .host(host)
            .port(*port)
            .ssl_mode(PgSslMode::Require),
    }
}

/// Opens the process-wide pool.
///
/// The first connection is attempted up to `config.connect_attempts` times,
/// waiting a little longer after each failure.
pub async fn connect(config: &DatabaseConfig) -> Result<PgPool> {
    let options = connect_options(config);
    let mut attempt = 1;

    loop {
        let result = PgPoolOptions::new()
            .max_connections(config.pool_max)
            .acquire_timeout(ACQUIRE_TIMEOUT)
            .connect_with(options.clone())
            .await;

        match result {
            Ok(pool) => {
                tracing::info!(
                    instance = %config.instance_connection_name,
                    database = %config.database,
                    pool_max = config.pool_max,
                    "Connected to Cloud SQL"
                );
                return Ok(pool);
            }
            Err(e) if attempt < config.connect_attempts => {
                let delay = RETRY_STEP * attempt;
                tracing::warn!(
                    attempt,
                    max_attempts = config.connect_attempts,
                    delay_ms = delay.as_millis() as u64,
                    error = %e,
                    "Database connection failed, retrying"
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
            Err(e) => {
                return Err(RepositoryError::Unavailable(format!(
                    "could not connect to {} after {attempt} attempt(s): {e}",
                    config.instance_connection_name
                )));
            }
        }
    }
}
