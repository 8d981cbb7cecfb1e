use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;

use shipping::{
    config::{CloudSqlCli, DatabaseConfig},
    server,
    state::AppState,
    storage::{postgres, PostgresRepository},
};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = CloudSqlCli::parse();
    server::init_tracing();

    let config = DatabaseConfig::from_env().context("invalid database configuration")?;
    tracing::debug!(?config, "Database configuration loaded");

    let pool = postgres::connect(&config)
        .await
        .context("failed to open the connection pool")?;
    let repository = PostgresRepository::new(pool)
        .await
        .context("failed to prepare the packages table")?;

    let state = AppState::new(Arc::new(repository))
        .with_request_timeout(cli.server.request_timeout());

    server::run(&cli.server, state).await
}
