use std::sync::Arc;

use anyhow::Result;
use clap::Parser;

use shipping::{config::JsonCli, server, state::AppState, storage::JsonFileRepository};
use shipping_core::storage::PackageRepository;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = JsonCli::parse();
    server::init_tracing();

    let repository = JsonFileRepository::new(&cli.data_file);
    match repository.ping().await {
        Ok(()) => tracing::info!(path = %cli.data_file.display(), "Using JSON file store"),
        // Served as 500s until the file is fixed.
        Err(e) => tracing::warn!(path = %cli.data_file.display(), error = %e, "JSON file store is unreadable"),
    }

    let state = AppState::new(Arc::new(repository))
        .with_request_timeout(cli.server.request_timeout());

    server::run(&cli.server, state).await
}
