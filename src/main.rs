use actix_web::{middleware::Logger, App, HttpServer};
use clap::Parser;
use prompt_vault::config::{Cli, ServerConfig};
use prompt_vault::{configure, cors, AppState, JsonFileStore, PromptStore};
use std::sync::Arc;
use tracing_subscriber::{fmt, EnvFilter};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Use `RUST_LOG=prompt_vault=debug` (or trace, etc.) to control log level
    fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = ServerConfig::from_cli(Cli::parse())?;
    tracing::info!(config = ?config, "Starting prompt server");

    let store = JsonFileStore::new(&config.storage_dir)?;
    tracing::info!(path = %store.path().display(), "Using JSON file storage");
    let store: Arc<dyn PromptStore> = Arc::new(store);

    if !config.static_dir.is_dir() {
        tracing::warn!(path = %config.static_dir.display(), "Static directory not found, `/` will return 404");
    }
    let state = AppState::new(store, config.static_dir.clone());

    let addr = config.bind_addr();
    tracing::info!(host = %addr.0, port = addr.1, "Listening");
    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(cors())
            .configure(configure(state.clone()))
    })
    .bind(addr)?
    .run()
    .await?;
    Ok(())
}
