use dotenvy::dotenv;
use tracing_subscriber::EnvFilter;

mod api;
mod config;
mod setup;

use config::{app_config::AppConfig, database_config};
use setup::{dependency_injection::DependencyContainer, server::Server};

/// REST API Entry Point
///
/// Initializes the application, wires dependencies, and starts the HTTP server.
/// - config/: Application configuration (server, CORS, database, storage)
/// - setup/: Dependency injection, request timeout and server setup
/// - api/: Route handlers and DTOs
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Load environment variables
    dotenv().ok();

    // 2. Initialize tracing: RUST_LOG, then LOG_LEVEL, then "info"
    let env_filter = EnvFilter::try_from_default_env()
        .ok()
        .or_else(|| {
            std::env::var("LOG_LEVEL")
                .ok()
                .and_then(|level| EnvFilter::try_new(level).ok())
        })
        .unwrap_or_else(|| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    // 3. Load configuration
    let config = AppConfig::from_env()?;

    // 4. Initialize database and storage
    let pool = database_config::init_database(&config.database).await?;
    let blob_store = config.storage.blob_store();

    // 5. Wire dependencies
    let container = DependencyContainer::new(pool, blob_store);

    // 6. Run server
    Server::run(config, container).await?;

    Ok(())
}
