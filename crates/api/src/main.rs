use std::sync::Arc;

use anyhow::Result;
use tracing::info;

use attribute_forms_api::services::upload::LocalObjectStore;
use attribute_forms_api::{app, config, middleware};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let config = config::Config::load()?;

    middleware::logging::init_logging(&config.logging);
    middleware::init_metrics()?;

    info!("Starting attribute forms API v{}", env!("CARGO_PKG_VERSION"));

    let db_config: persistence::db::DatabaseConfig = (&config.database).into();
    let pool = persistence::db::create_pool(&db_config).await?;

    info!("Running database migrations...");
    persistence::db::run_migrations(&pool).await?;
    info!("Migrations completed");

    let object_store = Arc::new(LocalObjectStore::new(
        &config.uploads.storage_dir,
        &config.uploads.public_base_url,
    ));

    let addr = config.socket_addr()?;
    let app = app::create_app(config, pool, object_store);

    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
