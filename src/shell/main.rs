use anyhow::Context;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

use smart_meters::modules::smart_meters::adapters::outbound::meter_store_sqlite::SqliteMeterStore;
use smart_meters::modules::smart_meters::core::ports::MeterStore;
use smart_meters::shared::infrastructure::sqlite::connect_pool;
use smart_meters::shell::config::AppConfig;
use smart_meters::shell::http::router;
use smart_meters::shell::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "smart_meters=info,tower_http=info".into()),
        )
        .init();

    let config = AppConfig::from_env().context("failed to load configuration")?;

    let pool = connect_pool(&config.database_url, config.max_connections)
        .await
        .context("failed to connect to the meter database")?;
    let store = Arc::new(SqliteMeterStore::new(pool));
    store
        .initialize()
        .await
        .context("failed to initialize the meter database")?;

    let app = router(AppState::new(store));

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind to {addr}"))?;
    info!("MCP endpoint: http://{}/mcp", addr);
    info!("GraphQL endpoint: http://{}/gql", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("shutdown signal received");
    }
}
