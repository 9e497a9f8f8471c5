use pool_odds::config::Config;
use pool_odds::db::PgStore;
use pool_odds::network::http::{router, AppState};
use sqlx::postgres::PgPoolOptions;
use std::{net::SocketAddr, sync::Arc, time::Duration};
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    info!("🚀 Starting pool-odds...");

    let config = Config::from_env()?;
    info!(
        "📋 Configuration loaded (head-to-head weight {}, margin std prior {})",
        config.model.head_to_head_weight, config.model.default_std_dev
    );

    info!("🔌 Connecting to Postgres...");
    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_acquire_timeout_secs))
        .connect(&config.database_url)
        .await?;
    info!("✅ Connected to Postgres");

    let state = Arc::new(AppState::new(PgStore::new(pool), config.model.clone()));
    let app = router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    info!("🌐 HTTP server starting on {}", addr);
    info!("✅ pool-odds ready!");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
