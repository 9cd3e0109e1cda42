mod config;
mod db;
mod errors;
mod lifecycle;
mod models;
mod routes;
mod spend;
mod state;
mod store;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::db::create_pool;
use crate::lifecycle::LifecycleManager;
use crate::routes::build_router;
use crate::spend::SpendAggregator;
use crate::state::AppState;
use crate::store::postgres::PgRecordStore;
use crate::store::s3::S3BlobStore;
use crate::store::spend_log::FileSpendLog;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_CRATE_NAME"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting dashboard API v{}", env!("CARGO_PKG_VERSION"));

    let db = create_pool(&config.database_url, config.db_max_connections).await?;
    let records = Arc::new(PgRecordStore::new(db));

    let blobs = Arc::new(S3BlobStore::from_config(&config).await);
    info!("S3 client initialized (report bucket: {})", config.s3_bucket);

    let spend_log = Arc::new(FileSpendLog::new(&config.spend_log_path));
    info!("Reading spend log from {}", config.spend_log_path);

    let state = AppState {
        lifecycle: Arc::new(LifecycleManager::new(
            records,
            blobs,
            config.s3_bucket.clone(),
        )),
        spend: Arc::new(SpendAggregator::new(spend_log)),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict CORS to the dashboard origin

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
