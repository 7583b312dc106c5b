pub mod config;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;

use std::sync::Arc;

use axum::{
    routing::{get, post, put},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;
use crate::services::store::{ContentCache, ContentStore};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub store: Arc<ContentStore>,
}

impl AppState {
    /// State with a fresh cache over the configured data directory.
    pub fn new(config: Config) -> Self {
        let store = ContentStore::new(&config.data_dir, Arc::new(ContentCache::new()));
        Self {
            config: Arc::new(config),
            store: Arc::new(store),
        }
    }
}

/// Build the API router.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        // Ingestion routes
        .route("/api/ingest", post(routes::ingest::import))
        .route("/api/ingest/all", post(routes::ingest::ingest_all))
        // Module routes
        .route("/api/modules", get(routes::modules::list))
        .route("/api/modules/:id", get(routes::modules::get))
        // Question routes
        .route(
            "/api/questions",
            get(routes::questions::list).post(routes::questions::create),
        )
        .route(
            "/api/questions/:module_id/:question_id",
            put(routes::questions::update).delete(routes::questions::delete),
        )
        .with_state(state)
}

/// Initialize the tracing subscriber from `RUST_LOG` (default `info`).
pub fn init_tracing() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();
}

pub async fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = Config::from_env()?;
    tracing::info!(
        modules_dir = %config.modules_dir.display(),
        data_dir = %config.data_dir.display(),
        "Loaded configuration"
    );

    let addr = config.addr();
    let app = app(AppState::new(config))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn health_check() -> &'static str {
    "OK"
}
