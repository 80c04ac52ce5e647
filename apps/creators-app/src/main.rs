use axum::{extract::DefaultBodyLimit, routing::get, routing::post, Router};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod backend_client;
mod config;
mod format;
mod handlers;
mod page;
mod pagination;
mod session;
mod session_store;
mod views;

use backend_client::{Backend, BackendClient};
use config::AppConfig;
use session_store::SessionStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "creators_app=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load config
    let config = AppConfig::load()?;
    tracing::info!("Creators Pro app starting...");
    tracing::info!("Backend URL: {}", config.backend_url);
    tracing::info!("Session TTL: {}s", config.session_ttl_secs);

    // Create shared state
    let state = AppState::new(config.clone())?;
    start_session_sweeper(state.clone());

    let app = router(state);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.listen_port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub backend: Arc<dyn Backend>,
    pub sessions: SessionStore,
}

impl AppState {
    fn new(config: AppConfig) -> anyhow::Result<Self> {
        let backend = BackendClient::new(config.backend_url.clone(), config.request_timeout())?;
        Ok(Self::with_backend(config, Arc::new(backend)))
    }

    pub fn with_backend(config: AppConfig, backend: Arc<dyn Backend>) -> Self {
        Self {
            config,
            backend,
            sessions: SessionStore::new(),
        }
    }
}

pub fn router(state: AppState) -> Router {
    let max_upload_bytes = state.config.max_upload_bytes;

    Router::new()
        // Health check
        .route("/health", get(handlers::health::health_check))
        .route("/assets/app.css", get(handlers::assets::app_css))
        // Pages
        .route("/", get(handlers::app::mount))
        .route("/page/{page}", get(handlers::app::navigate))
        .route("/back", get(handlers::app::back))
        .route("/history", get(handlers::app::history_page))
        .route("/receipt", post(handlers::app::submit_receipt))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn start_session_sweeper(state: AppState) {
    tokio::spawn(async move {
        let mut tick = tokio::time::interval(std::time::Duration::from_secs(60));
        loop {
            tick.tick().await;

            let evicted = state.sessions.evict_idle(state.config.session_ttl()).await;
            if evicted > 0 {
                tracing::debug!("Evicted {} idle sessions", evicted);
            }
        }
    });
}
