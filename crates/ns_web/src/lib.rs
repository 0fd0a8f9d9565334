use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use ns_core::Result;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub mod error;
pub mod handlers;
pub mod render;
pub mod state;

pub use error::ApiError;
pub use state::AppState;

pub fn create_app(state: AppState) -> Router {
    let cors = CorsLayer::permissive();

    Router::new()
        .route("/", get(handlers::dashboard))
        .route("/audio", post(handlers::audio_form))
        .route("/healthz", get(handlers::health))
        .route("/api/headlines", get(handlers::headlines))
        .route("/api/languages", get(handlers::languages))
        .route("/api/speech", post(handlers::speech))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(Arc::new(state))
}

/// Serves the dashboard until Ctrl-C.
pub async fn serve(app: Router, addr: SocketAddr) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("🌐 NewsSphere listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("Shutting down");
        })
        .await?;
    Ok(())
}

pub mod prelude {
    pub use crate::render::{ArticleCard, TopicSection};
    pub use crate::{create_app, serve, AppState};
    pub use ns_core::{Error, Result};
}
