//! HTTP server: router assembly and shared application state.

use axum::Router;
use axum::routing::{get, post};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::entities::profile::ProfileService;
use crate::error::RepurposerError;

mod routes;

#[derive(Clone)]
pub(crate) struct AppState {
    pub profiles: ProfileService,
}

pub(crate) fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(routes::index))
        .route("/search", post(routes::search))
        .route("/api/search", get(routes::api_search))
        .route("/compare", get(routes::compare_form).post(routes::compare))
        .route("/generate_pdf", post(routes::generate_pdf))
        .route("/clear_cache", post(routes::clear_cache))
        .route("/health", get(routes::health))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Binds and serves until ctrl-c. Cache warming runs in the background
/// so startup is not delayed by upstream latency.
pub async fn run(host: &str, port: u16) -> Result<(), RepurposerError> {
    let profiles = ProfileService::new()?;

    let warmer = profiles.clone();
    tokio::spawn(async move {
        warmer.warm().await;
    });

    let app = router(AppState { profiles });
    let listener = tokio::net::TcpListener::bind((host, port)).await?;
    info!(host, port, "repurposer listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await?;
    Ok(())
}
