pub mod error;
pub mod routes;
pub mod state;

use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use state::{AppState, BridgeConfig};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Build the axum Router with all API routes and middleware.
/// Used by `serve()` and available for integration testing.
pub fn build_router(bridge: BridgeConfig) -> Router {
    let app_state = AppState::new(bridge);

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Flows
        .route("/api/audit", post(routes::flows::audit))
        .route("/api/roadmap", post(routes::flows::roadmap))
        .route("/api/coach", post(routes::flows::coach))
        .route("/api/agent-pack", post(routes::flows::agent_pack))
        .route("/api/ship", post(routes::flows::ship))
        // Artifact preview
        .route("/api/artifact", post(routes::artifact::read_artifact))
        // OpenClaw bridge
        .route(routes::bridge::STATUS_PATH, get(routes::bridge::status))
        .route(routes::bridge::EXECUTE_PATH, post(routes::bridge::execute))
        .route(routes::bridge::ARTIFACT_PATH, post(routes::bridge::artifact))
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(app_state)
}

async fn not_found() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::NOT_FOUND,
        Json(serde_json::json!({ "error": "not found" })),
    )
}

/// Bind `addr` and serve until the future is dropped.
pub async fn serve(addr: &str, bridge: BridgeConfig) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    serve_on(listener, bridge).await
}

/// Serve on a pre-bound listener, so the caller can read the actual port
/// before starting (useful when `port = 0` and the OS picks a free port).
pub async fn serve_on(
    listener: tokio::net::TcpListener,
    bridge: BridgeConfig,
) -> anyhow::Result<()> {
    let addr = listener.local_addr()?;
    tracing::info!(
        bridge = bridge.enabled,
        requires_key = bridge.requires_key(),
        "vibe-sentinel studio listening on http://{addr}"
    );
    axum::serve(listener, build_router(bridge)).await?;
    Ok(())
}
