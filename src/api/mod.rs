pub mod models;
pub mod search;

// Re-exports
pub use models::*;

use axum::{routing::get, Json, Router};
use chrono::{SecondsFormat, Utc};
use tower_http::trace::TraceLayer;

pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        message: "API de busca funcionando normalmente".to_string(),
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
    })
}

/// Full application router
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(health_handler))
        .merge(search::routes())
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
