use crate::api::models::*;
use crate::storage::SearchResult;
use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::StatusCode,
    Json,
};
use tracing::{info, warn};

pub async fn search_handler(
    State(state): State<AppState>,
    pairs: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Result<Json<SearchResult>, AppError> {
    let params = match pairs {
        Ok(Query(pairs)) => SearchParams::from_pairs(pairs),
        Err(rejection) => {
            warn!(error = %rejection, "Malformed search query string, using defaults");
            SearchParams::default()
        }
    };

    let query = params.into_query();

    info!(query = %query.text, page = query.page, "Search received");

    let result = state
        .search_backend
        .search(&query)
        .await
        .map_err(|e| AppError::Internal(format!("Search failed: {}", e)))?;

    info!(
        backend = state.search_backend.name(),
        found = result.total,
        "Search complete"
    );

    Ok(Json(result))
}

pub async fn preflight_handler() -> StatusCode {
    StatusCode::OK
}
