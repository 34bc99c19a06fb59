//! Popular courses endpoint (upstream passthrough)

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;

use crate::{ApiResult, AppState};

const DEFAULT_TOP_N: i64 = 20;

#[derive(Debug, Deserialize)]
pub struct PopularQuery {
    pub top_n: Option<i64>,
}

/// GET /api/popular?top_n=...
pub async fn popular_items(
    State(state): State<AppState>,
    Query(query): Query<PopularQuery>,
) -> ApiResult<Json<serde_json::Value>> {
    let top_n = query.top_n.unwrap_or(DEFAULT_TOP_N);

    let response = state.ml.popular(top_n).await?;
    let count = response.count.unwrap_or(response.items.len() as i64);

    Ok(Json(json!({
        "items": response.items,
        "count": count,
    })))
}

/// Build popular routes
pub fn popular_routes() -> Router<AppState> {
    Router::new().route("/api/popular", get(popular_items))
}
