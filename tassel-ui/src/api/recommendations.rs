//! Recommendation generation and retrieval endpoints
//!
//! Generation validates the user's profile before any network call: an
//! unknown user or a missing major fails fast with no side effects. A
//! successful upstream call persists every returned row atomically before
//! responding, so retrieval never sees a partial batch.

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;

use tassel_common::api::types::RecommendRequest;
use tassel_common::db::{recommendations, users};

use crate::{ApiError, ApiResult, AppState};

const DEFAULT_TOP_N: i64 = 10;
const DEFAULT_LIMIT: i64 = 10;

#[derive(Debug, Deserialize)]
pub struct GenerateRequest {
    pub user_id: Option<String>,
    pub top_n: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub user_id: Option<String>,
    pub limit: Option<i64>,
}

/// POST /api/recommendations
pub async fn generate_recommendations(
    State(state): State<AppState>,
    Json(req): Json<GenerateRequest>,
) -> ApiResult<Json<serde_json::Value>> {
    let user_id = req
        .user_id
        .filter(|v| !v.is_empty())
        .ok_or_else(|| ApiError::Validation("user_id is required".to_string()))?;
    let top_n = req.top_n.unwrap_or(DEFAULT_TOP_N);

    // Profile preconditions come before any network call
    let user = users::get_user(&state.db, &user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    let major = user
        .major
        .filter(|m| !m.is_empty())
        .ok_or_else(|| {
            ApiError::Validation(
                "Please complete your profile first. Major is required.".to_string(),
            )
        })?;

    let request = RecommendRequest {
        user_id: user.user_id.clone(),
        major,
        interests: user.interests.unwrap_or_default(),
        year: user.year.unwrap_or(2),
        gpa: user.academic_performance.unwrap_or(3.0),
        top_n,
    };

    let recommendations = state.ml.recommend(&request).await?;

    if !recommendations.is_empty() {
        recommendations::save_recommendations(&state.db, &user_id, &recommendations).await?;
    }

    Ok(Json(json!({
        "user_id": user_id,
        "recommendations": recommendations,
        "count": recommendations.len(),
    })))
}

/// GET /api/recommendations?user_id=...&limit=...
pub async fn list_recommendations(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> ApiResult<Json<serde_json::Value>> {
    let user_id = query
        .user_id
        .filter(|v| !v.is_empty())
        .ok_or_else(|| ApiError::Validation("user_id is required".to_string()))?;
    let limit = query.limit.unwrap_or(DEFAULT_LIMIT);

    let rows = recommendations::list_recommendations(&state.db, &user_id, limit).await?;

    Ok(Json(json!({ "recommendations": rows, "count": rows.len() })))
}

/// Build recommendation routes
pub fn recommendation_routes() -> Router<AppState> {
    Router::new().route(
        "/api/recommendations",
        get(list_recommendations).post(generate_recommendations),
    )
}
