//! Per-user course rating endpoints

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;

use tassel_common::db::ratings;

use crate::{ApiError, ApiResult, AppState};

#[derive(Debug, Deserialize)]
pub struct SubmitRatingRequest {
    pub user_id: Option<String>,
    pub item_id: Option<String>,
    pub rating: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub struct UserRatingsQuery {
    pub user_id: Option<String>,
}

/// POST /api/ratings
///
/// Stores a rating; a repeat submission for the same (user, item) pair
/// replaces the prior value.
pub async fn submit_rating(
    State(state): State<AppState>,
    Json(req): Json<SubmitRatingRequest>,
) -> ApiResult<Json<serde_json::Value>> {
    let (Some(user_id), Some(item_id), Some(rating)) = (req.user_id, req.item_id, req.rating)
    else {
        return Err(ApiError::Validation(
            "user_id, item_id, and rating are required".to_string(),
        ));
    };

    if !(1.0..=5.0).contains(&rating) {
        return Err(ApiError::Validation(
            "Rating must be between 1 and 5".to_string(),
        ));
    }

    ratings::save_rating(&state.db, &user_id, &item_id, rating).await?;

    Ok(Json(json!({ "success": true })))
}

/// GET /api/ratings?user_id=...
pub async fn list_ratings(
    State(state): State<AppState>,
    Query(query): Query<UserRatingsQuery>,
) -> ApiResult<Json<serde_json::Value>> {
    let user_id = query
        .user_id
        .filter(|v| !v.is_empty())
        .ok_or_else(|| ApiError::Validation("user_id is required".to_string()))?;

    let ratings = ratings::list_user_ratings(&state.db, &user_id).await?;

    Ok(Json(json!({ "ratings": ratings, "count": ratings.len() })))
}

/// Build rating routes
pub fn rating_routes() -> Router<AppState> {
    Router::new().route("/api/ratings", get(list_ratings).post(submit_rating))
}
