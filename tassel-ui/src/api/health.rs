//! Health check endpoint

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use chrono::Utc;
use serde::Serialize;

use crate::AppState;

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub module: String,
    pub version: String,
    /// Seconds since service started
    pub uptime_seconds: u64,
    /// "connected" or "disconnected"
    pub database: String,
}

/// GET /health
///
/// Health check endpoint for monitoring. Probes the database with a
/// trivial query; does NOT require authentication.
pub async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let uptime = Utc::now().signed_duration_since(state.startup_time);
    let uptime_seconds = uptime.num_seconds().max(0) as u64;

    let db_ok = sqlx::query_scalar::<_, i64>("SELECT 1")
        .fetch_one(&state.db)
        .await
        .is_ok();

    let (status_code, status, database) = if db_ok {
        (StatusCode::OK, "ok", "connected")
    } else {
        (StatusCode::INTERNAL_SERVER_ERROR, "error", "disconnected")
    };

    (
        status_code,
        Json(HealthResponse {
            status: status.to_string(),
            module: "tassel-ui".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            uptime_seconds,
            database: database.to_string(),
        }),
    )
}

/// Build health check routes
pub fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
