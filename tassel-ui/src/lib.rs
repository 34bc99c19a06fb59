//! tassel-ui library - course recommendation web module
//!
//! Serves the student-facing HTTP API: accounts and sessions, profiles,
//! ratings, recommendation generation/retrieval, and course detail pages
//! backed by the bundled review dataset.

use std::sync::Arc;

use axum::Router;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tower_http::trace::TraceLayer;

pub mod api;
pub mod catalog;
pub mod error;
pub mod services;

pub use crate::error::{ApiError, ApiResult};
use crate::catalog::CourseCatalog;
use crate::services::MlClient;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: SqlitePool,
    /// Derived course catalog (built lazily from the review dataset)
    pub catalog: Arc<CourseCatalog>,
    /// Recommendation scoring service client
    pub ml: Arc<MlClient>,
    /// Session lifetime for newly issued sessions
    pub session_timeout_secs: i64,
    /// Service startup timestamp for uptime tracking
    pub startup_time: DateTime<Utc>,
}

impl AppState {
    pub fn new(
        db: SqlitePool,
        catalog: CourseCatalog,
        ml: MlClient,
        session_timeout_secs: i64,
    ) -> Self {
        Self {
            db,
            catalog: Arc::new(catalog),
            ml: Arc::new(ml),
            session_timeout_secs,
            startup_time: Utc::now(),
        }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(api::health_routes())
        .merge(api::auth_routes())
        .merge(api::student_routes())
        .merge(api::rating_routes())
        .merge(api::recommendation_routes())
        .merge(api::popular_routes())
        .merge(api::course_routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
