//! Request/response types shared between the web module and the store layer

use serde::{Deserialize, Serialize};

/// A single recommendation as returned by the scoring service.
///
/// Only `item_id` and `title` are guaranteed; everything else is
/// best-effort and passed through (or persisted) as-is.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recommendation {
    pub item_id: String,
    pub title: String,
    pub course_id: Option<String>,
    pub description: Option<String>,
    pub url: Option<String>,
    pub category: Option<String>,
    pub difficulty: Option<String>,
    pub predicted_rating: Option<f64>,
    pub avg_rating: Option<f64>,
    pub num_ratings: Option<i64>,
    /// Service-supplied strength score in [0, 1], passed through unmodified
    pub confidence: Option<f64>,
    pub source: Option<String>,
}

/// Profile payload posted to the scoring service
#[derive(Debug, Clone, Serialize)]
pub struct RecommendRequest {
    pub user_id: String,
    pub major: String,
    pub interests: String,
    pub year: i64,
    pub gpa: f64,
    pub top_n: i64,
}

/// Scoring service response for POST /recommend
#[derive(Debug, Clone, Deserialize)]
pub struct RecommendResponse {
    #[serde(default)]
    pub recommendations: Vec<Recommendation>,
    pub count: Option<i64>,
}

/// Scoring service response for GET /items/popular
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PopularResponse {
    #[serde(default)]
    pub items: Vec<Recommendation>,
    pub count: Option<i64>,
}

/// Scoring service response for GET /health
#[derive(Debug, Clone, Deserialize)]
pub struct MlHealthResponse {
    pub status: String,
    #[serde(default)]
    pub model_loaded: bool,
}

/// Partial profile update; absent fields are left untouched.
///
/// `gpa` is an accepted alias for `academic_performance` — when both are
/// present the explicit field wins.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub major: Option<String>,
    pub year: Option<i64>,
    pub interests: Option<String>,
    pub gpa: Option<f64>,
    #[serde(alias = "academicPerformance")]
    pub academic_performance: Option<f64>,
    pub onboarded: Option<bool>,
}
