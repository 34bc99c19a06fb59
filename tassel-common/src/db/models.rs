//! Database models

use serde::{Deserialize, Serialize};

/// Registered account.
///
/// `password_hash`/`password_salt` never leave the server; they are skipped
/// during serialization so a `User` can be returned from API handlers
/// directly.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub id: i64,
    pub user_id: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    #[serde(skip_serializing)]
    pub password_salt: String,
    pub name: String,
    pub major: Option<String>,
    pub year: Option<i64>,
    pub interests: Option<String>,
    pub academic_performance: Option<f64>,
    /// 0 until the one-time profile-completion flow finishes
    pub onboarded: i64,
    pub created_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Session {
    pub id: String,
    pub user_id: String,
    pub expires_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Student {
    pub id: i64,
    pub user_id: String,
    pub name: String,
    pub email: Option<String>,
    pub major: Option<String>,
    pub year: Option<i64>,
    pub created_at: String,
}

/// One rating per (user_id, item_id); writes replace the prior value
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct UserRating {
    pub id: i64,
    pub user_id: String,
    pub item_id: String,
    pub rating: f64,
    pub created_at: String,
}

/// Persisted recommendation row. Append-only: repeated generation calls
/// accumulate rows and retrieval returns the most recent N.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct StoredRecommendation {
    pub id: i64,
    pub user_id: String,
    pub item_id: String,
    pub course_id: Option<String>,
    pub title: String,
    pub description: Option<String>,
    pub url: Option<String>,
    pub category: Option<String>,
    pub difficulty: Option<String>,
    pub predicted_rating: Option<f64>,
    pub avg_rating: Option<f64>,
    pub num_ratings: Option<i64>,
    pub confidence: Option<f64>,
    pub source: Option<String>,
    pub created_at: String,
}

/// Aggregate rating statistics for one item
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct RatingStats {
    pub total_ratings: i64,
    pub avg_rating: Option<f64>,
    pub max_rating: Option<f64>,
    pub min_rating: Option<f64>,
}
