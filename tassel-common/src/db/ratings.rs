//! Per-user course rating store operations

use sqlx::SqlitePool;

use crate::db::models::{RatingStats, UserRating};
use crate::Result;

/// Store a rating; a second write for the same (user_id, item_id) pair
/// replaces the prior value instead of adding a row.
pub async fn save_rating(
    pool: &SqlitePool,
    user_id: &str,
    item_id: &str,
    rating: f64,
) -> Result<()> {
    sqlx::query("INSERT OR REPLACE INTO user_ratings (user_id, item_id, rating) VALUES (?, ?, ?)")
        .bind(user_id)
        .bind(item_id)
        .bind(rating)
        .execute(pool)
        .await?;

    Ok(())
}

/// All ratings submitted by one user
pub async fn list_user_ratings(pool: &SqlitePool, user_id: &str) -> Result<Vec<UserRating>> {
    let ratings = sqlx::query_as::<_, UserRating>("SELECT * FROM user_ratings WHERE user_id = ?")
        .bind(user_id)
        .fetch_all(pool)
        .await?;

    Ok(ratings)
}

/// Aggregate rating statistics for one item
///
/// `avg`/`max`/`min` are `None` when the item has no ratings yet; callers
/// substitute their own defaults.
pub async fn course_rating_stats(pool: &SqlitePool, item_id: &str) -> Result<RatingStats> {
    let row: (i64, Option<f64>, Option<f64>, Option<f64>) = sqlx::query_as(
        r#"
        SELECT COUNT(*), AVG(rating), MAX(rating), MIN(rating)
        FROM user_ratings
        WHERE item_id = ?
        "#,
    )
    .bind(item_id)
    .fetch_one(pool)
    .await?;

    Ok(RatingStats {
        total_ratings: row.0,
        avg_rating: row.1,
        max_rating: row.2,
        min_rating: row.3,
    })
}
