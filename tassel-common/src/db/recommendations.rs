//! Recommendation store operations
//!
//! Rows are append-only: every generation call inserts its full result set
//! and retrieval returns the most recent N. Historical rows are not
//! deduplicated across calls.

use sqlx::SqlitePool;

use crate::api::types::Recommendation;
use crate::db::models::StoredRecommendation;
use crate::Result;

/// Persist one generation call's recommendations for a user.
///
/// Runs inside a single transaction: a failure on any row leaves no
/// partial row set behind.
pub async fn save_recommendations(
    pool: &SqlitePool,
    user_id: &str,
    recommendations: &[Recommendation],
) -> Result<()> {
    let mut tx = pool.begin().await?;

    for rec in recommendations {
        sqlx::query(
            r#"
            INSERT INTO recommendations
                (user_id, item_id, course_id, title, description, url, category, difficulty,
                 predicted_rating, avg_rating, num_ratings, confidence, source)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(user_id)
        .bind(&rec.item_id)
        .bind(&rec.course_id)
        .bind(&rec.title)
        .bind(&rec.description)
        .bind(&rec.url)
        .bind(&rec.category)
        .bind(&rec.difficulty)
        .bind(rec.predicted_rating)
        .bind(rec.avg_rating)
        .bind(rec.num_ratings)
        .bind(rec.confidence)
        .bind(&rec.source)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;

    Ok(())
}

/// Most recent stored recommendations for a user, newest first
pub async fn list_recommendations(
    pool: &SqlitePool,
    user_id: &str,
    limit: i64,
) -> Result<Vec<StoredRecommendation>> {
    let rows = sqlx::query_as::<_, StoredRecommendation>(
        "SELECT * FROM recommendations WHERE user_id = ? ORDER BY created_at DESC, id DESC LIMIT ?",
    )
    .bind(user_id)
    .bind(limit)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Best stored course record for a course id, used as the fallback when the
/// review dataset has no entry for it. Matches either id column.
pub async fn find_course_record(
    pool: &SqlitePool,
    course_id: &str,
) -> Result<Option<StoredRecommendation>> {
    let row = sqlx::query_as::<_, StoredRecommendation>(
        r#"
        SELECT * FROM recommendations
        WHERE item_id = ? OR course_id = ?
        ORDER BY created_at DESC, id DESC
        LIMIT 1
        "#,
    )
    .bind(course_id)
    .bind(course_id)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}
