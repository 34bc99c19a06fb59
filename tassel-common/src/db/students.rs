//! Student profile store operations

use sqlx::SqlitePool;

use crate::db::models::Student;
use crate::{Error, Result};

/// Create a student profile
///
/// Fails with [`Error::Conflict`] when the user_id is already taken.
pub async fn create_student(
    pool: &SqlitePool,
    user_id: &str,
    name: &str,
    email: Option<&str>,
    major: Option<&str>,
    year: Option<i64>,
) -> Result<Student> {
    let existing: bool =
        sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM students WHERE user_id = ?)")
            .bind(user_id)
            .fetch_one(pool)
            .await?;

    if existing {
        return Err(Error::Conflict(
            "Student with this user_id already exists".to_string(),
        ));
    }

    sqlx::query("INSERT INTO students (user_id, name, email, major, year) VALUES (?, ?, ?, ?, ?)")
        .bind(user_id)
        .bind(name)
        .bind(email)
        .bind(major)
        .bind(year)
        .execute(pool)
        .await?;

    let student = sqlx::query_as::<_, Student>("SELECT * FROM students WHERE user_id = ?")
        .bind(user_id)
        .fetch_one(pool)
        .await?;

    Ok(student)
}

/// Look up a student profile
pub async fn get_student(pool: &SqlitePool, user_id: &str) -> Result<Option<Student>> {
    let student = sqlx::query_as::<_, Student>("SELECT * FROM students WHERE user_id = ?")
        .bind(user_id)
        .fetch_optional(pool)
        .await?;

    Ok(student)
}

/// All student profiles, newest first
pub async fn list_students(pool: &SqlitePool) -> Result<Vec<Student>> {
    let students =
        sqlx::query_as::<_, Student>("SELECT * FROM students ORDER BY created_at DESC, id DESC")
            .fetch_all(pool)
            .await?;

    Ok(students)
}
