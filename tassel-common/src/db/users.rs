//! Account store operations

use chrono::Utc;
use rand::RngCore;
use sqlx::SqlitePool;

use crate::api::auth::{generate_salt, hash_password};
use crate::api::types::ProfileUpdate;
use crate::db::models::User;
use crate::{Error, Result};

/// Generate an external account id: `U{epoch_ms}-{8 hex chars}`
fn generate_user_id() -> String {
    let mut bytes = [0u8; 4];
    rand::thread_rng().fill_bytes(&mut bytes);
    let suffix: String = bytes.iter().map(|b| format!("{:02x}", b)).collect();
    format!("U{}-{}", Utc::now().timestamp_millis(), suffix)
}

/// Create an account
///
/// Fails with [`Error::Conflict`] when the email is already registered.
pub async fn create_user(
    pool: &SqlitePool,
    email: &str,
    password: &str,
    name: &str,
    major: Option<&str>,
    year: Option<i64>,
) -> Result<User> {
    let existing: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE email = ?)")
        .bind(email)
        .fetch_one(pool)
        .await?;

    if existing {
        return Err(Error::Conflict("Email already registered".to_string()));
    }

    let salt = generate_salt();
    let password_hash = hash_password(password, &salt);
    let user_id = generate_user_id();

    sqlx::query(
        r#"
        INSERT INTO users (user_id, email, password_hash, password_salt, name, major, year)
        VALUES (?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&user_id)
    .bind(email)
    .bind(&password_hash)
    .bind(&salt)
    .bind(name)
    .bind(major)
    .bind(year)
    .execute(pool)
    .await?;

    let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE user_id = ?")
        .bind(&user_id)
        .fetch_one(pool)
        .await?;

    Ok(user)
}

/// Look up an account by email (login path)
pub async fn find_user_by_email(pool: &SqlitePool, email: &str) -> Result<Option<User>> {
    let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = ?")
        .bind(email)
        .fetch_optional(pool)
        .await?;

    Ok(user)
}

/// Look up an account by external id
pub async fn get_user(pool: &SqlitePool, user_id: &str) -> Result<Option<User>> {
    let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE user_id = ?")
        .bind(user_id)
        .fetch_optional(pool)
        .await?;

    Ok(user)
}

/// Apply a partial profile update; absent fields are left untouched.
///
/// An update with no fields set is a no-op.
pub async fn update_profile(
    pool: &SqlitePool,
    user_id: &str,
    updates: &ProfileUpdate,
) -> Result<()> {
    let mut fields: Vec<&str> = Vec::new();

    if updates.name.is_some() {
        fields.push("name = ?");
    }
    if updates.major.is_some() {
        fields.push("major = ?");
    }
    if updates.year.is_some() {
        fields.push("year = ?");
    }
    if updates.interests.is_some() {
        fields.push("interests = ?");
    }
    // `gpa` is an alias; the explicit field wins when both are present
    let academic_performance = updates.academic_performance.or(updates.gpa);
    if academic_performance.is_some() {
        fields.push("academic_performance = ?");
    }
    if updates.onboarded.is_some() {
        fields.push("onboarded = ?");
    }

    if fields.is_empty() {
        return Ok(());
    }

    let sql = format!("UPDATE users SET {} WHERE user_id = ?", fields.join(", "));
    let mut query = sqlx::query(&sql);

    // Binds must follow the order the fields were pushed above
    if let Some(v) = &updates.name {
        query = query.bind(v);
    }
    if let Some(v) = &updates.major {
        query = query.bind(v);
    }
    if let Some(v) = updates.year {
        query = query.bind(v);
    }
    if let Some(v) = &updates.interests {
        query = query.bind(v);
    }
    if let Some(v) = academic_performance {
        query = query.bind(v);
    }
    if let Some(v) = updates.onboarded {
        query = query.bind(if v { 1i64 } else { 0i64 });
    }

    query.bind(user_id).execute(pool).await?;

    Ok(())
}
