//! Session and password primitives
//!
//! # Architecture
//!
//! - Passwords are stored as salted SHA-256: `hex(sha256(salt || password))`
//!   with a random 16-byte hex salt per user.
//! - Session tokens are 32 random bytes, hex encoded (64 characters).
//! - Session rows carry their expiry; expired rows are deleted lazily when
//!   a lookup encounters them. There is no background sweeper.
//!
//! This module contains only pure functions and database operations.
//! No HTTP framework dependencies (Axum, cookies, etc.) - those live in the
//! web module.

use rand::RngCore;
use sha2::{Digest, Sha256};
use sqlx::SqlitePool;

use crate::db::models::User;
use crate::Result;

// ========================================
// Password Hashing
// ========================================

/// Generate a random hex-encoded password salt (16 bytes, 32 hex chars)
pub fn generate_salt() -> String {
    let mut bytes = [0u8; 16];
    rand::thread_rng().fill_bytes(&mut bytes);
    to_hex(&bytes)
}

/// Hash a password with the given salt
///
/// # Examples
///
/// ```
/// use tassel_common::api::auth::{generate_salt, hash_password, verify_password};
///
/// let salt = generate_salt();
/// let hash = hash_password("hunter2", &salt);
/// assert_eq!(hash.len(), 64); // SHA-256 is 64 hex chars
/// assert!(verify_password("hunter2", &salt, &hash));
/// assert!(!verify_password("hunter3", &salt, &hash));
/// ```
pub fn hash_password(password: &str, salt: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(password.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Check a password attempt against a stored salt and hash
pub fn verify_password(password: &str, salt: &str, expected_hash: &str) -> bool {
    hash_password(password, salt) == expected_hash
}

// ========================================
// Session Tokens
// ========================================

/// Generate an opaque session token (32 random bytes, 64 hex chars)
pub fn generate_session_token() -> String {
    let mut bytes = [0u8; 32];
    rand::thread_rng().fill_bytes(&mut bytes);
    to_hex(&bytes)
}

fn to_hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

// ========================================
// Session Store Operations
// ========================================

/// Create a session row for the user and return its token
///
/// The expiry is computed inside SQLite so it compares consistently with
/// `datetime('now')` on lookup.
pub async fn create_session(
    pool: &SqlitePool,
    user_id: &str,
    timeout_secs: i64,
) -> Result<String> {
    let token = generate_session_token();
    let offset = format!("{:+} seconds", timeout_secs);

    sqlx::query("INSERT INTO sessions (id, user_id, expires_at) VALUES (?, ?, datetime('now', ?))")
        .bind(&token)
        .bind(user_id)
        .bind(&offset)
        .execute(pool)
        .await?;

    Ok(token)
}

/// Resolve a session token to its user
///
/// Returns `None` for unknown or expired tokens. An expired row is removed
/// as a side effect so the table does not accumulate stale sessions.
pub async fn load_session_user(pool: &SqlitePool, session_id: &str) -> Result<Option<User>> {
    let user = sqlx::query_as::<_, User>(
        r#"
        SELECT u.*
        FROM sessions s
        JOIN users u ON s.user_id = u.user_id
        WHERE s.id = ? AND s.expires_at > datetime('now')
        "#,
    )
    .bind(session_id)
    .fetch_optional(pool)
    .await?;

    if user.is_none() {
        // Unknown token is a no-op; expired token gets cleaned up here
        sqlx::query("DELETE FROM sessions WHERE id = ?")
            .bind(session_id)
            .execute(pool)
            .await?;
    }

    Ok(user)
}

/// Delete a session row (logout)
pub async fn delete_session(pool: &SqlitePool, session_id: &str) -> Result<()> {
    sqlx::query("DELETE FROM sessions WHERE id = ?")
        .bind(session_id)
        .execute(pool)
        .await?;
    Ok(())
}

// ========================================
// Tests
// ========================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_salt_is_random_hex() {
        let a = generate_salt();
        let b = generate_salt();
        assert_eq!(a.len(), 32);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(a, b);
    }

    #[test]
    fn test_hash_is_deterministic_per_salt() {
        let salt = generate_salt();
        let h1 = hash_password("secret", &salt);
        let h2 = hash_password("secret", &salt);
        assert_eq!(h1, h2);

        // Different salt produces a different hash for the same password
        let other_salt = generate_salt();
        assert_ne!(h1, hash_password("secret", &other_salt));
    }

    #[test]
    fn test_verify_rejects_wrong_password() {
        let salt = generate_salt();
        let hash = hash_password("correct horse", &salt);
        assert!(verify_password("correct horse", &salt, &hash));
        assert!(!verify_password("battery staple", &salt, &hash));
    }

    #[test]
    fn test_session_token_length() {
        let token = generate_session_token();
        assert_eq!(token.len(), 64);
        assert!(token.chars().all(|c| c.is_ascii_hexdigit()));
    }
}
