//! Tests for database initialization and default settings

use std::path::PathBuf;
use tassel_common::db::init_database;

fn temp_db_path(dir: &tempfile::TempDir) -> PathBuf {
    dir.path().join("tassel.db")
}

#[tokio::test]
async fn test_database_creation_when_missing() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = temp_db_path(&dir);

    let result = init_database(&db_path).await;
    assert!(result.is_ok(), "Database initialization failed: {:?}", result.err());

    // Verify database file was created
    assert!(db_path.exists(), "Database file was not created");
}

#[tokio::test]
async fn test_database_opens_existing() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = temp_db_path(&dir);

    // Create database first time
    let pool1 = init_database(&db_path).await;
    assert!(pool1.is_ok());
    drop(pool1);

    // Open database second time (should succeed)
    let pool2 = init_database(&db_path).await;
    assert!(pool2.is_ok(), "Failed to open existing database: {:?}", pool2.err());
}

#[tokio::test]
async fn test_default_settings_initialized() {
    let dir = tempfile::tempdir().unwrap();
    let pool = init_database(&temp_db_path(&dir)).await.unwrap();

    let test_cases = vec![
        ("http_bind_addr", "127.0.0.1:5730"),
        ("session_timeout_seconds", "604800"),
        ("ml_api_url", "http://localhost:5000"),
        ("ml_request_timeout_ms", "30000"),
        ("reviews_dataset_path", ""),
    ];

    for (key, expected_value) in test_cases {
        let value: Option<String> = sqlx::query_scalar("SELECT value FROM settings WHERE key = ?")
            .bind(key)
            .fetch_optional(&pool)
            .await
            .unwrap();

        assert!(value.is_some(), "Setting '{}' not initialized", key);
        assert_eq!(
            value.unwrap(),
            expected_value,
            "Setting '{}' has wrong default value",
            key
        );
    }
}

#[tokio::test]
async fn test_idempotent_initialization() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = temp_db_path(&dir);

    let pool1 = init_database(&db_path).await.unwrap();
    let count1: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM settings")
        .fetch_one(&pool1)
        .await
        .unwrap();
    drop(pool1);

    let pool2 = init_database(&db_path).await.unwrap();
    let count2: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM settings")
        .fetch_one(&pool2)
        .await
        .unwrap();

    // Should have same number of settings (idempotent)
    assert_eq!(count1, count2, "Settings count changed on second initialization");
}

#[tokio::test]
async fn test_null_value_handling() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = temp_db_path(&dir);

    let pool = init_database(&db_path).await.unwrap();

    // Manually set a setting to NULL
    sqlx::query("UPDATE settings SET value = NULL WHERE key = 'ml_api_url'")
        .execute(&pool)
        .await
        .unwrap();
    drop(pool);

    // Re-initialize database (should reset NULL to default)
    let pool2 = init_database(&db_path).await.unwrap();

    let value: Option<String> =
        sqlx::query_scalar("SELECT value FROM settings WHERE key = 'ml_api_url'")
            .fetch_one(&pool2)
            .await
            .unwrap();

    assert_eq!(
        value.as_deref(),
        Some("http://localhost:5000"),
        "NULL value was not reset to default"
    );
}

#[tokio::test]
async fn test_foreign_keys_enabled() {
    let dir = tempfile::tempdir().unwrap();
    let pool = init_database(&temp_db_path(&dir)).await.unwrap();

    let fk_enabled: i64 = sqlx::query_scalar("PRAGMA foreign_keys")
        .fetch_one(&pool)
        .await
        .unwrap();

    assert_eq!(fk_enabled, 1, "Foreign keys should be enabled");
}

#[tokio::test]
async fn test_busy_timeout_set() {
    let dir = tempfile::tempdir().unwrap();
    let pool = init_database(&temp_db_path(&dir)).await.unwrap();

    let timeout: i64 = sqlx::query_scalar("PRAGMA busy_timeout")
        .fetch_one(&pool)
        .await
        .unwrap();

    assert_eq!(timeout, 5000, "Busy timeout should be 5000ms");
}

#[tokio::test]
async fn test_concurrent_initialization() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = temp_db_path(&dir);

    // Spawn multiple concurrent initialization tasks
    let mut handles = vec![];
    for _ in 0..5 {
        let db_path_clone = db_path.clone();
        handles.push(tokio::spawn(async move { init_database(&db_path_clone).await }));
    }

    let mut results = vec![];
    for handle in handles {
        results.push(handle.await.unwrap());
    }

    for result in &results {
        assert!(result.is_ok(), "Concurrent initialization failed: {:?}", result);
    }

    // Verify database is in consistent state
    let pool = results[0].as_ref().unwrap();
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM settings")
        .fetch_one(pool)
        .await
        .unwrap();

    assert!(count >= 5, "Settings not properly initialized after concurrent access");
}
