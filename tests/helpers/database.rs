use sqlx::SqlitePool;

/// Create an in-memory SQLite database for testing
///
/// Creates a fresh in-memory database with migrations applied.
/// Each call creates a completely isolated database instance.
pub async fn setup_test_db() -> SqlitePool {
    reforge::adapters::sqlite::create_migrated_test_pool()
        .await
        .expect("failed to create test database")
}

/// Create a file-backed test database in a temporary directory
///
/// Unlike the in-memory pool, this supports multiple concurrent
/// connections, which the concurrency tests need.
#[allow(dead_code)]
pub async fn setup_file_test_db(dir: &tempfile::TempDir) -> SqlitePool {
    let db_path = dir.path().join("test.db");
    let url = format!("sqlite:{}", db_path.display());
    reforge::adapters::sqlite::initialize_database(&url)
        .await
        .expect("failed to create file-backed test database")
}

/// Teardown test database
///
/// Closes the connection pool and cleans up resources.
pub async fn teardown_test_db(pool: SqlitePool) {
    pool.close().await;
}
