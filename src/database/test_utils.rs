#[cfg(test)]
use sea_orm::{Database, DatabaseConnection};

#[cfg(test)]
pub async fn setup_test_db() -> DatabaseConnection {
    // Create an in-memory SQLite database for testing
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to connect to test database");

    super::setup_database(&db)
        .await
        .expect("Failed to run migrations");

    db
}
