//! Test utilities for database testing.
//!
//! Provides an in-memory SQLite database with every entity table
//! synchronized.

use anyhow::Result;
use roster::server::{AppState, create_app};
use sea_orm::{Database, DatabaseConnection};

/// Sets up an in-memory SQLite database with all tables synchronized.
///
/// SeaORM limits `sqlite::memory:` to a single pooled connection, so every
/// test sees one consistent database.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = Database::connect("sqlite::memory:").await?;
    roster::schema::sync_all(&db).await?;
    Ok(db)
}

/// Builds the full application router over a fresh test database.
#[allow(dead_code)]
pub async fn setup_test_app() -> Result<(axum::Router, DatabaseConnection)> {
    let db = setup_test_db().await?;
    let app = create_app(AppState { db: db.clone() });
    Ok((app, db))
}
