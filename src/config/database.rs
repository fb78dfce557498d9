//! Database configuration module.
//!
//! Handles the `SQLite` location, connection setup, and table creation using
//! `SeaORM`. Tables are generated from the entity definitions with
//! `Schema::create_table_from_entity`, so the schema always matches the Rust
//! models without hand-written SQL.

use crate::entities::Account;
use crate::errors::Result;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Schema};
use std::path::{Path, PathBuf};
use tracing::info;

/// Location of the database file when `DATABASE_PATH` is not set.
pub const DEFAULT_DATABASE_PATH: &str = "data/database.sqlite";

/// Gets the database file path from `DATABASE_PATH`, or the default path.
#[must_use]
pub fn get_database_path() -> PathBuf {
    std::env::var("DATABASE_PATH")
        .map_or_else(|_| PathBuf::from(DEFAULT_DATABASE_PATH), PathBuf::from)
}

/// Builds the `SQLite` connection URL for a database file.
///
/// `mode=rwc` makes `SQLite` create the file on first start.
#[must_use]
pub fn database_url(path: &Path) -> String {
    format!("sqlite://{}?mode=rwc", path.display())
}

/// Opens the database at `DATABASE_PATH`, creating its parent directory if needed.
pub async fn create_connection() -> Result<DatabaseConnection> {
    let path = get_database_path();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    info!("Connecting to database at {}", path.display());
    Database::connect(database_url(&path))
        .await
        .map_err(Into::into)
}

/// Creates all tables that don't exist yet from the entity definitions.
pub async fn create_tables<C>(db: &C) -> Result<()>
where
    C: ConnectionTrait,
{
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    let mut account_table = schema.create_table_from_entity(Account);
    account_table.if_not_exists();

    db.execute(builder.build(&account_table)).await?;

    Ok(())
}
