//! Schema migrations
//!
//! Migrations are applied in version order and recorded in a bookkeeping
//! table so re-running `migrate()` is a no-op. Each migration is a single
//! statement executed inside its own transaction together with the
//! bookkeeping insert.

use sqlx::SqlitePool;
use warden_core::{Error, error::StorageError};

const MIGRATIONS_TABLE: &str = "_warden_migrations";

const MIGRATIONS: &[(i64, &str, &str)] = &[
    (
        1,
        "create_accounts_table",
        r#"
        CREATE TABLE IF NOT EXISTS accounts (
            id TEXT PRIMARY KEY,
            username TEXT NOT NULL,
            email TEXT NOT NULL,
            password_hash TEXT,
            created_at INTEGER NOT NULL DEFAULT (unixepoch()),
            updated_at INTEGER NOT NULL DEFAULT (unixepoch()),
            UNIQUE(email),
            UNIQUE(username)
        );"#,
    ),
    (
        2,
        "create_files_table",
        r#"
        CREATE TABLE IF NOT EXISTS files (
            id TEXT PRIMARY KEY,
            account_id TEXT NOT NULL,
            path TEXT NOT NULL,
            created_at INTEGER NOT NULL DEFAULT (unixepoch()),
            FOREIGN KEY (account_id) REFERENCES accounts(id)
        );"#,
    ),
    (
        3,
        "create_files_account_id_index",
        "CREATE INDEX IF NOT EXISTS idx_files_account_id ON files(account_id);",
    ),
];

fn migration_err(e: sqlx::Error) -> Error {
    Error::Storage(StorageError::Migration(e.to_string()))
}

/// Apply all pending migrations.
pub(crate) async fn run(pool: &SqlitePool) -> Result<(), Error> {
    sqlx::query(&format!(
        r#"
        CREATE TABLE IF NOT EXISTS {MIGRATIONS_TABLE} (
            version INTEGER PRIMARY KEY,
            name TEXT NOT NULL,
            applied_at INTEGER NOT NULL DEFAULT (unixepoch())
        );"#
    ))
    .execute(pool)
    .await
    .map_err(migration_err)?;

    for (version, name, sql) in MIGRATIONS {
        let applied: bool = sqlx::query_scalar(&format!(
            "SELECT EXISTS(SELECT 1 FROM {MIGRATIONS_TABLE} WHERE version = ?1)"
        ))
        .bind(version)
        .fetch_one(pool)
        .await
        .map_err(migration_err)?;

        if applied {
            continue;
        }

        tracing::info!("Applying migration {name} ({version})");

        let mut tx = pool.begin().await.map_err(migration_err)?;

        sqlx::query(sql)
            .execute(&mut *tx)
            .await
            .map_err(migration_err)?;

        sqlx::query(&format!(
            "INSERT INTO {MIGRATIONS_TABLE} (version, name) VALUES (?1, ?2)"
        ))
        .bind(version)
        .bind(name)
        .execute(&mut *tx)
        .await
        .map_err(migration_err)?;

        tx.commit().await.map_err(migration_err)?;
    }

    Ok(())
}
