//! SQLite storage backend for warden
//!
//! Implements the `warden-core` repository traits on top of `sqlx`. The
//! schema enforces the uniqueness invariants itself (UNIQUE constraints on
//! email and username), so concurrent creates race inside the database and
//! exactly one wins. Timestamps are stored as unix seconds.

mod migrations;
pub mod repositories;

pub use repositories::{
    SqliteAccountRepository, SqliteCredentialRepository, SqliteFileRepository,
    SqliteRepositoryProvider,
};

use chrono::DateTime;
use warden_core::{Account, AccountId, Error, FileId, FileRef, error::StorageError};

/// Map an sqlx error to the core error taxonomy. Uniqueness violations
/// become `Conflict` so services can distinguish them from plain database
/// failures.
pub(crate) fn map_sqlx_err(e: sqlx::Error) -> Error {
    match e.as_database_error() {
        Some(db) if db.is_unique_violation() => {
            Error::Storage(StorageError::Conflict(db.message().to_string()))
        }
        _ => Error::Storage(StorageError::Database(e.to_string())),
    }
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub(crate) struct SqliteAccount {
    id: String,
    username: String,
    email: String,
    created_at: i64,
    updated_at: i64,
}

impl From<SqliteAccount> for Account {
    fn from(account: SqliteAccount) -> Self {
        Account {
            id: AccountId::new(&account.id),
            username: account.username,
            email: account.email,
            created_at: DateTime::from_timestamp(account.created_at, 0)
                .expect("invalid timestamp"),
            updated_at: DateTime::from_timestamp(account.updated_at, 0)
                .expect("invalid timestamp"),
        }
    }
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub(crate) struct SqliteFileRef {
    id: String,
    account_id: String,
    path: String,
    created_at: i64,
}

impl From<SqliteFileRef> for FileRef {
    fn from(file: SqliteFileRef) -> Self {
        FileRef {
            id: FileId::new(&file.id),
            account_id: AccountId::new(&file.account_id),
            path: file.path,
            created_at: DateTime::from_timestamp(file.created_at, 0).expect("invalid timestamp"),
        }
    }
}
