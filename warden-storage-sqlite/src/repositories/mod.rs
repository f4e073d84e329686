//! Repository implementations for SQLite storage

pub mod account;
pub mod credential;
pub mod file;

pub use account::SqliteAccountRepository;
pub use credential::SqliteCredentialRepository;
pub use file::SqliteFileRepository;

use async_trait::async_trait;
use sqlx::SqlitePool;
use std::sync::Arc;
use warden_core::{
    Error,
    error::StorageError,
    repositories::{
        AccountRepositoryProvider, CredentialRepositoryProvider, FileRepositoryProvider,
        RepositoryProvider,
    },
};

/// Repository provider implementation for SQLite
///
/// Implements all the individual repository provider traits as well as the
/// unified `RepositoryProvider` trait.
pub struct SqliteRepositoryProvider {
    pool: SqlitePool,
    account: Arc<SqliteAccountRepository>,
    credential: Arc<SqliteCredentialRepository>,
    file: Arc<SqliteFileRepository>,
}

impl SqliteRepositoryProvider {
    pub fn new(pool: SqlitePool) -> Self {
        let account = Arc::new(SqliteAccountRepository::new(pool.clone()));
        let credential = Arc::new(SqliteCredentialRepository::new(pool.clone()));
        let file = Arc::new(SqliteFileRepository::new(pool.clone()));

        Self {
            pool,
            account,
            credential,
            file,
        }
    }
}

impl AccountRepositoryProvider for SqliteRepositoryProvider {
    type AccountRepo = SqliteAccountRepository;

    fn account(&self) -> &Self::AccountRepo {
        &self.account
    }
}

impl CredentialRepositoryProvider for SqliteRepositoryProvider {
    type CredentialRepo = SqliteCredentialRepository;

    fn credential(&self) -> &Self::CredentialRepo {
        &self.credential
    }
}

impl FileRepositoryProvider for SqliteRepositoryProvider {
    type FileRepo = SqliteFileRepository;

    fn file(&self) -> &Self::FileRepo {
        &self.file
    }
}

#[async_trait]
impl RepositoryProvider for SqliteRepositoryProvider {
    async fn migrate(&self) -> Result<(), Error> {
        crate::migrations::run(&self.pool).await.map_err(|e| {
            tracing::error!(error = %e, "Failed to run migrations");
            e
        })
    }

    async fn health_check(&self) -> Result<(), Error> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| Error::Storage(StorageError::Database(e.to_string())))?;
        Ok(())
    }
}
