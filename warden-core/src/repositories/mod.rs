//! Repository traits for the data access layer
//!
//! This module defines the repository interfaces that services use to
//! interact with storage.
//!
//! # Trait Hierarchy
//!
//! The repository system uses a composable trait hierarchy:
//!
//! - Individual `*Repository` traits define the operations for each data domain
//! - Individual `*RepositoryProvider` traits provide access to each repository type
//! - [`RepositoryProvider`] is a supertrait combining all provider traits plus
//!   lifecycle methods
//!
//! Storage backends implement the repositories, then expose them through a
//! single provider type.

pub mod account;
pub mod adapter;
pub mod credential;
pub mod file;
#[cfg(test)]
pub(crate) mod mock;

pub use account::AccountRepository;
pub use adapter::{AccountRepositoryAdapter, CredentialRepositoryAdapter, FileRepositoryAdapter};
pub use credential::CredentialRepository;
pub use file::FileRepository;

use async_trait::async_trait;

use crate::Error;

/// Provider trait for account repository access.
pub trait AccountRepositoryProvider: Send + Sync + 'static {
    /// The account repository implementation type
    type AccountRepo: AccountRepository;

    /// Get the account repository
    fn account(&self) -> &Self::AccountRepo;
}

/// Provider trait for credential repository access.
pub trait CredentialRepositoryProvider: Send + Sync + 'static {
    /// The credential repository implementation type
    type CredentialRepo: CredentialRepository;

    /// Get the credential repository
    fn credential(&self) -> &Self::CredentialRepo;
}

/// Provider trait for file-reference repository access.
pub trait FileRepositoryProvider: Send + Sync + 'static {
    /// The file repository implementation type
    type FileRepo: FileRepository;

    /// Get the file repository
    fn file(&self) -> &Self::FileRepo;
}

/// Provider trait that storage implementations must implement to provide all
/// repositories, plus lifecycle methods for migrations and health checks.
#[async_trait]
pub trait RepositoryProvider:
    AccountRepositoryProvider + CredentialRepositoryProvider + FileRepositoryProvider
{
    /// Run migrations for all repositories
    async fn migrate(&self) -> Result<(), Error>;

    /// Health check for all repositories
    async fn health_check(&self) -> Result<(), Error>;
}
