use crate::{
    Error,
    account::{Account, AccountId, NewAccount},
};
use async_trait::async_trait;

/// Repository for account data access
///
/// Uniqueness of email and username is enforced by the implementation
/// itself (constraint or transactional check-and-insert), never by a
/// check-then-write in a caller: under concurrent creates with the same
/// email exactly one succeeds and the rest observe a conflict.
#[async_trait]
pub trait AccountRepository: Send + Sync + 'static {
    /// Create a new account. Surfaces uniqueness violations as
    /// [`StorageError::Conflict`](crate::error::StorageError).
    async fn create(&self, account: NewAccount) -> Result<Account, Error>;

    /// Find an account by ID
    async fn find_by_id(&self, id: &AccountId) -> Result<Option<Account>, Error>;

    /// Find an account by email
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, Error>;

    /// Update an existing account. Surfaces uniqueness violations like
    /// `create` does.
    async fn update(&self, account: &Account) -> Result<Account, Error>;

    /// Delete an account and all of its file-reference rows as one
    /// transactional operation.
    async fn delete(&self, id: &AccountId) -> Result<(), Error>;

    /// List all accounts
    async fn list(&self) -> Result<Vec<Account>, Error>;
}
