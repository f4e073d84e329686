use crate::{
    Error,
    account::{Account, AccountId, NewAccount},
    error::{AuthError, FileError},
    repositories::{AccountRepository, FileRepository},
    validation::{validate_email, validate_username},
};
use std::sync::Arc;

/// Service for account lifecycle operations
///
/// Owns the cascading delete: an account and the files it owns are removed
/// as one all-or-nothing operation.
pub struct AccountService<A: AccountRepository, F: FileRepository> {
    accounts: Arc<A>,
    files: Arc<F>,
}

impl<A: AccountRepository, F: FileRepository> AccountService<A, F> {
    /// Create a new AccountService with the given repositories
    pub fn new(accounts: Arc<A>, files: Arc<F>) -> Self {
        Self { accounts, files }
    }

    /// Create a new account
    ///
    /// Uniqueness of email and username is enforced by the repository; a
    /// violation surfaces as [`AuthError::Conflict`].
    pub async fn create_account(&self, username: &str, email: &str) -> Result<Account, Error> {
        validate_username(username)?;
        validate_email(email)?;

        let new_account = NewAccount::new(username.to_string(), email.to_string());

        match self.accounts.create(new_account).await {
            Ok(account) => {
                tracing::info!(account.id = %account.id, "created account");
                Ok(account)
            }
            Err(e) if e.is_conflict() => {
                tracing::debug!(email = %email, "account already exists");
                Err(AuthError::Conflict.into())
            }
            Err(e) => Err(e),
        }
    }

    /// Get an account by ID
    pub async fn get_account(&self, account_id: &AccountId) -> Result<Option<Account>, Error> {
        self.accounts.find_by_id(account_id).await
    }

    /// Get an account by email
    pub async fn get_account_by_email(&self, email: &str) -> Result<Option<Account>, Error> {
        self.accounts.find_by_email(email).await
    }

    /// List all accounts
    pub async fn list_accounts(&self) -> Result<Vec<Account>, Error> {
        self.accounts.list().await
    }

    /// Update an account's profile fields
    pub async fn update_account(&self, account: &Account) -> Result<Account, Error> {
        validate_username(&account.username)?;
        validate_email(&account.email)?;

        match self.accounts.update(account).await {
            Ok(account) => {
                tracing::info!(account.id = %account.id, "updated account");
                Ok(account)
            }
            Err(e) if e.is_conflict() => Err(AuthError::Conflict.into()),
            Err(e) => Err(e),
        }
    }

    /// Delete an account together with every file it owns
    ///
    /// Owned files are unlinked from the filesystem in insertion order. If
    /// any unlink fails the operation aborts with
    /// [`FileError::PartialFailure`] before any record is touched: the
    /// account row and all file-reference rows remain in place. Files
    /// unlinked before the failure stay unlinked (rollback-free abort). Only
    /// after every unlink succeeds are the rows removed, transactionally,
    /// via [`AccountRepository::delete`].
    pub async fn delete_account(&self, account_id: &AccountId) -> Result<Account, Error> {
        let account = self
            .accounts
            .find_by_id(account_id)
            .await?
            .ok_or(AuthError::NotFound)?;

        let owned = self.files.find_by_owner(account_id).await?;
        let total = owned.len();

        for (removed, file) in owned.iter().enumerate() {
            if let Err(e) = tokio::fs::remove_file(&file.path).await {
                tracing::warn!(
                    account.id = %account_id,
                    file.id = %file.id,
                    file.path = %file.path,
                    error = %e,
                    "aborting account deletion: file removal failed",
                );
                return Err(FileError::PartialFailure(format!(
                    "removing {} failed after {removed} of {total} files: {e}",
                    file.path
                ))
                .into());
            }
        }

        self.accounts.delete(account_id).await?;

        tracing::info!(account.id = %account_id, files = total, "deleted account");

        Ok(account)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::mock::{MockAccountRepository, MockFileRepository, MockStore};
    use crate::{error::StorageError, file::NewFileRef};

    fn service() -> AccountService<MockAccountRepository, MockFileRepository> {
        let store = MockStore::default();
        AccountService::new(Arc::new(store.account_repo()), Arc::new(store.file_repo()))
    }

    #[tokio::test]
    async fn test_create_and_get_account() {
        let service = service();

        let account = service
            .create_account("alice", "alice@example.com")
            .await
            .unwrap();
        assert_eq!(account.username, "alice");

        let found = service.get_account(&account.id).await.unwrap().unwrap();
        assert_eq!(found.email, "alice@example.com");

        let found = service
            .get_account_by_email("alice@example.com")
            .await
            .unwrap();
        assert!(found.is_some());
    }

    #[tokio::test]
    async fn test_create_account_rejects_duplicate_email() {
        let service = service();

        service
            .create_account("alice", "alice@example.com")
            .await
            .unwrap();

        let result = service.create_account("bob", "alice@example.com").await;
        assert!(matches!(result, Err(Error::Auth(AuthError::Conflict))));
    }

    #[tokio::test]
    async fn test_create_account_rejects_invalid_input() {
        let service = service();

        assert!(service.create_account("al", "alice@example.com").await.is_err());
        assert!(service.create_account("alice", "not-an-email").await.is_err());
    }

    #[tokio::test]
    async fn test_delete_account_not_found() {
        let service = service();

        let result = service.delete_account(&AccountId::new_random()).await;
        assert!(matches!(result, Err(Error::Auth(AuthError::NotFound))));
    }

    #[tokio::test]
    async fn test_delete_account_removes_owned_files() {
        let store = MockStore::default();
        let files = Arc::new(store.file_repo());
        let service = AccountService::new(Arc::new(store.account_repo()), files.clone());

        let account = service
            .create_account("alice", "alice@example.com")
            .await
            .unwrap();

        let dir = tempfile::tempdir().unwrap();
        let mut paths = Vec::new();
        for name in ["a.txt", "b.txt"] {
            let path = dir.path().join(name);
            std::fs::write(&path, b"data").unwrap();
            let path = path.to_string_lossy().into_owned();
            files
                .create(NewFileRef::new(account.id.clone(), path.clone()))
                .await
                .unwrap();
            paths.push(path);
        }

        service.delete_account(&account.id).await.unwrap();

        for path in &paths {
            assert!(!std::path::Path::new(path).exists());
        }
        assert!(service.get_account(&account.id).await.unwrap().is_none());
        assert!(files.find_by_owner(&account.id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_account_aborts_on_failed_file_removal() {
        let store = MockStore::default();
        let files = Arc::new(store.file_repo());
        let service = AccountService::new(Arc::new(store.account_repo()), files.clone());

        let account = service
            .create_account("alice", "alice@example.com")
            .await
            .unwrap();

        let dir = tempfile::tempdir().unwrap();

        // First owned file does not exist on disk, so its removal fails.
        let missing = dir.path().join("missing.txt").to_string_lossy().into_owned();
        files
            .create(NewFileRef::new(account.id.clone(), missing))
            .await
            .unwrap();

        let kept = dir.path().join("kept.txt");
        std::fs::write(&kept, b"data").unwrap();
        files
            .create(NewFileRef::new(
                account.id.clone(),
                kept.to_string_lossy().into_owned(),
            ))
            .await
            .unwrap();

        let result = service.delete_account(&account.id).await;
        assert!(matches!(
            result,
            Err(Error::File(FileError::PartialFailure(_)))
        ));

        // The account, both references, and the surviving file are untouched.
        assert!(service.get_account(&account.id).await.unwrap().is_some());
        assert_eq!(files.find_by_owner(&account.id).await.unwrap().len(), 2);
        assert!(kept.exists());
    }

    #[tokio::test]
    async fn test_update_account_maps_conflict() {
        let service = service();

        service
            .create_account("alice", "alice@example.com")
            .await
            .unwrap();
        let mut bob = service
            .create_account("bob", "bob@example.com")
            .await
            .unwrap();

        bob.email = "alice@example.com".to_string();
        let result = service.update_account(&bob).await;
        assert!(matches!(result, Err(Error::Auth(AuthError::Conflict))));
    }

    #[tokio::test]
    async fn test_update_missing_account() {
        let service = service();

        let ghost = Account::builder()
            .username("ghost".to_string())
            .email("ghost@example.com".to_string())
            .build()
            .unwrap();

        let result = service.update_account(&ghost).await;
        assert!(matches!(
            result,
            Err(Error::Storage(StorageError::NotFound))
        ));
    }
}
