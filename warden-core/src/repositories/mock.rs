//! In-memory repository implementations shared by service unit tests.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;

use crate::{
    Error,
    account::{Account, AccountId, NewAccount},
    error::StorageError,
    file::{FileId, FileRef, NewFileRef},
    repositories::{AccountRepository, CredentialRepository, FileRepository},
};

/// Shared backing state, so the account repository's transactional delete
/// can drop file rows the way a real backend does.
#[derive(Default, Clone)]
pub(crate) struct MockStore {
    accounts: Arc<Mutex<HashMap<AccountId, Account>>>,
    hashes: Arc<Mutex<HashMap<AccountId, String>>>,
    files: Arc<Mutex<Vec<FileRef>>>,
}

impl MockStore {
    pub(crate) fn account_repo(&self) -> MockAccountRepository {
        MockAccountRepository {
            store: self.clone(),
        }
    }

    pub(crate) fn credential_repo(&self) -> MockCredentialRepository {
        MockCredentialRepository {
            store: self.clone(),
        }
    }

    pub(crate) fn file_repo(&self) -> MockFileRepository {
        MockFileRepository {
            store: self.clone(),
        }
    }
}

pub(crate) struct MockAccountRepository {
    store: MockStore,
}

impl Default for MockAccountRepository {
    fn default() -> Self {
        MockStore::default().account_repo()
    }
}

#[async_trait]
impl AccountRepository for MockAccountRepository {
    async fn create(&self, new_account: NewAccount) -> Result<Account, Error> {
        let mut accounts = self.store.accounts.lock().await;

        if accounts
            .values()
            .any(|a| a.email == new_account.email || a.username == new_account.username)
        {
            return Err(StorageError::Conflict("email or username taken".to_string()).into());
        }

        let now = Utc::now();
        let account = Account {
            id: new_account.id,
            username: new_account.username,
            email: new_account.email,
            created_at: now,
            updated_at: now,
        };
        accounts.insert(account.id.clone(), account.clone());
        Ok(account)
    }

    async fn find_by_id(&self, id: &AccountId) -> Result<Option<Account>, Error> {
        Ok(self.store.accounts.lock().await.get(id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, Error> {
        Ok(self
            .store
            .accounts
            .lock()
            .await
            .values()
            .find(|a| a.email == email)
            .cloned())
    }

    async fn update(&self, account: &Account) -> Result<Account, Error> {
        let mut accounts = self.store.accounts.lock().await;

        if !accounts.contains_key(&account.id) {
            return Err(StorageError::NotFound.into());
        }

        if accounts.values().any(|a| {
            a.id != account.id && (a.email == account.email || a.username == account.username)
        }) {
            return Err(StorageError::Conflict("email or username taken".to_string()).into());
        }

        let mut updated = account.clone();
        updated.updated_at = Utc::now();
        accounts.insert(updated.id.clone(), updated.clone());
        Ok(updated)
    }

    async fn delete(&self, id: &AccountId) -> Result<(), Error> {
        self.store.accounts.lock().await.remove(id);
        self.store.hashes.lock().await.remove(id);
        self.store
            .files
            .lock()
            .await
            .retain(|f| f.account_id != *id);
        Ok(())
    }

    async fn list(&self) -> Result<Vec<Account>, Error> {
        Ok(self.store.accounts.lock().await.values().cloned().collect())
    }
}

pub(crate) struct MockCredentialRepository {
    store: MockStore,
}

impl Default for MockCredentialRepository {
    fn default() -> Self {
        MockStore::default().credential_repo()
    }
}

#[async_trait]
impl CredentialRepository for MockCredentialRepository {
    async fn set_password_hash(&self, account_id: &AccountId, hash: &str) -> Result<(), Error> {
        self.store
            .hashes
            .lock()
            .await
            .insert(account_id.clone(), hash.to_string());
        Ok(())
    }

    async fn get_password_hash(&self, account_id: &AccountId) -> Result<Option<String>, Error> {
        Ok(self.store.hashes.lock().await.get(account_id).cloned())
    }
}

pub(crate) struct MockFileRepository {
    store: MockStore,
}

impl Default for MockFileRepository {
    fn default() -> Self {
        MockStore::default().file_repo()
    }
}

#[async_trait]
impl FileRepository for MockFileRepository {
    async fn create(&self, file: NewFileRef) -> Result<FileRef, Error> {
        let file = FileRef {
            id: file.id,
            account_id: file.account_id,
            path: file.path,
            created_at: Utc::now(),
        };
        self.store.files.lock().await.push(file.clone());
        Ok(file)
    }

    async fn find_by_id(&self, id: &FileId) -> Result<Option<FileRef>, Error> {
        Ok(self
            .store
            .files
            .lock()
            .await
            .iter()
            .find(|f| f.id == *id)
            .cloned())
    }

    async fn find_by_owner(&self, owner: &AccountId) -> Result<Vec<FileRef>, Error> {
        Ok(self
            .store
            .files
            .lock()
            .await
            .iter()
            .filter(|f| f.account_id == *owner)
            .cloned()
            .collect())
    }

    async fn delete(&self, id: &FileId) -> Result<(), Error> {
        self.store.files.lock().await.retain(|f| f.id != *id);
        Ok(())
    }
}
