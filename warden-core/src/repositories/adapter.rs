use crate::{
    Error,
    account::{Account, AccountId, NewAccount},
    file::{FileId, FileRef, NewFileRef},
    repositories::{AccountRepository, CredentialRepository, FileRepository, RepositoryProvider},
};
use async_trait::async_trait;
use std::sync::Arc;

/// Adapter that wraps a RepositoryProvider and implements the individual
/// repository traits, so services can stay generic over one repository each.
pub struct AccountRepositoryAdapter<R: RepositoryProvider> {
    provider: Arc<R>,
}

impl<R: RepositoryProvider> AccountRepositoryAdapter<R> {
    pub fn new(provider: Arc<R>) -> Self {
        Self { provider }
    }
}

#[async_trait]
impl<R: RepositoryProvider> AccountRepository for AccountRepositoryAdapter<R> {
    async fn create(&self, account: NewAccount) -> Result<Account, Error> {
        self.provider.account().create(account).await
    }

    async fn find_by_id(&self, id: &AccountId) -> Result<Option<Account>, Error> {
        self.provider.account().find_by_id(id).await
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, Error> {
        self.provider.account().find_by_email(email).await
    }

    async fn update(&self, account: &Account) -> Result<Account, Error> {
        self.provider.account().update(account).await
    }

    async fn delete(&self, id: &AccountId) -> Result<(), Error> {
        self.provider.account().delete(id).await
    }

    async fn list(&self) -> Result<Vec<Account>, Error> {
        self.provider.account().list().await
    }
}

pub struct CredentialRepositoryAdapter<R: RepositoryProvider> {
    provider: Arc<R>,
}

impl<R: RepositoryProvider> CredentialRepositoryAdapter<R> {
    pub fn new(provider: Arc<R>) -> Self {
        Self { provider }
    }
}

#[async_trait]
impl<R: RepositoryProvider> CredentialRepository for CredentialRepositoryAdapter<R> {
    async fn set_password_hash(&self, account_id: &AccountId, hash: &str) -> Result<(), Error> {
        self.provider
            .credential()
            .set_password_hash(account_id, hash)
            .await
    }

    async fn get_password_hash(&self, account_id: &AccountId) -> Result<Option<String>, Error> {
        self.provider.credential().get_password_hash(account_id).await
    }
}

pub struct FileRepositoryAdapter<R: RepositoryProvider> {
    provider: Arc<R>,
}

impl<R: RepositoryProvider> FileRepositoryAdapter<R> {
    pub fn new(provider: Arc<R>) -> Self {
        Self { provider }
    }
}

#[async_trait]
impl<R: RepositoryProvider> FileRepository for FileRepositoryAdapter<R> {
    async fn create(&self, file: NewFileRef) -> Result<FileRef, Error> {
        self.provider.file().create(file).await
    }

    async fn find_by_id(&self, id: &FileId) -> Result<Option<FileRef>, Error> {
        self.provider.file().find_by_id(id).await
    }

    async fn find_by_owner(&self, owner: &AccountId) -> Result<Vec<FileRef>, Error> {
        self.provider.file().find_by_owner(owner).await
    }

    async fn delete(&self, id: &FileId) -> Result<(), Error> {
        self.provider.file().delete(id).await
    }
}
