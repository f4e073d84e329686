use crate::{
    Error,
    account::{Account, AccountId, NewAccount},
    error::AuthError,
    hasher::PasswordHasher,
    repositories::{AccountRepository, CredentialRepository},
    validation::{validate_email, validate_password, validate_username},
};
use std::sync::Arc;

/// Service for credential operations: signup, password authentication, and
/// password changes.
pub struct CredentialService<A: AccountRepository, C: CredentialRepository> {
    accounts: Arc<A>,
    credentials: Arc<C>,
    hasher: PasswordHasher,
}

impl<A: AccountRepository, C: CredentialRepository> CredentialService<A, C> {
    /// Create a new CredentialService with the given repositories and hasher
    pub fn new(accounts: Arc<A>, credentials: Arc<C>, hasher: PasswordHasher) -> Self {
        Self {
            accounts,
            credentials,
            hasher,
        }
    }

    /// Register a new account with a password
    ///
    /// The early lookup is a fast path only; the repository's uniqueness
    /// enforcement is what guarantees that at most one of N concurrent
    /// signups with the same email succeeds.
    pub async fn signup(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<Account, Error> {
        validate_username(username)?;
        validate_email(email)?;
        validate_password(password)?;

        if self.accounts.find_by_email(email).await?.is_some() {
            tracing::debug!(email = %email, "account already exists");
            return Err(AuthError::Conflict.into());
        }

        let hash = self.hasher.hash(password)?;

        let new_account = NewAccount::new(username.to_string(), email.to_string());
        let account = match self.accounts.create(new_account).await {
            Ok(account) => account,
            // Lost a race with a concurrent signup for the same email.
            Err(e) if e.is_conflict() => return Err(AuthError::Conflict.into()),
            Err(e) => return Err(e),
        };

        self.credentials
            .set_password_hash(&account.id, &hash)
            .await?;

        tracing::info!(
            account.id = %account.id,
            account.username = %account.username,
            "registered account",
        );

        Ok(account)
    }

    /// Authenticate an account with email and password
    ///
    /// An unknown email reports [`AuthError::NotFound`]; a password mismatch
    /// reports [`AuthError::InvalidCredentials`]. Keeping the two apart
    /// matches the external interface; collapsing them is a hardening
    /// trade-off left to the caller.
    pub async fn authenticate(&self, email: &str, password: &str) -> Result<Account, Error> {
        let account = self
            .accounts
            .find_by_email(email)
            .await?
            .ok_or(AuthError::NotFound)?;

        let hash = self
            .credentials
            .get_password_hash(&account.id)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        if !self.hasher.verify(password, &hash) {
            tracing::debug!(account.id = %account.id, "password mismatch");
            return Err(AuthError::InvalidCredentials.into());
        }

        Ok(account)
    }

    /// Replace an account's password
    ///
    /// The new password is validated and re-hashed; plaintext is never
    /// stored.
    pub async fn set_password(&self, account_id: &AccountId, password: &str) -> Result<(), Error> {
        validate_password(password)?;

        let hash = self.hasher.hash(password)?;
        self.credentials
            .set_password_hash(account_id, &hash)
            .await?;

        tracing::info!(account.id = %account_id, "changed password");

        Ok(())
    }
}
