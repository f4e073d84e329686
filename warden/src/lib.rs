//! # Warden
//!
//! Warden is a small account and session management service for Rust
//! applications. It owns the full credential lifecycle (signup, login,
//! profile update, and account deletion with cleanup of owned files) on top
//! of a pluggable storage backend, while keeping your users' data wherever
//! you choose to store it.
//!
//! What you get:
//! - Password credentials hashed with Argon2id and a tunable work factor
//! - Stateless, signed session tokens with configurable expiry
//! - Store-enforced uniqueness of emails and usernames, race-free under
//!   concurrent signups
//! - Cascading, all-or-nothing account deletion that aborts rather than
//!   leaving half-deleted accounts behind
//!
//! ## Storage Support
//!
//! Warden currently ships a SQLite backend; any storage that implements the
//! `warden-core` repository traits plugs in the same way.
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use warden::{Warden, WardenConfig};
//! use warden_storage_sqlite::SqliteRepositoryProvider;
//!
//! #[tokio::main]
//! async fn main() {
//!     let pool = sqlx::SqlitePool::connect("sqlite::memory:").await.unwrap();
//!     let repositories = Arc::new(SqliteRepositoryProvider::new(pool));
//!
//!     let config = WardenConfig::new(b"change-me-at-deploy-time".to_vec());
//!     let warden = Warden::new(repositories, config).unwrap();
//!     warden.migrate().await.unwrap();
//!
//!     let (account, token) = warden
//!         .signup("alice", "alice@example.com", "correct horse battery staple")
//!         .await
//!         .unwrap();
//!     println!("account {} token {}", account.id, token);
//! }
//! ```
use std::sync::Arc;

use chrono::Duration;
use serde::{Deserialize, Serialize};
use warden_core::{
    PasswordHasher, TokenConfig, TokenIssuer,
    error::{AuthError, ValidationError},
    hasher::DEFAULT_HASH_COST,
    repositories::{
        AccountRepositoryAdapter, CredentialRepositoryAdapter, FileRepositoryAdapter,
        RepositoryProvider,
    },
    services::{AccountService, CredentialService, FileService},
};

/// Re-export core types from warden_core
///
/// These types are commonly used when working with the Warden API.
pub use warden_core::{
    Account, AccountId, Error, FileId, FileRef, SessionToken, error,
};

/// Re-export storage backends
///
/// These storage implementations are available when the corresponding
/// feature is enabled.
#[cfg(feature = "sqlite")]
pub use warden_storage_sqlite::SqliteRepositoryProvider;

/// Process-wide service configuration.
///
/// Loaded once at startup, either explicitly or from the environment via
/// [`WardenConfig::from_env`]. The token signing secret is held here and
/// never logged.
#[derive(Clone)]
pub struct WardenConfig {
    /// Argon2 time cost for password hashing.
    pub hash_cost: u32,
    /// HS256 secret used to sign and verify session tokens.
    token_secret: Vec<u8>,
    /// Time-to-live for issued session tokens.
    pub token_ttl: Duration,
    /// Optional issuer claim embedded in and verified on tokens.
    pub token_issuer: Option<String>,
}

impl WardenConfig {
    /// Create a configuration with the given token signing secret, the
    /// default hash cost, and a 24 hour token TTL.
    pub fn new(token_secret: Vec<u8>) -> Self {
        Self {
            hash_cost: DEFAULT_HASH_COST,
            token_secret,
            token_ttl: Duration::hours(24),
            token_issuer: None,
        }
    }

    /// Load the configuration from the environment.
    ///
    /// Reads `WARDEN_TOKEN_SECRET` (required), `WARDEN_TOKEN_TTL_SECS`,
    /// `WARDEN_HASH_COST`, and `WARDEN_TOKEN_ISSUER`.
    pub fn from_env() -> Result<Self, Error> {
        let secret = std::env::var("WARDEN_TOKEN_SECRET").map_err(|_| {
            ValidationError::MissingField("WARDEN_TOKEN_SECRET is required".to_string())
        })?;

        let mut config = Self::new(secret.into_bytes());

        if let Ok(ttl) = std::env::var("WARDEN_TOKEN_TTL_SECS") {
            let secs: i64 = ttl.parse().map_err(|_| {
                ValidationError::InvalidField(
                    "WARDEN_TOKEN_TTL_SECS must be an integer".to_string(),
                )
            })?;
            config.token_ttl = Duration::seconds(secs);
        }

        if let Ok(cost) = std::env::var("WARDEN_HASH_COST") {
            config.hash_cost = cost.parse().map_err(|_| {
                ValidationError::InvalidField("WARDEN_HASH_COST must be an integer".to_string())
            })?;
        }

        if let Ok(issuer) = std::env::var("WARDEN_TOKEN_ISSUER") {
            config.token_issuer = Some(issuer);
        }

        Ok(config)
    }

    /// Set the password hashing cost.
    pub fn with_hash_cost(mut self, cost: u32) -> Self {
        self.hash_cost = cost;
        self
    }

    /// Set the session token time-to-live.
    pub fn with_token_ttl(mut self, ttl: Duration) -> Self {
        self.token_ttl = ttl;
        self
    }

    /// Set the token issuer claim.
    pub fn with_token_issuer(mut self, issuer: impl Into<String>) -> Self {
        self.token_issuer = Some(issuer.into());
        self
    }
}

impl std::fmt::Debug for WardenConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WardenConfig")
            .field("hash_cost", &self.hash_cost)
            .field("token_secret", &"<redacted>")
            .field("token_ttl", &self.token_ttl)
            .field("token_issuer", &self.token_issuer)
            .finish()
    }
}

/// A partial profile update.
///
/// Each field is applied only when present; a password change is re-hashed
/// before it is stored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AccountChanges {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

impl AccountChanges {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }
}

/// The main coordinator that wires services to a repository provider.
///
/// `Warden` is the entry point applications use. It owns the token issuer
/// and password hasher, and exposes the account, credential, and file
/// operations as one API.
pub struct Warden<R: RepositoryProvider> {
    repositories: Arc<R>,
    accounts: Arc<AccountService<AccountRepositoryAdapter<R>, FileRepositoryAdapter<R>>>,
    credentials: Arc<CredentialService<AccountRepositoryAdapter<R>, CredentialRepositoryAdapter<R>>>,
    files: Arc<FileService<FileRepositoryAdapter<R>>>,
    issuer: TokenIssuer,
}

impl<R: RepositoryProvider> Warden<R> {
    /// Create a new Warden instance from a repository provider and
    /// configuration.
    ///
    /// Fails if the configured hash cost is outside the range the hashing
    /// algorithm accepts.
    pub fn new(repositories: Arc<R>, config: WardenConfig) -> Result<Self, Error> {
        let account_repo = Arc::new(AccountRepositoryAdapter::new(repositories.clone()));
        let credential_repo = Arc::new(CredentialRepositoryAdapter::new(repositories.clone()));
        let file_repo = Arc::new(FileRepositoryAdapter::new(repositories.clone()));

        let hasher = PasswordHasher::new(config.hash_cost)?;

        let mut token_config = TokenConfig::new(config.token_secret).with_ttl(config.token_ttl);
        if let Some(issuer) = config.token_issuer {
            token_config = token_config.with_issuer(issuer);
        }

        Ok(Self {
            repositories,
            accounts: Arc::new(AccountService::new(account_repo.clone(), file_repo.clone())),
            credentials: Arc::new(CredentialService::new(account_repo, credential_repo, hasher)),
            files: Arc::new(FileService::new(file_repo)),
            issuer: TokenIssuer::new(token_config),
        })
    }

    /// Run migrations for all repositories
    pub async fn migrate(&self) -> Result<(), Error> {
        tracing::info!("running storage migrations");
        self.repositories.migrate().await
    }

    /// Health check for all repositories
    pub async fn health_check(&self) -> Result<(), Error> {
        self.repositories.health_check().await
    }

    /// Register a new account and issue its first session token.
    ///
    /// Fails with [`AuthError::Conflict`](error::AuthError) when the email or
    /// username is already registered, including when the registration loses
    /// a race against a concurrent signup.
    pub async fn signup(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<(Account, SessionToken), Error> {
        let account = self.credentials.signup(username, email, password).await?;
        let token = self.issuer.issue(&account.id)?;
        Ok((account, token))
    }

    /// Authenticate with email and password and issue a fresh session token.
    ///
    /// Fails with [`AuthError::NotFound`](error::AuthError) for an unknown
    /// email and [`AuthError::InvalidCredentials`](error::AuthError) for a
    /// password mismatch.
    pub async fn login(
        &self,
        email: &str,
        password: &str,
    ) -> Result<(Account, SessionToken), Error> {
        let account = self.credentials.authenticate(email, password).await?;
        let token = self.issuer.issue(&account.id)?;
        Ok((account, token))
    }

    /// Resolve a session token to the account it was issued for.
    ///
    /// Token rejection is fail-closed: the caller sees only
    /// [`TokenError::Invalid`](error::TokenError).
    pub async fn authenticate(&self, token: &SessionToken) -> Result<Account, Error> {
        let account_id = self.issuer.validate(token)?;

        self.accounts
            .get_account(&account_id)
            .await?
            .ok_or_else(|| AuthError::NotFound.into())
    }

    /// Get an account by its ID
    pub async fn get_account(&self, account_id: &AccountId) -> Result<Option<Account>, Error> {
        self.accounts.get_account(account_id).await
    }

    /// List all accounts
    pub async fn list_accounts(&self) -> Result<Vec<Account>, Error> {
        self.accounts.list_accounts().await
    }

    /// Apply a partial profile update to an account.
    ///
    /// Username and email changes go through the store's uniqueness
    /// enforcement; a password change is validated and re-hashed.
    pub async fn update_account(
        &self,
        account_id: &AccountId,
        changes: AccountChanges,
    ) -> Result<Account, Error> {
        let mut account = self
            .accounts
            .get_account(account_id)
            .await?
            .ok_or(AuthError::NotFound)?;

        // Validate up front so an invalid password cannot leave a
        // half-applied update behind.
        if let Some(password) = &changes.password {
            warden_core::validation::validate_password(password)?;
        }

        let profile_changed = changes.username.is_some() || changes.email.is_some();
        if let Some(username) = changes.username {
            account.username = username;
        }
        if let Some(email) = changes.email {
            account.email = email;
        }

        let account = if profile_changed {
            self.accounts.update_account(&account).await?
        } else {
            account
        };

        if let Some(password) = changes.password {
            self.credentials.set_password(account_id, &password).await?;
        }

        Ok(account)
    }

    /// Delete an account together with every file it owns.
    ///
    /// All-or-nothing: a failed file removal aborts the operation with
    /// [`FileError::PartialFailure`](error::FileError) and leaves the
    /// account and its remaining references in place. Returns the deleted
    /// account.
    pub async fn delete_account(&self, account_id: &AccountId) -> Result<Account, Error> {
        self.accounts.delete_account(account_id).await
    }

    /// Attach a file reference to an account
    pub async fn attach_file(&self, owner: &AccountId, path: &str) -> Result<FileRef, Error> {
        self.files.attach_file(owner, path).await
    }

    /// List the file references owned by an account
    pub async fn list_files(&self, owner: &AccountId) -> Result<Vec<FileRef>, Error> {
        self.files.list_files(owner).await
    }

    /// Delete a single file reference and unlink its file
    pub async fn delete_file(&self, file_id: &FileId) -> Result<(), Error> {
        self.files.delete_file(file_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = WardenConfig::new(b"secret".to_vec());
        assert_eq!(config.hash_cost, DEFAULT_HASH_COST);
        assert_eq!(config.token_ttl, Duration::hours(24));
        assert!(config.token_issuer.is_none());
    }

    #[test]
    fn test_config_builders() {
        let config = WardenConfig::new(b"secret".to_vec())
            .with_hash_cost(4)
            .with_token_ttl(Duration::minutes(5))
            .with_token_issuer("warden-test");

        assert_eq!(config.hash_cost, 4);
        assert_eq!(config.token_ttl, Duration::minutes(5));
        assert_eq!(config.token_issuer.as_deref(), Some("warden-test"));
    }

    #[test]
    fn test_config_debug_redacts_secret() {
        let config = WardenConfig::new(b"super-secret-value".to_vec());
        let debug = format!("{config:?}");

        assert!(debug.contains("<redacted>"));
        assert!(!debug.contains("super-secret-value"));
    }

    #[test]
    fn test_account_changes_builder() {
        let changes = AccountChanges::new()
            .username("alice")
            .password("new_password123");

        assert_eq!(changes.username.as_deref(), Some("alice"));
        assert!(changes.email.is_none());
        assert_eq!(changes.password.as_deref(), Some("new_password123"));
    }
}
