use crate::{Error, account::AccountId};
use async_trait::async_trait;

/// Repository for password-secret access
///
/// Stores only derived secrets (PHC strings); plaintext never reaches this
/// layer.
#[async_trait]
pub trait CredentialRepository: Send + Sync + 'static {
    /// Set an account's password hash
    async fn set_password_hash(&self, account_id: &AccountId, hash: &str) -> Result<(), Error>;

    /// Get an account's password hash
    async fn get_password_hash(&self, account_id: &AccountId) -> Result<Option<String>, Error>;
}
