use crate::{
    Error,
    account::AccountId,
    file::{FileId, FileRef, NewFileRef},
};
use async_trait::async_trait;

/// Repository for file-reference data access
#[async_trait]
pub trait FileRepository: Send + Sync + 'static {
    /// Create a new file reference. The owning account must exist.
    async fn create(&self, file: NewFileRef) -> Result<FileRef, Error>;

    /// Find a file reference by ID
    async fn find_by_id(&self, id: &FileId) -> Result<Option<FileRef>, Error>;

    /// List the file references owned by an account, in insertion order.
    async fn find_by_owner(&self, owner: &AccountId) -> Result<Vec<FileRef>, Error>;

    /// Delete a file reference by ID
    async fn delete(&self, id: &FileId) -> Result<(), Error>;
}
