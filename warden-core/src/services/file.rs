use crate::{
    Error,
    account::AccountId,
    error::{FileError, StorageError},
    file::{FileId, FileRef, NewFileRef},
    repositories::FileRepository,
};
use std::sync::Arc;

/// Service for file-reference management
pub struct FileService<F: FileRepository> {
    files: Arc<F>,
}

impl<F: FileRepository> FileService<F> {
    /// Create a new FileService with the given repository
    pub fn new(files: Arc<F>) -> Self {
        Self { files }
    }

    /// Attach a file reference to an account
    pub async fn attach_file(&self, owner: &AccountId, path: &str) -> Result<FileRef, Error> {
        let file = self
            .files
            .create(NewFileRef::new(owner.clone(), path.to_string()))
            .await?;

        tracing::info!(file.id = %file.id, account.id = %owner, "attached file");

        Ok(file)
    }

    /// List the file references owned by an account
    pub async fn list_files(&self, owner: &AccountId) -> Result<Vec<FileRef>, Error> {
        self.files.find_by_owner(owner).await
    }

    /// Delete a single file reference, unlinking the file from the
    /// filesystem first. The reference row is kept when the unlink fails.
    pub async fn delete_file(&self, id: &FileId) -> Result<(), Error> {
        let file = self
            .files
            .find_by_id(id)
            .await?
            .ok_or(StorageError::NotFound)?;

        tokio::fs::remove_file(&file.path)
            .await
            .map_err(|e| FileError::Remove {
                path: file.path.clone(),
                reason: e.to_string(),
            })?;

        self.files.delete(id).await?;

        tracing::info!(file.id = %id, "deleted file");

        Ok(())
    }
}
