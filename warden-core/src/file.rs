//! File references
//!
//! A file reference records a filesystem path owned by exactly one account.
//! The owning account must exist for as long as the reference does; deleting
//! the account removes its references as part of the same logical operation.

use crate::id::{generate_prefixed_id, validate_prefixed_id};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::account::AccountId;

/// A unique, stable identifier for a file reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Hash)]
pub struct FileId(String);

impl FileId {
    pub fn new(id: &str) -> Self {
        FileId(id.to_string())
    }

    pub fn new_random() -> Self {
        FileId(generate_prefixed_id("file"))
    }

    pub fn into_inner(self) -> String {
        self.0
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_valid(&self) -> bool {
        validate_prefixed_id(&self.0, "file")
    }
}

impl Default for FileId {
    fn default() -> Self {
        Self::new_random()
    }
}

impl From<String> for FileId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for FileId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl std::fmt::Display for FileId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A filesystem path owned by an account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileRef {
    /// The unique identifier for the reference.
    pub id: FileId,

    /// The owning account.
    pub account_id: AccountId,

    /// The filesystem path of the referenced file.
    pub path: String,

    /// The timestamp when the reference was created.
    pub created_at: DateTime<Utc>,
}

/// The data required to create a new file reference.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewFileRef {
    pub id: FileId,
    pub account_id: AccountId,
    pub path: String,
}

impl NewFileRef {
    pub fn new(account_id: AccountId, path: String) -> Self {
        Self {
            id: FileId::new_random(),
            account_id,
            path,
        }
    }
}
