use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Authentication error: {0}")]
    Auth(#[from] AuthError),

    #[error("Token error: {0}")]
    Token(#[from] TokenError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Cryptographic error: {0}")]
    Crypto(#[from] CryptoError),

    #[error("File error: {0}")]
    File(#[from] FileError),
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Account not found")]
    NotFound,

    #[error("Account already exists")]
    Conflict,
}

/// Session token validation fails closed: malformed, expired and badly
/// signed tokens all collapse into the single `Invalid` outcome so the
/// caller cannot be used as a verification oracle.
#[derive(Debug, Error)]
pub enum TokenError {
    #[error("Invalid token")]
    Invalid,
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Migration error: {0}")]
    Migration(String),

    #[error("Uniqueness violation: {0}")]
    Conflict(String),

    #[error("Record not found")]
    NotFound,
}

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Invalid email format: {0}")]
    InvalidEmail(String),

    #[error("Invalid username: {0}")]
    InvalidUsername(String),

    #[error("Invalid password: {0}")]
    InvalidPassword(String),

    #[error("Invalid field: {0}")]
    InvalidField(String),

    #[error("Missing required field: {0}")]
    MissingField(String),
}

#[derive(Debug, Error)]
pub enum CryptoError {
    #[error("Password hashing failed: {0}")]
    PasswordHash(String),

    #[error("Token signing failed: {0}")]
    TokenSigning(String),
}

#[derive(Debug, Error)]
pub enum FileError {
    #[error("Failed to remove {path}: {reason}")]
    Remove { path: String, reason: String },

    #[error("Cascading delete aborted: {0}")]
    PartialFailure(String),
}

impl Error {
    pub fn is_auth_error(&self) -> bool {
        matches!(self, Error::Auth(_))
    }

    /// True for uniqueness violations regardless of which layer reported them.
    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            Error::Auth(AuthError::Conflict) | Error::Storage(StorageError::Conflict(_))
        )
    }

    pub fn is_validation_error(&self) -> bool {
        matches!(self, Error::Validation(_))
    }
}
