//! Service layer
//!
//! Services implement the orchestration on top of the repository traits:
//! account lifecycle (including the cascading delete of owned files),
//! credential handling, and file-reference management.

pub mod account;
pub mod credential;
pub mod file;

pub use account::AccountService;
pub use credential::CredentialService;
pub use file::FileService;
