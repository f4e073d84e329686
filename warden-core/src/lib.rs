//! Core functionality for the warden account and session service
//!
//! This crate contains the domain types, error taxonomy, and orchestration
//! services shared by every storage backend:
//!
//! - [`Account`] and [`FileRef`] domain records with prefixed opaque IDs
//! - [`PasswordHasher`] for Argon2id password secrets with a tunable cost
//! - [`TokenIssuer`] for stateless, signed session tokens
//! - Repository traits under [`repositories`] that storage backends implement
//! - Services under [`services`] that sequence the above into signup, login,
//!   profile update, and cascading account deletion
//!
//! Application code normally consumes this through the top-level `warden`
//! crate rather than directly.

pub mod account;
pub mod error;
pub mod file;
pub mod hasher;
pub mod id;
pub mod repositories;
pub mod services;
pub mod token;
pub mod validation;

pub use account::{Account, AccountId, NewAccount};
pub use error::Error;
pub use file::{FileId, FileRef, NewFileRef};
pub use hasher::PasswordHasher;
pub use token::{SessionToken, TokenConfig, TokenIssuer};
