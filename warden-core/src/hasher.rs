//! Password hashing
//!
//! Passwords are hashed with Argon2id in PHC string format. The time cost is
//! a tunable work factor: raising it makes each verification slower, which is
//! the entire point when resisting offline brute force.

use argon2::{
    Algorithm, Argon2, Params, Version,
    password_hash::{
        PasswordHash, PasswordHasher as _, PasswordVerifier as _, SaltString, rand_core,
    },
};

use crate::{Error, error::CryptoError};

/// Default Argon2 time cost (iterations).
pub const DEFAULT_HASH_COST: u32 = 2;

/// Memory cost in KiB. Fixed at the OWASP-recommended 19 MiB; only the time
/// cost is exposed as the tunable knob.
const MEMORY_COST_KIB: u32 = 19 * 1024;

/// Hashes plaintext passwords and verifies candidates against stored secrets.
#[derive(Clone)]
pub struct PasswordHasher {
    argon2: Argon2<'static>,
    cost: u32,
}

impl PasswordHasher {
    /// Create a hasher with the given time cost.
    ///
    /// Fails if the cost is outside the range the algorithm accepts.
    pub fn new(cost: u32) -> Result<Self, Error> {
        let params = Params::new(MEMORY_COST_KIB, cost, 1, None)
            .map_err(|e| CryptoError::PasswordHash(format!("Invalid hash cost: {e}")))?;

        Ok(Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
            cost,
        })
    }

    /// The configured time cost.
    pub fn cost(&self) -> u32 {
        self.cost
    }

    /// Hash a plaintext password into a PHC-format secret.
    ///
    /// Fails on empty input. The plaintext is never logged.
    pub fn hash(&self, password: &str) -> Result<String, Error> {
        if password.is_empty() {
            return Err(CryptoError::PasswordHash(
                "Cannot hash an empty password".to_string(),
            )
            .into());
        }

        let salt = SaltString::generate(&mut rand_core::OsRng);

        let hash = self
            .argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| CryptoError::PasswordHash(e.to_string()))?;

        Ok(hash.to_string())
    }

    /// Verify a candidate password against a stored secret.
    ///
    /// A malformed stored secret is reported as a mismatch, never an error.
    pub fn verify(&self, password: &str, secret: &str) -> bool {
        let Ok(parsed) = PasswordHash::new(secret) else {
            return false;
        };

        self.argon2
            .verify_password(password.as_bytes(), &parsed)
            .is_ok()
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new(DEFAULT_HASH_COST).expect("default hash cost is valid")
    }
}

impl std::fmt::Debug for PasswordHasher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PasswordHasher")
            .field("cost", &self.cost)
            .finish_non_exhaustive()
    }
}
