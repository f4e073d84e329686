//! Session token issuance and validation
//!
//! Session tokens are stateless JWTs (HS256) binding an account identifier
//! to an expiry. They are never persisted; the signing secret alone is enough
//! to validate them. Validation fails closed: every rejection (malformed,
//! expired, bad signature) surfaces as the single
//! [`TokenError::Invalid`](crate::error::TokenError) outcome.

use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::{
    Error,
    account::AccountId,
    error::{CryptoError, TokenError},
};

/// An opaque, signed session token.
///
/// Callers pass this back verbatim as their authorization credential.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionToken(String);

impl SessionToken {
    pub fn new(token: &str) -> Self {
        SessionToken(token.to_string())
    }

    pub fn into_inner(self) -> String {
        self.0
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for SessionToken {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for SessionToken {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl std::fmt::Display for SessionToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// JWT claims carried by a session token.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Subject - account ID
    pub sub: String,
    /// Issued at in seconds (as UTC timestamp)
    pub iat: i64,
    /// Expiration time in seconds (as UTC timestamp)
    pub exp: i64,
    /// Issuer
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iss: Option<String>,
}

/// Configuration for the token issuer.
///
/// The signing secret is process-wide configuration loaded once at startup.
/// Debug output redacts it.
#[derive(Clone)]
pub struct TokenConfig {
    secret: Vec<u8>,
    /// Time-to-live applied to issued tokens.
    pub ttl: Duration,
    /// Issuer claim, verified on validation when set.
    pub issuer: Option<String>,
}

impl TokenConfig {
    /// Create a configuration with the given HS256 secret and a 24 hour TTL.
    pub fn new(secret: Vec<u8>) -> Self {
        Self {
            secret,
            ttl: Duration::hours(24),
            issuer: None,
        }
    }

    /// Set the token time-to-live.
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// Set the issuer claim.
    pub fn with_issuer(mut self, issuer: impl Into<String>) -> Self {
        self.issuer = Some(issuer.into());
        self
    }
}

impl std::fmt::Debug for TokenConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenConfig")
            .field("secret", &"<redacted>")
            .field("ttl", &self.ttl)
            .field("issuer", &self.issuer)
            .finish()
    }
}

/// Issues and validates session tokens for account identifiers.
pub struct TokenIssuer {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl: Duration,
    issuer: Option<String>,
}

impl TokenIssuer {
    /// Create an issuer from the given configuration.
    ///
    /// Keys are derived once here rather than per call.
    pub fn new(config: TokenConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is exact: no clock leeway.
        validation.leeway = 0;
        if let Some(issuer) = &config.issuer {
            validation.set_issuer(&[issuer]);
        }

        Self {
            encoding_key: EncodingKey::from_secret(&config.secret),
            decoding_key: DecodingKey::from_secret(&config.secret),
            validation,
            ttl: config.ttl,
            issuer: config.issuer,
        }
    }

    /// Issue a token for an account with the configured TTL.
    pub fn issue(&self, account_id: &AccountId) -> Result<SessionToken, Error> {
        self.issue_with_ttl(account_id, self.ttl)
    }

    /// Issue a token for an account with an explicit TTL.
    pub fn issue_with_ttl(
        &self,
        account_id: &AccountId,
        ttl: Duration,
    ) -> Result<SessionToken, Error> {
        let now = Utc::now();
        let claims = Claims {
            sub: account_id.to_string(),
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
            iss: self.issuer.clone(),
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| CryptoError::TokenSigning(e.to_string()))?;

        Ok(SessionToken(token))
    }

    /// Validate a token and return the account identifier it is bound to.
    ///
    /// Fails closed: the caller learns only that the token was rejected.
    /// The underlying reason goes to debug-level logs.
    pub fn validate(&self, token: &SessionToken) -> Result<AccountId, Error> {
        match decode::<Claims>(token.as_str(), &self.decoding_key, &self.validation) {
            Ok(data) => Ok(AccountId::new(&data.claims.sub)),
            Err(e) => {
                tracing::debug!(error = %e, "session token rejected");
                Err(TokenError::Invalid.into())
            }
        }
    }
}
