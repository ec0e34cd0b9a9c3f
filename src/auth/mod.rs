//! Authentication
//!
//! Handles:
//! - Password hashing (argon2id)
//! - Access token issuance and verification (HS256 JWT)
//! - Authentication middleware

mod middleware;
mod password;
pub mod token;

pub use middleware::{CurrentUser, extract_token_from_headers, require_auth};
pub use password::Argon2Hasher;
pub use token::{Claims, TokenSigner};

use chrono::{DateTime, Duration, Utc};

use crate::config::AuthConfig;
use crate::data::UserId;
use crate::error::AppError;

/// Password and token operations, configured once at startup
#[derive(Clone)]
pub struct AuthService {
    hasher: Argon2Hasher,
    signer: TokenSigner,
}

impl AuthService {
    pub fn new(config: &AuthConfig) -> Result<Self, AppError> {
        Ok(Self {
            hasher: Argon2Hasher::new(&config.password)?,
            signer: TokenSigner::new(
                config.token_secret.as_bytes(),
                Duration::seconds(config.token_ttl_seconds),
            ),
        })
    }

    /// One-way salted hash of `plain`
    ///
    /// Deliberately slow; call from a blocking context.
    pub fn hash_password(&self, plain: &str) -> Result<String, AppError> {
        self.hasher.hash(plain)
    }

    pub fn verify_password(&self, plain: &str, hash: &str) -> bool {
        self.hasher.verify(plain, hash)
    }

    /// Reject a login for an unknown account at the cost of a real check
    pub fn verify_absent_password(&self, plain: &str) -> bool {
        self.hasher.verify_absent(plain)
    }

    /// Issue a token for `user_id` that expires after the configured lifetime
    pub fn issue_token(&self, user_id: UserId) -> Result<String, AppError> {
        self.signer.issue_at(user_id, Utc::now())
    }

    pub fn issue_token_at(&self, user_id: UserId, now: DateTime<Utc>) -> Result<String, AppError> {
        self.signer.issue_at(user_id, now)
    }

    /// Resolve a token to its user id
    ///
    /// Any failure is `Unauthorized`.
    pub fn verify_token(&self, token: &str) -> Result<UserId, AppError> {
        self.verify_token_at(token, Utc::now())
    }

    pub fn verify_token_at(&self, token: &str, now: DateTime<Utc>) -> Result<UserId, AppError> {
        self.signer.verify_at(token, now).map(|claims| claims.user_id)
    }

    pub fn token_ttl(&self) -> Duration {
        self.signer.ttl()
    }
}
