//! Password hashing
//!
//! Argon2id with a fresh random salt per hash. The output is a PHC string
//! (`$argon2id$v=19$m=...,t=...,p=...$salt$hash`), so salt and cost travel
//! with the hash and verification never needs the current configuration.

use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::{Algorithm, Argon2, Params, Version};
use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use rand::RngCore;

use crate::config::PasswordHashConfig;
use crate::error::AppError;

/// Argon2id hasher configured with a fixed cost
#[derive(Clone)]
pub struct Argon2Hasher {
    params: Params,
    /// Hash of a random password at the configured cost, used when there is
    /// no stored hash to check against
    decoy_hash: String,
}

impl Argon2Hasher {
    pub fn new(config: &PasswordHashConfig) -> Result<Self, AppError> {
        let params = Params::new(
            config.memory_kib,
            config.iterations,
            config.parallelism,
            None,
        )
        .map_err(|e| AppError::Config(format!("invalid argon2 parameters: {e}")))?;

        let mut hasher = Self {
            params,
            decoy_hash: String::new(),
        };
        let mut decoy_password = [0u8; 16];
        rand::thread_rng().fill_bytes(&mut decoy_password);
        hasher.decoy_hash = hasher.hash(&URL_SAFE_NO_PAD.encode(decoy_password))?;

        Ok(hasher)
    }

    fn argon2(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }

    /// Hash a plain password
    pub fn hash(&self, plain: &str) -> Result<String, AppError> {
        let mut salt_bytes = [0u8; 16];
        rand::thread_rng().fill_bytes(&mut salt_bytes);
        let salt = SaltString::encode_b64(&salt_bytes)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("salt encoding failed: {e}")))?;

        self.argon2()
            .hash_password(plain.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| AppError::Internal(anyhow::anyhow!("password hashing failed: {e}")))
    }

    /// Check a plain password against a stored PHC string
    ///
    /// Malformed hashes never match.
    pub fn verify(&self, plain: &str, hash: &str) -> bool {
        match PasswordHash::new(hash) {
            Ok(parsed) => self
                .argon2()
                .verify_password(plain.as_bytes(), &parsed)
                .is_ok(),
            Err(_) => false,
        }
    }

    /// Spend the same work as [`verify`](Self::verify) without a stored hash
    ///
    /// Always `false`. Keeps a missing account as slow to reject as a wrong
    /// password.
    pub fn verify_absent(&self, plain: &str) -> bool {
        let _ = self.verify(plain, &self.decoy_hash);
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hasher() -> Argon2Hasher {
        Argon2Hasher::new(&PasswordHashConfig {
            memory_kib: 1024,
            iterations: 1,
            parallelism: 1,
        })
        .unwrap()
    }

    #[test]
    fn verify_accepts_original_password() {
        let hasher = hasher();
        let hash = hasher.hash("test_password").unwrap();

        assert!(hash.starts_with("$argon2id$"));
        assert!(hasher.verify("test_password", &hash));
    }

    #[test]
    fn verify_rejects_other_password() {
        let hasher = hasher();
        let hash = hasher.hash("test_password").unwrap();

        assert!(!hasher.verify("wrong_password", &hash));
        assert!(!hasher.verify("", &hash));
    }

    #[test]
    fn hashes_are_salted() {
        let hasher = hasher();
        let first = hasher.hash("same").unwrap();
        let second = hasher.hash("same").unwrap();

        assert_ne!(first, second);
        assert!(hasher.verify("same", &first));
        assert!(hasher.verify("same", &second));
    }

    #[test]
    fn verify_uses_cost_embedded_in_hash() {
        let cheap = hasher();
        let hash = cheap.hash("portable").unwrap();

        let other = Argon2Hasher::new(&PasswordHashConfig {
            memory_kib: 2048,
            iterations: 2,
            parallelism: 1,
        })
        .unwrap();
        assert!(other.verify("portable", &hash));
    }

    #[test]
    fn decoy_hash_uses_configured_cost() {
        let hasher = hasher();

        assert!(hasher.decoy_hash.starts_with("$argon2id$v=19$m=1024,t=1,p=1$"));
        assert_ne!(hasher.decoy_hash, self::hasher().decoy_hash);
    }

    #[test]
    fn verify_absent_never_matches() {
        let hasher = hasher();

        assert!(!hasher.verify_absent("test_password"));
        assert!(!hasher.verify_absent(""));
    }

    #[test]
    fn malformed_hash_never_matches() {
        let hasher = hasher();
        assert!(!hasher.verify("anything", "not-a-phc-string"));
        assert!(!hasher.verify("anything", ""));
    }
}
