//! Access tokens
//!
//! Stateless HS256 JSON Web Tokens. No server-side storage: a token is
//! valid as long as its signature matches and `exp` is in the future.
//!
//! Token format: base64url(header).base64url(claims).base64url(hmac_sha256)

use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use chrono::{DateTime, Duration, Utc};
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;

use crate::data::UserId;
use crate::error::AppError;

type HmacSha256 = Hmac<Sha256>;

/// `{"alg":"HS256","typ":"JWT"}`, fixed for every token we issue
const HEADER: &str = r#"{"alg":"HS256","typ":"JWT"}"#;

#[derive(Debug, Deserialize)]
struct Header {
    alg: String,
}

/// Signed claims
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub user_id: UserId,
    /// Issued at (unix seconds); absent from tokens that carry only `exp`
    #[serde(default)]
    pub iat: i64,
    /// Expires at (unix seconds)
    pub exp: i64,
}

/// Signs and verifies access tokens with a process-wide secret
#[derive(Clone)]
pub struct TokenSigner {
    secret: Vec<u8>,
    ttl: Duration,
}

impl TokenSigner {
    pub fn new(secret: impl Into<Vec<u8>>, ttl: Duration) -> Self {
        Self {
            secret: secret.into(),
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    fn mac(&self) -> Result<HmacSha256, hmac::digest::InvalidLength> {
        HmacSha256::new_from_slice(&self.secret)
    }

    /// Issue a token for `user_id` as of `now`
    pub fn issue_at(&self, user_id: UserId, now: DateTime<Utc>) -> Result<String, AppError> {
        let claims = Claims {
            user_id,
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
        };
        let claims_json =
            serde_json::to_vec(&claims).map_err(|e| AppError::Internal(e.into()))?;

        let signing_input = format!(
            "{}.{}",
            URL_SAFE_NO_PAD.encode(HEADER.as_bytes()),
            URL_SAFE_NO_PAD.encode(claims_json)
        );

        let mut mac = self
            .mac()
            .map_err(|e| AppError::Internal(anyhow::anyhow!("token signing key: {e}")))?;
        mac.update(signing_input.as_bytes());
        let signature = URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes());

        Ok(format!("{}.{}", signing_input, signature))
    }

    /// Verify a token as of `now`
    ///
    /// Fails closed: any malformed input, signature mismatch, unexpected
    /// algorithm, or `now >= exp` yields `Unauthorized`.
    pub fn verify_at(&self, token: &str, now: DateTime<Utc>) -> Result<Claims, AppError> {
        let mut parts = token.split('.');
        let (Some(header_b64), Some(claims_b64), Some(signature_b64), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(AppError::Unauthorized);
        };

        let signature = URL_SAFE_NO_PAD
            .decode(signature_b64)
            .map_err(|_| AppError::Unauthorized)?;

        let mut mac = self.mac().map_err(|_| AppError::Unauthorized)?;
        mac.update(header_b64.as_bytes());
        mac.update(b".");
        mac.update(claims_b64.as_bytes());
        mac.verify_slice(&signature)
            .map_err(|_| AppError::Unauthorized)?;

        let header: Header = decode_segment(header_b64)?;
        if header.alg != "HS256" {
            return Err(AppError::Unauthorized);
        }

        let claims: Claims = decode_segment(claims_b64)?;
        if now.timestamp() >= claims.exp {
            return Err(AppError::Unauthorized);
        }

        Ok(claims)
    }
}

fn decode_segment<T: serde::de::DeserializeOwned>(segment: &str) -> Result<T, AppError> {
    let bytes = URL_SAFE_NO_PAD
        .decode(segment)
        .map_err(|_| AppError::Unauthorized)?;
    serde_json::from_slice(&bytes).map_err(|_| AppError::Unauthorized)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret-key-32-bytes-long!!!";

    fn signer() -> TokenSigner {
        TokenSigner::new(SECRET, Duration::seconds(86_400))
    }

    #[test]
    fn issued_token_verifies_to_same_user() {
        let signer = signer();
        let now = Utc::now();

        let token = signer.issue_at(UserId(1), now).unwrap();
        let claims = signer.verify_at(&token, now).unwrap();

        assert_eq!(claims.user_id, UserId(1));
        assert_eq!(claims.exp - claims.iat, 86_400);
    }

    #[test]
    fn token_is_a_three_part_jwt() {
        let token = signer().issue_at(UserId(7), Utc::now()).unwrap();
        let parts: Vec<&str> = token.split('.').collect();

        assert_eq!(parts.len(), 3);
        let header = URL_SAFE_NO_PAD.decode(parts[0]).unwrap();
        assert_eq!(header, HEADER.as_bytes());
    }

    #[test]
    fn token_expires_after_ttl() {
        let signer = signer();
        let issued = Utc::now();
        let token = signer.issue_at(UserId(1), issued).unwrap();

        let just_before = issued + Duration::seconds(86_399);
        assert!(signer.verify_at(&token, just_before).is_ok());

        let at_expiry = issued + Duration::seconds(86_400);
        assert!(matches!(
            signer.verify_at(&token, at_expiry),
            Err(AppError::Unauthorized)
        ));
    }

    #[test]
    fn token_from_other_secret_is_rejected() {
        let now = Utc::now();
        let other = TokenSigner::new("another-secret-key-32-bytes-long", Duration::days(1));
        let token = other.issue_at(UserId(1), now).unwrap();

        assert!(matches!(
            signer().verify_at(&token, now),
            Err(AppError::Unauthorized)
        ));
    }

    #[test]
    fn tampered_claims_are_rejected() {
        let signer = signer();
        let now = Utc::now();
        let token = signer.issue_at(UserId(1), now).unwrap();

        let parts: Vec<&str> = token.split('.').collect();
        let forged_claims = URL_SAFE_NO_PAD.encode(
            serde_json::to_vec(&Claims {
                user_id: UserId(2),
                iat: now.timestamp(),
                exp: now.timestamp() + 86_400,
            })
            .unwrap(),
        );
        let forged = format!("{}.{}.{}", parts[0], forged_claims, parts[2]);

        assert!(matches!(
            signer.verify_at(&forged, now),
            Err(AppError::Unauthorized)
        ));
    }

    /// Sign arbitrary header and claims JSON the way any HS256 library would
    fn sign_raw(secret: &str, header: &str, claims: &str) -> String {
        let signing_input = format!(
            "{}.{}",
            URL_SAFE_NO_PAD.encode(header),
            URL_SAFE_NO_PAD.encode(claims)
        );
        let mut mac = HmacSha256::new_from_slice(secret.as_bytes()).unwrap();
        mac.update(signing_input.as_bytes());
        let signature = URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes());
        format!("{signing_input}.{signature}")
    }

    #[test]
    fn token_without_iat_is_accepted() {
        let now = Utc::now();
        let claims = format!(r#"{{"user_id":1,"exp":{}}}"#, now.timestamp() + 3600);
        let token = sign_raw(SECRET, r#"{"typ":"JWT","alg":"HS256"}"#, &claims);

        let claims = signer().verify_at(&token, now).unwrap();
        assert_eq!(claims.user_id, UserId(1));
        assert_eq!(claims.iat, 0);

        let after_expiry = now + Duration::seconds(3600);
        assert!(matches!(
            signer().verify_at(&token, after_expiry),
            Err(AppError::Unauthorized)
        ));
    }

    #[test]
    fn token_with_other_algorithm_is_rejected() {
        let now = Utc::now();
        let claims = format!(r#"{{"user_id":1,"exp":{}}}"#, now.timestamp() + 3600);
        let token = sign_raw(SECRET, r#"{"typ":"JWT","alg":"HS512"}"#, &claims);

        assert!(matches!(
            signer().verify_at(&token, now),
            Err(AppError::Unauthorized)
        ));
    }

    #[test]
    fn malformed_tokens_are_rejected() {
        let signer = signer();
        let now = Utc::now();

        for token in ["", "abc", "a.b", "a.b.c", "a.b.c.d", "...", "!!.??.**"] {
            assert!(
                matches!(signer.verify_at(token, now), Err(AppError::Unauthorized)),
                "token {token:?} must be rejected"
            );
        }
    }
}
