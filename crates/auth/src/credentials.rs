//! Credential service boundary: password hashing + token issuance/resolution.
//!
//! Engines treat this as an opaque collaborator. The default implementation
//! hashes with Argon2id and signs HS256 tokens.

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use chrono::{DateTime, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use thiserror::Error;

use crate::claims::{AccessClaims, TokenValidationError, validate_claims};

#[derive(Debug, Error)]
pub enum CredentialError {
    #[error("password hashing failed: {0}")]
    Hash(String),

    #[error("token encoding/decoding failed: {0}")]
    Token(String),

    #[error(transparent)]
    Claims(#[from] TokenValidationError),
}

/// Opaque credential-and-token service.
pub trait CredentialService: Send + Sync {
    fn hash_password(&self, password: &str) -> Result<String, CredentialError>;

    fn verify_password(&self, password: &str, hash: &str) -> bool;

    fn issue_token(&self, claims: &AccessClaims) -> Result<String, CredentialError>;

    /// Decode and validate a bearer token at `now`.
    fn resolve_token(&self, token: &str, now: DateTime<Utc>) -> Result<AccessClaims, CredentialError>;
}

/// Argon2id passwords + HS256 bearer tokens.
pub struct ArgonHs256Credentials {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl ArgonHs256Credentials {
    pub fn new(secret: &[u8]) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
        }
    }
}

impl CredentialService for ArgonHs256Credentials {
    fn hash_password(&self, password: &str) -> Result<String, CredentialError> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| CredentialError::Hash(e.to_string()))?;
        Ok(hash.to_string())
    }

    fn verify_password(&self, password: &str, hash: &str) -> bool {
        let Ok(parsed) = PasswordHash::new(hash) else {
            return false;
        };
        Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok()
    }

    fn issue_token(&self, claims: &AccessClaims) -> Result<String, CredentialError> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding)
            .map_err(|e| CredentialError::Token(e.to_string()))
    }

    fn resolve_token(&self, token: &str, now: DateTime<Utc>) -> Result<AccessClaims, CredentialError> {
        // Expiry is checked by `validate_claims` so callers control the clock.
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.required_spec_claims.clear();

        let data = decode::<AccessClaims>(token, &self.decoding, &validation)
            .map_err(|e| CredentialError::Token(e.to_string()))?;
        validate_claims(&data.claims, now)?;
        Ok(data.claims)
    }
}
