//! Bearer token verification for the admin API.

use serde_json::json;
use sha2::{Digest, Sha256};

use crate::error::AppError;

/// Verifies admin bearer tokens against the configured secret.
///
/// Only a SHA-256 digest of the secret is retained, and comparison happens
/// digest-to-digest so token length is not observable through timing.
#[derive(Clone)]
pub struct AuthService {
    token_digest: [u8; 32],
}

impl AuthService {
    pub fn new(admin_token: &str) -> Self {
        Self {
            token_digest: Sha256::digest(admin_token.as_bytes()).into(),
        }
    }

    /// Whether a presented token matches the configured secret.
    pub fn verify(&self, token: &str) -> bool {
        let presented: [u8; 32] = Sha256::digest(token.as_bytes()).into();
        presented
            .iter()
            .zip(self.token_digest.iter())
            .fold(0u8, |acc, (a, b)| acc | (a ^ b))
            == 0
    }

    /// Like [`verify`](Self::verify), but yields the API error directly.
    pub fn authenticate(&self, token: &str) -> Result<(), AppError> {
        if self.verify(token) {
            Ok(())
        } else {
            Err(AppError::unauthorized("Invalid bearer token", json!({})))
        }
    }
}
