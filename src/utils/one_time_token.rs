//! One-time tokens for email verification and password reset.
//!
//! The raw token is 20 random bytes rendered as 40 lowercase hex characters and
//! is only ever sent to the user. The database stores its SHA-256 digest, so a
//! leaked table cannot be replayed against the verify/reset endpoints.

use chrono::{DateTime, Duration, Utc};
use rand::RngCore;
use sha2::{Digest, Sha256};

/// Number of random bytes in a raw token.
const TOKEN_BYTES: usize = 20;

/// Lifetime of an email verification token.
pub fn verification_ttl() -> Duration {
    Duration::hours(24)
}

/// Lifetime of a password reset token.
pub fn reset_ttl() -> Duration {
    Duration::minutes(15)
}

/// A freshly generated token: the raw value to mail out and the digest to store.
#[derive(Debug, Clone)]
pub struct OneTimeToken {
    pub raw: String,
    pub hash: String,
    pub expires_at: DateTime<Utc>,
}

impl OneTimeToken {
    /// Generates a token that expires `ttl` after `now`.
    pub fn generate(now: DateTime<Utc>, ttl: Duration) -> Self {
        let mut bytes = [0u8; TOKEN_BYTES];
        rand::rng().fill_bytes(&mut bytes);
        let raw = hex::encode(bytes);
        let hash = hash_token(&raw);

        Self {
            raw,
            hash,
            expires_at: now + ttl,
        }
    }
}

/// SHA-256 digest of a raw token as 64 lowercase hex characters.
pub fn hash_token(raw: &str) -> String {
    hex::encode(Sha256::digest(raw.as_bytes()))
}
