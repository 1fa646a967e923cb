//! Nonce and timestamp sources (RFC 5849 Section 3.3).

use std::time::{SystemTime, UNIX_EPOCH};

use rand::RngExt;

/// Length of generated nonces.
pub const NONCE_LENGTH: usize = 16;

const ALPHA_NUMERIC_CHARS: &[u8] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

/// Source of `oauth_nonce` values.
///
/// Implementations are shared between concurrent signing calls.
pub trait NonceSource: Send + Sync {
    /// Produce a fresh nonce.
    fn nonce(&self) -> String;
}

/// Source of `oauth_timestamp` values.
pub trait Clock: Send + Sync {
    /// Seconds since the Unix epoch.
    fn unix_timestamp(&self) -> u64;
}

/// Nonces drawn from the thread-local CSPRNG.
#[derive(Debug, Clone, Copy, Default)]
pub struct SecureRandomNonce;

impl NonceSource for SecureRandomNonce {
    fn nonce(&self) -> String {
        generate_nonce()
    }
}

/// Wall clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn unix_timestamp(&self) -> u64 {
        // A clock set before 1970 reports the epoch itself
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or_default()
    }
}

/// Generate a cryptographically random nonce (16 alphanumeric characters).
#[must_use]
pub fn generate_nonce() -> String {
    let mut rng = rand::rng();
    (0..NONCE_LENGTH)
        .map(|_| char::from(ALPHA_NUMERIC_CHARS[rng.random_range(0..ALPHA_NUMERIC_CHARS.len())]))
        .collect()
}
