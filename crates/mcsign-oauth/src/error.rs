//! Error types for OAuth request signing.

use std::path::PathBuf;
use std::str::Utf8Error;

/// Error from computing an OAuth `Authorization` header.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum OAuthError {
    /// A required argument was missing or empty.
    #[error("missing required argument: {name}")]
    InvalidArgument {
        /// Argument name.
        name: &'static str,
    },

    /// URI cannot be normalized (no scheme or authority).
    #[error("unable to normalize URI {uri}: {reason}")]
    InvalidUri {
        /// Offending URI.
        uri: String,
        /// What is missing.
        reason: &'static str,
    },

    /// Requested body hash algorithm is not available.
    #[error("unable to obtain {0} message digest")]
    UnsupportedDigest(String),

    /// Signing key is missing.
    #[error("signing key is required")]
    InvalidKey,

    /// Cryptographic signing failed.
    #[error("unable to {method} sign the signature base string")]
    Signing {
        /// OAuth name of the signature method that failed.
        method: &'static str,
        /// Underlying signature error.
        #[source]
        source: rsa::signature::Error,
    },

    /// Unknown charset name.
    #[error("unsupported charset: {0}")]
    UnsupportedCharset(String),

    /// Unknown signature method name.
    #[error("unknown signature method: {0}")]
    UnknownSignatureMethod(String),

    /// Computed header is not a valid HTTP header value.
    #[error("invalid Authorization header value")]
    InvalidHeader(#[from] ureq::http::header::InvalidHeaderValue),
}

/// RSA key loading/parsing error.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum RsaKeyError {
    /// Key file could not be read.
    #[error("failed to read key file {}", path.display())]
    Read {
        /// Key file path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Invalid UTF-8 in key.
    #[error("invalid UTF-8 in key")]
    InvalidUtf8(#[from] Utf8Error),

    /// PKCS#1 key parsing error.
    #[error("PKCS#1 key error")]
    Pkcs1(#[from] rsa::pkcs1::Error),

    /// PKCS#8 key parsing error (returned when both formats fail).
    #[error("PKCS#8 key error")]
    Pkcs8(#[from] rsa::pkcs8::Error),
}
