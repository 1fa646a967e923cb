//! Signature base string and RSA signing (RFC 5849 Sections 3.4.1 and 3.4.3).
//!
//! RSA-SHA256 replaces the RFC's RSA-SHA1. RSA-PSS is the fallback when
//! PKCS#1 v1.5 signing fails and no method was requested explicitly.

use std::fmt;
use std::str::FromStr;

use rsa::RsaPrivateKey;
use rsa::rand_core::OsRng;
use rsa::signature::{RandomizedSigner, SignatureEncoding, Signer};
use rsa::{pkcs1v15, pss};
use sha2::Sha256;

use crate::encoding::{Charset, b64_encode, percent_encode};
use crate::error::OAuthError;

/// RSA signature scheme used for `oauth_signature`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SignatureMethod {
    /// RSASSA-PKCS1-v1_5 with SHA-256.
    #[default]
    RsaSha256,
    /// RSASSA-PSS with SHA-256, MGF1-SHA-256, 32-byte salt, trailer field 1.
    RsaPssSha256,
}

/// Methods tried in order when none is requested.
const PROBE_ORDER: &[SignatureMethod] = &[SignatureMethod::RsaSha256, SignatureMethod::RsaPssSha256];

impl SignatureMethod {
    /// PSS salt length in bytes.
    pub const PSS_SALT_LENGTH: usize = 32;

    /// Value of the `oauth_signature_method` parameter.
    #[must_use]
    pub fn oauth_name(self) -> &'static str {
        match self {
            Self::RsaSha256 => "RSA-SHA256",
            Self::RsaPssSha256 => "RSA-PSS",
        }
    }

    /// Methods to attempt, in order, for an optional explicit choice.
    #[must_use]
    pub fn candidates(requested: Option<Self>) -> &'static [Self] {
        match requested {
            None => PROBE_ORDER,
            Some(Self::RsaSha256) => &[Self::RsaSha256],
            Some(Self::RsaPssSha256) => &[Self::RsaPssSha256],
        }
    }

    fn sign_bytes(self, key: &RsaPrivateKey, data: &[u8]) -> Result<Vec<u8>, rsa::signature::Error> {
        match self {
            Self::RsaSha256 => {
                let signing_key = pkcs1v15::SigningKey::<Sha256>::new(key.clone());
                Ok(signing_key.try_sign(data)?.to_vec())
            }
            Self::RsaPssSha256 => {
                let signing_key =
                    pss::BlindedSigningKey::<Sha256>::new_with_salt_len(key.clone(), Self::PSS_SALT_LENGTH);
                Ok(signing_key.try_sign_with_rng(&mut OsRng, data)?.to_vec())
            }
        }
    }
}

impl fmt::Display for SignatureMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.oauth_name())
    }
}

impl FromStr for SignatureMethod {
    type Err = OAuthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "RSA-SHA256" => Ok(Self::RsaSha256),
            "RSA-PSS" | "RSA-PSS-SHA256" => Ok(Self::RsaPssSha256),
            _ => Err(OAuthError::UnknownSignatureMethod(s.to_owned())),
        }
    }
}

/// Build the signature base string (RFC 5849 Section 3.4.1).
///
/// Format: `HTTP_METHOD&encoded_base_uri&encoded_parameters`
#[must_use]
pub fn signature_base_string(
    http_method: &str,
    base_uri: &str,
    param_string: &str,
    charset: Charset,
) -> String {
    let sbs = format!(
        "{}&{}&{}",
        http_method.to_uppercase(),
        percent_encode(base_uri, charset),
        percent_encode(param_string, charset)
    );
    tracing::debug!(sbs = %sbs, "Generated signature base string");
    sbs
}

/// Sign a signature base string and return the base64-encoded signature.
///
/// # Errors
///
/// Returns [`OAuthError::InvalidKey`] when no key is given and
/// [`OAuthError::Signing`] when the RSA operation fails.
pub fn sign_signature_base_string(
    sbs: &str,
    signing_key: Option<&RsaPrivateKey>,
    charset: Charset,
    method: SignatureMethod,
) -> Result<String, OAuthError> {
    let signing_key = signing_key.ok_or(OAuthError::InvalidKey)?;
    let signature = method
        .sign_bytes(signing_key, &charset.encode(sbs))
        .map_err(|source| OAuthError::Signing {
            method: method.oauth_name(),
            source,
        })?;
    Ok(b64_encode(&signature))
}

/// Try each candidate method in order and return the first that signs.
///
/// Only signing failures move on to the next candidate; the last candidate's
/// error is returned when none succeeds.
pub(crate) fn sign_with_first_supported<F>(
    candidates: &[SignatureMethod],
    mut attempt: F,
) -> Result<(SignatureMethod, String), OAuthError>
where
    F: FnMut(SignatureMethod) -> Result<String, OAuthError>,
{
    let mut candidates = candidates.iter().copied().peekable();
    while let Some(method) = candidates.next() {
        match attempt(method) {
            Ok(signature) => return Ok((method, signature)),
            Err(err @ OAuthError::Signing { .. }) if candidates.peek().is_some() => {
                tracing::debug!(method = %method, error = %err, "Signature method unavailable, trying next");
            }
            Err(err) => return Err(err),
        }
    }
    Err(OAuthError::InvalidArgument {
        name: "signature_method",
    })
}
