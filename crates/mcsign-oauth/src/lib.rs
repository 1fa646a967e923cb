//! Mastercard OAuth 1.0a request signing.
//!
//! Computes the `Authorization` header for a request as described in
//! RFC 5849, with two departures required by Mastercard APIs:
//!
//! - the request body is bound to the signature through the
//!   `oauth_body_hash` parameter (SHA-256, base64);
//! - signatures use RSA-SHA256 (PKCS#1 v1.5), falling back to RSA-PSS when
//!   PKCS#1 v1.5 signing fails and no method was requested explicitly.
//!
//! ```no_run
//! use mcsign_oauth::{Charset, compute_authorization_header, load_private_key_from_file};
//!
//! let key = load_private_key_from_file("signing.pem")?;
//! let uri = "https://sandbox.api.mastercard.com/service?format=json".parse()?;
//! let header = compute_authorization_header(
//!     &uri,
//!     "POST",
//!     Some(r#"{"foo":"bar"}"#),
//!     Charset::Utf8,
//!     "consumer-key",
//!     Some(&key),
//!     None,
//! )?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod body_hash;
mod encoding;
mod error;
mod header;
mod key;
mod nonce;
mod params;
mod signature;
mod signer;
mod uri;

#[cfg(test)]
mod test_keys;

pub use body_hash::{BODY_HASH_ALGORITHM, DigestAlgorithm, body_hash};
pub use encoding::{Charset, b64_encode, percent_encode};
pub use error::{OAuthError, RsaKeyError};
pub use header::OAuthParams;
pub use key::{load_private_key, load_private_key_from_file};
pub use nonce::{Clock, NONCE_LENGTH, NonceSource, SecureRandomNonce, SystemClock, generate_nonce};
pub use params::{QueryParams, extract_query_params, to_oauth_param_string};
pub use rsa::RsaPrivateKey;
pub use signature::{SignatureMethod, sign_signature_base_string, signature_base_string};
pub use signer::RequestSigner;
pub use ureq::http::Uri;
pub use uri::base_uri_string;

use signature::sign_with_first_supported;

/// Name of the header carrying the OAuth credentials.
pub const AUTHORIZATION_HEADER_NAME: &str = "Authorization";

/// OAuth protocol version sent in `oauth_version`.
pub const OAUTH_VERSION: &str = "1.0";

/// Everything needed to sign one request.
#[derive(Debug, Clone, Copy)]
pub struct SigningRequest<'a> {
    /// Absolute target URI, including the query string.
    pub uri: &'a Uri,
    /// HTTP method (case-insensitive).
    pub method: &'a str,
    /// Request payload, if any.
    pub body: Option<&'a str>,
    /// Charset of the request text.
    pub charset: Charset,
    /// Consumer key issued for the signing key.
    pub consumer_key: &'a str,
    /// Private key the request is signed with.
    pub signing_key: Option<&'a RsaPrivateKey>,
    /// Requested signature method; `None` probes RSA-SHA256 then RSA-PSS.
    pub signature_method: Option<SignatureMethod>,
}

impl SigningRequest<'_> {
    /// Check that every required argument is present.
    fn validate(&self) -> Result<&RsaPrivateKey, OAuthError> {
        if self.method.trim().is_empty() {
            return Err(OAuthError::InvalidArgument { name: "method" });
        }
        if self.consumer_key.is_empty() {
            return Err(OAuthError::InvalidArgument {
                name: "consumer_key",
            });
        }
        self.signing_key.ok_or(OAuthError::InvalidArgument {
            name: "signing_key",
        })
    }
}

/// Create a Mastercard compliant OAuth `Authorization` header value.
///
/// # Arguments
/// * `uri` - Target URI of the request
/// * `method` - HTTP method of the request
/// * `body` - Request payload (`None` hashes the empty string)
/// * `charset` - Charset of the request
/// * `consumer_key` - Consumer key of the Mastercard Developers project
/// * `signing_key` - Private key matching the consumer key
/// * `signature_method` - Signature method, or `None` to probe
#[allow(clippy::too_many_arguments)]
pub fn compute_authorization_header(
    uri: &Uri,
    method: &str,
    body: Option<&str>,
    charset: Charset,
    consumer_key: &str,
    signing_key: Option<&RsaPrivateKey>,
    signature_method: Option<SignatureMethod>,
) -> Result<String, OAuthError> {
    let request = SigningRequest {
        uri,
        method,
        body,
        charset,
        consumer_key,
        signing_key,
        signature_method,
    };
    compute_authorization_header_with(&request, &SecureRandomNonce, &SystemClock)
}

/// Create the `Authorization` header value with explicit nonce and clock sources.
pub fn compute_authorization_header_with(
    request: &SigningRequest<'_>,
    nonces: &dyn NonceSource,
    clock: &dyn Clock,
) -> Result<String, OAuthError> {
    let signing_key = request.validate()?;
    let charset = request.charset;

    let query_params = extract_query_params(request.uri, charset);

    let mut oauth_params = OAuthParams::new();
    oauth_params.insert("oauth_consumer_key", request.consumer_key);
    oauth_params.insert("oauth_nonce", nonces.nonce());
    oauth_params.insert("oauth_timestamp", clock.unix_timestamp().to_string());
    oauth_params.insert("oauth_version", OAUTH_VERSION);
    oauth_params.insert(
        "oauth_body_hash",
        body_hash(request.body, charset, BODY_HASH_ALGORITHM)?,
    );

    // Normalized URI without query and fragment
    let base_uri = base_uri_string(request.uri)?;

    let candidates = SignatureMethod::candidates(request.signature_method);
    let (method, signature) = sign_with_first_supported(candidates, |method| {
        // The signed parameters must name the method actually used
        oauth_params.insert("oauth_signature_method", method.oauth_name());
        let param_string = to_oauth_param_string(&query_params, &oauth_params);
        tracing::trace!(param_string = %param_string, "Normalized parameters");
        let sbs = signature_base_string(request.method, &base_uri, &param_string, charset);
        sign_signature_base_string(&sbs, Some(signing_key), charset, method)
    })?;

    oauth_params.insert("oauth_signature_method", method.oauth_name());
    oauth_params.insert("oauth_signature", signature);

    Ok(oauth_params.to_header(charset))
}
