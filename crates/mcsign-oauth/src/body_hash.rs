//! Request body hash (`oauth_body_hash` extension).

use std::str::FromStr;

use sha2::{Digest, Sha256, Sha384, Sha512};

use crate::encoding::{Charset, b64_encode};
use crate::error::OAuthError;

/// Digest algorithm used by the `oauth_body_hash` parameter.
pub const BODY_HASH_ALGORITHM: &str = "SHA-256";

/// Supported body hash digests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DigestAlgorithm {
    Sha256,
    Sha384,
    Sha512,
}

impl DigestAlgorithm {
    fn digest(self, data: &[u8]) -> Vec<u8> {
        match self {
            Self::Sha256 => Sha256::digest(data).to_vec(),
            Self::Sha384 => Sha384::digest(data).to_vec(),
            Self::Sha512 => Sha512::digest(data).to_vec(),
        }
    }
}

impl FromStr for DigestAlgorithm {
    type Err = OAuthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "SHA-256" | "SHA256" => Ok(Self::Sha256),
            "SHA-384" | "SHA384" => Ok(Self::Sha384),
            "SHA-512" | "SHA512" => Ok(Self::Sha512),
            _ => Err(OAuthError::UnsupportedDigest(s.to_owned())),
        }
    }
}

/// Hash a request body and return the base64-encoded digest.
///
/// A missing body is hashed as the empty string.
pub fn body_hash(body: Option<&str>, charset: Charset, algorithm: &str) -> Result<String, OAuthError> {
    let algorithm: DigestAlgorithm = algorithm.parse()?;
    let bytes = charset.encode(body.unwrap_or_default());
    Ok(b64_encode(&algorithm.digest(&bytes)))
}

#[cfg(test)]
mod tests {
    use super::*;

    const EMPTY_SHA256: &str = "47DEQpj8HBSa+/TImW+5JCeuQeRkm5NMpJWZG3hSuFU=";

    #[test]
    fn test_empty_and_missing_body() {
        assert_eq!(
            body_hash(Some(""), Charset::Utf8, BODY_HASH_ALGORITHM).unwrap(),
            EMPTY_SHA256
        );
        assert_eq!(
            body_hash(None, Charset::Utf8, BODY_HASH_ALGORITHM).unwrap(),
            EMPTY_SHA256
        );
        assert_eq!(
            body_hash(None, Charset::Iso8859_1, BODY_HASH_ALGORITHM).unwrap(),
            EMPTY_SHA256
        );
    }

    #[test]
    fn test_body_hash_uses_charset() {
        let body = "{\"fo√µ\":\"bar\"}";
        assert_eq!(
            body_hash(Some(body), Charset::Utf8, BODY_HASH_ALGORITHM).unwrap(),
            "BG2elossbUW1PulKJhaZieLPNICZ+MJqg4I5KSLMfo8="
        );
        assert_eq!(
            body_hash(Some(body), Charset::Iso8859_1, BODY_HASH_ALGORITHM).unwrap(),
            "Cbl9Mi93q9L1S63lTHRSYM8XWnGrAMkBDy0IJwmmDhA="
        );
    }

    #[test]
    fn test_json_body() {
        assert_eq!(
            body_hash(Some(r#"{"foo":"bar"}"#), Charset::Utf8, BODY_HASH_ALGORITHM).unwrap(),
            "eji/gfOD9pQzrW6QDTWz4jhVk/dqe3q11DVbi6Qe4ks="
        );
    }

    #[test]
    fn test_other_digests() {
        assert_eq!(
            body_hash(None, Charset::Utf8, "SHA-384").unwrap(),
            "OLBgp1GsljhM2TJ+sbHjaiH9txEUvgdDTAzHv2P24donTt6/529l+9Ua0vFImLlb"
        );
        assert_eq!(
            body_hash(None, Charset::Utf8, "sha512").unwrap(),
            "z4PhNX7vuL3xVChQ1m2AB9Yg5AULVxXcg/SpIdNs6c5H0NE8XYXysP+DGNKHfuwvY7kxvUdBeoGlODJ6+SfaPg=="
        );
    }

    #[test]
    fn test_unsupported_digest() {
        let err = body_hash(Some(""), Charset::Utf8, "SHA-123").unwrap_err();
        assert!(matches!(err, OAuthError::UnsupportedDigest(ref name) if name == "SHA-123"));
        assert_eq!(err.to_string(), "unable to obtain SHA-123 message digest");
    }
}
