//! Signing adapter for `ureq` / `http` requests.

use rsa::RsaPrivateKey;
use ureq::http::{HeaderValue, Request};

use crate::encoding::Charset;
use crate::error::OAuthError;
use crate::signature::SignatureMethod;
use crate::{AUTHORIZATION_HEADER_NAME, compute_authorization_header};

/// Signs outgoing requests with a fixed consumer key and private key.
pub struct RequestSigner {
    consumer_key: String,
    signing_key: RsaPrivateKey,
    charset: Charset,
    signature_method: Option<SignatureMethod>,
}

impl RequestSigner {
    /// Create a signer using UTF-8 and signature method probing.
    pub fn new(consumer_key: &str, signing_key: RsaPrivateKey) -> Self {
        Self {
            consumer_key: consumer_key.to_owned(),
            signing_key,
            charset: Charset::Utf8,
            signature_method: None,
        }
    }

    /// Use a different charset for request text.
    #[must_use]
    pub fn with_charset(mut self, charset: Charset) -> Self {
        self.charset = charset;
        self
    }

    /// Always sign with the given method instead of probing.
    #[must_use]
    pub fn with_signature_method(mut self, signature_method: SignatureMethod) -> Self {
        self.signature_method = Some(signature_method);
        self
    }

    /// Consumer key this signer identifies as.
    pub fn consumer_key(&self) -> &str {
        &self.consumer_key
    }

    /// Compute the `Authorization` header value for a request.
    pub fn authorization_header<B: AsRef<[u8]>>(&self, request: &Request<B>) -> Result<String, OAuthError> {
        let body = request.body().as_ref();
        let payload = (!body.is_empty()).then(|| self.charset.decode(body));

        compute_authorization_header(
            request.uri(),
            request.method().as_str(),
            payload.as_deref(),
            self.charset,
            &self.consumer_key,
            Some(&self.signing_key),
            self.signature_method,
        )
    }

    /// Sign a request in place by setting its `Authorization` header.
    pub fn sign<B: AsRef<[u8]>>(&self, request: &mut Request<B>) -> Result<(), OAuthError> {
        let header = HeaderValue::from_str(&self.authorization_header(request)?)?;
        request.headers_mut().insert(AUTHORIZATION_HEADER_NAME, header);
        Ok(())
    }
}
