//! Request and credential arguments shared by `sign` and `send`.

use std::path::PathBuf;

use clap::Args;
use mcsign_config::{CliSettings, Config};
use mcsign_oauth::{Charset, RequestSigner, SignatureMethod, load_private_key_from_file};
use ureq::http::Request;

use crate::error::CliError;

/// Arguments describing the request to sign and the signing credentials.
#[derive(Args)]
pub(crate) struct RequestArgs {
    /// Absolute request URI, including the query string.
    #[arg(short, long)]
    uri: String,

    /// HTTP method.
    #[arg(short = 'X', long, default_value = "GET")]
    method: String,

    /// Request body.
    #[arg(short, long, conflicts_with = "body_file")]
    body: Option<String>,

    /// Read the request body from a file (sent byte-for-byte).
    #[arg(long)]
    body_file: Option<PathBuf>,

    /// Content-Type sent with a non-empty body.
    #[arg(long, default_value = "application/json")]
    content_type: String,

    /// Consumer key (default: from config).
    #[arg(long, env = "MCSIGN_CONSUMER_KEY")]
    consumer_key: Option<String>,

    /// Path to the PEM private key (default: from config).
    #[arg(short = 'k', long, env = "MCSIGN_PRIVATE_KEY")]
    private_key: Option<PathBuf>,

    /// Signature method: RSA-SHA256 or RSA-PSS (default: probe both).
    #[arg(long)]
    signature_method: Option<String>,

    /// Charset of the request text (default: UTF-8).
    #[arg(long)]
    charset: Option<String>,

    /// Path to configuration file (default: auto-discover mcsign.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose output.
    #[arg(short, long)]
    pub(crate) verbose: bool,
}

impl RequestArgs {
    /// Resolve credentials and build the signer plus the unsigned request.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration, key or request arguments are invalid.
    pub(crate) fn prepare(self) -> Result<(RequestSigner, Request<Vec<u8>>), CliError> {
        let settings = CliSettings {
            consumer_key: self.consumer_key,
            private_key: self.private_key,
            signature_method: self.signature_method,
            charset: self.charset,
        };
        let config = Config::load(self.config.as_deref(), Some(&settings))?;
        let signing = config.require_signing()?;

        let charset = signing
            .charset
            .as_deref()
            .map(str::parse::<Charset>)
            .transpose()?
            .unwrap_or_default();
        let signature_method = signing
            .signature_method
            .as_deref()
            .map(str::parse::<SignatureMethod>)
            .transpose()?;

        tracing::info!(path = %signing.private_key.display(), "Loading private key");
        let key = load_private_key_from_file(&signing.private_key)?;

        let mut signer = RequestSigner::new(&signing.consumer_key, key).with_charset(charset);
        if let Some(method) = signature_method {
            signer = signer.with_signature_method(method);
        }

        let body = match (self.body, self.body_file) {
            (Some(text), _) => charset.encode(&text).into_owned(),
            (None, Some(path)) => std::fs::read(path)?,
            (None, None) => Vec::new(),
        };

        let mut builder = Request::builder()
            .method(self.method.to_ascii_uppercase().as_str())
            .uri(self.uri.as_str());
        if !body.is_empty() {
            builder = builder.header("Content-Type", self.content_type.as_str());
        }

        Ok((signer, builder.body(body)?))
    }
}
