//! CLI error types.

use mcsign_config::ConfigError;
use mcsign_oauth::{OAuthError, RsaKeyError};

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    OAuth(#[from] OAuthError),

    #[error("{0}")]
    Key(#[from] RsaKeyError),

    #[error("invalid request: {0}")]
    Request(#[from] ureq::http::Error),

    #[error("{0}")]
    Http(#[from] ureq::Error),

    #[error("request failed with HTTP status {0}")]
    HttpStatus(u16),
}
