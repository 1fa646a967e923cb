//! Base string URI normalization (RFC 5849 Section 3.4.1.2).

use ureq::http::Uri;

use crate::error::OAuthError;

/// Normalize a request URI into its base string form.
///
/// Scheme and authority are lowercased, default ports (80 for http,
/// 443 for https) are dropped, an empty path becomes `/` and query and
/// fragment are discarded. The path is copied verbatim: existing escapes
/// and reserved characters are neither decoded nor re-encoded.
pub fn base_uri_string(uri: &Uri) -> Result<String, OAuthError> {
    let scheme = uri
        .scheme_str()
        .ok_or_else(|| invalid_uri(uri, "missing scheme"))?
        .to_ascii_lowercase();
    let mut authority = uri
        .authority()
        .ok_or_else(|| invalid_uri(uri, "missing authority"))?
        .as_str()
        .to_ascii_lowercase();

    let default_port = match scheme.as_str() {
        "http" => Some(80),
        "https" => Some(443),
        _ => None,
    };
    if default_port.is_some()
        && uri.port_u16() == default_port
        && let Some(index) = authority.rfind(':')
    {
        authority.truncate(index);
    }

    let path = match uri.path() {
        "" => "/",
        path => path,
    };

    Ok(format!("{scheme}://{authority}{path}"))
}

fn invalid_uri(uri: &Uri, reason: &'static str) -> OAuthError {
    OAuthError::InvalidUri {
        uri: uri.to_string(),
        reason,
    }
}
