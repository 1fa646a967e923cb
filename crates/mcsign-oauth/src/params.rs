//! Request parameter extraction and normalization (RFC 5849 Section 3.4.1.3).

use std::collections::BTreeMap;

use percent_encoding::percent_decode_str;
use ureq::http::Uri;

use crate::encoding::{Charset, percent_encode};
use crate::header::OAuthParams;

/// Query parameters keyed by name, sorted by byte value.
///
/// Values of repeated names keep their order of appearance.
pub type QueryParams = BTreeMap<String, Vec<String>>;

/// Parse query parameters out of a URI.
///
/// The query is split after percent-decoding. When decoding changed anything
/// (the URI carried escapes) names and values are re-encoded so they match
/// their signing form; a plain query is kept verbatim to avoid encoding it
/// twice. The decision is made once for the whole query, not per parameter.
#[must_use]
pub fn extract_query_params(uri: &Uri, charset: Charset) -> QueryParams {
    let mut query_params = QueryParams::new();
    let Some(raw_query) = uri.query().filter(|q| !q.is_empty()) else {
        return query_params;
    };

    let decoded_query = percent_decode_str(raw_query).decode_utf8_lossy();
    let must_encode = decoded_query != raw_query;
    let normalize = |s: &str| {
        if must_encode {
            percent_encode(s, charset)
        } else {
            s.to_owned()
        }
    };

    // Trailing separators produce no pairs; empty pairs in between do
    let pairs = decoded_query.trim_end_matches('&');
    if pairs.is_empty() {
        return query_params;
    }

    for pair in pairs.split('&') {
        let (key, value) = match pair.find('=') {
            Some(idx) if idx > 0 => (&pair[..idx], &pair[idx + 1..]),
            _ => (pair, ""),
        };
        query_params
            .entry(normalize(key))
            .or_default()
            .push(normalize(value));
    }

    query_params
}

/// Build the normalized parameter string (RFC 5849 Section 3.4.1.3.2).
///
/// OAuth parameters are merged into the query parameters, values of repeated
/// names are sorted by byte value and pairs are joined with `&` in key order.
#[must_use]
pub fn to_oauth_param_string(query_params: &QueryParams, oauth_params: &OAuthParams) -> String {
    let mut consolidated = query_params.clone();
    for (key, value) in oauth_params.iter() {
        consolidated
            .entry(key.to_owned())
            .or_default()
            .push(value.to_owned());
    }

    let mut pairs = Vec::new();
    for (key, values) in &mut consolidated {
        if values.len() > 1 {
            values.sort();
        }
        for value in values.iter() {
            pairs.push(format!("{key}={value}"));
        }
    }

    pairs.join("&")
}
