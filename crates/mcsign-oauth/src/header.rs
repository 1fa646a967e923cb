//! OAuth protocol parameters and `Authorization` header formatting.

use crate::encoding::{Charset, percent_encode};

/// Ordered set of `oauth_*` protocol parameters.
///
/// Iteration follows insertion order, which is also the field order of the
/// rendered header. Inserting an existing name replaces its value in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OAuthParams {
    params: Vec<(&'static str, String)>,
}

impl OAuthParams {
    /// Create an empty parameter set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a parameter value.
    pub fn insert(&mut self, name: &'static str, value: impl Into<String>) {
        let value = value.into();
        match self.params.iter_mut().find(|(k, _)| *k == name) {
            Some((_, existing)) => *existing = value,
            None => self.params.push((name, value)),
        }
    }

    /// Get a parameter value.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| *k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Iterate over `(name, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.params.iter().map(|(k, v)| (*k, v.as_str()))
    }

    /// Number of parameters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.params.len()
    }

    /// Whether the set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Render the `Authorization` header value (RFC 5849 Section 3.5.1).
    ///
    /// Format: `OAuth key1="value1",key2="value2"` with percent-encoded values.
    #[must_use]
    pub fn to_header(&self, charset: Charset) -> String {
        let header_parts: Vec<String> = self
            .iter()
            .map(|(k, v)| format!("{k}=\"{}\"", percent_encode(v, charset)))
            .collect();
        format!("OAuth {}", header_parts.join(","))
    }
}
