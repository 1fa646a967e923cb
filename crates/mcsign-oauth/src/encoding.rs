//! Percent and base64 encoding shared by every signing step.

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use base64::Engine;
use base64::prelude::BASE64_STANDARD;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC};

use crate::error::OAuthError;

/// RFC 3986 unreserved characters: A-Z a-z 0-9 - . _ ~
const OAUTH_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Character encoding used to turn request text into bytes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Charset {
    /// UTF-8.
    #[default]
    Utf8,
    /// ISO-8859-1 (Latin-1).
    Iso8859_1,
    /// 7-bit US-ASCII.
    UsAscii,
}

impl Charset {
    /// Canonical name of the charset.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Utf8 => "UTF-8",
            Self::Iso8859_1 => "ISO-8859-1",
            Self::UsAscii => "US-ASCII",
        }
    }

    /// Encode text into this charset.
    ///
    /// Characters the charset cannot represent become `?`.
    #[must_use]
    pub fn encode(self, text: &str) -> Cow<'_, [u8]> {
        let max = match self {
            Self::Utf8 => return Cow::Borrowed(text.as_bytes()),
            Self::Iso8859_1 => 0xFF,
            Self::UsAscii => 0x7F,
        };

        if text.is_ascii() {
            return Cow::Borrowed(text.as_bytes());
        }

        Cow::Owned(
            text.chars()
                .map(|c| u8::try_from(u32::from(c)).ok().filter(|b| u32::from(*b) <= max))
                .map(|b| b.unwrap_or(b'?'))
                .collect(),
        )
    }

    /// Decode bytes from this charset.
    ///
    /// Invalid UTF-8 sequences become U+FFFD; bytes above 0x7F are replaced
    /// the same way for US-ASCII.
    #[must_use]
    pub fn decode(self, bytes: &[u8]) -> Cow<'_, str> {
        match self {
            Self::Utf8 => String::from_utf8_lossy(bytes),
            Self::Iso8859_1 => match std::str::from_utf8(bytes) {
                Ok(text) if text.is_ascii() => Cow::Borrowed(text),
                _ => Cow::Owned(bytes.iter().map(|&b| char::from(b)).collect()),
            },
            Self::UsAscii => Cow::Owned(
                bytes
                    .iter()
                    .map(|&b| if b.is_ascii() { char::from(b) } else { char::REPLACEMENT_CHARACTER })
                    .collect(),
            ),
        }
    }
}

impl fmt::Display for Charset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Charset {
    type Err = OAuthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "utf-8" | "utf8" => Ok(Self::Utf8),
            "iso-8859-1" | "iso8859-1" | "iso_8859_1" | "latin1" | "latin-1" => {
                Ok(Self::Iso8859_1)
            }
            "us-ascii" | "ascii" => Ok(Self::UsAscii),
            _ => Err(OAuthError::UnsupportedCharset(s.to_owned())),
        }
    }
}

/// Percent-encode a string per RFC 3986 using the given charset.
///
/// Space becomes `%20`, `*` becomes `%2A` and `~` is left as is.
#[must_use]
pub fn percent_encode(input: &str, charset: Charset) -> String {
    if input.is_empty() {
        return String::new();
    }
    percent_encoding::percent_encode(&charset.encode(input), OAUTH_ENCODE_SET).to_string()
}

/// Base64-encode bytes with the standard alphabet and padding.
#[must_use]
pub fn b64_encode(data: &[u8]) -> String {
    BASE64_STANDARD.encode(data)
}
