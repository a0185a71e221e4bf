//! Content-Security-Policy construction.
//!
//! The policy is assembled once at startup from an ordered list of directives
//! and shared read-only by every request afterwards.

use axum::http::HeaderValue;
use thiserror::Error;

/// Separator placed between directives.
pub const DIRECTIVE_SEPARATOR: &str = "; ";

#[derive(Debug, Error)]
pub enum PolicyError {
    #[error("content security policy has no directives")]
    Empty,

    #[error("content security policy is not a valid header value: {0}")]
    InvalidHeader(#[from] axum::http::header::InvalidHeaderValue),
}

/// An immutable, pre-joined Content-Security-Policy.
#[derive(Debug, Clone)]
pub struct ContentSecurityPolicy {
    text: String,
    value: HeaderValue,
}

impl ContentSecurityPolicy {
    /// Join `directives` in order. Blank entries are skipped and surrounding
    /// whitespace is trimmed.
    pub fn from_directives<S: AsRef<str>>(directives: &[S]) -> Result<Self, PolicyError> {
        let text = directives
            .iter()
            .map(|d| d.as_ref().trim())
            .filter(|d| !d.is_empty())
            .collect::<Vec<_>>()
            .join(DIRECTIVE_SEPARATOR);

        if text.is_empty() {
            return Err(PolicyError::Empty);
        }

        let value = HeaderValue::from_str(&text)?;
        Ok(Self { text, value })
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn header_value(&self) -> &HeaderValue {
        &self.value
    }
}
