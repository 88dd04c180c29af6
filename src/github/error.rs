//! GitHub API error type.
//!
//! Transport failures are propagated to the run's top-level failure handler
//! unmodified; nothing here retries. The only processing is a best-effort
//! extraction of the HTTP status code for the error message, because
//! octocrab's error type does not expose one uniformly across its variants.

use std::fmt;
use thiserror::Error;

/// A failed GitHub API call.
#[derive(Debug, Error)]
pub struct GitHubApiError {
    /// The HTTP status code, when it could be recovered from the error.
    pub status_code: Option<u16>,

    /// A human-readable description of the failure.
    pub message: String,

    /// The underlying octocrab error, if there is one.
    #[source]
    pub source: Option<octocrab::Error>,
}

impl fmt::Display for GitHubApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.status_code {
            Some(code) => write!(f, "GitHub API error (HTTP {}): {}", code, self.message),
            None => write!(f, "GitHub API error: {}", self.message),
        }
    }
}

impl GitHubApiError {
    /// Wraps an octocrab error.
    pub fn from_octocrab(err: octocrab::Error) -> Self {
        let message = err.to_string();
        GitHubApiError {
            status_code: extract_status_code(&message),
            message,
            source: Some(err),
        }
    }

    /// Creates an error that did not originate in octocrab.
    pub fn message(message: impl Into<String>) -> Self {
        GitHubApiError {
            status_code: None,
            message: message.into(),
            source: None,
        }
    }
}

/// Best-effort extraction of an HTTP status code from octocrab's error text.
///
/// String parsing is fragile, but octocrab does not expose status codes
/// across all error variants, and the fallback (`None`) only costs detail in
/// the message. Patterns follow octocrab's `"status: NNN"` formatting, with
/// a couple of well-established pairings as a backstop.
fn extract_status_code(err_str: &str) -> Option<u16> {
    if let Some(idx) = err_str.find("status: ") {
        let rest = &err_str[idx + 8..];
        let digits = rest
            .find(|c: char| !c.is_ascii_digit())
            .map_or(rest, |end| &rest[..end]);
        if let Ok(code) = digits.trim().parse() {
            return Some(code);
        }
    }

    let lower = err_str.to_lowercase();
    if err_str.contains("404") && lower.contains("not found") {
        return Some(404);
    }
    if err_str.contains("403") && lower.contains("forbidden") {
        return Some(403);
    }
    if err_str.contains("429") || lower.contains("rate limit") {
        return Some(429);
    }

    None
}
