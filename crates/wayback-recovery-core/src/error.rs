//! Error types for the recovery engine and harness
//!
//! One error enum shared by the fetcher, the parsers, the store and the
//! downloader. Markup problems are never errors; see the parser modules.

use serde::{Serialize, Serializer};
use thiserror::Error;

/// Error type for all recovery operations
///
/// Implements Display for human-readable messages and Serialize so that
/// failures can be written next to recovered records.
#[derive(Error, Debug)]
pub enum RecoveryError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// A selector or other parsing prerequisite could not be built
    #[error("Failed to parse HTML: {0}")]
    ParseError(String),

    /// Invalid URL format
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Rate limited by the archive (HTTP 429)
    #[error("Rate limited - too many requests")]
    RateLimited,

    /// Page not found on the archive
    #[error("Page not found: {0}")]
    NotFound(String),

    /// Filesystem or process spawn failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Record (de)serialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The external download tool exited unsuccessfully
    #[error("Download failed for {url} (exit code {code:?})")]
    DownloadFailed { url: String, code: Option<i32> },
}

impl Serialize for RecoveryError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

/// Result type alias for recovery operations
pub type Result<T> = std::result::Result<T, RecoveryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_parse_error() {
        let error = RecoveryError::ParseError("bad selector".to_string());
        assert_eq!(error.to_string(), "Failed to parse HTML: bad selector");
    }

    #[test]
    fn test_error_display_invalid_url() {
        let error = RecoveryError::InvalidUrl("not-a-url".to_string());
        assert_eq!(error.to_string(), "Invalid URL: not-a-url");
    }

    #[test]
    fn test_error_display_rate_limited() {
        let error = RecoveryError::RateLimited;
        assert_eq!(error.to_string(), "Rate limited - too many requests");
    }

    #[test]
    fn test_error_display_not_found() {
        let error = RecoveryError::NotFound("https://web.archive.org/x".to_string());
        assert_eq!(error.to_string(), "Page not found: https://web.archive.org/x");
    }

    #[test]
    fn test_error_display_download_failed() {
        let error = RecoveryError::DownloadFailed {
            url: "https://original.org/a.mp4".to_string(),
            code: Some(1),
        };
        assert_eq!(
            error.to_string(),
            "Download failed for https://original.org/a.mp4 (exit code Some(1))"
        );
    }

    #[test]
    fn test_error_from_io() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let error: RecoveryError = io.into();
        assert!(matches!(error, RecoveryError::Io(_)));
        assert_eq!(error.to_string(), "I/O error: missing");
    }

    #[test]
    fn test_error_serialize() {
        let error = RecoveryError::RateLimited;
        let json = serde_json::to_string(&error).expect("Serialization should succeed");
        assert_eq!(json, "\"Rate limited - too many requests\"");
    }
}
