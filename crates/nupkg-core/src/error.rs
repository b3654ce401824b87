//! Error types shared across the nupkg-meta workspace.
//!
//! Every resolver operation surfaces one of these kinds. Within a single
//! resolve call the first terminal error aborts the operation and partial
//! results are dropped; the only local recovery is an index-level 404,
//! which the fetcher reports as absence rather than an error.

use thiserror::Error;

/// Errors surfaced by metadata resolution.
///
/// # Examples
///
/// ```
/// use nupkg_core::{ResolveError, Result};
///
/// fn require_id(id: &str) -> Result<()> {
///     if id.is_empty() {
///         return Err(ResolveError::InvalidArgument("package id must not be empty".into()));
///     }
///     Ok(())
/// }
///
/// assert!(require_id("").is_err());
/// ```
#[derive(Error, Debug)]
pub enum ResolveError {
    /// Caller passed an unusable argument (empty package id, etc.).
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A version string failed to parse.
    #[error("invalid version '{input}': {message}")]
    BadVersion { input: String, message: String },

    /// A version range string failed to parse.
    #[error("invalid version range '{input}': {message}")]
    BadRange { input: String, message: String },

    /// Transport-level failure: socket errors and non-2xx statuses other
    /// than an index-level 404.
    #[error("transport failure for {url}: {source}")]
    Transport {
        url: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The remote document violates the protocol schema: unparseable body,
    /// missing required field, or a page referenced by the index that no
    /// longer exists.
    #[error("malformed registry document at {url}: {message}")]
    BadDocument { url: String, message: String },

    /// The operation was cancelled by the caller's token.
    #[error("operation cancelled")]
    Cancelled,

    /// Flat-protocol wrapper composing an inner error with the package
    /// query and source URL for user display.
    #[error("failed to resolve {query} from {source_url}: {source}")]
    Protocol {
        query: String,
        source_url: String,
        #[source]
        source: Box<ResolveError>,
    },
}

/// Convenience alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, ResolveError>;

impl ResolveError {
    /// Helper for version parse failures.
    pub fn bad_version(input: impl Into<String>, message: impl Into<String>) -> Self {
        Self::BadVersion {
            input: input.into(),
            message: message.into(),
        }
    }

    /// Helper for range parse failures.
    pub fn bad_range(input: impl Into<String>, message: impl Into<String>) -> Self {
        Self::BadRange {
            input: input.into(),
            message: message.into(),
        }
    }

    /// Helper for socket-level transport failures.
    pub fn transport(
        url: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Transport {
            url: url.into(),
            source: Box::new(source),
        }
    }

    /// Helper for non-2xx HTTP statuses.
    pub fn status(url: impl Into<String>, status: reqwest::StatusCode) -> Self {
        Self::Transport {
            url: url.into(),
            source: Box::new(std::io::Error::other(format!("HTTP status {status}"))),
        }
    }

    /// Helper for schema violations in a remote document.
    pub fn bad_document(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self::BadDocument {
            url: url.into(),
            message: message.into(),
        }
    }

    /// Wraps an inner error with the package query and source URL.
    pub fn protocol(
        query: impl Into<String>,
        source_url: impl Into<String>,
        source: ResolveError,
    ) -> Self {
        Self::Protocol {
            query: query.into(),
            source_url: source_url.into(),
            source: Box::new(source),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_argument_display() {
        let error = ResolveError::InvalidArgument("package id must not be empty".into());
        assert_eq!(
            error.to_string(),
            "invalid argument: package id must not be empty"
        );
    }

    #[test]
    fn test_bad_version_display() {
        let error = ResolveError::bad_version("1.x", "invalid numeric component 'x'");
        assert_eq!(
            error.to_string(),
            "invalid version '1.x': invalid numeric component 'x'"
        );
    }

    #[test]
    fn test_transport_carries_source() {
        let error = ResolveError::transport(
            "https://example.test/index.json",
            std::io::Error::other("connection reset"),
        );
        assert!(error.to_string().contains("connection reset"));
        assert!(std::error::Error::source(&error).is_some());
    }

    #[test]
    fn test_status_helper() {
        let error = ResolveError::status("https://example.test/a", reqwest::StatusCode::BAD_GATEWAY);
        assert!(error.to_string().contains("502"));
    }

    #[test]
    fn test_protocol_wraps_inner_error() {
        let inner = ResolveError::bad_document("https://feed.test/pkg", "not JSON");
        let error = ResolveError::protocol("'serilog' 2.0.0", "https://feed.test", inner);
        let text = error.to_string();
        assert!(text.contains("'serilog' 2.0.0"));
        assert!(text.contains("https://feed.test"));
        assert!(std::error::Error::source(&error).is_some());
    }

    #[test]
    fn test_cancelled_display() {
        assert_eq!(ResolveError::Cancelled.to_string(), "operation cancelled");
    }
}
