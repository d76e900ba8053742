//! Error types for the Semantic Scholar client.

/// Errors that can occur when interacting with the Semantic Scholar API.
#[derive(Debug, thiserror::Error)]
pub enum SemanticScholarError {
    /// HTTP transport failure (connection, TLS, timeout, ...), passed through unchanged.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The requested paper or author id does not exist (HTTP 404).
    #[error("Object not found: {0}")]
    ObjectNotFound(String),

    /// The API rejected the request parameters (HTTP 400), or paging went
    /// past the last page.
    #[error("Bad query parameters: {0}")]
    BadQueryParameters(String),

    /// Any other non-success status code.
    #[error("Request failed (HTTP {status}): {message}")]
    RequestFailed { status: u16, message: String },

    /// A response payload did not have the expected shape.
    #[error("Failed to parse response: {0}")]
    Parse(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The blocking client could not start its runtime.
    #[error("Runtime error: {0}")]
    Runtime(#[from] std::io::Error),
}

impl SemanticScholarError {
    /// True when the transport layer gave up waiting for a response.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Http(e) if e.is_timeout())
    }

    /// HTTP status code carried by this error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::ObjectNotFound(_) => Some(404),
            Self::RequestFailed { status, .. } => Some(*status),
            Self::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

/// Convenience alias for Results using [`SemanticScholarError`].
pub type Result<T> = std::result::Result<T, SemanticScholarError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let err = SemanticScholarError::ObjectNotFound("Paper with id 0 not found".into());
        assert_eq!(err.to_string(), "Object not found: Paper with id 0 not found");

        let err = SemanticScholarError::RequestFailed {
            status: 503,
            message: "unavailable".into(),
        };
        assert_eq!(err.to_string(), "Request failed (HTTP 503): unavailable");
    }

    #[test]
    fn test_status() {
        assert_eq!(
            SemanticScholarError::ObjectNotFound(String::new()).status(),
            Some(404)
        );
        assert_eq!(
            SemanticScholarError::RequestFailed {
                status: 500,
                message: String::new()
            }
            .status(),
            Some(500)
        );
        assert_eq!(SemanticScholarError::Parse(String::new()).status(), None);
        assert!(!SemanticScholarError::Config(String::new()).is_timeout());
    }
}
