//! Error types for the document API.

/// Error from document API operations.
#[derive(Debug, thiserror::Error)]
pub enum DocsError {
    /// HTTP request failed (network error, timeout, etc).
    #[error("HTTP request failed: {0}")]
    HttpRequest(#[from] ureq::Error),

    /// HTTP response error (server returned error status).
    #[error("HTTP error: {status} - {body}")]
    HttpResponse {
        /// HTTP status code.
        status: u16,
        /// Response body (may contain error details).
        body: String,
    },

    /// JSON deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Document or image is unknown to the source.
    #[error("not found: {0}")]
    NotFound(String),

    /// Client cannot be constructed from the given settings.
    #[error("client configuration error: {0}")]
    Config(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_response_display_carries_body() {
        let err = DocsError::HttpResponse {
            status: 403,
            body: "The caller does not have permission".to_owned(),
        };
        assert_eq!(
            err.to_string(),
            "HTTP error: 403 - The caller does not have permission"
        );
    }

    #[test]
    fn test_not_found_display() {
        let err = DocsError::NotFound("doc-1".to_owned());
        assert_eq!(err.to_string(), "not found: doc-1");
    }
}
