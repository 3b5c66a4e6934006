//! Forge API-specific error types.

/// Errors that can occur during Forge API operations.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// HTTP request failed at the transport level, or a success response
    /// carried a body that could not be decoded
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned a non-2xx status; the body is not read on this path
    #[error("API request failed with status {status}")]
    Status { status: u16 },

    /// Failed to serialize a request payload
    #[error("Failed to serialize request payload: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ApiError {
    /// Returns the HTTP status code for `Status` errors, `None` for
    /// transport failures.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status } => Some(*status),
            _ => None,
        }
    }

    /// Returns true if the server answered 404 for the requested resource.
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}
