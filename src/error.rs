//! Application-wide error types.
//!
//! This module defines the main error type hierarchy for the crate, allowing
//! for type-safe error handling throughout the codebase.

pub use crate::api::ApiError;
pub use crate::config::ConfigError;

/// Main application error type.
///
/// This is the top-level error type that encompasses all error types
/// in the crate. It uses `thiserror` for automatic error derivation
/// and conversion.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Forge API-related errors
    #[error("Forge API error: {0}")]
    Api(#[from] ApiError),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Result with AppError
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_error_from_config_error() {
        let config_error = ConfigError::FilePathNotSet;
        let app_error: AppError = config_error.into();
        assert!(matches!(app_error, AppError::Config(_)));
        assert!(app_error.to_string().contains("Configuration error"));
    }

    #[test]
    fn test_app_error_from_api_error() {
        let api_error = ApiError::Status { status: 500 };
        let app_error: AppError = api_error.into();
        assert!(matches!(app_error, AppError::Api(_)));
        assert!(app_error.to_string().contains("Forge API error"));
    }

    #[test]
    fn test_app_error_from_io_error() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "File not found");
        let app_error: AppError = io_error.into();
        assert!(matches!(app_error, AppError::Io(_)));
        assert!(app_error.to_string().contains("I/O error"));
    }
}
