/**
 * Server Error Types
 *
 * This module defines the error type returned by HTTP handlers. Each variant
 * maps to a fixed status code; the conversion to a response body lives in
 * `error::conversion`.
 */

use axum::http::StatusCode;
use thiserror::Error;

/// Errors surfaced by the request gateway.
///
/// Authorization failures are split into two variants on purpose: a request
/// that carries no bearer token at all is answered `401`, while a request
/// that presents a token the session store does not recognize is answered
/// `403`. Clients use the distinction to decide between prompting for a
/// login and discarding a stale token.
#[derive(Debug, Error)]
pub enum ApiError {
    /// No bearer token was supplied with a request that requires one.
    #[error("missing bearer token")]
    MissingToken,

    /// A token was supplied but is unknown or expired.
    #[error("invalid or expired token")]
    InvalidToken,

    /// The request body does not satisfy the document shape contract.
    #[error("invalid data structure: {message}")]
    Validation {
        /// What was wrong with the submitted document
        message: String,
    },

    /// Minting a session token failed because the entropy source failed.
    #[error("token generation failed")]
    TokenGeneration,

    /// An I/O error while persisting a record.
    #[error("storage error: {0}")]
    Storage(#[from] std::io::Error),

    /// Serializing or deserializing a record failed.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ApiError {
    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Get the HTTP status code for this error
    ///
    /// # Status Code Mapping
    ///
    /// - `MissingToken` - 401 Unauthorized
    /// - `InvalidToken` - 403 Forbidden
    /// - `Validation` - 400 Bad Request
    /// - `TokenGeneration`, `Storage`, `Serialization` - 500 Internal Server Error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::MissingToken => StatusCode::UNAUTHORIZED,
            Self::InvalidToken => StatusCode::FORBIDDEN,
            Self::Validation { .. } => StatusCode::BAD_REQUEST,
            Self::TokenGeneration => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Serialization(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error() {
        let error = ApiError::validation("missing required field `keyItems`");
        match error {
            ApiError::Validation { message } => {
                assert_eq!(message, "missing required field `keyItems`");
            }
            _ => panic!("Expected Validation"),
        }
    }

    #[test]
    fn test_status_code_mapping() {
        assert_eq!(ApiError::MissingToken.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(ApiError::InvalidToken.status_code(), StatusCode::FORBIDDEN);
        assert_eq!(
            ApiError::validation("bad").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::TokenGeneration.status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_missing_and_invalid_token_are_distinct() {
        assert_ne!(
            ApiError::MissingToken.status_code(),
            ApiError::InvalidToken.status_code()
        );
    }

    #[test]
    fn test_from_io_error() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let error: ApiError = io.into();
        assert_eq!(error.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
