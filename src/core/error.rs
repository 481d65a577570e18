//! Error types shared by the drive port and the mutation layer.
//!
//! Every remote failure is folded into one of a fixed set of classes, each
//! with a single user-facing message. Validation failures are raised locally,
//! before any remote call is made.

use thiserror::Error;

/// Uniform error taxonomy for remote drive operations.
///
/// The proxy endpoints report failures as HTTP status codes; those are mapped
/// here at the point of the call and never propagate past the component
/// boundary uncaught.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// Storage API quota or rate limit hit (HTTP 429).
    #[error("Too many requests to the storage backend. Try again in a moment.")]
    RateLimited,

    /// Session expired or missing (HTTP 401).
    #[error("Your session has expired. Please sign in again.")]
    Unauthenticated,

    /// Authenticated but not allowed to touch this entry (HTTP 403).
    #[error("You don't have permission to access this file.")]
    Forbidden,

    /// Entry no longer exists remotely (HTTP 404).
    #[error("The requested file could not be found.")]
    NotFound,

    /// Anything else: network failure, malformed response, server error.
    #[error("The request could not be completed.")]
    Unknown,

    /// Client-local validation failure. Never reaches the remote store and
    /// never mutates cache or session state.
    #[error("{0}")]
    Validation(String),
}

impl ApiError {
    /// Map an HTTP status code from the proxy to an error class.
    pub fn from_status(status: u16) -> Self {
        match status {
            429 => Self::RateLimited,
            401 => Self::Unauthenticated,
            403 => Self::Forbidden,
            404 => Self::NotFound,
            _ => Self::Unknown,
        }
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Whether this error was raised locally, without a remote call.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(ApiError::from_status(429), ApiError::RateLimited);
        assert_eq!(ApiError::from_status(401), ApiError::Unauthenticated);
        assert_eq!(ApiError::from_status(403), ApiError::Forbidden);
        assert_eq!(ApiError::from_status(404), ApiError::NotFound);
        assert_eq!(ApiError::from_status(500), ApiError::Unknown);
        assert_eq!(ApiError::from_status(503), ApiError::Unknown);
    }

    #[test]
    fn test_messages_are_class_specific() {
        let classes = [
            ApiError::RateLimited,
            ApiError::Unauthenticated,
            ApiError::Forbidden,
            ApiError::NotFound,
            ApiError::Unknown,
        ];
        for (i, a) in classes.iter().enumerate() {
            for b in classes.iter().skip(i + 1) {
                assert_ne!(a.to_string(), b.to_string());
            }
        }
    }

    #[test]
    fn test_validation_carries_message() {
        let err = ApiError::validation("name must not be empty");
        assert!(err.is_validation());
        assert_eq!(err.to_string(), "name must not be empty");
        assert!(!ApiError::NotFound.is_validation());
    }
}
