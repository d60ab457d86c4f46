//! Error types for the OneDrive provider

use bridge_traits::error::BridgeError;
use thiserror::Error;

/// OneDrive provider errors
#[derive(Error, Debug)]
pub enum OneDriveError {
    /// The service answered with a non-2xx status
    #[error("OneDrive API error (status {status_code}): {message}")]
    ApiError { status_code: u16, message: String },

    /// The service answered 429
    #[error("Throttled, retry after {retry_after_seconds:?} seconds: {message}")]
    Throttled {
        retry_after_seconds: Option<u64>,
        message: String,
    },

    /// No response was received
    #[error("Transport error: {0}")]
    Transport(#[from] BridgeError),

    /// A caller-supplied continuation or delta link is not an absolute URL
    #[error("Wrong link: {0}")]
    InvalidLink(String),

    /// The resource reference cannot address the requested operation
    #[error("Invalid resource reference: {0}")]
    InvalidReference(String),

    /// `next()` was called on an exhausted collection
    #[error("No more elements in collection")]
    NoMoreElements,

    /// A recognized field does not have the expected shape
    #[error("Parse failed on '{field}', maybe a bug in client: {reason}")]
    ParseError { field: String, reason: String },
}

/// Broad classification of a [`OneDriveError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Attributable to the remote service or to caller input; may be retried or reported
    Api,
    /// The client's field mapping does not match what the service sent
    Internal,
}

impl OneDriveError {
    pub(crate) fn parse(field: impl Into<String>, reason: impl Into<String>) -> Self {
        OneDriveError::ParseError {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Classifies this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            OneDriveError::ParseError { .. } => ErrorKind::Internal,
            _ => ErrorKind::Api,
        }
    }

    /// HTTP status carried by the error, if the service answered
    pub fn status_code(&self) -> Option<u16> {
        match self {
            OneDriveError::ApiError { status_code, .. } => Some(*status_code),
            OneDriveError::Throttled { .. } => Some(429),
            _ => None,
        }
    }
}

/// Result type for OneDrive operations
pub type Result<T> = std::result::Result<T, OneDriveError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let error = OneDriveError::ApiError {
            status_code: 404,
            message: r#"{"error":{"code":"itemNotFound"}}"#.to_string(),
        };

        assert_eq!(
            error.to_string(),
            r#"OneDrive API error (status 404): {"error":{"code":"itemNotFound"}}"#
        );
    }

    #[test]
    fn test_error_kinds() {
        assert_eq!(
            OneDriveError::parse("size", "expected unsigned integer").kind(),
            ErrorKind::Internal
        );
        assert_eq!(OneDriveError::NoMoreElements.kind(), ErrorKind::Api);
        assert_eq!(
            OneDriveError::InvalidLink("not a url".to_string()).kind(),
            ErrorKind::Api
        );
        assert_eq!(
            OneDriveError::Transport(BridgeError::Timeout("30s".to_string())).kind(),
            ErrorKind::Api
        );
    }

    #[test]
    fn test_status_code() {
        let throttled = OneDriveError::Throttled {
            retry_after_seconds: Some(10),
            message: String::new(),
        };
        assert_eq!(throttled.status_code(), Some(429));
        assert_eq!(OneDriveError::NoMoreElements.status_code(), None);
    }
}
