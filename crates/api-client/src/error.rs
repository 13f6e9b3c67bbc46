//! Error types for the API client

use crate::storage::StoreError;
use searchdish_core::{Error as CoreError, ErrorCode};
use serde::Deserialize;
use thiserror::Error;

/// Result type alias for API operations
pub type ApiResult<T> = Result<T, ApiError>;

/// API client errors
#[derive(Error, Debug)]
pub enum ApiError {
    /// HTTP request failed before a response arrived
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// API returned an error response
    #[error("API error ({status}): {message}")]
    ApiResponse {
        /// HTTP status code
        status: u16,
        /// Error message for display: the body's `message`, its `error`, or the raw body
        message: String,
        /// The body's `message` field, when the backend sent one
        body_message: Option<String>,
    },

    /// Request timeout
    #[error("Request timeout after {0:?}")]
    Timeout(std::time::Duration),

    /// Response did not have the expected shape
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Reading an attachment failed
    #[error("Attachment error: {0}")]
    Attachment(#[from] std::io::Error),

    /// Token storage failed
    #[error("Session storage error: {0}")]
    Storage(#[from] StoreError),
}

/// Error body returned by the backend
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<MessageField>,
    error: Option<String>,
}

/// The backend reports either one message or a list of validation messages
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum MessageField {
    One(String),
    Many(Vec<String>),
}

impl ApiError {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Build an error from a non-success response, preferring the body's `message` field
    pub fn from_response(status: u16, body: &str) -> Self {
        let parsed = serde_json::from_str::<ErrorBody>(body).ok();
        let (body_message, error) = match parsed {
            Some(b) => {
                let body_message = match b.message {
                    Some(MessageField::One(m)) => Some(m),
                    Some(MessageField::Many(list)) if !list.is_empty() => Some(list.join("; ")),
                    _ => None,
                };
                (body_message.filter(|m| !m.trim().is_empty()), b.error)
            }
            None => (None, None),
        };
        let message = body_message
            .clone()
            .or(error)
            .unwrap_or_else(|| body.trim().to_string());

        Self::ApiResponse {
            status,
            message,
            body_message,
        }
    }

    /// HTTP status of an error response
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::ApiResponse { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// The `message` field of an error response body, if the backend sent one
    ///
    /// Raw bodies (HTML error pages, JSON without `message`) never show up here.
    #[must_use]
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::ApiResponse { body_message, .. } => body_message.as_deref(),
            _ => None,
        }
    }

    /// Check if the server rejected the credentials
    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }
}

impl From<ApiError> for CoreError {
    fn from(err: ApiError) -> Self {
        let code = match &err {
            ApiError::ApiResponse { status: 401, .. } => ErrorCode::NotAuthenticated,
            ApiError::ApiResponse { status: 403, .. } => ErrorCode::Forbidden,
            ApiError::ApiResponse { status: 404, .. } => ErrorCode::NotFound,
            ApiError::ApiResponse { status, .. } if *status >= 500 => ErrorCode::ApiUnavailable,
            ApiError::ApiResponse { .. } | ApiError::InvalidResponse(_) => ErrorCode::ApiError,
            ApiError::Timeout(_) => ErrorCode::Timeout,
            ApiError::Request(_) => ErrorCode::ApiUnavailable,
            ApiError::Config(_) => ErrorCode::ConfigError,
            ApiError::Json(_) => ErrorCode::InvalidFormat,
            ApiError::Attachment(_) => ErrorCode::IoError,
            ApiError::Storage(_) => ErrorCode::SessionStoreError,
        };
        let message = err.to_string();
        let core = CoreError::new(code, message);
        match code {
            ErrorCode::NotAuthenticated => {
                core.with_suggestion("Your session may have expired; run `searchdish login <email>`")
            }
            ErrorCode::ApiUnavailable | ErrorCode::Timeout => {
                core.with_suggestion("Check your connection or NEXT_PUBLIC_API_URL and try again")
            }
            _ => core,
        }
        .with_source(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_response_single_message() {
        let err = ApiError::from_response(401, r#"{"message":"Invalid credentials","statusCode":401}"#);
        assert!(err.is_unauthorized());
        assert_eq!(err.server_message(), Some("Invalid credentials"));
    }

    #[test]
    fn test_from_response_message_list() {
        let err = ApiError::from_response(
            400,
            r#"{"message":["price must be positive","dishId should not be empty"]}"#,
        );
        assert_eq!(err.status(), Some(400));
        assert_eq!(
            err.server_message(),
            Some("price must be positive; dishId should not be empty")
        );
    }

    #[test]
    fn test_from_response_plain_text() {
        let err = ApiError::from_response(502, "<html><body>Bad Gateway</body></html>\n");
        assert_eq!(err.status(), Some(502));
        assert_eq!(err.server_message(), None);
        assert!(err.to_string().contains("Bad Gateway"));
    }

    #[test]
    fn test_from_response_without_message_field() {
        let err = ApiError::from_response(401, r#"{"statusCode":401,"error":"Unauthorized"}"#);
        assert_eq!(err.server_message(), None);
        assert!(err.to_string().contains("Unauthorized"));

        let err = ApiError::from_response(401, r#"{"statusCode":401}"#);
        assert_eq!(err.server_message(), None);
    }

    #[test]
    fn test_core_error_mapping() {
        let core: CoreError = ApiError::from_response(401, "{}").into();
        assert_eq!(core.code, ErrorCode::NotAuthenticated);
        assert!(core.suggestion.is_some());

        let core: CoreError = ApiError::Timeout(std::time::Duration::from_secs(10)).into();
        assert_eq!(core.code, ErrorCode::Timeout);

        let core: CoreError = ApiError::from_response(404, r#"{"message":"Not Found"}"#).into();
        assert_eq!(core.code, ErrorCode::NotFound);
    }
}
