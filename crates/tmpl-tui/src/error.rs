//! Error handling for the template manager
//!
//! Structured error types for the API client and configuration layer, plus
//! the user-facing rendering used by the alert dialog.

use std::fmt;
use std::io;
use std::path::PathBuf;

use reqwest::StatusCode;
use thiserror::Error;

pub type ApiResult<T> = Result<T, ApiError>;

/// Failure of a single call against the template API.
///
/// Transport failures and non-2xx responses are kept apart here so they can
/// be logged precisely, but the application treats them identically.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("server responded {status}: {body}")]
    Status { status: StatusCode, body: String },
    #[error("invalid response body: {0}")]
    Decode(#[source] serde_json::Error),
    #[error("invalid endpoint {url}: {reason}")]
    InvalidEndpoint { url: String, reason: String },
}

impl ApiError {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            ApiError::Transport(err) => err.status(),
            ApiError::Decode(_) | ApiError::InvalidEndpoint { .. } => None,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to access config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Application error as presented to the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppError {
    /// The request never produced a response
    Network(String),
    /// The server answered with a non-success status
    Rejected { status: u16, body: String },
    /// The server answered with something we could not read
    Malformed(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Network(msg) => write!(f, "Network error: {}", msg),
            AppError::Rejected { status, body } if body.is_empty() => {
                write!(f, "Server error: HTTP {}", status)
            }
            AppError::Rejected { status, body } => {
                write!(f, "Server error: HTTP {}: {}", status, body)
            }
            AppError::Malformed(msg) => write!(f, "Malformed response: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl From<&ApiError> for AppError {
    fn from(err: &ApiError) -> Self {
        match err {
            ApiError::Transport(inner) => AppError::Network(inner.to_string()),
            ApiError::Status { status, body } => AppError::Rejected {
                status: status.as_u16(),
                body: body.clone(),
            },
            ApiError::Decode(inner) => AppError::Malformed(inner.to_string()),
            ApiError::InvalidEndpoint { .. } => AppError::Network(err.to_string()),
        }
    }
}

/// Error display helper
pub struct ErrorDisplay {
    error: AppError,
}

impl ErrorDisplay {
    pub fn new(error: AppError) -> Self {
        Self { error }
    }

    /// Get user-friendly title
    pub fn title(&self) -> &str {
        match self.error {
            AppError::Network(_) => "Connection Error",
            AppError::Rejected { .. } => "Request Rejected",
            AppError::Malformed(_) => "Unexpected Response",
        }
    }

    /// Detailed message, prefixed with what the user was trying to do
    pub fn message(&self, action: &str) -> String {
        format!("{}\n\n{}", action, self.error)
    }

    /// Get suggested action
    pub fn suggestion(&self) -> &str {
        match &self.error {
            AppError::Network(_) => "Check that the API endpoint is reachable.",
            AppError::Rejected { status: 401, .. } | AppError::Rejected { status: 403, .. } => {
                "Check that a valid bearer token is saved in the token file."
            }
            AppError::Rejected { .. } => "Review the template fields and try again.",
            AppError::Malformed(_) => "Check that the endpoint points at the template API.",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejected_error_uses_status_specific_suggestion() {
        let unauthorized = ErrorDisplay::new(AppError::Rejected {
            status: 401,
            body: String::new(),
        });
        assert_eq!(unauthorized.title(), "Request Rejected");
        assert!(unauthorized.suggestion().contains("bearer token"));

        let bad_request = ErrorDisplay::new(AppError::Rejected {
            status: 400,
            body: "name missing".into(),
        });
        assert!(bad_request.suggestion().contains("template fields"));
        assert_eq!(
            bad_request.message("Failed to create template"),
            "Failed to create template\n\nServer error: HTTP 400: name missing"
        );
    }

    #[test]
    fn status_error_converts_to_rejected() {
        let err = ApiError::Status {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            body: String::new(),
        };
        assert_eq!(err.status(), Some(StatusCode::INTERNAL_SERVER_ERROR));
        assert_eq!(
            AppError::from(&err),
            AppError::Rejected {
                status: 500,
                body: String::new()
            }
        );
    }
}
