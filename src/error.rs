//! Error types for GoToWebinar client operations.
//!
//! Every fallible operation in this crate returns [`Error`], which couples a
//! high-level [`ErrorCode`] with the message extracted from the vendor
//! response and, when the error originated from an HTTP exchange, the
//! original status code and raw body for diagnostics.

use std::fmt;
use thiserror::Error as ThisError;

/// The category of a client error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// OAuth-level error from the authentication or resource-owner
    /// endpoints (invalid grant, revoked refresh token, embedded `error`
    /// field in an otherwise successful response).
    OAuth,
    /// Non-2xx response from a resource endpoint, carrying the vendor
    /// `errorCode` when present.
    Api,
    /// Token storage backend failure.
    Storage,
    /// Connection failure, timeout, DNS resolution.
    Network,
    /// Response body missing expected structure or not valid JSON.
    InvalidResponse,
    /// Missing or invalid configuration, including unresolved URL
    /// template placeholders.
    Configuration,
}

impl ErrorCode {
    /// Returns a stable snake_case name for this error code.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OAuth => "oauth_error",
            Self::Api => "api_error",
            Self::Storage => "storage_error",
            Self::Network => "network_error",
            Self::InvalidResponse => "invalid_response",
            Self::Configuration => "configuration_error",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An error from a GoToWebinar client operation.
#[derive(Debug, ThisError)]
pub struct Error {
    code: ErrorCode,
    message: String,
    http_status: Option<u16>,
    body: Option<String>,
    #[source]
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl Error {
    /// Creates a new error with the given code and message.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            http_status: None,
            body: None,
            source: None,
        }
    }

    /// Creates an OAuth / identity-provider error.
    pub fn oauth(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::OAuth, message)
    }

    /// Creates an API client error.
    pub fn api(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Api, message)
    }

    /// Creates a storage error.
    pub fn storage(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Storage, message)
    }

    /// Creates a network error.
    pub fn network(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Network, message)
    }

    /// Creates an invalid response error.
    pub fn invalid_response(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidResponse, message)
    }

    /// Creates a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Configuration, message)
    }

    /// Attaches the HTTP status code of the triggering response.
    pub fn with_status(mut self, status: u16) -> Self {
        self.http_status = Some(status);
        self
    }

    /// Attaches the raw response body for diagnostics.
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Attaches the underlying cause of this error.
    pub fn with_source<E>(mut self, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        self.source = Some(Box::new(source));
        self
    }

    /// Returns the error code.
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// Returns the error message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the HTTP status code of the triggering response, if any.
    pub fn http_status(&self) -> Option<u16> {
        self.http_status
    }

    /// Returns the raw body of the triggering response, if any.
    pub fn body(&self) -> Option<&str> {
        self.body.as_deref()
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(status) = self.http_status {
            write!(f, "[{}] ", status)?;
        }
        write!(f, "{}: {}", self.code, self.message)
    }
}

/// A specialized Result type for GoToWebinar client operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_code_names() {
        assert_eq!(ErrorCode::OAuth.as_str(), "oauth_error");
        assert_eq!(ErrorCode::Api.as_str(), "api_error");
        assert_eq!(ErrorCode::Storage.as_str(), "storage_error");
    }

    #[test]
    fn error_creation() {
        let err = Error::api("NoSuchWebinar");
        assert_eq!(err.code(), ErrorCode::Api);
        assert_eq!(err.message(), "NoSuchWebinar");
        assert!(err.http_status().is_none());
        assert!(err.body().is_none());
    }

    #[test]
    fn error_carries_status_and_body() {
        let err = Error::api("NoSuchWebinar")
            .with_status(404)
            .with_body(r#"{"errorCode":"NoSuchWebinar"}"#);
        assert_eq!(err.http_status(), Some(404));
        assert_eq!(err.body(), Some(r#"{"errorCode":"NoSuchWebinar"}"#));
    }

    #[test]
    fn error_display() {
        let err = Error::oauth("invalid_grant").with_status(401);
        let display = format!("{}", err);
        assert!(display.contains("[401]"));
        assert!(display.contains("oauth_error"));
        assert!(display.contains("invalid_grant"));
    }

    #[test]
    fn error_with_source() {
        use std::error::Error as _;
        let io_err = std::io::Error::other("disk full");
        let err = Error::storage("failed to persist token").with_source(io_err);
        assert!(err.source().is_some());
    }
}
