//! Error types module
//!
//! This module provides the error taxonomy used throughout the gateway. All
//! pipeline failures are unified under the `GatewayError` enum, which
//! self-describes its HTTP presentation through the `ErrorMetadata` trait.

use std::io;

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Debug level - for expected errors like validation failures
    Debug,
    /// Warning level - for recoverable issues like misconfiguration
    Warn,
    /// Error level - for unexpected failures
    Error,
}

/// Metadata for error responses - defines how an error should be presented
/// This trait allows errors to self-describe their HTTP response characteristics
pub trait ErrorMetadata {
    /// HTTP status code to return
    fn http_status_code(&self) -> u16;

    /// Machine-readable error code (e.g., "STORE_ERROR")
    fn error_code(&self) -> &'static str;

    /// Whether this error is recoverable (can be retried)
    fn is_recoverable(&self) -> bool;

    /// Suggested action for the client
    fn suggested_action(&self) -> Option<&'static str>;

    /// Client-facing message (may differ from internal error message)
    fn client_message(&self) -> String;

    /// Whether details should be hidden in production
    fn is_sensitive(&self) -> bool;

    /// Log level for this error
    fn log_level(&self) -> LogLevel;
}

/// Result type for gateway operations
pub type GatewayResult<T> = Result<T, GatewayError>;

#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("File type not accepted: {0}")]
    InvalidType(String),

    #[error("Bad configuration: {0}")]
    BadConfiguration(String),

    #[error("Rejected by hook: {0}")]
    HookRejected(String),

    #[error("Hook execution failed: {0}")]
    HookFailed(#[source] anyhow::Error),

    #[error("Metadata store error: {0}")]
    Store(#[source] anyhow::Error),

    #[error("Filesystem error: {0}")]
    Filesystem(#[source] io::Error),

    #[error("File delete failed: {0}")]
    FileDeleteFailed(String),
}

// Error conversion implementations for the ambient failure sources
impl From<io::Error> for GatewayError {
    fn from(err: io::Error) -> Self {
        GatewayError::Filesystem(err)
    }
}

impl From<serde_json::Error> for GatewayError {
    fn from(err: serde_json::Error) -> Self {
        GatewayError::Validation(format!("JSON parsing error: {}", err))
    }
}

impl From<validator::ValidationErrors> for GatewayError {
    fn from(err: validator::ValidationErrors) -> Self {
        GatewayError::Validation(format!("Validation error: {}", err))
    }
}

/// Static metadata for each variant: (http_status, error_code, recoverable, suggested_action, sensitive, log_level).
/// Reduces duplication in ErrorMetadata impl; client_message stays per-variant for dynamic content.
fn gateway_error_static_metadata(
    err: &GatewayError,
) -> (
    u16,
    &'static str,
    bool,
    Option<&'static str>,
    bool,
    LogLevel,
) {
    match err {
        GatewayError::Validation(_) => (
            400,
            "INVALID_INPUT",
            false,
            Some("Check request parameters and try again"),
            false,
            LogLevel::Debug,
        ),
        GatewayError::BadRequest(_) => (
            400,
            "BAD_REQUEST",
            false,
            Some("Check request format and parameters"),
            false,
            LogLevel::Debug,
        ),
        GatewayError::NotFound(_) => (
            404,
            "NOT_FOUND",
            false,
            Some("Verify the asset or template ID exists"),
            false,
            LogLevel::Debug,
        ),
        GatewayError::PermissionDenied(_) => (
            403,
            "PERMISSION_DENIED",
            false,
            Some("Check uploader access for this template"),
            false,
            LogLevel::Debug,
        ),
        GatewayError::InvalidType(_) => (
            400,
            "UNSUPPORTED_FILE_TYPE",
            false,
            Some("Use a file type accepted by this uploader"),
            false,
            LogLevel::Debug,
        ),
        GatewayError::BadConfiguration(_) => (
            400,
            "BAD_CONFIGURATION",
            false,
            Some("Fix the permission template configuration"),
            false,
            LogLevel::Warn,
        ),
        GatewayError::HookRejected(_) => (
            400,
            "HOOK_REJECTED",
            false,
            Some("Review the hook rejection reason"),
            false,
            LogLevel::Debug,
        ),
        GatewayError::HookFailed(_) => (
            500,
            "HOOK_FAILED",
            true,
            Some("Retry after a short delay"),
            true,
            LogLevel::Error,
        ),
        GatewayError::Store(_) => (
            500,
            "STORE_ERROR",
            true,
            Some("Retry after a short delay"),
            true,
            LogLevel::Error,
        ),
        GatewayError::Filesystem(_) => (
            500,
            "FILESYSTEM_ERROR",
            true,
            Some("Retry after a short delay"),
            true,
            LogLevel::Error,
        ),
        GatewayError::FileDeleteFailed(_) => (
            400,
            "FILE_DELETE_FAILED",
            false,
            Some("Check storage consistency for this asset"),
            false,
            LogLevel::Warn,
        ),
    }
}

impl GatewayError {
    /// Get the error type name for detailed error responses
    pub fn error_type(&self) -> &str {
        match self {
            GatewayError::Validation(_) => "Validation",
            GatewayError::BadRequest(_) => "BadRequest",
            GatewayError::NotFound(_) => "NotFound",
            GatewayError::PermissionDenied(_) => "PermissionDenied",
            GatewayError::InvalidType(_) => "InvalidType",
            GatewayError::BadConfiguration(_) => "BadConfiguration",
            GatewayError::HookRejected(_) => "HookRejected",
            GatewayError::HookFailed(_) => "HookFailed",
            GatewayError::Store(_) => "Store",
            GatewayError::Filesystem(_) => "Filesystem",
            GatewayError::FileDeleteFailed(_) => "FileDeleteFailed",
        }
    }

    /// Get detailed error information including error chain
    pub fn detailed_message(&self) -> String {
        use std::error::Error;

        let mut details = self.to_string();

        let mut source = self.source();
        let mut depth = 0;
        while let Some(err) = source {
            depth += 1;
            if depth > 5 {
                details.push_str("\n  ... (truncated)");
                break;
            }
            details.push_str(&format!("\n  Caused by: {}", err));
            source = err.source();
        }

        details
    }
}

impl ErrorMetadata for GatewayError {
    fn http_status_code(&self) -> u16 {
        gateway_error_static_metadata(self).0
    }

    fn error_code(&self) -> &'static str {
        gateway_error_static_metadata(self).1
    }

    fn is_recoverable(&self) -> bool {
        gateway_error_static_metadata(self).2
    }

    fn suggested_action(&self) -> Option<&'static str> {
        gateway_error_static_metadata(self).3
    }

    fn is_sensitive(&self) -> bool {
        gateway_error_static_metadata(self).4
    }

    fn log_level(&self) -> LogLevel {
        gateway_error_static_metadata(self).5
    }

    fn client_message(&self) -> String {
        match self {
            GatewayError::Validation(ref msg) => msg.clone(),
            GatewayError::BadRequest(ref msg) => msg.clone(),
            GatewayError::NotFound(ref msg) => msg.clone(),
            GatewayError::PermissionDenied(ref msg) => msg.clone(),
            GatewayError::InvalidType(ref msg) => msg.clone(),
            GatewayError::BadConfiguration(ref msg) => msg.clone(),
            GatewayError::HookRejected(ref msg) => msg.clone(),
            GatewayError::HookFailed(_) => "Internal hook error".to_string(),
            GatewayError::Store(_) => "Failed to access metadata store".to_string(),
            GatewayError::Filesystem(_) => "Failed to access storage".to_string(),
            GatewayError::FileDeleteFailed(ref msg) => msg.clone(),
        }
    }
}
