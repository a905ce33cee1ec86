//! Error handling for Housemate
//!
//! This module defines the main error types used throughout the application
//! and provides a unified error handling strategy.

use thiserror::Error;

/// Main error type for Housemate application
#[derive(Error, Debug)]
pub enum HousemateError {
    #[error("Telegram API error: {0}")]
    Telegram(#[from] teloxide::RequestError),

    #[error("Google Sheets error: {0}")]
    Sheets(#[from] SheetsError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("Malformed row in {range}: {reason}")]
    MalformedRow { range: String, reason: String },

    #[error("Invalid state transition: {from} -> {to}")]
    InvalidStateTransition { from: String, to: String },

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Validation(String),
}

/// Google Sheets API specific errors
#[derive(Error, Debug)]
pub enum SheetsError {
    #[error("Google Sheets API error ({status}): {message}")]
    ApiError { status: u16, message: String },

    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("Sheet not found: {0}")]
    SheetNotFound(String),

    #[error("Sheet already exists: {0}")]
    SheetAlreadyExists(String),

    #[error("Invalid range: {0}")]
    InvalidRange(String),
}

/// Result type alias for Housemate operations
pub type Result<T> = std::result::Result<T, HousemateError>;

/// Result type alias for Google Sheets operations
pub type SheetsResult<T> = std::result::Result<T, SheetsError>;

impl HousemateError {
    /// Shorthand for a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        HousemateError::Validation(message.into())
    }

    /// Shorthand for a lookup error
    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        HousemateError::NotFound { entity, id: id.to_string() }
    }

    /// Whether the error message is meant to be shown to the user verbatim
    pub fn is_user_facing(&self) -> bool {
        matches!(
            self,
            HousemateError::Validation(_)
                | HousemateError::PermissionDenied(_)
                | HousemateError::NotFound { .. }
                | HousemateError::Sheets(SheetsError::SheetAlreadyExists(_))
        )
    }

    /// Text sent back to the chat when a handler fails with this error
    pub fn user_message(&self) -> String {
        match self {
            HousemateError::Validation(message) => format!("❗ {}", message),
            HousemateError::PermissionDenied(_) => crate::middleware::auth::ACCESS_DENIED_TEXT.to_string(),
            HousemateError::NotFound { entity, id } => format!("🔍 {} {} not found.", entity, id),
            HousemateError::Sheets(SheetsError::SheetAlreadyExists(name)) => {
                format!("❗ Sheet '{}' already exists.", name)
            }
            _ => "⚠️ Something went wrong while talking to the spreadsheet. Please try again later.".to_string(),
        }
    }

    /// Get error severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            HousemateError::Config(_) => ErrorSeverity::Critical,
            HousemateError::PermissionDenied(_) => ErrorSeverity::Warning,
            HousemateError::InvalidStateTransition { .. } => ErrorSeverity::Warning,
            HousemateError::Validation(_) => ErrorSeverity::Info,
            HousemateError::NotFound { .. } => ErrorSeverity::Info,
            _ => ErrorSeverity::Error,
        }
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Info,
    Warning,
    Error,
    Critical,
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorSeverity::Info => write!(f, "INFO"),
            ErrorSeverity::Warning => write!(f, "WARN"),
            ErrorSeverity::Error => write!(f, "ERROR"),
            ErrorSeverity::Critical => write!(f, "CRITICAL"),
        }
    }
}
