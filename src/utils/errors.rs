//! Error handling for IdBot
//!
//! This module defines the main error types used throughout the application
//! and provides a unified error handling strategy.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for IdBot application
#[derive(Error, Debug)]
pub enum IdBotError {
    #[error("Telegram API error: {0}")]
    Telegram(#[from] teloxide::RequestError),

    #[error("Persistence error: {0}")]
    Persistence(#[from] PersistenceError),

    #[error("Relay to {recipient} failed: {reason}")]
    Relay { recipient: i64, reason: String },

    #[error("Chat not found: {id}")]
    LookupNotFound { id: i64 },

    #[error("Transfer error: {0}")]
    Transfer(#[from] TransferError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Registry storage errors
#[derive(Error, Debug)]
pub enum PersistenceError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize registry: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("registry file {path} is corrupt: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Media pipeline errors (download, transcode, upload)
#[derive(Error, Debug)]
pub enum TransferError {
    #[error("file is too large: {size} bytes (limit {limit})")]
    TooLarge { size: u64, limit: u64 },

    #[error("download failed: {0}")]
    Download(String),

    #[error("transcoder failed: {0}")]
    Transcode(String),

    #[error("transcoder is not available: {0}")]
    TranscoderUnavailable(String),

    #[error("operation timed out after {seconds}s")]
    Timeout { seconds: u64 },

    #[error("upload failed: {0}")]
    Upload(String),

    #[error("temporary file error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for IdBot operations
pub type Result<T> = std::result::Result<T, IdBotError>;

/// Result type alias for registry storage operations
pub type PersistenceResult<T> = std::result::Result<T, PersistenceError>;

/// Result type alias for media pipeline operations
pub type TransferResult<T> = std::result::Result<T, TransferError>;

impl IdBotError {
    /// Check if the error is recoverable
    pub fn is_recoverable(&self) -> bool {
        match self {
            IdBotError::Telegram(_) => true,
            IdBotError::Persistence(_) => false,
            IdBotError::Relay { .. } => true,
            IdBotError::LookupNotFound { .. } => true,
            IdBotError::Transfer(_) => true,
            IdBotError::Config(_) => false,
            IdBotError::PermissionDenied(_) => false,
            IdBotError::Serialization(_) => false,
            IdBotError::Io(_) => true,
        }
    }

    /// Get error severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            IdBotError::Config(_) => ErrorSeverity::Critical,
            IdBotError::Persistence(_) => ErrorSeverity::Error,
            IdBotError::PermissionDenied(_) => ErrorSeverity::Warning,
            IdBotError::Relay { .. } => ErrorSeverity::Warning,
            IdBotError::LookupNotFound { .. } => ErrorSeverity::Info,
            _ => ErrorSeverity::Error,
        }
    }

    /// Message shown to the user when an update could not be handled
    pub fn user_message(&self) -> String {
        match self {
            IdBotError::LookupNotFound { id } => format!("❌ Chat not found: {}", id),
            IdBotError::PermissionDenied(_) => "⛔ This action is available to the bot operator only.".to_string(),
            IdBotError::Transfer(TransferError::TooLarge { limit, .. }) => format!(
                "❌ The file is too large. Maximum size is {} MB.",
                limit / (1024 * 1024)
            ),
            IdBotError::Transfer(_) => "❌ Conversion failed. Please try again later.".to_string(),
            _ => "⚠️ Something went wrong. Please try again later.".to_string(),
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_persistence_errors_are_not_recoverable() {
        let err = IdBotError::from(PersistenceError::Write {
            path: PathBuf::from("users.json"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only"),
        });
        assert!(!err.is_recoverable());
        assert_eq!(err.severity(), ErrorSeverity::Error);
        assert!(err.to_string().contains("users.json"));
    }

    #[test]
    fn test_user_messages() {
        let not_found = IdBotError::LookupNotFound { id: -100123 };
        assert_eq!(not_found.user_message(), "❌ Chat not found: -100123");

        let too_large = IdBotError::from(TransferError::TooLarge {
            size: 30 * 1024 * 1024,
            limit: 20 * 1024 * 1024,
        });
        assert!(too_large.user_message().contains("20 MB"));
        assert_eq!(too_large.severity(), ErrorSeverity::Error);
    }

    #[test]
    fn test_severity_display() {
        assert_eq!(ErrorSeverity::Warning.to_string(), "WARN");
        assert_eq!(ErrorSeverity::Critical.to_string(), "CRITICAL");
    }
}
