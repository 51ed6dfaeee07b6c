//! Error types for littlelog.
//!
//! This module defines the crate-wide error type. Voice capture has its own
//! error enum in [`crate::voice`], which converts into this one.

use thiserror::Error;

use crate::voice::RecognitionError;

/// The main error type for littlelog operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Configuration Errors ===
    /// Failed to load configuration.
    #[error("failed to load configuration: {0}")]
    ConfigLoad(Box<figment::Error>),

    /// Configuration validation failed.
    #[error("invalid configuration: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    // === Calendar Errors ===
    /// A year/month/day triple does not name a real calendar date.
    #[error("invalid date: year {year}, month index {month0}, day {day}")]
    InvalidDate {
        /// Calendar year.
        year: i32,
        /// Zero-based month index.
        month0: u32,
        /// Day of month (0 when only a month was given).
        day: u32,
    },

    /// Date arithmetic left the supported range.
    #[error("date out of range: {0}")]
    DateOutOfRange(String),

    // === Entry Errors ===
    /// An entry failed validation before it reached a repository.
    #[error("invalid entry field '{field}': {message}")]
    InvalidEntry {
        /// Name of the offending field.
        field: &'static str,
        /// Description of the problem.
        message: String,
    },

    /// A value could not be parsed into one of the entry enums.
    #[error("unknown {kind}: '{value}'")]
    UnknownValue {
        /// What was being parsed (e.g. "mood").
        kind: &'static str,
        /// The rejected input.
        value: String,
    },

    // === Voice Errors ===
    /// Speech recognition failed or was refused.
    #[error("voice capture failed: {0}")]
    Voice(#[from] RecognitionError),

    /// Voice capture is not supported on this host.
    #[error("voice capture unavailable: {0}")]
    VoiceUnavailable(String),

    // === I/O Errors ===
    /// File system or stdio operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // === Serialization Errors ===
    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // === Generic Errors ===
    /// An internal error occurred (bug).
    #[error("internal error: {0}")]
    Internal(String),
}

/// A specialized Result type for littlelog operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    /// Create a new internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Create an entry validation error.
    #[must_use]
    pub fn invalid_entry(field: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidEntry {
            field,
            message: message.into(),
        }
    }

    /// Create an unknown-value error for enum parsing.
    #[must_use]
    pub fn unknown_value(kind: &'static str, value: impl Into<String>) -> Self {
        Self::UnknownValue {
            kind,
            value: value.into(),
        }
    }

    /// Check if this error came from validating user input.
    #[must_use]
    pub fn is_validation_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidEntry { .. }
                | Self::UnknownValue { .. }
                | Self::InvalidDate { .. }
                | Self::ConfigValidation { .. }
        )
    }

    /// Check if this error is a microphone permission refusal.
    #[must_use]
    pub fn is_permission_error(&self) -> bool {
        matches!(self, Self::Voice(RecognitionError::PermissionDenied))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_internal_error() {
        let err = Error::internal("something went wrong");
        assert_eq!(err.to_string(), "internal error: something went wrong");
    }

    #[test]
    fn test_invalid_entry_display() {
        let err = Error::invalid_entry("food", "must not be empty");
        let msg = err.to_string();
        assert!(msg.contains("'food'"));
        assert!(msg.contains("must not be empty"));
        assert!(err.is_validation_error());
    }

    #[test]
    fn test_unknown_value_display() {
        let err = Error::unknown_value("mood", "grumpy");
        assert_eq!(err.to_string(), "unknown mood: 'grumpy'");
        assert!(err.is_validation_error());
    }

    #[test]
    fn test_invalid_date_display() {
        let err = Error::InvalidDate {
            year: 2024,
            month0: 12,
            day: 0,
        };
        let msg = err.to_string();
        assert!(msg.contains("2024"));
        assert!(msg.contains("month index 12"));
    }

    #[test]
    fn test_from_recognition_error() {
        let err: Error = RecognitionError::PermissionDenied.into();
        assert!(err.is_permission_error());
        assert!(!err.is_validation_error());

        let err: Error = RecognitionError::Network.into();
        assert!(!err.is_permission_error());
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(err.to_string().contains("file not found"));
    }

    #[test]
    fn test_from_json_error() {
        let json_result: std::result::Result<i32, serde_json::Error> =
            serde_json::from_str("not valid json");
        if let Err(json_err) = json_result {
            let err: Error = json_err.into();
            assert!(matches!(err, Error::Json(_)));
        }
    }

    #[test]
    fn test_config_validation_error_display() {
        let err = Error::ConfigValidation {
            message: "language must not be empty".to_string(),
        };
        assert!(err.to_string().contains("language"));
        assert!(err.is_validation_error());
    }

    #[test]
    fn test_date_out_of_range_display() {
        let err = Error::DateOutOfRange("+262143-12-31 next".to_string());
        assert!(err.to_string().starts_with("date out of range"));
    }
}
