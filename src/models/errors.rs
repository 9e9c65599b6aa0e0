//! Centralized Error Handling Module
//!
//! Every failure carries a unique error code so batch-run logs can be
//! grepped by failure class.
//!
//! Error codes follow pattern: CATEGORY_SPECIFIC_ERROR
//! - DATA_xxx: transaction store / provider errors
//! - CSV_xxx: wallet list and score export errors
//! - CFG_xxx: configuration errors

use std::fmt;

/// Application-wide error type. All fallible operations in the crate
/// return this so per-wallet failures stay isolated and reportable.
#[derive(Debug)]
pub struct AppError {
    /// Unique error code for logging/monitoring
    pub code: ErrorCode,
    /// Human-readable message
    pub message: String,
    /// Optional underlying error
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AppError {
    /// Create a new AppError without an underlying source
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            source: None,
        }
    }

    /// Create a new AppError wrapping an underlying error
    pub fn with_source(
        code: ErrorCode,
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            code,
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Get error code as string (for logging)
    pub fn code_str(&self) -> &'static str {
        self.code.as_str()
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code.as_str(), self.message)
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn std::error::Error + 'static))
    }
}

/// Unique error codes for monitoring
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    // Transaction data errors
    /// Transaction file exists but cannot be read
    DataReadFailed,
    /// Transaction file is not valid JSON
    DataInvalidJson,

    // CSV boundary errors
    /// Wallet list file missing or unreadable
    CsvReadFailed,
    /// Wallet list has no wallet_id column
    CsvMissingColumn,
    /// Score export failed
    CsvWriteFailed,

    // Configuration errors
    /// Invalid configuration value
    ConfigInvalidValue,
    /// Scoring weights do not sum to 1.0
    ConfigBadWeights,

    /// Unknown error
    Unknown,
}

impl ErrorCode {
    /// Get string representation of error code
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DataReadFailed => "DATA_READ_FAILED",
            Self::DataInvalidJson => "DATA_INVALID_JSON",
            Self::CsvReadFailed => "CSV_READ_FAILED",
            Self::CsvMissingColumn => "CSV_MISSING_COLUMN",
            Self::CsvWriteFailed => "CSV_WRITE_FAILED",
            Self::ConfigInvalidValue => "CFG_INVALID_VALUE",
            Self::ConfigBadWeights => "CFG_BAD_WEIGHTS",
            Self::Unknown => "UNKNOWN",
        }
    }
}

/// Convenience Result alias used throughout the crate
pub type AppResult<T> = Result<T, AppError>;
