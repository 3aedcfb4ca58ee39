//! Error handling utilities for the til application.
//!
//! This module provides the central error type `AppError` which represents all
//! possible error conditions outside the analytics engine, as well as the
//! convenience type alias `AppResult` for functions that can return these errors.
//!
//! The analytics functions themselves never fail: they take snapshots and
//! return plain values. Errors only arise at the edges (configuration, the
//! repository and the command line).

use std::io;
use thiserror::Error;

/// Represents specific error cases that can occur during database operations.
///
/// # Examples
///
/// ```
/// use til_insights::errors::DatabaseError;
///
/// let error = DatabaseError::Custom("kv table missing".to_string());
/// assert!(format!("{}", error).contains("kv table missing"));
/// ```
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// SQLite database error.
    #[error("Database error: {0}\n\nIf you're seeing 'file is not a database', the file at TIL_DB may be corrupted or belong to another program.")]
    Sqlite(#[from] rusqlite::Error),

    /// Connection pool error.
    #[error("Failed to get connection from pool: {0}\n\nThis may indicate database connection issues. Try closing other til instances.")]
    Pool(#[from] r2d2::Error),

    /// Custom database error with detailed message.
    #[error("Database error: {0}")]
    Custom(String),
}

/// Represents all possible errors that can occur in the til application.
///
/// This enum is the central error type used across the application, with variants
/// for different error categories. It uses `thiserror` for deriving the `Error` trait
/// implementation and formatted error messages.
///
/// # Examples
///
/// Creating a configuration error:
/// ```
/// use til_insights::errors::AppError;
///
/// let error = AppError::Config("Unknown log format".to_string());
/// assert_eq!(format!("{}", error), "Configuration error: Unknown log format");
/// ```
///
/// Converting from an IO error:
/// ```
/// use til_insights::errors::AppError;
/// use std::io::{self, ErrorKind};
///
/// let io_error = io::Error::new(ErrorKind::NotFound, "file not found");
/// let app_error: AppError = io_error.into();
///
/// match app_error {
///     AppError::Io(inner) => assert_eq!(inner.kind(), ErrorKind::NotFound),
///     _ => panic!("Expected Io variant"),
/// }
/// ```
#[derive(Debug, Error)]
pub enum AppError {
    /// Errors related to configuration loading or validation.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Input/output errors from filesystem operations.
    ///
    /// This variant automatically converts from `std::io::Error` through the `From` trait.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Errors related to database operations.
    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),

    /// Stored collections that could not be encoded or decoded.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Input rejected before it reaches the repository (empty content, bad status, ...).
    #[error("Invalid input: {0}")]
    Validation(String),

    /// An entry or goal id that does not exist.
    #[error("Not found: {0}")]
    NotFound(String),
}

/// A type alias for `Result<T, AppError>` to simplify function signatures.
///
/// # Examples
///
/// ```
/// use til_insights::errors::{AppResult, AppError};
///
/// fn require_content(content: &str) -> AppResult<&str> {
///     if content.trim().is_empty() {
///         return Err(AppError::Validation("content cannot be empty".to_string()));
///     }
///     Ok(content)
/// }
///
/// assert!(require_content("").is_err());
/// ```
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_error_display() {
        let config_error = AppError::Config("Invalid configuration".to_string());
        assert_eq!(
            format!("{}", config_error),
            "Configuration error: Invalid configuration"
        );

        let io_error = io::Error::new(io::ErrorKind::PermissionDenied, "permission denied");
        let app_io_error = AppError::Io(io_error);
        assert_eq!(format!("{}", app_io_error), "I/O error: permission denied");

        let validation_error = AppError::Validation("content cannot be empty".to_string());
        assert_eq!(
            format!("{}", validation_error),
            "Invalid input: content cannot be empty"
        );

        let not_found = AppError::NotFound("goal goal-123".to_string());
        assert_eq!(format!("{}", not_found), "Not found: goal goal-123");
    }

    #[test]
    fn test_database_error_wraps_into_app_error() {
        let db_error = DatabaseError::Custom("broken".to_string());
        let app_error: AppError = db_error.into();
        assert!(format!("{}", app_error).contains("broken"));
        assert!(matches!(app_error, AppError::Database(_)));
    }

    #[test]
    fn test_serialization_error_conversion() {
        let parse_error = serde_json::from_str::<Vec<String>>("not json").unwrap_err();
        let app_error: AppError = parse_error.into();
        assert!(matches!(app_error, AppError::Serialization(_)));
        assert!(format!("{}", app_error).starts_with("Serialization error"));
    }
}
