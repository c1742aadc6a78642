//! Unified error types for chatshift.
//!
//! This module provides a single [`ChatshiftError`] enum that covers all error
//! cases in the library.
//!
//! # Error Handling Philosophy
//!
//! - **Input errors** (bad date range, malformed template) are rejected up
//!   front, before any rendering begins, with a specific reason.
//! - **Degraded data** (unresolvable sender, unknown media kind) is never
//!   fatal; the pipeline substitutes explicit fallback values instead.
//! - **Structural violations** (a text record carrying a media descriptor)
//!   fail loudly rather than being silently coerced, since coercion would
//!   corrupt exported history.

use std::io;

use thiserror::Error;

/// A specialized [`Result`] type for chatshift operations.
///
/// # Example
///
/// ```rust
/// use chatshift::error::Result;
/// use chatshift::NormalizedMessage;
///
/// fn my_function() -> Result<Vec<NormalizedMessage>> {
///     // ... operations that may fail
///     Ok(vec![])
/// }
/// ```
pub type Result<T> = std::result::Result<T, ChatshiftError>;

/// The error type for all chatshift operations.
///
/// Each variant contains context about what went wrong and, where applicable,
/// the underlying source error.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ChatshiftError {
    /// An I/O error occurred.
    ///
    /// This typically happens when:
    /// - The input dump doesn't exist
    /// - Permission denied
    /// - Disk is full (when writing output)
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Invalid date string in filter configuration.
    ///
    /// Date filters expect YYYY-MM-DD format.
    #[error("Invalid date '{input}'. Expected format: {expected}")]
    InvalidDate {
        /// The invalid date string that was provided
        input: String,
        /// Expected format description
        expected: &'static str,
    },

    /// The export filter's end date precedes its start date.
    #[error("Invalid date range: start {start} is after end {end}")]
    InvalidDateRange {
        /// Configured start of the range
        start: String,
        /// Configured end of the range
        end: String,
    },

    /// A custom format template references an unknown placeholder.
    ///
    /// Valid placeholders are `{date}`, `{time}`, `{sender}`, `{message}`.
    #[error("Unknown placeholder '{{{placeholder}}}' in template '{pattern}'")]
    InvalidTemplate {
        /// The offending placeholder name (without braces)
        placeholder: String,
        /// The full pattern that was rejected
        pattern: String,
    },

    /// The custom style was selected without supplying a line pattern.
    #[error("The custom style requires a line pattern")]
    MissingPattern,

    /// A normalized record violates a structural invariant.
    ///
    /// For example a record claiming a text kind while carrying a media
    /// descriptor. These are programming errors in the caller, not data
    /// quality issues, so they are surfaced instead of coerced.
    #[error("Invalid record {id}: {message}")]
    InvalidRecord {
        /// Message ID of the offending record
        id: i64,
        /// Description of the violated invariant
        message: String,
    },

    /// JSON parsing error while reading a retrieved-message dump.
    #[cfg(feature = "json-input")]
    #[error("Failed to parse message dump: {0}")]
    Json(#[from] serde_json::Error),
}

// ============================================================================
// Convenience constructors
// ============================================================================

impl ChatshiftError {
    /// Creates an invalid date error with the standard expected format.
    pub fn invalid_date(input: impl Into<String>) -> Self {
        ChatshiftError::InvalidDate {
            input: input.into(),
            expected: "YYYY-MM-DD",
        }
    }

    /// Creates an invalid template error.
    pub fn invalid_template(placeholder: impl Into<String>, pattern: impl Into<String>) -> Self {
        ChatshiftError::InvalidTemplate {
            placeholder: placeholder.into(),
            pattern: pattern.into(),
        }
    }

    /// Creates an invalid record error.
    pub fn invalid_record(id: i64, message: impl Into<String>) -> Self {
        ChatshiftError::InvalidRecord {
            id,
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_date_message() {
        let err = ChatshiftError::invalid_date("01-06-2023");
        assert_eq!(
            err.to_string(),
            "Invalid date '01-06-2023'. Expected format: YYYY-MM-DD"
        );
    }

    #[test]
    fn test_invalid_template_message() {
        let err = ChatshiftError::invalid_template("user", "{date} {user}");
        assert_eq!(
            err.to_string(),
            "Unknown placeholder '{user}' in template '{date} {user}'"
        );
    }

    #[test]
    fn test_invalid_record_message() {
        let err = ChatshiftError::invalid_record(42, "text kind with media descriptor");
        assert_eq!(
            err.to_string(),
            "Invalid record 42: text kind with media descriptor"
        );
    }

    #[test]
    fn test_io_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "missing");
        let err: ChatshiftError = io_err.into();
        assert!(matches!(err, ChatshiftError::Io(_)));
    }
}
