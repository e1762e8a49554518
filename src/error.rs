//! Error types for the bill splitter.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while splitting a bill.

use rust_decimal::Decimal;
use thiserror::Error;

/// The main error type for the bill splitter.
///
/// Every fallible operation in the crate returns this error type, so callers
/// of [`split_bill`](crate::split_bill) only ever handle one error surface.
///
/// # Example
///
/// ```
/// use bill_splitter::error::SplitError;
///
/// let error = SplitError::ConfigNotFound {
///     path: "/missing/policy.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/policy.yaml");
/// ```
#[derive(Debug, Error)]
pub enum SplitError {
    /// The bill date was not a `YYYY-MM-DD` string.
    #[error("Invalid date '{input}': {message}")]
    InvalidDate {
        /// The raw date string.
        input: String,
        /// A description of what was wrong with it.
        message: String,
    },

    /// A bill item was rejected at the boundary.
    #[error("Invalid item at index {index}: {message}")]
    InvalidItem {
        /// Position of the item in the input sequence.
        index: usize,
        /// A description of what made the item invalid.
        message: String,
    },

    /// The tip percentage was negative.
    #[error("Invalid tip percentage: {value}")]
    InvalidTipPercentage {
        /// The rejected percentage.
        value: Decimal,
    },

    /// A split policy field held an unusable value.
    #[error("Invalid policy field '{field}': {message}")]
    InvalidPolicy {
        /// The offending field, dotted (e.g. `rounding.person_unit`).
        field: String,
        /// A description of the problem.
        message: String,
    },

    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A general calculation error occurred.
    #[error("Calculation error: {message}")]
    CalculationError {
        /// A description of the calculation error.
        message: String,
    },
}

/// A type alias for Results that return SplitError.
pub type SplitResult<T> = Result<T, SplitError>;
