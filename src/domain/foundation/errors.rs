//! Error types for the domain layer.

use rust_decimal::Decimal;
use std::collections::HashMap;
use std::error::Error;
use std::fmt;
use thiserror::Error;

/// Errors that occur during value object construction.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("Field '{field}' cannot be empty")]
    EmptyField { field: String },

    #[error("Field '{field}' must be between {min} and {max}, got {actual}")]
    OutOfRange {
        field: String,
        min: f64,
        max: f64,
        actual: f64,
    },

    #[error("Field '{field}' has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    #[error("Field '{field}' cannot be negative, got {value}")]
    NegativeAmount { field: String, value: Decimal },

    #[error("Field '{field}' has invalid value '{value}', expected one of: {allowed}")]
    InvalidValue {
        field: String,
        value: String,
        allowed: String,
    },
}

impl ValidationError {
    /// Creates an empty field validation error.
    pub fn empty_field(field: impl Into<String>) -> Self {
        ValidationError::EmptyField { field: field.into() }
    }

    /// Creates an out of range validation error.
    pub fn out_of_range(field: impl Into<String>, min: f64, max: f64, actual: f64) -> Self {
        ValidationError::OutOfRange {
            field: field.into(),
            min,
            max,
            actual,
        }
    }

    /// Creates an invalid format validation error.
    pub fn invalid_format(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ValidationError::InvalidFormat {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Creates a negative amount validation error.
    pub fn negative_amount(field: impl Into<String>, value: Decimal) -> Self {
        ValidationError::NegativeAmount {
            field: field.into(),
            value,
        }
    }

    /// Creates an invalid enumerated value error.
    pub fn invalid_value(
        field: impl Into<String>,
        value: impl Into<String>,
        allowed: &[&str],
    ) -> Self {
        ValidationError::InvalidValue {
            field: field.into(),
            value: value.into(),
            allowed: allowed.join(", "),
        }
    }

    /// Returns the name of the offending field.
    pub fn field(&self) -> &str {
        match self {
            ValidationError::EmptyField { field }
            | ValidationError::OutOfRange { field, .. }
            | ValidationError::InvalidFormat { field, .. }
            | ValidationError::NegativeAmount { field, .. }
            | ValidationError::InvalidValue { field, .. } => field,
        }
    }

    /// Maps the variant to its error code.
    pub fn code(&self) -> ErrorCode {
        match self {
            ValidationError::EmptyField { .. } => ErrorCode::EmptyField,
            ValidationError::OutOfRange { .. } => ErrorCode::OutOfRange,
            ValidationError::InvalidFormat { .. } => ErrorCode::InvalidFormat,
            ValidationError::NegativeAmount { .. } => ErrorCode::NegativeAmount,
            ValidationError::InvalidValue { .. } => ErrorCode::InvalidValue,
        }
    }
}

/// Fatal errors raised while building a behavioral profile.
///
/// Row-level problems are not represented here; they are collected as
/// warnings by the normalizer and only become `EmptyResult` when every
/// row is rejected.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProfileError {
    #[error("Unrecognized export format ({reason}); headers found: [{}]", headers.join(", "))]
    FormatUnrecognized { headers: Vec<String>, reason: String },

    #[error("No valid records: {rows_read} rows read, {rejected} rejected")]
    EmptyResult { rows_read: usize, rejected: usize },

    #[error("Duplicate entry identifiers: {}", ids.join(", "))]
    DuplicateRecord { ids: Vec<String> },

    #[error("Input is {actual} bytes, exceeding the {limit} byte limit")]
    InputTooLarge { actual: usize, limit: usize },

    #[error("Malformed input: {0}")]
    MalformedInput(String),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("{field} exceeds the representable decimal range")]
    AmountOverflow { field: String },

    #[error("Invariant violated: {0}")]
    InvariantViolation(String),
}

impl ProfileError {
    /// Creates an invariant violation error.
    pub fn invariant(message: impl Into<String>) -> Self {
        ProfileError::InvariantViolation(message.into())
    }

    /// Creates an amount overflow error for `field`.
    pub fn overflow(field: impl Into<String>) -> Self {
        ProfileError::AmountOverflow {
            field: field.into(),
        }
    }

    /// Maps the variant to its error code.
    pub fn code(&self) -> ErrorCode {
        match self {
            ProfileError::FormatUnrecognized { .. } => ErrorCode::FormatUnrecognized,
            ProfileError::EmptyResult { .. } => ErrorCode::EmptyResult,
            ProfileError::DuplicateRecord { .. } => ErrorCode::DuplicateRecord,
            ProfileError::InputTooLarge { .. } => ErrorCode::InputTooLarge,
            ProfileError::MalformedInput(_) => ErrorCode::InvalidFormat,
            ProfileError::Validation(e) => e.code(),
            ProfileError::AmountOverflow { .. } => ErrorCode::AmountOverflow,
            ProfileError::InvariantViolation(_) => ErrorCode::InvariantViolation,
        }
    }
}

/// Error codes organized by category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Validation errors
    ValidationFailed,
    EmptyField,
    OutOfRange,
    InvalidFormat,
    NegativeAmount,
    InvalidValue,

    // Input errors
    FormatUnrecognized,
    EmptyResult,
    DuplicateRecord,
    InputTooLarge,
    AmountOverflow,

    // Defects
    InvariantViolation,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorCode::ValidationFailed => "VALIDATION_FAILED",
            ErrorCode::EmptyField => "EMPTY_FIELD",
            ErrorCode::OutOfRange => "OUT_OF_RANGE",
            ErrorCode::InvalidFormat => "INVALID_FORMAT",
            ErrorCode::NegativeAmount => "NEGATIVE_AMOUNT",
            ErrorCode::InvalidValue => "INVALID_VALUE",
            ErrorCode::FormatUnrecognized => "FORMAT_UNRECOGNIZED",
            ErrorCode::EmptyResult => "EMPTY_RESULT",
            ErrorCode::DuplicateRecord => "DUPLICATE_RECORD",
            ErrorCode::InputTooLarge => "INPUT_TOO_LARGE",
            ErrorCode::AmountOverflow => "AMOUNT_OVERFLOW",
            ErrorCode::InvariantViolation => "INVARIANT_VIOLATION",
        };
        write!(f, "{}", s)
    }
}

/// Standard domain error with code, message, and optional details.
#[derive(Debug, Clone)]
pub struct DomainError {
    pub code: ErrorCode,
    pub message: String,
    pub details: HashMap<String, String>,
}

impl DomainError {
    /// Creates a new domain error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: HashMap::new(),
        }
    }

    /// Adds a detail to the error.
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.details.insert(key.into(), value.into());
        self
    }
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl Error for DomainError {}

impl From<ValidationError> for DomainError {
    fn from(err: ValidationError) -> Self {
        DomainError::new(err.code(), err.to_string()).with_detail("field", err.field())
    }
}

impl From<ProfileError> for DomainError {
    fn from(err: ProfileError) -> Self {
        let base = DomainError::new(err.code(), err.to_string());
        match err {
            ProfileError::FormatUnrecognized { headers, reason } => base
                .with_detail("headers", headers.join(","))
                .with_detail("reason", reason),
            ProfileError::EmptyResult { rows_read, rejected } => base
                .with_detail("rows_read", rows_read.to_string())
                .with_detail("rejected", rejected.to_string()),
            ProfileError::DuplicateRecord { ids } => base.with_detail("ids", ids.join(",")),
            ProfileError::InputTooLarge { actual, limit } => base
                .with_detail("actual_bytes", actual.to_string())
                .with_detail("limit_bytes", limit.to_string()),
            ProfileError::Validation(e) => base.with_detail("field", e.field()),
            ProfileError::AmountOverflow { field } => base.with_detail("field", field),
            ProfileError::MalformedInput(_) | ProfileError::InvariantViolation(_) => base,
        }
    }
}
