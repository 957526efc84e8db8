// ============================================================================
// Numeric Errors
// Error types for the monetary arithmetic kernel
// ============================================================================

use std::fmt;

/// Errors that can occur during monetary arithmetic operations.
///
/// The kernel never recovers from these internally: every failure is a
/// property of the caller's input (a result that does not fit, a zero
/// divisor, a malformed string), not a transient condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumericError {
    /// True mathematical result cannot be represented in the target width
    Overflow,
    /// Attempted division by zero
    DivisionByZero,
    /// Requested rounding mode is not supported by the division algorithm
    UnsupportedRounding,
    /// Conversion would lose significant digits
    PrecisionLoss,
    /// Input string or component value is invalid
    InvalidInput,
}

impl fmt::Display for NumericError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumericError::Overflow => {
                write!(f, "arithmetic overflow: result cannot be represented")
            },
            NumericError::DivisionByZero => write!(f, "division by zero"),
            NumericError::UnsupportedRounding => {
                write!(f, "unsupported rounding mode: only half-up and down are available")
            },
            NumericError::PrecisionLoss => write!(
                f,
                "precision loss: conversion would lose significant digits"
            ),
            NumericError::InvalidInput => write!(f, "invalid input: could not parse value"),
        }
    }
}

impl std::error::Error for NumericError {}

/// Result type alias for numeric operations
pub type NumericResult<T> = Result<T, NumericError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            NumericError::Overflow.to_string(),
            "arithmetic overflow: result cannot be represented"
        );
        assert_eq!(NumericError::DivisionByZero.to_string(), "division by zero");
    }

    #[test]
    fn test_error_equality() {
        assert_eq!(NumericError::Overflow, NumericError::Overflow);
        assert_ne!(NumericError::Overflow, NumericError::DivisionByZero);
    }
}
