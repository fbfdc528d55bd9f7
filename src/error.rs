//! Argument errors raised eagerly by every operator entry point.

use std::fmt;

/// An operator was called with an unusable argument.
///
/// These are programmer errors: they are reported synchronously when the
/// operator is constructed, before any element of the source is read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArgumentError {
    /// A required argument was never supplied
    Missing { param: &'static str },
    /// A numeric argument fell below its lower bound
    OutOfRange {
        param: &'static str,
        value: i64,
        min: i64,
    },
    /// A textual argument could not be parsed
    Malformed { param: &'static str, value: String },
}

impl ArgumentError {
    /// Name of the offending parameter.
    pub fn param(&self) -> &'static str {
        match self {
            ArgumentError::Missing { param }
            | ArgumentError::OutOfRange { param, .. }
            | ArgumentError::Malformed { param, .. } => param,
        }
    }
}

impl fmt::Display for ArgumentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgumentError::Missing { param } => write!(f, "Missing argument: {}", param),
            ArgumentError::OutOfRange { param, value, min } => write!(
                f,
                "Argument {} out of range: {} (must be at least {})",
                param, value, min
            ),
            ArgumentError::Malformed { param, value } => {
                write!(f, "Argument {} is malformed: {:?}", param, value)
            }
        }
    }
}

impl std::error::Error for ArgumentError {}
