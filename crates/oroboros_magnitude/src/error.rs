//! # Magnitude Error Types
//!
//! All errors that can occur while building, converting or parsing magnitudes.

use thiserror::Error;

/// Errors that can occur in the magnitude engine.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MagnitudeError {
    /// The operation has no defined result (division by zero).
    #[error("invalid operation: {0}")]
    InvalidOperation(&'static str),

    /// The value does not fit in the requested native type.
    #[error("magnitude does not fit in {target}")]
    Overflow {
        /// Name of the native target type.
        target: &'static str,
    },

    /// Input text is not a number, notation or suffix string.
    #[error("cannot parse {input:?}: {reason}")]
    Parse {
        /// The rejected input.
        input: String,
        /// What was wrong with it.
        reason: &'static str,
    },

    /// Floating-point input was NaN or infinite.
    #[error("non-finite floating-point input")]
    NonFinite,

    /// Invalid configuration file.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl MagnitudeError {
    /// Builds a [`MagnitudeError::Parse`] for the given input.
    #[must_use]
    pub fn parse(input: &str, reason: &'static str) -> Self {
        Self::Parse {
            input: input.to_owned(),
            reason,
        }
    }
}

/// Result type for magnitude operations.
pub type MagnitudeResult<T> = Result<T, MagnitudeError>;
