//! Error types for misuse of the [`Outcome`](crate::Outcome) API.
//!
//! Modeled failures never appear here - they live in the `Failure` payload.
//! These errors only report a caller extracting the wrong variant.

use std::fmt;

use thiserror::Error;

/// Which side of an [`Outcome`](crate::Outcome) a value is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Variant {
    Failure,
    Success,
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Failure => f.write_str("failure"),
            Self::Success => f.write_str("success"),
        }
    }
}

/// Programmer error raised by `extract_success` / `extract_failure`.
///
/// Returned when the caller extracts a variant without checking it first.
/// This is a logic defect, not a recoverable condition: well-behaved callers
/// branch with `fold`, `match` or `is_success` instead of extracting blindly.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractionError {
    #[error("incompatible extraction: expected {expected}, found {found} holding {payload}")]
    IncompatibleExtraction {
        expected: Variant,
        found: Variant,
        /// `Debug` rendering of the payload that was actually held.
        payload: String,
    },
}

impl ExtractionError {
    /// Create an incompatible extraction error from the payload that was found.
    pub fn incompatible(expected: Variant, found: Variant, payload: &impl fmt::Debug) -> Self {
        Self::IncompatibleExtraction {
            expected,
            found,
            payload: format!("{payload:?}"),
        }
    }

    /// The variant the caller asked for.
    #[must_use]
    pub const fn expected(&self) -> Variant {
        match self {
            Self::IncompatibleExtraction { expected, .. } => *expected,
        }
    }

    /// The variant that was actually held.
    #[must_use]
    pub const fn found(&self) -> Variant {
        match self {
            Self::IncompatibleExtraction { found, .. } => *found,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_includes_payload() {
        let err = ExtractionError::incompatible(Variant::Success, Variant::Failure, &"user not found");
        assert_eq!(
            err.to_string(),
            "incompatible extraction: expected success, found failure holding \"user not found\""
        );
    }

    #[test]
    fn test_accessors() {
        let err = ExtractionError::incompatible(Variant::Failure, Variant::Success, &42);
        assert_eq!(err.expected(), Variant::Failure);
        assert_eq!(err.found(), Variant::Success);
    }
}
