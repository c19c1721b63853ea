//! Extension traits bridging `Result`/`Option` into [`Outcome`], plus the
//! explicitly logged consumers.
//!
//! Nothing in the combinator suite logs. The `*_logged` methods here are the
//! only place a failure is reported to `tracing`, and only because the
//! caller asked for it by name.

use std::fmt::Debug;

use crate::outcome::Outcome;

/// Convert a `Result` into an [`Outcome`].
pub trait IntoOutcome<L, R> {
    /// `Ok` becomes `Success`, `Err` becomes `Failure`.
    fn into_outcome(self) -> Outcome<L, R>;
}

impl<L, R> IntoOutcome<L, R> for Result<R, L> {
    fn into_outcome(self) -> Outcome<L, R> {
        self.into()
    }
}

/// Option helpers mirroring `ok_or` / `ok_or_else`.
pub trait OptionOutcomeExt<R> {
    /// `None` becomes `Failure(if_absent)`.
    fn into_outcome_or<L>(self, if_absent: L) -> Outcome<L, R>;

    /// `None` becomes `Failure(if_absent())`.
    fn into_outcome_or_else<L, F: FnOnce() -> L>(self, if_absent: F) -> Outcome<L, R>;
}

impl<R> OptionOutcomeExt<R> for Option<R> {
    fn into_outcome_or<L>(self, if_absent: L) -> Outcome<L, R> {
        crate::aggregate::from_optional(self, if_absent)
    }

    fn into_outcome_or_else<L, F: FnOnce() -> L>(self, if_absent: F) -> Outcome<L, R> {
        crate::aggregate::from_optional_with(self, if_absent)
    }
}

/// Consumers that record the discarded failure as a `tracing` warning.
pub trait OutcomeExt<L, R> {
    /// Convert to an `Option`, logging the failure if present.
    fn into_option_logged(self) -> Option<R>;

    /// Get the success or `default`, logging the failure if present.
    fn success_or_logged(self, default: R) -> R;
}

impl<L: Debug, R> OutcomeExt<L, R> for Outcome<L, R> {
    fn into_option_logged(self) -> Option<R> {
        match self {
            Outcome::Success(value) => Some(value),
            Outcome::Failure(e) => {
                tracing::warn!(failure = ?e, "outcome discarded");
                None
            }
        }
    }

    fn success_or_logged(self, default: R) -> R {
        match self {
            Outcome::Success(value) => value,
            Outcome::Failure(e) => {
                tracing::warn!(failure = ?e, "outcome failed, using default");
                default
            }
        }
    }
}
