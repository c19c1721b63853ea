//! The `Outcome` type and its combinator suite.
//!
//! An [`Outcome`] is exactly one of `Failure(L)` or `Success(R)`. Every
//! combinator consumes `self` and builds a new value; payloads are never
//! mutated in place.
//!
//! Combinators that act on the success side never call the supplied closure
//! when the receiver is already a `Failure`. That rule is what gives a chain of
//! operations its "stop at the first failure" behaviour without any control
//! flow signal.
//!
//! # Examples
//!
//! ```
//! use outcome_core::{Outcome, failure, success};
//!
//! fn parse(raw: &str) -> Outcome<String, u32> {
//!     raw.parse::<u32>()
//!         .map_err(|e| e.to_string())
//!         .into()
//! }
//!
//! let doubled = parse("21")
//!     .map_success(|n| n * 2)
//!     .filter(|n| *n < 100, |n| format!("{n} is too large"));
//! assert_eq!(doubled, success(42));
//!
//! let rejected: Outcome<String, u32> = parse("nope").map_success(|n| n * 2);
//! assert!(rejected.is_failure());
//! assert_eq!(failure::<_, u32>(1).failure_or(0), 1);
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{ExtractionError, Variant};

/// Result of a computation that can fail.
///
/// `L` is the failure payload and `R` the success payload. The order mirrors
/// the left/right convention: failure on the left, success on the right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[must_use = "an Outcome may be a Failure, which should be handled"]
pub enum Outcome<L, R> {
    /// The computation was rejected; holds the failure payload.
    Failure(L),
    /// The computation completed; holds the success payload.
    Success(R),
}

/// Build a `Failure` from a plain value.
pub const fn failure<L, R>(value: L) -> Outcome<L, R> {
    Outcome::Failure(value)
}

/// Build a `Success` from a plain value.
pub const fn success<L, R>(value: R) -> Outcome<L, R> {
    Outcome::Success(value)
}

impl<L, R> Outcome<L, R> {
    // ------------------------------------------------------------------
    // Variant identity
    // ------------------------------------------------------------------

    /// `true` if this is a `Success`.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// `true` if this is a `Failure`.
    #[must_use]
    pub const fn is_failure(&self) -> bool {
        !self.is_success()
    }

    /// The variant currently held.
    #[must_use]
    pub const fn variant(&self) -> Variant {
        match self {
            Self::Failure(_) => Variant::Failure,
            Self::Success(_) => Variant::Success,
        }
    }

    /// Consume the outcome by calling exactly one of the two closures.
    ///
    /// `on_failure` runs for `Failure`, `on_success` for `Success`; each is
    /// called at most once and the other is never touched.
    pub fn fold<T, F, S>(self, on_failure: F, on_success: S) -> T
    where
        F: FnOnce(L) -> T,
        S: FnOnce(R) -> T,
    {
        match self {
            Self::Failure(l) => on_failure(l),
            Self::Success(r) => on_success(r),
        }
    }

    /// Borrow both payloads, producing `Outcome<&L, &R>`.
    pub const fn as_ref(&self) -> Outcome<&L, &R> {
        match self {
            Self::Failure(l) => Outcome::Failure(l),
            Self::Success(r) => Outcome::Success(r),
        }
    }

    // ------------------------------------------------------------------
    // Extraction
    // ------------------------------------------------------------------

    /// Take the success payload.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractionError::IncompatibleExtraction`] when called on a
    /// `Failure`. That signals a caller bug (the variant was not checked) and
    /// should not be folded back into an `Outcome`.
    pub fn extract_success(self) -> Result<R, ExtractionError>
    where
        L: fmt::Debug,
    {
        match self {
            Self::Success(r) => Ok(r),
            Self::Failure(l) => Err(ExtractionError::incompatible(
                Variant::Success,
                Variant::Failure,
                &l,
            )),
        }
    }

    /// Take the failure payload.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractionError::IncompatibleExtraction`] when called on a
    /// `Success`.
    pub fn extract_failure(self) -> Result<L, ExtractionError>
    where
        R: fmt::Debug,
    {
        match self {
            Self::Failure(l) => Ok(l),
            Self::Success(r) => Err(ExtractionError::incompatible(
                Variant::Failure,
                Variant::Success,
                &r,
            )),
        }
    }

    /// The success payload, or `default` for a `Failure`.
    pub fn success_or(self, default: R) -> R {
        match self {
            Self::Success(r) => r,
            Self::Failure(_) => default,
        }
    }

    /// The failure payload, or `default` for a `Success`.
    pub fn failure_or(self, default: L) -> L {
        match self {
            Self::Failure(l) => l,
            Self::Success(_) => default,
        }
    }

    /// The success payload, or one computed from the failure payload.
    pub fn success_or_else<F>(self, f: F) -> R
    where
        F: FnOnce(L) -> R,
    {
        match self {
            Self::Success(r) => r,
            Self::Failure(l) => f(l),
        }
    }

    /// The failure payload, or one computed from the success payload.
    pub fn failure_or_else<F>(self, f: F) -> L
    where
        F: FnOnce(R) -> L,
    {
        match self {
            Self::Failure(l) => l,
            Self::Success(r) => f(r),
        }
    }

    /// `Some(payload)` for a `Success`, dropping any failure.
    pub fn success(self) -> Option<R> {
        match self {
            Self::Success(r) => Some(r),
            Self::Failure(_) => None,
        }
    }

    /// `Some(payload)` for a `Failure`, dropping any success.
    pub fn failure(self) -> Option<L> {
        match self {
            Self::Failure(l) => Some(l),
            Self::Success(_) => None,
        }
    }

    // ------------------------------------------------------------------
    // Side effects
    // ------------------------------------------------------------------

    /// Run `effect` on the success payload, then hand back `self` unchanged.
    pub fn on_success<F>(self, effect: F) -> Self
    where
        F: FnOnce(&R),
    {
        if let Self::Success(ref r) = self {
            effect(r);
        }
        self
    }

    /// Run `effect` on the failure payload, then hand back `self` unchanged.
    pub fn on_failure<F>(self, effect: F) -> Self
    where
        F: FnOnce(&L),
    {
        if let Self::Failure(ref l) = self {
            effect(l);
        }
        self
    }

    // ------------------------------------------------------------------
    // Combinators
    // ------------------------------------------------------------------

    /// Transform the success payload; failures pass through untouched.
    pub fn map_success<T, F>(self, f: F) -> Outcome<L, T>
    where
        F: FnOnce(R) -> T,
    {
        match self {
            Self::Success(r) => Outcome::Success(f(r)),
            Self::Failure(l) => Outcome::Failure(l),
        }
    }

    /// Transform the failure payload; successes pass through untouched.
    pub fn map_failure<T, F>(self, f: F) -> Outcome<T, R>
    where
        F: FnOnce(L) -> T,
    {
        match self {
            Self::Failure(l) => Outcome::Failure(f(l)),
            Self::Success(r) => Outcome::Success(r),
        }
    }

    /// Transform whichever payload is held.
    pub fn map_both<L2, R2, F, S>(self, on_failure: F, on_success: S) -> Outcome<L2, R2>
    where
        F: FnOnce(L) -> L2,
        S: FnOnce(R) -> R2,
    {
        match self {
            Self::Failure(l) => Outcome::Failure(on_failure(l)),
            Self::Success(r) => Outcome::Success(on_success(r)),
        }
    }

    /// Sequence a fallible step after this one.
    ///
    /// On `Success` the payload is handed to `f` and its outcome is returned
    /// as is. On `Failure` the original failure is returned and `f` is never
    /// called. The receiver's failure type only has to convert into the
    /// step's failure type, so a chain can widen its failure channel into an
    /// enum with `From` impls; identical types convert trivially.
    pub fn chain<L2, T, F>(self, f: F) -> Outcome<L2, T>
    where
        F: FnOnce(R) -> Outcome<L2, T>,
        L: Into<L2>,
    {
        match self {
            Self::Success(r) => f(r),
            Self::Failure(l) => Outcome::Failure(l.into()),
        }
    }

    /// Reject a success that does not satisfy `predicate`.
    ///
    /// A rejected payload becomes `Failure(on_reject(payload))`. An existing
    /// failure passes through without evaluating either closure.
    pub fn filter<E, P, F>(self, predicate: P, on_reject: F) -> Outcome<E, R>
    where
        P: FnOnce(&R) -> bool,
        F: FnOnce(R) -> E,
        L: Into<E>,
    {
        match self {
            Self::Success(r) if predicate(&r) => Outcome::Success(r),
            Self::Success(r) => Outcome::Failure(on_reject(r)),
            Self::Failure(l) => Outcome::Failure(l.into()),
        }
    }

    /// Try to turn a failure into a new outcome; successes pass through.
    pub fn recover<L2, F>(self, f: F) -> Outcome<L2, R>
    where
        F: FnOnce(L) -> Outcome<L2, R>,
    {
        match self {
            Self::Failure(l) => f(l),
            Self::Success(r) => Outcome::Success(r),
        }
    }

    /// Exchange the two sides.
    pub fn swap(self) -> Outcome<R, L> {
        match self {
            Self::Failure(l) => Outcome::Success(l),
            Self::Success(r) => Outcome::Failure(r),
        }
    }

    /// Convert into the standard library `Result`.
    ///
    /// # Errors
    ///
    /// A `Failure` becomes `Err` holding the failure payload.
    pub fn into_result(self) -> Result<R, L> {
        self.into()
    }
}

impl<L, R> From<Result<R, L>> for Outcome<L, R> {
    fn from(result: Result<R, L>) -> Self {
        match result {
            Ok(r) => Self::Success(r),
            Err(l) => Self::Failure(l),
        }
    }
}

impl<L, R> From<Outcome<L, R>> for Result<R, L> {
    fn from(outcome: Outcome<L, R>) -> Self {
        match outcome {
            Outcome::Success(r) => Ok(r),
            Outcome::Failure(l) => Err(l),
        }
    }
}

impl<L, R> From<either::Either<L, R>> for Outcome<L, R> {
    fn from(value: either::Either<L, R>) -> Self {
        value.either(Self::Failure, Self::Success)
    }
}

impl<L, R> From<Outcome<L, R>> for either::Either<L, R> {
    fn from(outcome: Outcome<L, R>) -> Self {
        outcome.fold(Self::Left, Self::Right)
    }
}
