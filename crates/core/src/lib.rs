#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

//! # outcome-core
//!
//! A two-variant [`Outcome`] type for composing fallible operations without
//! early returns, and deciding later how to consume the result.
//!
//! This crate provides:
//! - The `Outcome<L, R>` enum with its `failure` / `success` constructors
//! - Short-circuiting combinators (`map_success`, `chain`, `filter`, ...)
//! - Aggregation over collections (`combine_all`, `partition`) and bridges
//!   from futures and options (`from_async`, `from_optional`)
//! - Extension traits for `Result` and `Option`

pub mod aggregate;
pub mod error;
pub mod ext;
pub mod outcome;

// Re-export commonly used items
pub use aggregate::{
    Panicked, combine_all, from_async, from_optional, from_optional_with, from_unwind, partition,
};
pub use error::{ExtractionError, Variant};
pub use ext::{IntoOutcome, OptionOutcomeExt, OutcomeExt};
pub use outcome::{Outcome, failure, success};
