//! Building outcomes from other shapes: futures, options and collections.
//!
//! The two collection policies differ:
//!
//! - [`combine_all`] is fail-fast. It stops at the first `Failure` and never
//!   pulls another item from the iterator.
//! - [`partition`] is collect-all. It visits every item and reports every
//!   failure, succeeding only when there are none.

use std::any::Any;
use std::future::{Future, IntoFuture};
use std::panic::AssertUnwindSafe;

use either::Either;
use futures::FutureExt;
use itertools::Itertools;
use thiserror::Error;

use crate::outcome::Outcome;

/// Failure payload for an operation that unwound instead of returning.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("operation panicked: {message}")]
pub struct Panicked {
    message: String,
}

impl Panicked {
    fn from_payload(payload: Box<dyn Any + Send>) -> Self {
        let message = payload
            .downcast_ref::<&str>()
            .map(|s| (*s).to_string())
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "non-string panic payload".to_string());
        Self { message }
    }

    /// The panic message, when the payload was a string.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Await a fallible future and settle it as an outcome.
///
/// `Ok` becomes `Success`; `Err` is captured as `Failure` (converted with
/// `Into`) and is not re-raised. The future is awaited exactly once, with no
/// retry and no timeout.
///
/// ```
/// # use outcome_core::{Outcome, from_async, success};
/// # futures::executor::block_on(async {
/// let settled: Outcome<String, u8> = from_async(async { Ok::<_, String>(5) }).await;
/// assert_eq!(settled, success(5));
/// # });
/// ```
pub async fn from_async<L, R, E, F>(operation: F) -> Outcome<L, R>
where
    F: IntoFuture<Output = Result<R, E>>,
    E: Into<L>,
{
    match operation.await {
        Ok(value) => Outcome::Success(value),
        Err(raised) => Outcome::Failure(raised.into()),
    }
}

/// Await a future that may panic, capturing the panic as a failure.
pub async fn from_unwind<R, F>(operation: F) -> Outcome<Panicked, R>
where
    F: Future<Output = R>,
{
    AssertUnwindSafe(operation)
        .catch_unwind()
        .await
        .map_err(Panicked::from_payload)
        .into()
}

/// `Failure(if_absent)` for `None`, otherwise `Success` of the value.
pub fn from_optional<L, R>(value: Option<R>, if_absent: L) -> Outcome<L, R> {
    value.map_or_else(|| Outcome::Failure(if_absent), Outcome::Success)
}

/// Like [`from_optional`] but only builds the failure when it is needed.
pub fn from_optional_with<L, R, F>(value: Option<R>, if_absent: F) -> Outcome<L, R>
where
    F: FnOnce() -> L,
{
    value.map_or_else(|| Outcome::Failure(if_absent()), Outcome::Success)
}

/// Collect every success in order, or return the first failure.
///
/// Iteration stops at the first `Failure`; later items are never pulled, so
/// this is safe to use on lazy or expensive iterators.
pub fn combine_all<L, R, I>(items: I) -> Outcome<L, Vec<R>>
where
    I: IntoIterator<Item = Outcome<L, R>>,
{
    items.into_iter().collect()
}

/// Split outcomes into failures and successes, keeping each side's order.
///
/// Every item is visited. The result is `Failure` of all failure payloads
/// when at least one exists, otherwise `Success` of all success payloads.
pub fn partition<L, R, I>(items: I) -> Outcome<Vec<L>, Vec<R>>
where
    I: IntoIterator<Item = Outcome<L, R>>,
{
    let (failures, successes): (Vec<L>, Vec<R>) = items
        .into_iter()
        .partition_map(Either::<L, R>::from);

    if failures.is_empty() {
        Outcome::Success(successes)
    } else {
        Outcome::Failure(failures)
    }
}

/// Fail-fast collection, the same policy as [`combine_all`].
impl<L, R, V> FromIterator<Outcome<L, R>> for Outcome<L, V>
where
    V: FromIterator<R>,
{
    fn from_iter<I: IntoIterator<Item = Outcome<L, R>>>(iter: I) -> Self {
        iter.into_iter()
            .map(Outcome::into_result)
            .collect::<Result<V, L>>()
            .into()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::expect_used)]
    #![allow(clippy::panic)]
    #![allow(clippy::arithmetic_side_effects)]

    use std::cell::Cell;
    use std::collections::BTreeSet;

    use super::*;
    use crate::outcome::{failure, success};

    fn mixed() -> Vec<Outcome<&'static str, i32>> {
        vec![success(1), failure("e1"), success(3), failure("e2")]
    }

    #[test]
    fn test_combine_all_first_failure_wins() {
        assert_eq!(combine_all(mixed()), failure("e1"));
    }

    #[test]
    fn test_combine_all_collects_in_order() {
        let items: Vec<Outcome<&str, i32>> = vec![success(3), success(1), success(2)];
        assert_eq!(combine_all(items), success(vec![3, 1, 2]));
    }

    #[test]
    fn test_combine_all_empty_is_success() {
        let items: Vec<Outcome<&str, i32>> = Vec::new();
        assert_eq!(combine_all(items), success(Vec::new()));
    }

    #[test]
    fn test_combine_all_stops_pulling_after_failure() {
        let pulled = Cell::new(0);
        let lazy = mixed().into_iter().inspect(|_| pulled.set(pulled.get() + 1));

        assert_eq!(combine_all(lazy), failure("e1"));
        assert_eq!(pulled.get(), 2);
    }

    #[test]
    fn test_combine_all_on_unbounded_iterator() {
        let naturals = (0..).map(|n: i32| if n < 5 { success(n) } else { failure(n) });
        assert_eq!(combine_all(naturals), failure(5));
    }

    #[test]
    fn test_collect_into_other_containers() {
        let set: Outcome<&str, BTreeSet<i32>> =
            vec![success(2), success(1), success(2)].into_iter().collect();
        assert_eq!(set, success(BTreeSet::from([1, 2])));
    }

    #[test]
    fn test_partition_collects_all_failures() {
        assert_eq!(partition(mixed()), failure(vec!["e1", "e2"]));
    }

    #[test]
    fn test_partition_all_successes() {
        let items: Vec<Outcome<&str, i32>> = vec![success(1), success(2)];
        assert_eq!(partition(items), success(vec![1, 2]));
    }

    #[test]
    fn test_partition_visits_every_item() {
        let pulled = Cell::new(0);
        let lazy = mixed().into_iter().inspect(|_| pulled.set(pulled.get() + 1));

        let _ = partition(lazy);
        assert_eq!(pulled.get(), 4);
    }

    #[test]
    fn test_partition_empty_is_success() {
        let items: Vec<Outcome<&str, i32>> = Vec::new();
        assert_eq!(partition(items), success(Vec::new()));
    }

    #[test]
    fn test_from_optional() {
        assert_eq!(from_optional(None::<i32>, "missing"), failure("missing"));
        assert_eq!(from_optional(Some(5), "missing"), success(5));
    }

    #[test]
    fn test_from_optional_with_is_lazy() {
        let built = Cell::new(0);
        let present = from_optional_with(Some(5), || {
            built.set(built.get() + 1);
            "missing"
        });
        assert_eq!(present, success(5));
        assert_eq!(built.get(), 0);

        let absent = from_optional_with(None::<i32>, || "missing");
        assert_eq!(absent, failure("missing"));
    }

    #[tokio::test]
    async fn test_from_async_success() {
        let settled: Outcome<&str, i32> = from_async(async { Ok::<i32, &str>(5) }).await;
        assert_eq!(settled, success(5));
    }

    #[tokio::test]
    async fn test_from_async_failure() {
        let settled: Outcome<&str, i32> = from_async(async { Err::<i32, &str>("boom") }).await;
        assert_eq!(settled, failure("boom"));
    }

    #[tokio::test]
    async fn test_from_async_converts_error() {
        let settled: Outcome<String, i32> =
            from_async(async { Err::<i32, &str>("boom") }).await;
        assert_eq!(settled, failure("boom".to_string()));
    }

    #[tokio::test]
    async fn test_from_unwind_captures_panic() {
        let settled = from_unwind(async {
            if true {
                panic!("exploded");
            }
            1
        })
        .await;

        let err = settled.failure().unwrap();
        assert_eq!(err.message(), "exploded");
    }

    #[tokio::test]
    async fn test_from_unwind_success() {
        assert_eq!(from_unwind(async { 7 }).await, success(7));
    }
}
