//! In-memory user directory backing both demo route styles.
//!
//! The same lookup is written twice: [`UserDirectory::lookup`] composes
//! `Outcome` combinators, [`UserDirectory::lookup_classic`] returns early with
//! `?`. Both apply the same three rules in the same order:
//!
//! 1. the id must be a positive integer (400)
//! 2. the user must exist (404)
//! 3. the account must be active (403)

use std::collections::BTreeMap;

use axum::http::StatusCode;
use outcome_core::{Outcome, from_optional_with};
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// A directory entry, written verbatim as the success body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub name: String,
    pub email: String,
    pub active: bool,
}

impl User {
    pub fn new(id: u64, name: &str, active: bool) -> Self {
        Self {
            id,
            name: name.to_string(),
            email: format!("{name}@example.com"),
            active,
        }
    }
}

/// Failure payload for the Outcome routes: a message plus the HTTP status
/// the handler should answer with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailureInfo {
    pub message: String,
    pub code: u16,
}

impl FailureInfo {
    pub fn new(message: impl Into<String>, status: StatusCode) -> Self {
        Self {
            message: message.into(),
            code: status.as_u16(),
        }
    }

    pub fn invalid_id(raw: &str) -> Self {
        Self::new(
            format!("'{raw}' is not a valid user id"),
            StatusCode::BAD_REQUEST,
        )
    }

    pub fn not_found(id: u64) -> Self {
        Self::new(format!("user {id} does not exist"), StatusCode::NOT_FOUND)
    }

    pub fn inactive(id: u64) -> Self {
        Self::new(format!("user {id} is inactive"), StatusCode::FORBIDDEN)
    }

    /// The status to answer with; unknown codes map to 500.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        StatusCode::from_u16(self.code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

/// Parse a raw path segment into a positive user id.
pub fn parse_user_id(raw: &str) -> Outcome<FailureInfo, u64> {
    from_optional_with(raw.parse::<u64>().ok(), || FailureInfo::invalid_id(raw))
        .filter(|id| *id > 0, |_| FailureInfo::invalid_id(raw))
}

/// Read-only user store.
#[derive(Debug, Clone, Default)]
pub struct UserDirectory {
    users: BTreeMap<u64, User>,
}

impl UserDirectory {
    /// Create a directory from a list of users, keyed by id.
    #[must_use]
    pub fn new(users: impl IntoIterator<Item = User>) -> Self {
        Self {
            users: users.into_iter().map(|user| (user.id, user)).collect(),
        }
    }

    /// The fixture directory served by the demo binary.
    #[must_use]
    pub fn seeded() -> Self {
        Self::new([
            User::new(1, "ada", true),
            User::new(2, "grace", true),
            User::new(3, "edsger", false),
            User::new(4, "barbara", true),
        ])
    }

    #[must_use]
    pub fn find(&self, id: u64) -> Option<User> {
        self.users.get(&id).cloned()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.users.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    /// Look up an active user, composing each rule as an `Outcome` step.
    pub fn lookup(&self, raw_id: &str) -> Outcome<FailureInfo, User> {
        parse_user_id(raw_id)
            .chain(|id| from_optional_with(self.find(id), || FailureInfo::not_found(id)))
            .filter(|user| user.active, |user| FailureInfo::inactive(user.id))
    }

    /// Look up an active user, returning early on the first broken rule.
    ///
    /// # Errors
    ///
    /// `BadRequest` for a malformed id, `NotFound` for an unknown user and
    /// `Forbidden` for an inactive account.
    pub fn lookup_classic(&self, raw_id: &str) -> Result<User, AppError> {
        let id = raw_id
            .parse::<u64>()
            .ok()
            .filter(|id| *id > 0)
            .ok_or_else(|| AppError::BadRequest(format!("'{raw_id}' is not a valid user id")))?;

        let user = self
            .find(id)
            .ok_or_else(|| AppError::NotFound(format!("user {id} does not exist")))?;

        if !user.active {
            return Err(AppError::Forbidden(format!("user {id} is inactive")));
        }

        Ok(user)
    }
}
