//! Demo routes
//!
//! The same user lookup is exposed in two styles so they can be compared
//! under load:
//!
//! - `GET /classic/users/{id}` - early return with `?`, errors rendered as
//!   RFC 7807 problem details
//! - `GET /outcome/users/{id}` - `Outcome` combinators, the handler folds the
//!   result into a status code and body
//! - `POST /outcome/users/batch` - many lookups at once, fail-fast or
//!   collect-all depending on `?mode=`

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};

use crate::users::UserDirectory;

pub mod classic;
pub mod outcome;

/// Shared handler state.
#[derive(Debug, Clone)]
pub struct AppState {
    pub directory: Arc<UserDirectory>,
}

impl AppState {
    #[must_use]
    pub fn new(directory: UserDirectory) -> Self {
        Self {
            directory: Arc::new(directory),
        }
    }
}

/// Create the demo router for both route styles.
pub fn create_router() -> Router<AppState> {
    Router::new()
        .route("/classic/users/{id}", get(classic::get_user))
        .route("/outcome/users/{id}", get(outcome::get_user))
        .route("/outcome/users/batch", post(outcome::get_users_batch))
}
