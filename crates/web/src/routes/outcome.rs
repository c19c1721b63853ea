//! User endpoints written with `Outcome` combinators: GET /outcome/users/{id},
//! POST /outcome/users/batch
//!
//! Handlers never use `?`. The lookup returns an `Outcome<FailureInfo, User>`
//! and the handler decides the response by folding it.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use outcome_core::{combine_all, partition};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::AppState;
use crate::users::FailureInfo;

/// Aggregation policy for a batch lookup.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BatchMode {
    /// Stop at the first failing id
    #[default]
    All,
    /// Look up every id and report every failure
    Partition,
}

#[derive(Debug, Default, Deserialize)]
pub struct BatchQuery {
    #[serde(default)]
    mode: BatchMode,
}

/// Request body for a batch lookup
#[derive(Debug, Serialize, Deserialize)]
pub struct BatchRequest {
    pub ids: Vec<String>,
}

/// Response body when a collect-all batch has failures
#[derive(Debug, Serialize, Deserialize)]
pub struct BatchFailures {
    pub failures: Vec<FailureInfo>,
}

fn failure_response(info: FailureInfo) -> Response {
    (info.status(), Json(info)).into_response()
}

/// GET /outcome/users/{id} - Look up an active user
pub async fn get_user(Path(id): Path<String>, State(state): State<AppState>) -> Response {
    state
        .directory
        .lookup(&id)
        .on_failure(|info| debug!(id = %id, code = info.code, "outcome lookup rejected"))
        .fold(failure_response, |user| Json(user).into_response())
}

/// POST /outcome/users/batch - Look up several users at once
pub async fn get_users_batch(
    State(state): State<AppState>,
    Query(query): Query<BatchQuery>,
    Json(request): Json<BatchRequest>,
) -> Response {
    let lookups = request.ids.iter().map(|id| state.directory.lookup(id));

    match query.mode {
        BatchMode::All => {
            combine_all(lookups).fold(failure_response, |users| Json(users).into_response())
        }
        BatchMode::Partition => partition(lookups).fold(
            |failures| {
                debug!(count = failures.len(), "batch lookup rejected");
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    Json(BatchFailures { failures }),
                )
                    .into_response()
            },
            |users| Json(users).into_response(),
        ),
    }
}
