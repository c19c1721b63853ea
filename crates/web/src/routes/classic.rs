//! User endpoint written with `Result` and early returns: GET /classic/users/{id}

use axum::{
    extract::{Path, State},
    response::Json,
};
use tracing::debug;

use super::AppState;
use crate::error::Result;
use crate::users::User;

/// GET /classic/users/{id} - Look up an active user
pub async fn get_user(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<User>> {
    let user = state.directory.lookup_classic(&id).inspect_err(|e| {
        debug!(id = %id, error = %e, "classic lookup rejected");
    })?;

    Ok(Json(user))
}
