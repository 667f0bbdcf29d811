use std::sync::Arc;

use axum::{extract::State, Json};

use crate::{
    error::AppResult, middleware::AuthenticatedUser, models::HistoryRecord,
    services::history::list_history, state::AppState,
};

/// The caller's recommendation history, newest first
pub async fn list(
    State(state): State<Arc<AppState>>,
    AuthenticatedUser(user): AuthenticatedUser,
) -> AppResult<Json<Vec<HistoryRecord>>> {
    let records = list_history(state.history.as_ref(), user).await?;
    Ok(Json(records))
}
