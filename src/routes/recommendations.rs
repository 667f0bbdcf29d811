use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    Extension, Json,
};
use serde::{Deserialize, Serialize};

use crate::{
    error::{AppError, AppResult, WorkflowError},
    middleware::{AuthenticatedUser, RequestId},
    models::{CatalogView, RecommendationOutcome, RecommendationQuery},
    services::catalog,
    state::AppState,
};

#[derive(Debug, Deserialize)]
pub struct RecommendationRequest {
    #[serde(default)]
    pub food_item: Option<String>,
    #[serde(default)]
    pub food_group: Option<String>,
    /// Replaces the configured feature list for this request
    #[serde(default)]
    pub features: Option<Vec<String>>,
}

impl RecommendationRequest {
    fn into_query(self) -> Result<RecommendationQuery, WorkflowError> {
        let food_item = self.food_item.ok_or(WorkflowError::MissingInput)?;

        let mut query = RecommendationQuery::new(food_item);
        if let Some(group) = self.food_group.filter(|g| !g.is_empty()) {
            query = query.with_group(group);
        }
        if let Some(features) = self.features {
            query = query.with_features(features);
        }
        Ok(query)
    }
}

/// Recommendation outcome plus the catalog page context for the selected group
#[derive(Debug, Serialize)]
pub struct RecommendationResponse {
    #[serde(flatten)]
    pub outcome: RecommendationOutcome,
    pub catalog: CatalogView,
}

/// Handler for recommendations endpoint
pub async fn recommend(
    State(state): State<Arc<AppState>>,
    Extension(request_id): Extension<RequestId>,
    AuthenticatedUser(user): AuthenticatedUser,
    payload: Result<Json<RecommendationRequest>, JsonRejection>,
) -> AppResult<Json<RecommendationResponse>> {
    let Json(request) = payload.map_err(|rejection| {
        tracing::warn!(request_id = %request_id, error = %rejection, "Rejected request body");
        AppError::InvalidInput(rejection.body_text())
    })?;

    tracing::info!(
        request_id = %request_id,
        user = %user,
        food_item = ?request.food_item,
        "Processing recommendation request"
    );

    let query = request.into_query()?;

    // Catalog context is read first: no store read may fail after the history write
    let catalog =
        catalog::catalog_view(state.catalog.as_ref(), query.selected_group.clone()).await?;
    let outcome = state.workflow.produce_recommendations(query, user).await?;

    tracing::info!(
        request_id = %request_id,
        history_id = outcome.history_id,
        "Recommendation completed"
    );

    Ok(Json(RecommendationResponse { outcome, catalog }))
}
