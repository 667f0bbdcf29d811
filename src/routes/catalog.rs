use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;

use crate::{
    error::AppResult,
    middleware::AuthenticatedUser,
    models::CatalogView,
    services::catalog,
    state::AppState,
};

#[derive(Debug, Deserialize)]
pub struct CatalogQuery {
    #[serde(default)]
    food_group: Option<String>,
}

/// Catalog listing with the group filter options
pub async fn list(
    State(state): State<Arc<AppState>>,
    _user: AuthenticatedUser,
    Query(params): Query<CatalogQuery>,
) -> AppResult<Json<CatalogView>> {
    let view = catalog::catalog_view(state.catalog.as_ref(), params.food_group).await?;
    Ok(Json(view))
}

/// Distinct food groups
pub async fn food_groups(
    State(state): State<Arc<AppState>>,
    _user: AuthenticatedUser,
) -> AppResult<Json<Vec<String>>> {
    let groups = state.catalog.list_distinct_groups().await?;
    Ok(Json(groups))
}
