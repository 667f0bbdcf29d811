use std::sync::Arc;

use chrono::Utc;
use tracing::instrument;

use crate::{
    db::{CatalogStore, HistoryStore},
    error::WorkflowError,
    models::{
        EngineResponse, EngineRow, FoodItem, NewHistoryRecord, RecommendationOutcome,
        RecommendationQuery, UserId,
    },
    services::engine::RecommendationEngine,
};

/// Produces substitutions for a selected food and logs them to the history
///
/// A request either resolves the selected food and all three suggested
/// substitutes and appends exactly one history record, or fails without
/// writing anything.
#[derive(Clone)]
pub struct RecommendationWorkflow {
    catalog: Arc<dyn CatalogStore>,
    history: Arc<dyn HistoryStore>,
    engine: Arc<dyn RecommendationEngine>,
    selected_features: Vec<String>,
}

impl RecommendationWorkflow {
    /// Creates a workflow over the given stores and engine
    ///
    /// `selected_features` is the feature list sent to the engine when a
    /// query does not carry its own.
    pub fn new(
        catalog: Arc<dyn CatalogStore>,
        history: Arc<dyn HistoryStore>,
        engine: Arc<dyn RecommendationEngine>,
        selected_features: Vec<String>,
    ) -> Self {
        Self {
            catalog,
            history,
            engine,
            selected_features,
        }
    }

    /// Runs one recommendation request for `user`
    ///
    /// # Errors
    ///
    /// Returns `MissingInput` for an empty food name, `UnknownFoodItem` when the
    /// selected food or any suggestion is not in the catalog, `NoRecommendations`
    /// when the engine has no usable best row, and `EngineFailure` or
    /// `UnexpectedFailure` when the engine call fails.
    #[instrument(skip(self, query, user), fields(user = %user, food = %query.food_name))]
    pub async fn produce_recommendations(
        &self,
        query: RecommendationQuery,
        user: UserId,
    ) -> Result<RecommendationOutcome, WorkflowError> {
        // 1. Validate and resolve the selected food
        if query.food_name.is_empty() {
            return Err(WorkflowError::MissingInput);
        }

        let selected_food = self.resolve(&query.food_name).await?;

        // 2. Score against the query's features, or the configured ones
        let features = query
            .selected_features
            .unwrap_or_else(|| self.selected_features.clone());

        tracing::info!(
            engine = self.engine.name(),
            feature_count = features.len(),
            "Requesting recommendations"
        );

        let response = self.call_engine(&query.food_name, features).await?;

        // 3. Only the best row counts
        let best = response
            .best_row()
            .ok_or(WorkflowError::NoRecommendations)?;
        let row = EngineRow::try_from(best).map_err(|e| {
            tracing::warn!(error = %e, "Engine returned a malformed best row");
            WorkflowError::NoRecommendations
        })?;

        // 4. Every suggestion must exist before anything is written
        let [first, second, third] = &row.candidates;
        let recommendations = [
            self.resolve(first).await?,
            self.resolve(second).await?,
            self.resolve(third).await?,
        ];

        // 5. Log the request
        let record = self
            .history
            .append(NewHistoryRecord {
                user_id: user,
                selected_food: selected_food.food_name.clone(),
                recommended_foods: recommendations.clone().map(|item| item.food_name),
                created_at: Utc::now(),
            })
            .await?;

        tracing::info!(
            history_id = record.id,
            subset = %row.subset_label,
            "Recorded recommendation history"
        );

        Ok(RecommendationOutcome {
            selected_food,
            recommendations,
            selected_group: query.selected_group,
            history_id: record.id,
        })
    }

    /// Runs the engine on its own task so a panicking engine fails only this request
    async fn call_engine(
        &self,
        food_name: &str,
        features: Vec<String>,
    ) -> Result<EngineResponse, WorkflowError> {
        let engine = Arc::clone(&self.engine);
        let food_name = food_name.to_string();

        let outcome = tokio::spawn(async move { engine.recommend(&food_name, &features).await })
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Recommendation engine task failed");
                WorkflowError::UnexpectedFailure(e.to_string())
            })?;

        outcome.map_err(|e| {
            tracing::warn!(error = %e, "Recommendation engine call failed");
            WorkflowError::from(e)
        })
    }

    /// Exact catalog lookup; a miss is `UnknownFoodItem`
    async fn resolve(&self, name: &str) -> Result<FoodItem, WorkflowError> {
        self.catalog.find_by_name(name).await?.ok_or_else(|| {
            tracing::warn!(food = %name, "Food item not found in catalog");
            WorkflowError::UnknownFoodItem(name.to_string())
        })
    }
}
