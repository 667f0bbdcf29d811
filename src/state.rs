use std::sync::Arc;

use crate::{
    db::{CatalogStore, HistoryStore},
    services::{RecommendationEngine, RecommendationWorkflow},
};

/// Shared application state
pub struct AppState {
    pub catalog: Arc<dyn CatalogStore>,
    pub history: Arc<dyn HistoryStore>,
    pub workflow: RecommendationWorkflow,
}

impl AppState {
    /// Wires the stores and engine into a workflow using the configured features
    pub fn new(
        catalog: Arc<dyn CatalogStore>,
        history: Arc<dyn HistoryStore>,
        engine: Arc<dyn RecommendationEngine>,
        selected_features: Vec<String>,
    ) -> Self {
        let workflow = RecommendationWorkflow::new(
            catalog.clone(),
            history.clone(),
            engine,
            selected_features,
        );

        Self {
            catalog,
            history,
            workflow,
        }
    }
}
