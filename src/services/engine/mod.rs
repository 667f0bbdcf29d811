//! Recommendation engine abstraction
//!
//! The engine scores catalog items against a food on a list of nutrient
//! features and answers with ranked candidate rows. It lives outside this
//! service; implementations here only transport and cache its answers.
use crate::{error::EngineError, models::EngineResponse};

pub mod cached;
pub mod http;

pub use cached::CachedRecommendationEngine;
pub use http::HttpRecommendationEngine;

#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait RecommendationEngine: Send + Sync {
    /// Ranked substitution rows for `food_name`, best first
    async fn recommend(
        &self,
        food_name: &str,
        features: &[String],
    ) -> Result<EngineResponse, EngineError>;

    /// Engine name for logging
    fn name(&self) -> &'static str;
}
