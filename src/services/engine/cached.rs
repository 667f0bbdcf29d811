use std::sync::Arc;

use super::RecommendationEngine;
use crate::{
    cached,
    db::{Cache, CacheKey},
    error::EngineError,
    models::EngineResponse,
};

/// Engine decorator that keeps successful responses in Redis
///
/// Engine output depends only on the food name and the feature list, so both
/// make up the cache key. Failures are never cached, and an unreachable Redis
/// only costs the lookup: the request goes straight to the wrapped engine.
pub struct CachedRecommendationEngine {
    inner: Arc<dyn RecommendationEngine>,
    cache: Cache,
    ttl: u64,
}

impl CachedRecommendationEngine {
    /// Wraps `inner`, keeping its answers for `ttl` seconds
    pub fn new(inner: Arc<dyn RecommendationEngine>, cache: Cache, ttl: u64) -> Self {
        Self { inner, cache, ttl }
    }
}

#[async_trait::async_trait]
impl RecommendationEngine for CachedRecommendationEngine {
    async fn recommend(
        &self,
        food_name: &str,
        features: &[String],
    ) -> Result<EngineResponse, EngineError> {
        let key = CacheKey::Recommendations {
            food_name: food_name.to_string(),
            features: features.to_vec(),
        };

        cached!(
            self.cache,
            key,
            self.ttl,
            self.inner.recommend(food_name, features)
        )
    }

    fn name(&self) -> &'static str {
        self.inner.name()
    }
}
