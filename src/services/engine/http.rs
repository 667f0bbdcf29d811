use std::time::Duration;

use reqwest::Client as HttpClient;
use serde::Serialize;

use super::RecommendationEngine;
use crate::{error::AppResult, error::EngineError, models::EngineResponse};

#[derive(Debug, Serialize)]
struct RecommendRequest<'a> {
    food_name: &'a str,
    selected_features: &'a [String],
}

/// Calls a remote engine over HTTP
///
/// `POST {base_url}/recommendations` with the food name and feature list;
/// the body of a 2xx answer is decoded as an [`EngineResponse`].
#[derive(Clone)]
pub struct HttpRecommendationEngine {
    http_client: HttpClient,
    base_url: String,
}

impl HttpRecommendationEngine {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> AppResult<Self> {
        let http_client = HttpClient::builder().timeout(timeout).build()?;
        Ok(Self {
            http_client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait::async_trait]
impl RecommendationEngine for HttpRecommendationEngine {
    async fn recommend(
        &self,
        food_name: &str,
        features: &[String],
    ) -> Result<EngineResponse, EngineError> {
        let url = format!("{}/recommendations", self.base_url);

        let response = self
            .http_client
            .post(&url)
            .json(&RecommendRequest {
                food_name,
                selected_features: features,
            })
            .send()
            .await
            .map_err(|e| EngineError::Failed(format!("request to {} failed: {}", url, e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(EngineError::Failed(format!(
                "engine returned status {}: {}",
                status, body
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| EngineError::Failed(format!("failed to read engine response: {}", e)))?;

        serde_json::from_str::<EngineResponse>(&body).map_err(|e| {
            tracing::error!(error = %e, response = %body, "Failed to decode engine response");
            EngineError::Failed(format!("malformed engine response: {}", e))
        })
    }

    fn name(&self) -> &'static str {
        "http"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn engine(server: &MockServer) -> HttpRecommendationEngine {
        HttpRecommendationEngine::new(server.uri(), Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn test_recommend_posts_food_and_features() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/recommendations"))
            .and(body_json(json!({
                "food_name": "Amaranth seed, black",
                "selected_features": ["protein", "fibre"],
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "best_recommendation": [[
                    "Amaranth seed, black", "Subset 37", "Barley", "Bajra",
                    "Wheat flour, atta", 1.04, 2.0, 0.09, 0.57
                ]]
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let features = vec!["protein".to_string(), "fibre".to_string()];
        let response = engine(&mock_server)
            .recommend("Amaranth seed, black", &features)
            .await
            .unwrap();

        let best = response.best_row().unwrap();
        assert_eq!(best[2], json!("Barley"));
        assert_eq!(best.len(), 9);
    }

    #[tokio::test]
    async fn test_server_error_is_engine_failure() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500).set_body_string("feature matrix missing"))
            .mount(&mock_server)
            .await;

        let err = engine(&mock_server).recommend("Barley", &[]).await.unwrap_err();
        match err {
            EngineError::Failed(msg) => {
                assert!(msg.contains("500"));
                assert!(msg.contains("feature matrix missing"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_undecodable_body_is_engine_failure() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "best_recommendation": "not a list" })),
            )
            .mount(&mock_server)
            .await;

        let err = engine(&mock_server).recommend("Barley", &[]).await.unwrap_err();
        assert!(matches!(err, EngineError::Failed(ref msg) if msg.starts_with("malformed")));
    }

    #[tokio::test]
    async fn test_unreachable_engine_is_engine_failure() {
        let engine =
            HttpRecommendationEngine::new("http://127.0.0.1:9", Duration::from_millis(500)).unwrap();
        let err = engine.recommend("Barley", &[]).await.unwrap_err();
        assert!(matches!(err, EngineError::Failed(_)));
    }

    #[test]
    fn test_trailing_slash_is_trimmed() {
        let engine =
            HttpRecommendationEngine::new("http://engine:8000/", Duration::from_secs(1)).unwrap();
        assert_eq!(engine.base_url, "http://engine:8000");
    }
}
