use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Errors raised by the catalog and history stores
#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Errors raised by a recommendation engine implementation
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    /// The engine raised or returned data that could not be decoded
    #[error("{0}")]
    Failed(String),

    /// Anything else that went wrong around the engine call (cache, runtime)
    #[error("{0}")]
    Unexpected(String),
}

/// Failure kinds of a single recommendation request
///
/// Every variant aborts the request without writing a history record.
#[derive(thiserror::Error, Debug)]
pub enum WorkflowError {
    #[error("Please select a food item.")]
    MissingInput,

    #[error("Recommendation engine failed: {0}")]
    EngineFailure(String),

    #[error("No valid recommendations found for this food item.")]
    NoRecommendations,

    #[error("Food item does not exist: {0}")]
    UnknownFoodItem(String),

    #[error("Unexpected error generating recommendations: {0}")]
    UnexpectedFailure(String),

    #[error(transparent)]
    Storage(#[from] StoreError),
}

impl WorkflowError {
    /// Stable machine-readable name of the failure kind
    pub fn kind(&self) -> &'static str {
        match self {
            WorkflowError::MissingInput => "missing_input",
            WorkflowError::EngineFailure(_) => "engine_failure",
            WorkflowError::NoRecommendations => "no_recommendations",
            WorkflowError::UnknownFoodItem(_) => "unknown_food_item",
            WorkflowError::UnexpectedFailure(_) => "unexpected_failure",
            WorkflowError::Storage(_) => "storage",
        }
    }
}

impl From<EngineError> for WorkflowError {
    fn from(err: EngineError) -> Self {
        match err {
            EngineError::Failed(msg) => WorkflowError::EngineFailure(msg),
            EngineError::Unexpected(msg) => WorkflowError::UnexpectedFailure(msg),
        }
    }
}

/// Application-level errors
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Workflow(#[from] WorkflowError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("Cache error: {0}")]
    Cache(#[from] redis::RedisError),

    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    fn status_and_kind(&self) -> (StatusCode, &'static str) {
        match self {
            AppError::Workflow(err) => {
                let status = match err {
                    WorkflowError::MissingInput => StatusCode::BAD_REQUEST,
                    WorkflowError::UnknownFoodItem(_) => StatusCode::NOT_FOUND,
                    WorkflowError::NoRecommendations => StatusCode::UNPROCESSABLE_ENTITY,
                    WorkflowError::EngineFailure(_) => StatusCode::BAD_GATEWAY,
                    WorkflowError::UnexpectedFailure(_) | WorkflowError::Storage(_) => {
                        StatusCode::INTERNAL_SERVER_ERROR
                    }
                };
                (status, err.kind())
            }
            AppError::Store(_) => (StatusCode::INTERNAL_SERVER_ERROR, "storage"),
            AppError::Cache(_) => (StatusCode::INTERNAL_SERVER_ERROR, "cache"),
            AppError::HttpClient(_) => (StatusCode::BAD_GATEWAY, "http_client"),
            AppError::InvalidInput(_) => (StatusCode::BAD_REQUEST, "invalid_input"),
            AppError::Unauthorized(_) => (StatusCode::UNAUTHORIZED, "unauthorized"),
            AppError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "internal"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, kind) = self.status_and_kind();

        if status.is_server_error() {
            tracing::error!(error = %self, kind, "Request failed");
        }

        let body = Json(json!({
            "error": self.to_string(),
            "kind": kind,
        }));

        (status, body).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engine_failed_maps_to_engine_failure() {
        let err: WorkflowError = EngineError::Failed("timeout".to_string()).into();
        assert!(matches!(err, WorkflowError::EngineFailure(ref msg) if msg == "timeout"));
    }

    #[test]
    fn test_engine_unexpected_maps_to_unexpected_failure() {
        let err: WorkflowError = EngineError::Unexpected("boom".to_string()).into();
        assert_eq!(err.kind(), "unexpected_failure");
        assert_eq!(
            err.to_string(),
            "Unexpected error generating recommendations: boom"
        );
    }

    #[test]
    fn test_workflow_status_mapping() {
        let cases = [
            (WorkflowError::MissingInput, StatusCode::BAD_REQUEST),
            (
                WorkflowError::UnknownFoodItem("Quinoa".to_string()),
                StatusCode::NOT_FOUND,
            ),
            (
                WorkflowError::NoRecommendations,
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
            (
                WorkflowError::EngineFailure("down".to_string()),
                StatusCode::BAD_GATEWAY,
            ),
        ];

        for (err, expected) in cases {
            let (status, _) = AppError::from(err).status_and_kind();
            assert_eq!(status, expected);
        }
    }

    #[test]
    fn test_unauthorized_response_status() {
        let response = AppError::Unauthorized("missing user".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_invalid_input_is_bad_request() {
        let err = AppError::InvalidInput("food_item: invalid type".to_string());
        assert_eq!(
            err.status_and_kind(),
            (StatusCode::BAD_REQUEST, "invalid_input")
        );
        assert_eq!(err.to_string(), "Invalid input: food_item: invalid type");
    }
}
