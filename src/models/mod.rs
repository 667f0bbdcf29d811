//! Domain types shared by the stores, the workflow and the HTTP layer
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

pub mod engine;

pub use engine::{EngineResponse, EngineRow};

/// Number of substitutions extracted from the best engine row
pub const RECOMMENDATION_COUNT: usize = 3;

/// Identifier of an already-authenticated user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub i64);

impl Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A catalog entry, identified by its unique name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct FoodItem {
    pub food_name: String,
    pub food_group: String,
}

impl FoodItem {
    pub fn new(food_name: impl Into<String>, food_group: impl Into<String>) -> Self {
        Self {
            food_name: food_name.into(),
            food_group: food_group.into(),
        }
    }
}

/// Inputs for a single recommendation request
#[derive(Debug, Clone, PartialEq)]
pub struct RecommendationQuery {
    pub food_name: String,
    pub selected_group: Option<String>,
    /// Overrides the configured feature list when present
    pub selected_features: Option<Vec<String>>,
}

impl RecommendationQuery {
    pub fn new(food_name: impl Into<String>) -> Self {
        Self {
            food_name: food_name.into(),
            selected_group: None,
            selected_features: None,
        }
    }

    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.selected_group = Some(group.into());
        self
    }

    pub fn with_features(mut self, features: Vec<String>) -> Self {
        self.selected_features = Some(features);
        self
    }
}

/// Result of a successful recommendation request
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecommendationOutcome {
    pub selected_food: FoodItem,
    /// Resolved substitutions in engine order
    pub recommendations: [FoodItem; RECOMMENDATION_COUNT],
    pub selected_group: Option<String>,
    pub history_id: i64,
}

/// A history entry about to be appended
#[derive(Debug, Clone, PartialEq)]
pub struct NewHistoryRecord {
    pub user_id: UserId,
    pub selected_food: String,
    pub recommended_foods: [String; RECOMMENDATION_COUNT],
    pub created_at: DateTime<Utc>,
}

/// One completed recommendation request
///
/// Food references are catalog names, not owned copies of the items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryRecord {
    pub id: i64,
    pub user_id: UserId,
    pub selected_food: String,
    pub recommended_foods: [String; RECOMMENDATION_COUNT],
    pub created_at: DateTime<Utc>,
}

impl HistoryRecord {
    pub fn from_new(id: i64, record: NewHistoryRecord) -> Self {
        Self {
            id,
            user_id: record.user_id,
            selected_food: record.selected_food,
            recommended_foods: record.recommended_foods,
            created_at: record.created_at,
        }
    }
}

/// Catalog page context: available groups plus the (optionally filtered) items
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatalogView {
    pub food_groups: Vec<String>,
    pub food_items: Vec<FoodItem>,
    pub selected_group: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_id_serializes_as_number() {
        let json = serde_json::to_string(&UserId(42)).unwrap();
        assert_eq!(json, "42");
    }

    #[test]
    fn test_food_item_serde() {
        let json = r#"{"food_name":"Barley","food_group":"Cereals and Millets"}"#;
        let item: FoodItem = serde_json::from_str(json).unwrap();
        assert_eq!(item, FoodItem::new("Barley", "Cereals and Millets"));
    }

    #[test]
    fn test_query_builder() {
        let query = RecommendationQuery::new("Barley")
            .with_group("Cereals and Millets")
            .with_features(vec!["protein".to_string()]);
        assert_eq!(query.selected_group.as_deref(), Some("Cereals and Millets"));
        assert_eq!(query.selected_features, Some(vec!["protein".to_string()]));
    }

    #[test]
    fn test_history_record_serializes_recommendations_as_list() {
        let record = HistoryRecord {
            id: 1,
            user_id: UserId(7),
            selected_food: "Amaranth seed, black".to_string(),
            recommended_foods: [
                "Barley".to_string(),
                "Bajra".to_string(),
                "Wheat flour, atta".to_string(),
            ],
            created_at: Utc::now(),
        };
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["user_id"], 7);
        assert_eq!(value["recommended_foods"][2], "Wheat flour, atta");
    }
}
