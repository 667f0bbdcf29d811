pub mod catalog;
pub mod engine;
pub mod history;
pub mod recommendations;

pub use engine::{CachedRecommendationEngine, HttpRecommendationEngine, RecommendationEngine};
pub use recommendations::RecommendationWorkflow;
