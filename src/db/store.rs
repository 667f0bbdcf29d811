//! Storage abstraction for the food catalog and recommendation history
//!
//! PostgreSQL backs these in production; the in-memory implementations serve
//! local runs without a database and the test suites.
use crate::{
    error::StoreError,
    models::{FoodItem, HistoryRecord, NewHistoryRecord, UserId},
};

pub type StoreResult<T> = Result<T, StoreError>;

/// Read access to the food catalog
#[async_trait::async_trait]
pub trait CatalogStore: Send + Sync {
    /// Exact-name lookup
    async fn find_by_name(&self, name: &str) -> StoreResult<Option<FoodItem>>;

    /// All items ordered by name
    async fn list_all(&self) -> StoreResult<Vec<FoodItem>>;

    /// Items of a single group ordered by name
    async fn list_by_group(&self, group: &str) -> StoreResult<Vec<FoodItem>>;

    /// Distinct group names in ascending order
    async fn list_distinct_groups(&self) -> StoreResult<Vec<String>>;

    /// Inserts or replaces catalog rows; used by startup seeding only
    async fn upsert_items(&self, items: &[FoodItem]) -> StoreResult<usize>;
}

/// Append-only log of completed recommendation requests
#[async_trait::async_trait]
pub trait HistoryStore: Send + Sync {
    /// Persists a record and returns it with its assigned id
    async fn append(&self, record: NewHistoryRecord) -> StoreResult<HistoryRecord>;

    /// Records of one user, newest first
    async fn list_by_user(&self, user: UserId) -> StoreResult<Vec<HistoryRecord>>;
}
