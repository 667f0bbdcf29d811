use std::collections::BTreeMap;
use std::sync::atomic::{AtomicI64, Ordering};

use tokio::sync::RwLock;

use super::store::{CatalogStore, HistoryStore, StoreResult};
use crate::models::{FoodItem, HistoryRecord, NewHistoryRecord, UserId};

/// Catalog held in process memory, keyed (and therefore ordered) by name
#[derive(Default)]
pub struct InMemoryCatalog {
    items: RwLock<BTreeMap<String, FoodItem>>,
}

impl InMemoryCatalog {
    /// Empty catalog, filled later by seeding
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog preloaded with `items`; a repeated name keeps the last entry
    pub fn with_items(items: impl IntoIterator<Item = FoodItem>) -> Self {
        let items = items
            .into_iter()
            .map(|item| (item.food_name.clone(), item))
            .collect();
        Self {
            items: RwLock::new(items),
        }
    }
}

#[async_trait::async_trait]
impl CatalogStore for InMemoryCatalog {
    async fn find_by_name(&self, name: &str) -> StoreResult<Option<FoodItem>> {
        Ok(self.items.read().await.get(name).cloned())
    }

    async fn list_all(&self) -> StoreResult<Vec<FoodItem>> {
        Ok(self.items.read().await.values().cloned().collect())
    }

    async fn list_by_group(&self, group: &str) -> StoreResult<Vec<FoodItem>> {
        let items = self.items.read().await;
        Ok(items
            .values()
            .filter(|item| item.food_group == group)
            .cloned()
            .collect())
    }

    async fn list_distinct_groups(&self) -> StoreResult<Vec<String>> {
        let items = self.items.read().await;
        let mut groups: Vec<String> = items.values().map(|i| i.food_group.clone()).collect();
        groups.sort();
        groups.dedup();
        Ok(groups)
    }

    async fn upsert_items(&self, new_items: &[FoodItem]) -> StoreResult<usize> {
        let mut items = self.items.write().await;
        for item in new_items {
            items.insert(item.food_name.clone(), item.clone());
        }
        Ok(new_items.len())
    }
}

/// History log held in process memory
pub struct InMemoryHistory {
    records: RwLock<Vec<HistoryRecord>>,
    next_id: AtomicI64,
}

impl Default for InMemoryHistory {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryHistory {
    /// Empty log; ids start at 1
    pub fn new() -> Self {
        Self {
            records: RwLock::new(Vec::new()),
            next_id: AtomicI64::new(1),
        }
    }

    /// Total number of records across all users
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[async_trait::async_trait]
impl HistoryStore for InMemoryHistory {
    async fn append(&self, record: NewHistoryRecord) -> StoreResult<HistoryRecord> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let stored = HistoryRecord::from_new(id, record);
        self.records.write().await.push(stored.clone());
        Ok(stored)
    }

    async fn list_by_user(&self, user: UserId) -> StoreResult<Vec<HistoryRecord>> {
        let records = self.records.read().await;
        let mut mine: Vec<HistoryRecord> = records
            .iter()
            .filter(|r| r.user_id == user)
            .cloned()
            .collect();
        mine.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));
        Ok(mine)
    }
}
