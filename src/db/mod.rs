pub mod memory;
pub mod postgres;
pub mod redis;
pub mod seed;
pub mod store;

pub use memory::{InMemoryCatalog, InMemoryHistory};
pub use postgres::{create_pool, run_migrations, PgCatalogStore, PgHistoryStore};
pub use redis::create_redis_client;
pub use redis::Cache;
pub use redis::CacheKey;
pub use seed::seed_catalog;
pub use store::{CatalogStore, HistoryStore, StoreResult};
