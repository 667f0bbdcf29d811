use chrono::{DateTime, Utc};
use sqlx::{postgres::PgPoolOptions, PgPool};

use super::store::{CatalogStore, HistoryStore, StoreResult};
use crate::models::{FoodItem, HistoryRecord, NewHistoryRecord, UserId};

/// Creates a PostgreSQL connection pool
///
/// Establishes a pool of database connections for efficient reuse.
/// The pool automatically manages connection lifecycle and limits.
pub async fn create_pool(database_url: &str, max_connections: u32) -> anyhow::Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await?;

    Ok(pool)
}

/// Applies the bundled schema migrations
pub async fn run_migrations(pool: &PgPool) -> anyhow::Result<()> {
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}

/// Catalog backed by the `food_items` table
#[derive(Clone)]
pub struct PgCatalogStore {
    pool: PgPool,
}

impl PgCatalogStore {
    /// Catalog store over an existing pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl CatalogStore for PgCatalogStore {
    async fn find_by_name(&self, name: &str) -> StoreResult<Option<FoodItem>> {
        let item = sqlx::query_as::<_, FoodItem>(
            "SELECT food_name, food_group FROM food_items WHERE food_name = $1",
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;

        Ok(item)
    }

    async fn list_all(&self) -> StoreResult<Vec<FoodItem>> {
        let items = sqlx::query_as::<_, FoodItem>(
            "SELECT food_name, food_group FROM food_items ORDER BY food_name",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    async fn list_by_group(&self, group: &str) -> StoreResult<Vec<FoodItem>> {
        let items = sqlx::query_as::<_, FoodItem>(
            r#"
            SELECT food_name, food_group
            FROM food_items
            WHERE food_group = $1
            ORDER BY food_name
            "#,
        )
        .bind(group)
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    async fn list_distinct_groups(&self) -> StoreResult<Vec<String>> {
        let groups = sqlx::query_scalar::<_, String>(
            "SELECT DISTINCT food_group FROM food_items ORDER BY food_group",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(groups)
    }

    async fn upsert_items(&self, items: &[FoodItem]) -> StoreResult<usize> {
        let mut tx = self.pool.begin().await?;

        for item in items {
            sqlx::query(
                r#"
                INSERT INTO food_items (food_name, food_group)
                VALUES ($1, $2)
                ON CONFLICT (food_name) DO UPDATE SET food_group = EXCLUDED.food_group
                "#,
            )
            .bind(&item.food_name)
            .bind(&item.food_group)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(items.len())
    }
}

#[derive(sqlx::FromRow)]
struct HistoryRow {
    id: i64,
    user_id: i64,
    selected_food: String,
    recommended_food_1: String,
    recommended_food_2: String,
    recommended_food_3: String,
    created_at: DateTime<Utc>,
}

impl From<HistoryRow> for HistoryRecord {
    fn from(row: HistoryRow) -> Self {
        Self {
            id: row.id,
            user_id: UserId(row.user_id),
            selected_food: row.selected_food,
            recommended_foods: [
                row.recommended_food_1,
                row.recommended_food_2,
                row.recommended_food_3,
            ],
            created_at: row.created_at,
        }
    }
}

/// History log backed by the `recommendation_history` table
#[derive(Clone)]
pub struct PgHistoryStore {
    pool: PgPool,
}

impl PgHistoryStore {
    /// History store over an existing pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl HistoryStore for PgHistoryStore {
    async fn append(&self, record: NewHistoryRecord) -> StoreResult<HistoryRecord> {
        let [first, second, third] = &record.recommended_foods;

        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO recommendation_history
                (user_id, selected_food, recommended_food_1, recommended_food_2,
                 recommended_food_3, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id
            "#,
        )
        .bind(record.user_id.0)
        .bind(&record.selected_food)
        .bind(first)
        .bind(second)
        .bind(third)
        .bind(record.created_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(HistoryRecord::from_new(id, record))
    }

    async fn list_by_user(&self, user: UserId) -> StoreResult<Vec<HistoryRecord>> {
        let rows = sqlx::query_as::<_, HistoryRow>(
            r#"
            SELECT id, user_id, selected_food, recommended_food_1, recommended_food_2,
                   recommended_food_3, created_at
            FROM recommendation_history
            WHERE user_id = $1
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .bind(user.0)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(HistoryRecord::from).collect())
    }
}
