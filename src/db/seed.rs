use std::path::Path;

use super::store::CatalogStore;
use crate::models::FoodItem;

/// Parses a JSON array of catalog rows
pub fn parse_catalog(json: &str) -> anyhow::Result<Vec<FoodItem>> {
    let items: Vec<FoodItem> = serde_json::from_str(json)
        .map_err(|e| anyhow::anyhow!("Invalid catalog seed: {}", e))?;

    if let Some(blank) = items.iter().find(|i| i.food_name.trim().is_empty()) {
        anyhow::bail!("Catalog seed contains an item without a name (group {:?})", blank.food_group);
    }

    Ok(items)
}

/// Loads the catalog seed file into the given store
pub async fn seed_catalog(store: &dyn CatalogStore, path: impl AsRef<Path>) -> anyhow::Result<usize> {
    let path = path.as_ref();
    let json = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to read catalog seed {}: {}", path.display(), e))?;

    let items = parse_catalog(&json)?;
    let count = store.upsert_items(&items).await?;

    tracing::info!(count, path = %path.display(), "Seeded food catalog");
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::InMemoryCatalog;

    #[test]
    fn test_parse_catalog() {
        let items = parse_catalog(
            r#"[{"food_name":"Barley","food_group":"Cereals and Millets"},
                {"food_name":"Bajra","food_group":"Cereals and Millets"}]"#,
        )
        .unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[1].food_name, "Bajra");
    }

    #[test]
    fn test_parse_catalog_rejects_blank_names() {
        let err = parse_catalog(r#"[{"food_name":"  ","food_group":"Fruits"}]"#).unwrap_err();
        assert!(err.to_string().contains("without a name"));
    }

    #[test]
    fn test_parse_catalog_rejects_malformed_json() {
        assert!(parse_catalog(r#"{"food_name":"Barley"}"#).is_err());
    }

    #[tokio::test]
    async fn test_seed_catalog_from_file() {
        let path = std::env::temp_dir().join(format!("catalog-seed-{}.json", uuid::Uuid::new_v4()));
        tokio::fs::write(
            &path,
            r#"[{"food_name":"Barley","food_group":"Cereals and Millets"}]"#,
        )
        .await
        .unwrap();

        let catalog = InMemoryCatalog::new();
        let count = seed_catalog(&catalog, &path).await.unwrap();
        tokio::fs::remove_file(&path).await.unwrap();

        assert_eq!(count, 1);
        assert!(catalog.find_by_name("Barley").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_seed_catalog_missing_file() {
        let catalog = InMemoryCatalog::new();
        let err = seed_catalog(&catalog, "/nonexistent/catalog.json").await.unwrap_err();
        assert!(err.to_string().contains("Failed to read catalog seed"));
    }
}
