use crate::{
    db::{CatalogStore, StoreResult},
    models::{CatalogView, FoodItem},
};

/// Catalog items, narrowed to one group when a non-empty group is given
pub async fn list_catalog(
    catalog: &dyn CatalogStore,
    group: Option<&str>,
) -> StoreResult<Vec<FoodItem>> {
    match group.filter(|g| !g.is_empty()) {
        Some(group) => catalog.list_by_group(group).await,
        None => catalog.list_all().await,
    }
}

/// Everything the catalog page shows: the group filter options and the items
pub async fn catalog_view(
    catalog: &dyn CatalogStore,
    selected_group: Option<String>,
) -> StoreResult<CatalogView> {
    let selected_group = selected_group.filter(|g| !g.is_empty());
    let food_groups = catalog.list_distinct_groups().await?;
    let food_items = list_catalog(catalog, selected_group.as_deref()).await?;

    Ok(CatalogView {
        food_groups,
        food_items,
        selected_group,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::InMemoryCatalog;

    fn catalog() -> InMemoryCatalog {
        InMemoryCatalog::with_items([
            FoodItem::new("Barley", "Cereals and Millets"),
            FoodItem::new("Apple, big", "Fruits"),
            FoodItem::new("Bajra", "Cereals and Millets"),
        ])
    }

    #[tokio::test]
    async fn test_absent_or_empty_group_lists_everything() {
        let catalog = catalog();
        assert_eq!(list_catalog(&catalog, None).await.unwrap().len(), 3);
        assert_eq!(list_catalog(&catalog, Some("")).await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_group_filter_is_exact() {
        let catalog = catalog();
        let items = list_catalog(&catalog, Some("Fruits")).await.unwrap();
        assert_eq!(items, vec![FoodItem::new("Apple, big", "Fruits")]);
        assert!(list_catalog(&catalog, Some("fruits")).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_catalog_view() {
        let view = catalog_view(&catalog(), Some("Cereals and Millets".to_string()))
            .await
            .unwrap();
        assert_eq!(view.food_groups, vec!["Cereals and Millets", "Fruits"]);
        assert_eq!(view.food_items.len(), 2);
        assert_eq!(view.selected_group.as_deref(), Some("Cereals and Millets"));
    }

    #[tokio::test]
    async fn test_catalog_view_normalizes_empty_group() {
        let view = catalog_view(&catalog(), Some(String::new())).await.unwrap();
        assert_eq!(view.selected_group, None);
        assert_eq!(view.food_items.len(), 3);
    }
}
