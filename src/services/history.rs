use crate::{
    db::{HistoryStore, StoreResult},
    models::{HistoryRecord, UserId},
};

/// Recommendation history of one user, newest first
///
/// Ordering is the store's responsibility; this keeps route handlers free of
/// storage details.
pub async fn list_history(history: &dyn HistoryStore, user: UserId) -> StoreResult<Vec<HistoryRecord>> {
    history.list_by_user(user).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::InMemoryHistory;
    use crate::models::NewHistoryRecord;
    use chrono::{Duration, Utc};

    #[tokio::test]
    async fn test_list_history_is_per_user_and_descending() {
        let history = InMemoryHistory::new();
        let now = Utc::now();

        for (user, minutes_ago) in [(1, 10), (2, 5), (1, 0), (1, 3)] {
            history
                .append(NewHistoryRecord {
                    user_id: UserId(user),
                    selected_food: "Barley".to_string(),
                    recommended_foods: [
                        "Bajra".to_string(),
                        "Wheat flour, atta".to_string(),
                        "Amaranth seed, black".to_string(),
                    ],
                    created_at: now - Duration::minutes(minutes_ago),
                })
                .await
                .unwrap();
        }

        let records = list_history(&history, UserId(1)).await.unwrap();
        assert_eq!(records.len(), 3);
        assert!(records.iter().all(|r| r.user_id == UserId(1)));
        assert!(records
            .windows(2)
            .all(|pair| pair[0].created_at > pair[1].created_at));
    }

    #[tokio::test]
    async fn test_list_history_empty_for_new_user() {
        let history = InMemoryHistory::new();
        assert!(list_history(&history, UserId(99)).await.unwrap().is_empty());
    }
}
