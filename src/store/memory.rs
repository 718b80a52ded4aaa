use async_trait::async_trait;
use rust_decimal::Decimal;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{OrderFilter, OrderStore, PersistenceError};
use crate::domain::order::StoredOrder;
use crate::health::{ComponentHealth, HealthStatus};

/// Process-local order collection. Contents are lost on restart.
#[derive(Debug, Default)]
pub struct InMemoryOrderStore {
    orders: RwLock<Vec<(Uuid, StoredOrder)>>,
}

impl InMemoryOrderStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.orders.read().await.len()
    }
}

#[async_trait]
impl OrderStore for InMemoryOrderStore {
    async fn insert(&self, order: &StoredOrder) -> Result<Uuid, PersistenceError> {
        let id = Uuid::now_v7();
        self.orders.write().await.push((id, order.clone()));
        tracing::debug!(order_id = %id, name = %order.name, "Order stored in memory");
        Ok(id)
    }

    async fn find_one(&self, filter: &OrderFilter) -> Result<Option<StoredOrder>, PersistenceError> {
        let orders = self.orders.read().await;
        Ok(orders
            .iter()
            .map(|(_, order)| order)
            .find(|order| filter.matches(order))
            .cloned())
    }

    async fn find_by_minimum_total(
        &self,
        threshold: Decimal,
    ) -> Result<Vec<StoredOrder>, PersistenceError> {
        let orders = self.orders.read().await;
        Ok(orders
            .iter()
            .map(|(_, order)| order)
            .filter(|order| order.total >= threshold)
            .cloned()
            .collect())
    }

    async fn remove_all(&self) -> Result<u64, PersistenceError> {
        let mut orders = self.orders.write().await;
        let removed = orders.len() as u64;
        orders.clear();
        Ok(removed)
    }

    async fn check_health(&self) -> ComponentHealth {
        ComponentHealth::new("order_store", HealthStatus::Healthy)
            .with_details(format!("{} orders in memory", self.len().await))
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::order::{DeliveryMethod, TableNumber};
    use rust_decimal_macros::dec;

    fn stored(name: &str, table: &str, total: Decimal) -> StoredOrder {
        StoredOrder {
            name: name.to_string(),
            table_num: TableNumber::new(table),
            delivery: DeliveryMethod::DineIn,
            total,
            order_table: format!("<table>{}</table>", name),
        }
    }

    async fn seeded() -> InMemoryOrderStore {
        let store = InMemoryOrderStore::new();
        store.insert(&stored("Alice", "4", dec!(19.50))).await.unwrap();
        store.insert(&stored("Bob", "2", dec!(7.25))).await.unwrap();
        store.insert(&stored("Carol", "4", dec!(30))).await.unwrap();
        store
    }

    #[tokio::test]
    async fn test_find_one_by_name() {
        let store = InMemoryOrderStore::new();
        store.insert(&stored("Alice", "4", dec!(12))).await.unwrap();

        let found = store
            .find_one(&OrderFilter::from_inputs(Some("Alice"), None))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.name, "Alice");
        assert_eq!(found.table_num.as_str(), "4");

        let missing = store
            .find_one(&OrderFilter::from_inputs(Some("Bob"), None))
            .await
            .unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn test_find_one_requires_both_fields_when_given() {
        let store = seeded().await;

        let carol = store
            .find_one(&OrderFilter::from_inputs(Some("Carol"), Some("4")))
            .await
            .unwrap();
        assert_eq!(carol.map(|o| o.name), Some("Carol".to_string()));

        let mismatch = store
            .find_one(&OrderFilter::from_inputs(Some("Bob"), Some("4")))
            .await
            .unwrap();
        assert!(mismatch.is_none());
    }

    #[tokio::test]
    async fn test_find_one_by_table_returns_first_in_storage_order() {
        let store = seeded().await;
        let found = store
            .find_one(&OrderFilter::from_inputs(None, Some("4")))
            .await
            .unwrap();
        assert_eq!(found.map(|o| o.name), Some("Alice".to_string()));
    }

    #[tokio::test]
    async fn test_empty_filter_matches_first_record() {
        let store = seeded().await;
        let found = store.find_one(&OrderFilter::default()).await.unwrap();
        assert_eq!(found.map(|o| o.name), Some("Alice".to_string()));
    }

    #[tokio::test]
    async fn test_find_by_minimum_total() {
        let store = seeded().await;

        let all = store.find_by_minimum_total(dec!(0)).await.unwrap();
        let names: Vec<&str> = all.iter().map(|o| o.name.as_str()).collect();
        assert_eq!(names, vec!["Alice", "Bob", "Carol"]);

        let inclusive = store.find_by_minimum_total(dec!(19.50)).await.unwrap();
        let names: Vec<&str> = inclusive.iter().map(|o| o.name.as_str()).collect();
        assert_eq!(names, vec!["Alice", "Carol"]);

        let none = store.find_by_minimum_total(dec!(30.01)).await.unwrap();
        assert!(none.is_empty());
    }

    #[tokio::test]
    async fn test_insert_then_query_includes_record_once() {
        let store = seeded().await;
        let order = stored("Dave", "9", dec!(4));
        store.insert(&order).await.unwrap();

        let all = store.find_by_minimum_total(dec!(0)).await.unwrap();
        assert_eq!(all.iter().filter(|o| **o == order).count(), 1);
    }

    #[tokio::test]
    async fn test_remove_all_reports_count_and_empties() {
        let store = seeded().await;

        assert_eq!(store.remove_all().await.unwrap(), 3);
        assert_eq!(store.len().await, 0);
        assert!(store.find_one(&OrderFilter::default()).await.unwrap().is_none());
        assert_eq!(store.remove_all().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_health_reports_backend() {
        let store = seeded().await;
        let health = store.check_health().await;
        assert!(health.status.is_healthy());
        assert_eq!(store.backend_name(), "memory");
    }
}
