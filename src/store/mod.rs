// ============================================================================
// Order Store - the only component that talks to the order collection
// ============================================================================
//
// Every operation is self-contained: it acquires a connection, runs one
// statement, and releases the connection before returning.
//
// Backends:
// - memory/   - process-local Vec, for local runs and tests
// - postgres/ - JSONB documents in a Postgres table
//
// ============================================================================

mod errors;
mod memory;
mod postgres;

pub use errors::PersistenceError;
pub use memory::InMemoryOrderStore;
pub use postgres::{ConnectionMode, PgOrderStore, PgStoreConfig};

use async_trait::async_trait;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::domain::order::{StoredOrder, TableNumber};
use crate::health::ComponentHealth;

/// Equality constraints for `find_one`. Unset fields are not constrained.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrderFilter {
    pub name: Option<String>,
    pub table_num: Option<TableNumber>,
}

impl OrderFilter {
    /// Build a filter from optional form values; blank values count as unset.
    pub fn from_inputs(name: Option<&str>, table_num: Option<&str>) -> Self {
        let name = name
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(str::to_string);
        let table_num = table_num
            .map(TableNumber::new)
            .filter(|value| !value.is_blank());
        Self { name, table_num }
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.table_num.is_none()
    }

    pub fn matches(&self, order: &StoredOrder) -> bool {
        self.name.as_ref().map_or(true, |name| &order.name == name)
            && self
                .table_num
                .as_ref()
                .map_or(true, |table| &order.table_num == table)
    }
}

#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Append one order and return its identifier.
    async fn insert(&self, order: &StoredOrder) -> Result<Uuid, PersistenceError>;

    /// First stored order matching the filter. An empty filter matches the
    /// first record in the collection.
    async fn find_one(&self, filter: &OrderFilter) -> Result<Option<StoredOrder>, PersistenceError>;

    /// Every order with `total >= threshold`, in insertion order.
    async fn find_by_minimum_total(
        &self,
        threshold: Decimal,
    ) -> Result<Vec<StoredOrder>, PersistenceError>;

    /// Delete the whole collection and return how many orders were removed.
    async fn remove_all(&self) -> Result<u64, PersistenceError>;

    async fn check_health(&self) -> ComponentHealth;

    fn backend_name(&self) -> &'static str;
}
