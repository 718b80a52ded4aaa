use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::pool::PoolConnection;
use sqlx::postgres::{PgConnectOptions, PgConnection, PgPool, PgPoolOptions};
use sqlx::types::Json;
use sqlx::{Connection, Postgres};
use std::ops::{Deref, DerefMut};
use std::time::Duration;
use uuid::Uuid;

use super::{OrderFilter, OrderStore, PersistenceError};
use crate::domain::order::{StoredOrder, TableNumber};
use crate::health::{ComponentHealth, HealthStatus};
use crate::utils::{retry_on_transient, RetryConfig};

// ============================================================================
// Postgres Order Store - JSONB documents, one row per order
// ============================================================================
//
// Table layout:
//   seq  BIGSERIAL  - storage order for unsorted queries
//   id   UUID       - identifier returned from insert
//   doc  JSONB      - the StoredOrder document
//
// Connections are either opened and closed around every operation
// (PerCall, the default) or borrowed from a pool. Only acquisition is
// retried; statements run at most once.
//
// ============================================================================

const MAX_IDENTIFIER_LEN: usize = 63;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectionMode {
    #[default]
    PerCall,
    Pooled {
        max_connections: u32,
    },
}

#[derive(Debug, Clone)]
pub struct PgStoreConfig {
    pub database_url: String,
    pub collection: String,
    pub mode: ConnectionMode,
    pub connect_timeout: Duration,
    pub retry: RetryConfig,
}

enum Connector {
    PerCall(PgConnectOptions),
    Pooled(PgPool),
}

/// A connection checked out for exactly one operation.
enum Conn {
    Owned(PgConnection),
    Pooled(PoolConnection<Postgres>),
}

impl Deref for Conn {
    type Target = PgConnection;

    fn deref(&self) -> &PgConnection {
        match self {
            Conn::Owned(conn) => conn,
            Conn::Pooled(conn) => &**conn,
        }
    }
}

impl DerefMut for Conn {
    fn deref_mut(&mut self) -> &mut PgConnection {
        match self {
            Conn::Owned(conn) => conn,
            Conn::Pooled(conn) => &mut **conn,
        }
    }
}

impl Conn {
    /// Close an owned connection; pooled ones return to the pool on drop.
    async fn release(self) {
        if let Conn::Owned(conn) = self {
            if let Err(e) = conn.close().await {
                tracing::warn!(error = %e, "Order store connection did not close cleanly");
            }
        }
    }
}

struct Statements {
    create: String,
    insert: String,
    find_one: String,
    find_by_minimum_total: String,
    remove_all: String,
}

impl Statements {
    fn for_collection(collection: &str) -> Self {
        let table = format!("\"{}\"", collection);
        Self {
            create: format!(
                "CREATE TABLE IF NOT EXISTS {table} (
                    seq BIGSERIAL PRIMARY KEY,
                    id UUID NOT NULL UNIQUE,
                    doc JSONB NOT NULL
                )"
            ),
            insert: format!("INSERT INTO {table} (id, doc) VALUES ($1, $2)"),
            find_one: format!(
                "SELECT doc FROM {table}
                 WHERE ($1::text IS NULL OR doc->>'name' = $1)
                   AND ($2::text IS NULL OR doc->>'tableNum' = $2)
                 ORDER BY seq
                 LIMIT 1"
            ),
            find_by_minimum_total: format!(
                "SELECT doc FROM {table}
                 WHERE (doc->>'total')::numeric >= $1
                 ORDER BY seq"
            ),
            remove_all: format!("DELETE FROM {table}"),
        }
    }
}

/// Collection names are interpolated into SQL, so only plain identifiers pass.
pub(crate) fn validate_collection_name(name: &str) -> Result<(), PersistenceError> {
    let mut chars = name.chars();
    let valid_start = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_');
    let valid_rest = chars.all(|c| c.is_ascii_alphanumeric() || c == '_');

    if valid_start && valid_rest && name.len() <= MAX_IDENTIFIER_LEN {
        Ok(())
    } else {
        Err(PersistenceError::InvalidCollection(name.to_string()))
    }
}

pub struct PgOrderStore {
    connector: Connector,
    collection: String,
    connect_timeout: Duration,
    retry: RetryConfig,
    statements: Statements,
}

impl PgOrderStore {
    /// Build the store and make sure the collection table exists.
    pub async fn connect(config: PgStoreConfig) -> Result<Self, PersistenceError> {
        validate_collection_name(&config.collection)?;

        let options: PgConnectOptions = config
            .database_url
            .parse()
            .map_err(PersistenceError::Connect)?;

        let connector = match config.mode {
            ConnectionMode::PerCall => Connector::PerCall(options),
            ConnectionMode::Pooled { max_connections } => Connector::Pooled(
                PgPoolOptions::new()
                    .max_connections(max_connections.max(1))
                    .acquire_timeout(config.connect_timeout)
                    .connect_lazy_with(options),
            ),
        };

        let store = Self {
            connector,
            statements: Statements::for_collection(&config.collection),
            collection: config.collection,
            connect_timeout: config.connect_timeout,
            retry: config.retry,
        };

        store.ensure_collection().await?;

        tracing::info!(
            collection = %store.collection,
            mode = ?config.mode,
            "Postgres order store ready"
        );

        Ok(store)
    }

    pub async fn ensure_collection(&self) -> Result<(), PersistenceError> {
        let mut conn = self.acquire().await?;
        let result = sqlx::query(&self.statements.create)
            .execute(&mut *conn)
            .await;
        conn.release().await;
        result.map_err(PersistenceError::Query)?;
        Ok(())
    }

    async fn acquire_once(&self) -> Result<Conn, PersistenceError> {
        match &self.connector {
            Connector::PerCall(options) => {
                let conn = tokio::time::timeout(
                    self.connect_timeout,
                    PgConnection::connect_with(options),
                )
                .await
                .map_err(|_| PersistenceError::Timeout(self.connect_timeout))?
                .map_err(PersistenceError::Connect)?;
                Ok(Conn::Owned(conn))
            }
            Connector::Pooled(pool) => match pool.acquire().await {
                Ok(conn) => Ok(Conn::Pooled(conn)),
                Err(sqlx::Error::PoolTimedOut) => {
                    Err(PersistenceError::Timeout(self.connect_timeout))
                }
                Err(e) => Err(PersistenceError::Connect(e)),
            },
        }
    }

    async fn acquire(&self) -> Result<Conn, PersistenceError> {
        retry_on_transient(self.retry.clone(), move |_attempt| self.acquire_once())
            .await
            .into_result()
    }

    fn decode_all(docs: Vec<serde_json::Value>) -> Result<Vec<StoredOrder>, PersistenceError> {
        docs.into_iter()
            .map(|doc| serde_json::from_value(doc).map_err(PersistenceError::from))
            .collect()
    }
}

#[async_trait]
impl OrderStore for PgOrderStore {
    async fn insert(&self, order: &StoredOrder) -> Result<Uuid, PersistenceError> {
        let id = Uuid::now_v7();

        let mut conn = self.acquire().await?;
        let result = sqlx::query(&self.statements.insert)
            .bind(id)
            .bind(Json(order))
            .execute(&mut *conn)
            .await;
        conn.release().await;
        result.map_err(PersistenceError::Query)?;

        tracing::info!(
            order_id = %id,
            collection = %self.collection,
            "Order entry created"
        );
        Ok(id)
    }

    async fn find_one(&self, filter: &OrderFilter) -> Result<Option<StoredOrder>, PersistenceError> {
        let mut conn = self.acquire().await?;
        let result: Result<Option<serde_json::Value>, sqlx::Error> =
            sqlx::query_scalar(&self.statements.find_one)
                .bind(filter.name.as_deref())
                .bind(filter.table_num.as_ref().map(TableNumber::as_str))
                .fetch_optional(&mut *conn)
                .await;
        conn.release().await;

        match result.map_err(PersistenceError::Query)? {
            Some(doc) => Ok(Some(serde_json::from_value(doc)?)),
            None => Ok(None),
        }
    }

    async fn find_by_minimum_total(
        &self,
        threshold: Decimal,
    ) -> Result<Vec<StoredOrder>, PersistenceError> {
        let mut conn = self.acquire().await?;
        let result: Result<Vec<serde_json::Value>, sqlx::Error> =
            sqlx::query_scalar(&self.statements.find_by_minimum_total)
                .bind(threshold)
                .fetch_all(&mut *conn)
                .await;
        conn.release().await;

        Self::decode_all(result.map_err(PersistenceError::Query)?)
    }

    async fn remove_all(&self) -> Result<u64, PersistenceError> {
        let mut conn = self.acquire().await?;
        let result = sqlx::query(&self.statements.remove_all)
            .execute(&mut *conn)
            .await;
        conn.release().await;

        let removed = result.map_err(PersistenceError::Query)?.rows_affected();
        tracing::warn!(
            removed = removed,
            collection = %self.collection,
            "Order collection cleared"
        );
        Ok(removed)
    }

    async fn check_health(&self) -> ComponentHealth {
        let status = match self.acquire_once().await {
            Ok(mut conn) => {
                let ping = sqlx::query("SELECT 1").execute(&mut *conn).await;
                conn.release().await;
                match ping {
                    Ok(_) => HealthStatus::Healthy,
                    Err(e) => HealthStatus::Unhealthy(e.to_string()),
                }
            }
            Err(e) => HealthStatus::Unhealthy(e.to_string()),
        };

        ComponentHealth::new("order_store", status).with_details(format!(
            "postgres collection {}",
            self.collection
        ))
    }

    fn backend_name(&self) -> &'static str {
        "postgres"
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::order::DeliveryMethod;
    use rust_decimal_macros::dec;

    #[test]
    fn test_collection_name_validation() {
        assert!(validate_collection_name("orders").is_ok());
        assert!(validate_collection_name("_restaurant_orders_2").is_ok());

        for bad in ["", "2orders", "orders; DROP TABLE x", "or\"ders", "ordérs"] {
            assert!(
                matches!(
                    validate_collection_name(bad),
                    Err(PersistenceError::InvalidCollection(_))
                ),
                "{bad:?} should be rejected"
            );
        }

        assert!(validate_collection_name(&"a".repeat(MAX_IDENTIFIER_LEN)).is_ok());
        assert!(validate_collection_name(&"a".repeat(MAX_IDENTIFIER_LEN + 1)).is_err());
    }

    #[test]
    fn test_statements_target_collection() {
        let statements = Statements::for_collection("orders");
        assert!(statements.insert.starts_with("INSERT INTO \"orders\""));
        assert!(statements.find_one.contains("ORDER BY seq"));
        assert!(statements.find_one.contains("LIMIT 1"));
        assert!(statements.find_by_minimum_total.contains(">= $1"));
        assert_eq!(statements.remove_all, "DELETE FROM \"orders\"");
    }

    #[tokio::test]
    async fn test_invalid_collection_rejected_before_connecting() {
        let result = PgOrderStore::connect(PgStoreConfig {
            database_url: "postgres://localhost/unused".to_string(),
            collection: "bad name".to_string(),
            mode: ConnectionMode::PerCall,
            connect_timeout: Duration::from_millis(10),
            retry: RetryConfig::with_attempts(1),
        })
        .await;

        assert!(matches!(result, Err(PersistenceError::InvalidCollection(_))));
    }

    // Requires a reachable Postgres:
    //   DATABASE_URL=postgres://... cargo test -- --ignored
    #[tokio::test]
    #[ignore]
    async fn test_postgres_round_trip() {
        let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
        let store = PgOrderStore::connect(PgStoreConfig {
            database_url,
            collection: format!("orders_test_{}", Uuid::new_v4().simple()),
            mode: ConnectionMode::PerCall,
            connect_timeout: Duration::from_secs(5),
            retry: RetryConfig::default(),
        })
        .await
        .unwrap();

        let order = StoredOrder {
            name: "Alice".to_string(),
            table_num: TableNumber::new("4"),
            delivery: DeliveryMethod::DineIn,
            total: dec!(19.50),
            order_table: "<table></table>".to_string(),
        };
        store.insert(&order).await.unwrap();

        let found = store
            .find_one(&OrderFilter::from_inputs(Some("Alice"), Some("4")))
            .await
            .unwrap();
        assert_eq!(found, Some(order.clone()));
        assert!(store
            .find_one(&OrderFilter::from_inputs(Some("Bob"), None))
            .await
            .unwrap()
            .is_none());

        assert_eq!(store.find_by_minimum_total(dec!(0)).await.unwrap(), vec![order]);
        assert!(store.find_by_minimum_total(dec!(20)).await.unwrap().is_empty());

        assert_eq!(store.remove_all().await.unwrap(), 1);
        assert!(store.find_one(&OrderFilter::default()).await.unwrap().is_none());

        let mut conn = store.acquire().await.unwrap();
        sqlx::query(&format!("DROP TABLE \"{}\"", store.collection))
            .execute(&mut *conn)
            .await
            .unwrap();
        conn.release().await;
    }
}
