use std::time::Duration;

use crate::utils::IsTransient;

#[derive(Debug, thiserror::Error)]
pub enum PersistenceError {
    #[error("Failed to connect to order collection: {0}")]
    Connect(#[source] sqlx::Error),

    #[error("Timed out after {0:?} acquiring a connection to the order collection")]
    Timeout(Duration),

    #[error("Order collection query failed: {0}")]
    Query(#[source] sqlx::Error),

    #[error("Stored order could not be decoded: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("'{0}' is not a valid collection name")]
    InvalidCollection(String),
}

impl IsTransient for PersistenceError {
    fn is_transient(&self) -> bool {
        matches!(self, PersistenceError::Connect(_) | PersistenceError::Timeout(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connection_failures_are_transient() {
        assert!(PersistenceError::Connect(sqlx::Error::PoolTimedOut).is_transient());
        assert!(PersistenceError::Timeout(Duration::from_secs(5)).is_transient());
    }

    #[test]
    fn test_query_failures_are_permanent() {
        assert!(!PersistenceError::Query(sqlx::Error::RowNotFound).is_transient());
        assert!(!PersistenceError::InvalidCollection("x y".into()).is_transient());
    }
}
