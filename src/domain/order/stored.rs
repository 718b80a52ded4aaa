use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::value_objects::{DeliveryMethod, TableNumber};

/// Persisted order document. Field names match documents already in the
/// collection and must not change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredOrder {
    pub name: String,
    #[serde(rename = "tableNum")]
    pub table_num: TableNumber,
    pub delivery: DeliveryMethod,
    #[serde(with = "crate::money::json_number")]
    pub total: Decimal,
    #[serde(rename = "orderTable")]
    pub order_table: String,
}
