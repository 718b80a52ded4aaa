use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

// ============================================================================
// Order Value Objects
// ============================================================================

/// One priced row of a receipt.
#[derive(Debug, Clone, PartialEq)]
pub struct LineItem {
    pub name: String,
    pub cost: Decimal,
}

/// Table identifier as entered by the customer.
///
/// Stored documents may carry it as a string or a number; both read back
/// as the same textual value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableNumber(String);

impl TableNumber {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into().trim().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_blank(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for TableNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for TableNumber {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for TableNumber {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Text(String),
            Number(serde_json::Number),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Text(text) => TableNumber::new(text),
            Raw::Number(number) => TableNumber::new(number.to_string()),
        })
    }
}

/// How the order reaches the customer. Unrecognised form values are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryMethod {
    DineIn,
    Delivery,
    Other(String),
}

impl DeliveryMethod {
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        match trimmed.to_ascii_lowercase().as_str() {
            "dine-in" | "dinein" | "dine in" | "dine_in" => DeliveryMethod::DineIn,
            "delivery" => DeliveryMethod::Delivery,
            _ => DeliveryMethod::Other(trimmed.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            DeliveryMethod::DineIn => "dine-in",
            DeliveryMethod::Delivery => "delivery",
            DeliveryMethod::Other(text) => text,
        }
    }
}

impl fmt::Display for DeliveryMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for DeliveryMethod {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for DeliveryMethod {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(match raw.as_str() {
            "dine-in" => DeliveryMethod::DineIn,
            "delivery" => DeliveryMethod::Delivery,
            _ => DeliveryMethod::Other(raw),
        })
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
