use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Deserializer, Serializer};
use std::str::FromStr;

// ============================================================================
// Money Helpers
// ============================================================================
//
// Amounts are exact decimals in memory. They are shown with two places and
// travel through JSON as plain numbers, matching stored documents.
//
// ============================================================================

/// Format an amount with exactly two decimal places, rounding half away from zero.
pub fn format_amount(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    format!("{:.2}", rounded)
}

/// Convert a JSON number into a decimal through its shortest textual form,
/// so `8.99` stays `8.99` instead of picking up binary float noise.
pub fn decimal_from_number(number: &serde_json::Number) -> Option<Decimal> {
    let text = number.to_string();
    Decimal::from_str(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .ok()
}

/// Serde codec storing a `Decimal` as a JSON number.
pub mod json_number {
    use super::*;

    pub fn serialize<S>(amount: &Decimal, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match amount.to_f64() {
            Some(value) => serializer.serialize_f64(value),
            None => Err(serde::ser::Error::custom(format!(
                "amount {} cannot be represented as a JSON number",
                amount
            ))),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
    where
        D: Deserializer<'de>,
    {
        let number = serde_json::Number::deserialize(deserializer)?;
        decimal_from_number(&number).ok_or_else(|| {
            serde::de::Error::custom(format!("{} is not a valid decimal amount", number))
        })
    }
}
