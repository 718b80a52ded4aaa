use rust_decimal::Decimal;

use crate::catalog::MenuCatalog;
use crate::money::format_amount;
use crate::utils::html;

use super::errors::ValidationError;
use super::stored::StoredOrder;
use super::value_objects::{DeliveryMethod, LineItem, TableNumber};

// ============================================================================
// Order - priced once at construction, immutable afterwards
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    customer_name: String,
    table_number: TableNumber,
    delivery: DeliveryMethod,
    line_items: Vec<LineItem>,
    note: Option<String>,
    total: Decimal,
}

impl Order {
    /// Price `selected_item_names` against the catalog, in the given order.
    ///
    /// Repeated names are priced once per occurrence. Any name missing from
    /// the catalog rejects the whole order.
    pub fn create<S: AsRef<str>>(
        customer_name: impl Into<String>,
        table_number: TableNumber,
        delivery: DeliveryMethod,
        selected_item_names: &[S],
        note: Option<String>,
        catalog: &MenuCatalog,
    ) -> Result<Self, ValidationError> {
        let customer_name = customer_name.into().trim().to_string();
        if customer_name.is_empty() {
            return Err(ValidationError::MissingField("name"));
        }
        if table_number.is_blank() {
            return Err(ValidationError::MissingField("tableNum"));
        }
        if selected_item_names.is_empty() {
            return Err(ValidationError::EmptySelection);
        }

        let mut total = Decimal::ZERO;
        let mut line_items = Vec::with_capacity(selected_item_names.len());
        for name in selected_item_names {
            let name = name.as_ref();
            let cost = catalog.price_of(name)?;
            total += cost;
            line_items.push(LineItem {
                name: name.to_string(),
                cost,
            });
        }

        let note = note
            .map(|text| text.trim().to_string())
            .filter(|text| !text.is_empty());

        Ok(Self {
            customer_name,
            table_number,
            delivery,
            line_items,
            note,
            total,
        })
    }

    pub fn customer_name(&self) -> &str {
        &self.customer_name
    }

    pub fn table_number(&self) -> &TableNumber {
        &self.table_number
    }

    pub fn delivery(&self) -> &DeliveryMethod {
        &self.delivery
    }

    pub fn line_items(&self) -> &[LineItem] {
        &self.line_items
    }

    pub fn note(&self) -> Option<&str> {
        self.note.as_deref()
    }

    pub fn total(&self) -> Decimal {
        self.total
    }

    /// Itemized HTML table ending with a `Total Cost` row.
    pub fn render_receipt(&self) -> String {
        let mut table = String::from(html::COST_TABLE_HEADER);
        for item in &self.line_items {
            table.push_str(&format!(
                "<tr><td>{}</td><td>{}</td></tr>",
                html::escape(&item.name),
                format_amount(item.cost)
            ));
        }
        table.push_str(&format!(
            "<tr><td>Total Cost</td><td>{}</td></tr></table>",
            format_amount(self.total)
        ));
        table
    }

    /// Flattened snapshot for persistence. Item names and the note are dropped.
    pub fn to_stored(&self) -> StoredOrder {
        StoredOrder {
            name: self.customer_name.clone(),
            table_num: self.table_number.clone(),
            delivery: self.delivery.clone(),
            total: self.total,
            order_table: self.render_receipt(),
        }
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
