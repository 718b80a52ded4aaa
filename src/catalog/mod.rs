// ============================================================================
// Menu Catalog
// ============================================================================
//
// Static name -> price list loaded once at startup. Read-only afterwards and
// shared between workers behind an Arc.
//
// ============================================================================

mod errors;

pub use errors::{CatalogLoadError, UnknownItemError};

use rust_decimal::Decimal;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

use crate::money::{decimal_from_number, format_amount};
use crate::utils::html;

#[derive(Debug, Clone, PartialEq)]
pub struct MenuItem {
    pub name: String,
    pub cost: Decimal,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct MenuSource {
    items_list: Vec<RawMenuItem>,
}

#[derive(Deserialize)]
struct RawMenuItem {
    name: String,
    cost: serde_json::Value,
}

#[derive(Debug, Clone)]
pub struct MenuCatalog {
    items: Vec<MenuItem>,
    index: HashMap<String, usize>,
}

impl MenuCatalog {
    /// Parse a menu in the `{"itemsList": [{"name": .., "cost": ..}]}` format.
    pub fn load(source: &str) -> Result<Self, CatalogLoadError> {
        let parsed: MenuSource = serde_json::from_str(source)?;
        if parsed.items_list.is_empty() {
            return Err(CatalogLoadError::Empty);
        }

        let mut items = Vec::with_capacity(parsed.items_list.len());
        let mut index = HashMap::with_capacity(parsed.items_list.len());

        for (position, raw) in parsed.items_list.into_iter().enumerate() {
            if raw.name.trim().is_empty() {
                return Err(CatalogLoadError::BlankName(position));
            }

            let cost = match &raw.cost {
                serde_json::Value::Number(number) => decimal_from_number(number),
                _ => None,
            }
            .filter(|cost| !cost.is_sign_negative());

            let Some(cost) = cost else {
                return Err(CatalogLoadError::InvalidCost {
                    name: raw.name,
                    cost: raw.cost.to_string(),
                });
            };

            if index.insert(raw.name.clone(), position).is_some() {
                return Err(CatalogLoadError::DuplicateItem(raw.name));
            }
            items.push(MenuItem { name: raw.name, cost });
        }

        Ok(Self { items, index })
    }

    pub fn load_file(path: impl AsRef<Path>) -> Result<Self, CatalogLoadError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| CatalogLoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let catalog = Self::load(&content)?;

        tracing::info!(
            path = %path.display(),
            item_count = catalog.items.len(),
            "Menu catalog loaded"
        );
        for item in catalog.list() {
            tracing::debug!(name = %item.name, cost = %item.cost, "Menu item");
        }

        Ok(catalog)
    }

    /// Exact, case-sensitive price lookup.
    pub fn price_of(&self, name: &str) -> Result<Decimal, UnknownItemError> {
        self.index
            .get(name)
            .map(|&position| self.items[position].cost)
            .ok_or_else(|| UnknownItemError(name.to_string()))
    }

    /// Items in source order.
    pub fn list(&self) -> &[MenuItem] {
        &self.items
    }

    /// HTML table of every item and its cost.
    pub fn render_table(&self) -> String {
        let mut table = String::from(html::COST_TABLE_HEADER);
        for item in &self.items {
            table.push_str(&format!(
                "<tr><td>{}</td><td>{}</td></tr>",
                html::escape(&item.name),
                format_amount(item.cost)
            ));
        }
        table.push_str("</table>");
        table
    }

    /// One `<option>` per item for the order form's multi-select.
    pub fn render_options(&self) -> String {
        self.items
            .iter()
            .map(|item| {
                let name = html::escape(&item.name);
                format!("<option value=\"{}\">{}</option>", name, name)
            })
            .collect()
    }
}
