//! Row filtering
//!
//! Case-sensitive substring filters over brand, product name, and category.

use serde::{Deserialize, Serialize};

use crate::models::ProductRow;

/// Optional filters; all supplied filters must match
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductFilter {
    pub category: Option<String>,
    pub brand: Option<String>,
    pub product_name: Option<String>,
}

impl ProductFilter {
    /// True when no non-empty filter is set
    pub fn is_empty(&self) -> bool {
        [&self.category, &self.brand, &self.product_name]
            .iter()
            .all(|f| active(f).is_none())
    }

    /// Check a single row against every active filter
    pub fn matches(&self, row: &ProductRow) -> bool {
        contains(&row.categories, &self.category)
            && contains(&row.brands, &self.brand)
            && contains(&row.product_name, &self.product_name)
    }

    /// Keep the rows that pass, preserving order
    pub fn apply(&self, rows: Vec<ProductRow>) -> Vec<ProductRow> {
        if self.is_empty() {
            return rows;
        }
        rows.into_iter().filter(|row| self.matches(row)).collect()
    }
}

/// A filter counts only when present and non-empty
fn active(filter: &Option<String>) -> Option<&str> {
    filter.as_deref().filter(|f| !f.is_empty())
}

fn contains(field: &str, filter: &Option<String>) -> bool {
    match active(filter) {
        Some(needle) => field.contains(needle),
        None => true,
    }
}
