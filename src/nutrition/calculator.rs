//! Nutrition calculator
//!
//! Matches name fragments against a previously fetched result set, scales
//! each matched product's per-100 values to the consumed quantity, and sums
//! the scaled values into a total.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{NutrientValues, ProductRow};

use super::quantity::{parse_quantity, quantity_from_number, Quantity, QuantityError};
use super::units::BaseUnitType;

/// Calculator input errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CalcError {
    #[error("The number of products must match the number of quantities ({products} products, {quantities} quantities).")]
    InputMismatch { products: usize, quantities: usize },

    #[error("Invalid quantity for product '{fragment}': {source}")]
    InvalidQuantity {
        fragment: String,
        #[source]
        source: QuantityError,
    },
}

/// A quantity as supplied by a caller: a JSON number or a string like "50g"
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum QuantityInput {
    Number(f64),
    Text(String),
}

impl QuantityInput {
    fn parse(&self) -> Result<Quantity, QuantityError> {
        match self {
            QuantityInput::Number(n) => quantity_from_number(*n),
            QuantityInput::Text(s) => parse_quantity(s),
        }
    }
}

impl From<&str> for QuantityInput {
    fn from(s: &str) -> Self {
        QuantityInput::Text(s.to_string())
    }
}

impl From<f64> for QuantityInput {
    fn from(n: f64) -> Self {
        QuantityInput::Number(n)
    }
}

/// One (fragment, quantity) pair
#[derive(Debug, Clone, PartialEq)]
pub struct QueryItem {
    pub fragment: String,
    pub quantity: Quantity,
}

/// A validated calculator query
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NutritionQuery {
    pub items: Vec<QueryItem>,
}

impl NutritionQuery {
    /// Pair up parallel fragment and quantity lists
    ///
    /// The length check runs before any quantity is parsed.
    pub fn from_lists<S: AsRef<str>>(
        fragments: &[S],
        quantities: &[QuantityInput],
    ) -> Result<Self, CalcError> {
        if fragments.len() != quantities.len() {
            return Err(CalcError::InputMismatch {
                products: fragments.len(),
                quantities: quantities.len(),
            });
        }

        let items = fragments
            .iter()
            .zip(quantities)
            .map(|(fragment, quantity)| -> Result<QueryItem, CalcError> {
                let fragment = fragment.as_ref().trim().to_string();
                let quantity = quantity.parse().map_err(|source| CalcError::InvalidQuantity {
                    fragment: fragment.clone(),
                    source,
                })?;
                Ok(QueryItem { fragment, quantity })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { items })
    }

    /// Parse comma-separated lists, e.g. `"Coca-Cola, Nutella"` and `"330ml, 50g"`
    pub fn from_csv(products: &str, quantities: &str) -> Result<Self, CalcError> {
        let fragments: Vec<&str> = products.split(',').collect();
        let quantities: Vec<QuantityInput> = quantities.split(',').map(QuantityInput::from).collect();
        Self::from_lists(&fragments, &quantities)
    }
}

/// Scaled nutrition for one matched query item
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScaledItem {
    /// Fragment as the caller typed it (trimmed)
    pub product: String,
    /// Name of the row the fragment matched
    pub matched_name: String,
    pub quantity: f64,
    pub unit: BaseUnitType,
    pub nutrients: NutrientValues,
}

/// Calculator output: matched items, per-fragment notices, and the total
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NutritionResult {
    pub items: Vec<ScaledItem>,
    pub notices: Vec<String>,
    pub total: NutrientValues,
}

impl NutritionResult {
    /// Copy with every nutrient value rounded to two decimals for display
    pub fn rounded(&self) -> Self {
        Self {
            items: self
                .items
                .iter()
                .map(|item| ScaledItem {
                    nutrients: item.nutrients.rounded(),
                    ..item.clone()
                })
                .collect(),
            notices: self.notices.clone(),
            total: self.total.rounded(),
        }
    }
}

/// Find the first row whose product name contains `fragment`, ignoring case
///
/// A blank fragment is contained in every name, so it matches the first row.
pub fn find_product<'a>(rows: &'a [ProductRow], fragment: &str) -> Option<&'a ProductRow> {
    let needle = fragment.trim().to_lowercase();
    rows.iter()
        .find(|row| row.product_name.to_lowercase().contains(&needle))
}

/// Scale and total a validated query against `rows`
///
/// Totals accumulate at full precision; call [`NutritionResult::rounded`]
/// for display values.
pub fn calculate(query: &NutritionQuery, rows: &[ProductRow]) -> NutritionResult {
    let mut items = Vec::new();
    let mut notices = Vec::new();
    let mut total = NutrientValues::zero();

    for item in &query.items {
        match find_product(rows, &item.fragment) {
            Some(row) => {
                let scaled = row.nutrients.scale(item.quantity.per_100_multiplier());
                total = total + scaled;
                tracing::debug!(
                    fragment = %item.fragment,
                    matched = %row.product_name,
                    quantity = item.quantity.amount,
                    "Matched product"
                );
                items.push(ScaledItem {
                    product: item.fragment.clone(),
                    matched_name: row.product_name.clone(),
                    quantity: item.quantity.amount,
                    unit: item.quantity.unit,
                    nutrients: scaled,
                });
            }
            None => {
                tracing::debug!(fragment = %item.fragment, "No product matched");
                notices.push(format!("No data found for product: {}", item.fragment));
            }
        }
    }

    tracing::info!(
        requested = query.items.len(),
        matched = items.len(),
        rows = rows.len(),
        "Calculated nutrition"
    );

    NutritionResult {
        items,
        notices,
        total,
    }
}

/// Validate parallel lists and calculate in one step
pub fn calculate_nutrition<S: AsRef<str>>(
    fragments: &[S],
    quantities: &[QuantityInput],
    rows: &[ProductRow],
) -> Result<NutritionResult, CalcError> {
    let query = NutritionQuery::from_lists(fragments, quantities)?;
    Ok(calculate(&query, rows))
}
