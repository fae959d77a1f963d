//! Product models
//!
//! `RawProduct` is the untyped record returned by the search endpoint;
//! `ProductRow` is the fixed-shape row every other stage works with.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::nutrient::Nutrient;
use super::nutrition::NutrientValues;

/// Placeholder for an absent descriptive field
pub const NOT_AVAILABLE: &str = "N/A";

/// A product record as returned by Open Food Facts
///
/// Kept as a JSON object: the source schema is large, loosely typed, and we
/// only read a handful of fields from it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawProduct(pub Map<String, Value>);

impl RawProduct {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    /// Read a top-level field as text
    ///
    /// Strings pass through, other scalars are rendered, and absent, null,
    /// or structured values yield `None`.
    pub fn text(&self, key: &str) -> Option<String> {
        match self.0.get(key)? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            Value::Null | Value::Array(_) | Value::Object(_) => None,
        }
    }

    /// Category text, falling back to the `categories_tags` list
    pub fn categories(&self) -> Option<String> {
        if let Some(text) = self.text("categories") {
            return Some(text);
        }
        let tags = self.0.get("categories_tags")?.as_array()?;
        let tags: Vec<&str> = tags.iter().filter_map(Value::as_str).collect();
        if tags.is_empty() {
            None
        } else {
            Some(tags.join(","))
        }
    }

    /// Read a per-100g nutrient from the nested `nutriments` object
    ///
    /// Numeric strings are accepted; anything else non-numeric, including
    /// "NaN" and "inf", is `None`.
    pub fn nutriment(&self, nutrient: Nutrient) -> Option<f64> {
        let nutriments = self.0.get("nutriments")?.as_object()?;
        match nutriments.get(nutrient.key())? {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse().ok().filter(|v: &f64| v.is_finite()),
            _ => None,
        }
    }
}

/// A flattened product row
///
/// Serializes to a flat object: the six descriptive fields followed by
/// every nutrient key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRow {
    #[serde(default = "not_available")]
    pub product_name: String,
    #[serde(default = "not_available")]
    pub ingredients_text: String,
    #[serde(default = "not_available")]
    pub brands: String,
    #[serde(default = "not_available")]
    pub quantity: String,
    #[serde(default = "not_available")]
    pub code: String,
    #[serde(default = "not_available")]
    pub categories: String,
    #[serde(flatten)]
    pub nutrients: NutrientValues,
}

impl ProductRow {
    /// A row with every descriptive field set to `N/A` and zero nutrients
    #[cfg(test)]
    pub(crate) fn empty() -> Self {
        Self {
            product_name: not_available(),
            ingredients_text: not_available(),
            brands: not_available(),
            quantity: not_available(),
            code: not_available(),
            categories: not_available(),
            nutrients: NutrientValues::zero(),
        }
    }

    #[cfg(test)]
    pub(crate) fn named(product_name: &str, brands: &str) -> Self {
        Self {
            product_name: product_name.to_string(),
            brands: brands.to_string(),
            ..Self::empty()
        }
    }
}

fn not_available() -> String {
    NOT_AVAILABLE.to_string()
}

/// Rows produced by one fetch; request-scoped, never persisted
pub type ResultSet = Vec<ProductRow>;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw(value: Value) -> RawProduct {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_text_renders_scalars() {
        let p = raw(json!({"code": 3017620422003u64, "brands": "Ferrero", "quantity": null}));
        assert_eq!(p.text("code").as_deref(), Some("3017620422003"));
        assert_eq!(p.text("brands").as_deref(), Some("Ferrero"));
        assert_eq!(p.text("quantity"), None);
        assert_eq!(p.text("product_name"), None);
    }

    #[test]
    fn test_categories_falls_back_to_tags() {
        let p = raw(json!({"categories_tags": ["en:spreads", "en:sweet-spreads"]}));
        assert_eq!(p.categories().as_deref(), Some("en:spreads,en:sweet-spreads"));

        let p = raw(json!({"categories": "Spreads", "categories_tags": ["en:spreads"]}));
        assert_eq!(p.categories().as_deref(), Some("Spreads"));

        assert_eq!(raw(json!({"categories_tags": []})).categories(), None);
    }

    #[test]
    fn test_nutriment_reads_numbers_and_numeric_strings() {
        let p = raw(json!({"nutriments": {"fat_100g": 30.9, "sugars_100g": "56.3", "salt_100g": "trace"}}));
        assert_eq!(p.nutriment(Nutrient::Fat), Some(30.9));
        assert_eq!(p.nutriment(Nutrient::Sugars), Some(56.3));
        assert_eq!(p.nutriment(Nutrient::Salt), None);
        assert_eq!(p.nutriment(Nutrient::Iron), None);
    }

    #[test]
    fn test_nutriment_rejects_non_finite_strings() {
        let p = raw(json!({"nutriments": {
            "fat_100g": "NaN",
            "sugars_100g": "inf",
            "salt_100g": "-Infinity",
            "iron_100g": " 1e-3 "
        }}));
        assert_eq!(p.nutriment(Nutrient::Fat), None);
        assert_eq!(p.nutriment(Nutrient::Sugars), None);
        assert_eq!(p.nutriment(Nutrient::Salt), None);
        assert_eq!(p.nutriment(Nutrient::Iron), Some(0.001));
    }

    #[test]
    fn test_row_json_is_flat() {
        let mut row = ProductRow::named("Nutella", "Ferrero");
        row.nutrients.set(Nutrient::Fat, 30.9);

        let json = serde_json::to_value(&row).unwrap();
        let obj = json.as_object().unwrap();
        assert_eq!(obj.len(), 6 + crate::models::NUTRIENT_COUNT);
        assert_eq!(obj["product_name"], "Nutella");
        assert_eq!(obj["fat_100g"], 30.9);

        let back: ProductRow = serde_json::from_value(json).unwrap();
        assert_eq!(back, row);
    }

    #[test]
    fn test_row_accepts_sparse_json() {
        let row: ProductRow =
            serde_json::from_value(json!({"product_name": "Nutella", "fat_100g": 30})).unwrap();
        assert_eq!(row.brands, NOT_AVAILABLE);
        assert_eq!(row.nutrients.get(Nutrient::Fat), 30.0);
    }
}
