//! Row extraction
//!
//! Flattens raw search records into fixed-shape [`ProductRow`]s.

use crate::models::{Nutrient, NutrientValues, ProductRow, RawProduct, NOT_AVAILABLE};

/// Flatten one raw record
///
/// Descriptive fields default to `N/A`, nutrients default to zero. The
/// output always has the full key set no matter what the record held.
pub fn extract_row(product: &RawProduct) -> ProductRow {
    let text = |key: &str| product.text(key).unwrap_or_else(|| NOT_AVAILABLE.to_string());

    let mut nutrients = NutrientValues::zero();
    for nutrient in Nutrient::ALL {
        nutrients.set(nutrient, product.nutriment(nutrient).unwrap_or(0.0));
    }

    ProductRow {
        product_name: text("product_name"),
        ingredients_text: text("ingredients_text"),
        brands: text("brands"),
        quantity: text("quantity"),
        code: text("code"),
        categories: product
            .categories()
            .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
        nutrients,
    }
}

/// Flatten every record, preserving order
pub fn extract_rows(products: &[RawProduct]) -> Vec<ProductRow> {
    products.iter().map(extract_row).collect()
}
