//! Data models
//!
//! Raw search records, flattened product rows, and nutrient values.

mod nutrient;
mod nutrition;
mod product;

pub use nutrient::{Nutrient, NUTRIENT_COUNT};
pub use nutrition::{round2, NutrientValues};
pub use product::{ProductRow, RawProduct, ResultSet, NOT_AVAILABLE};
