//! Nutrition calculation module
//!
//! Handles quantity parsing, unit conversion, and scaled nutrition totals.

pub mod calculator;
pub mod quantity;
pub mod units;

pub use calculator::{
    calculate, calculate_nutrition, find_product, CalcError, NutritionQuery, NutritionResult,
    QuantityInput, QueryItem, ScaledItem,
};
pub use quantity::{parse_quantity, Quantity, QuantityError};
pub use units::{categorize_unit, grams_per_unit, ml_per_unit, BaseUnitType, UnitCategory};
