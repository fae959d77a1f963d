//! Nutrition calculation tool
//!
//! Fetches a fresh result set and runs the calculator over it in one call,
//! for surfaces that cannot hold rows between calls (MCP, CLI).

use std::fmt::Write;

use thiserror::Error;

use crate::models::Nutrient;
use crate::nutrition::{calculate, CalcError, NutritionQuery, NutritionResult};
use crate::pipeline::PipelineError;
use crate::source::ProductSource;

use super::products::{fetch_products, FetchArgs};

/// Errors from the combined fetch-and-calculate tool
#[derive(Debug, Error)]
pub enum CalculateToolError {
    #[error(transparent)]
    Pipeline(#[from] PipelineError),

    #[error(transparent)]
    Calc(#[from] CalcError),
}

/// Parse comma-separated products and quantities, fetch, and calculate
///
/// The query is validated first so bad input never costs a network round trip.
/// The returned values are rounded for display.
pub async fn fetch_and_calculate<S>(
    source: &S,
    args: &FetchArgs,
    products: &str,
    quantities: &str,
) -> Result<NutritionResult, CalculateToolError>
where
    S: ProductSource + ?Sized,
{
    let query = NutritionQuery::from_csv(products, quantities)?;
    let rows = fetch_products(source, args).await?;
    Ok(calculate(&query, &rows).rounded())
}

/// Render a result as a plain-text report
///
/// One block per matched product listing its non-zero nutrients, then the
/// notices, then the total.
pub fn format_report(result: &NutritionResult) -> String {
    let mut out = String::new();

    for item in &result.items {
        let _ = writeln!(
            out,
            "{} -> {} ({}{})",
            item.product,
            item.matched_name,
            item.quantity,
            item.unit.canonical_unit()
        );
        for (nutrient, value) in item.nutrients.iter().filter(|(_, v)| *v != 0.0) {
            let _ = writeln!(out, "    {:<20} {:>10.2}", nutrient.label(), value);
        }
    }

    for notice in &result.notices {
        let _ = writeln!(out, "{}", notice);
    }

    let _ = writeln!(out, "Total");
    for nutrient in Nutrient::ALL {
        let _ = writeln!(out, "    {:<20} {:>10.2}", nutrient.label(), result.total.get(nutrient));
    }

    out
}
