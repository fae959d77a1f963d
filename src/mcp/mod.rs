//! MCP server
//!
//! FoodCalc tools over the Model Context Protocol (stdio transport).

mod server;

pub use server::{CalculateNutritionParams, FetchProductsParams, FoodCalcService};
