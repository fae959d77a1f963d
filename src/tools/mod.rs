//! FoodCalc Tools module
//!
//! Operations shared by the HTTP API, the MCP server, and the CLI.

pub mod calculate;
pub mod products;
pub mod status;

pub use calculate::{fetch_and_calculate, format_report, CalculateToolError};
pub use products::{fetch_products, FetchArgs, FetchProductsResponse};
pub use status::{FoodCalcStatus, StatusTracker, CALCULATOR_INSTRUCTIONS};
