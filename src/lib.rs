//! FoodCalc Library
//!
//! Fetches products from Open Food Facts, flattens their nutrition data into
//! fixed-shape rows, filters them, and scales nutrition to eaten quantities.

pub mod build_info;
pub mod config;
pub mod mcp;
pub mod models;
pub mod nutrition;
pub mod pipeline;
pub mod server;
pub mod source;
pub mod tools;
