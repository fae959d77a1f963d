//! FoodCalc Status Tool
//!
//! Provides runtime status information about the FoodCalc service.

use serde::Serialize;
use std::time::Instant;
use sysinfo::{Pid, ProcessesToUpdate, System};

use crate::build_info::BuildInfo;

/// Usage instructions for AI assistants driving the MCP tools
pub const CALCULATOR_INSTRUCTIONS: &str = r#"
# FoodCalc Instructions

FoodCalc looks up products in the Open Food Facts database and scales their
per-100g nutrition values to the amounts you actually ate.

## Fetching products

`fetch_products(pages, limit, category, brand, product_name)`

- `pages` (default 1) and `limit` (default 100) control how many search pages
  are read. Both must be at least 1.
- `category`, `brand` and `product_name` are optional, case-sensitive
  substring filters. All supplied filters must match.
- Missing text fields come back as "N/A", missing nutrients as 0.

## Calculating nutrition

`calculate_nutrition(products, quantities, pages, limit, ...)`

- `products`: comma-separated name fragments, e.g. "Nutella, Coca-Cola"
- `quantities`: comma-separated amounts in the same order, e.g. "50g, 330ml"
- Both lists must have the same length.
- Each fragment matches the FIRST fetched product whose name contains it,
  ignoring case. Unmatched fragments are reported as notices and do not count
  towards the total.
- Units: g, mg, kg, oz, lb, ml, cl, l, tsp, tbsp, fl oz, cup, pint, quart,
  gallon. A bare number is taken as grams or milliliters.
- Values are per 100g scaled by quantity / 100, rounded to 2 decimals.
"#;

/// Runtime status of the FoodCalc service
#[derive(Debug, Clone, Serialize)]
pub struct FoodCalcStatus {
    /// Build information
    pub build_number: u64,
    pub build_timestamp: &'static str,
    pub version: &'static str,

    /// Upstream search endpoint
    pub search_url: String,

    /// Process information
    pub started_at: String,
    pub uptime_seconds: u64,
    pub process_id: u32,
    pub memory_usage_bytes: u64,
}

/// Status tracker for collecting runtime information
#[derive(Debug)]
pub struct StatusTracker {
    start_time: Instant,
    started_at: chrono::DateTime<chrono::Utc>,
    search_url: String,
}

impl StatusTracker {
    pub fn new(search_url: impl Into<String>) -> Self {
        Self {
            start_time: Instant::now(),
            started_at: chrono::Utc::now(),
            search_url: search_url.into(),
        }
    }

    /// Get the current status
    pub fn get_status(&self) -> FoodCalcStatus {
        let build_info = BuildInfo::current();

        let pid = std::process::id();
        let mut sys = System::new();
        sys.refresh_processes(ProcessesToUpdate::Some(&[Pid::from_u32(pid)]));

        let memory_usage_bytes = sys
            .process(Pid::from_u32(pid))
            .map(|p| p.memory())
            .unwrap_or(0);

        FoodCalcStatus {
            build_number: build_info.build_number,
            build_timestamp: build_info.build_timestamp,
            version: build_info.version,
            search_url: self.search_url.clone(),
            started_at: self.started_at.to_rfc3339(),
            uptime_seconds: self.start_time.elapsed().as_secs(),
            process_id: pid,
            memory_usage_bytes,
        }
    }
}
