//! FoodCalc MCP Server Implementation
//!
//! Exposes the fetch pipeline and the calculator as MCP tools.

use std::sync::Arc;

use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{
    CallToolResult, Content, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo,
};
use rmcp::{schemars, tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler};
use serde::{Deserialize, Serialize};

use crate::pipeline::PipelineError;
use crate::source::ProductSource;
use crate::tools::{
    self, CalculateToolError, FetchArgs, FetchProductsResponse, StatusTracker,
    CALCULATOR_INSTRUCTIONS,
};

/// FoodCalc MCP Service
#[derive(Clone)]
pub struct FoodCalcService {
    status_tracker: Arc<StatusTracker>,
    source: Arc<dyn ProductSource>,
    tool_router: ToolRouter<FoodCalcService>,
}

impl FoodCalcService {
    pub fn new(source: Arc<dyn ProductSource>, status_tracker: StatusTracker) -> Self {
        Self {
            status_tracker: Arc::new(status_tracker),
            source,
            tool_router: Self::tool_router(),
        }
    }
}

// ============================================================================
// Parameter Structs
// ============================================================================

#[derive(Debug, Default, Deserialize, schemars::JsonSchema)]
pub struct FetchProductsParams {
    /// Number of search pages to read (default 1, minimum 1)
    pub pages: Option<i64>,
    /// Products per page (default 100, minimum 1)
    pub limit: Option<i64>,
    /// Case-sensitive substring the product categories must contain
    pub category: Option<String>,
    /// Case-sensitive substring the brand must contain
    pub brand: Option<String>,
    /// Case-sensitive substring the product name must contain
    pub product_name: Option<String>,
}

impl From<FetchProductsParams> for FetchArgs {
    fn from(p: FetchProductsParams) -> Self {
        Self {
            pages: p.pages,
            limit: p.limit,
            category: p.category,
            brand: p.brand,
            product_name: p.product_name,
        }
    }
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct CalculateNutritionParams {
    /// Comma-separated product name fragments, e.g. "Nutella, Coca-Cola"
    pub products: String,
    /// Comma-separated quantities in the same order, e.g. "50g, 330ml"
    pub quantities: String,
    /// Number of search pages to read (default 1)
    pub pages: Option<i64>,
    /// Products per page (default 100)
    pub limit: Option<i64>,
    pub category: Option<String>,
    pub brand: Option<String>,
    pub product_name: Option<String>,
}

impl CalculateNutritionParams {
    fn fetch_args(&self) -> FetchArgs {
        FetchArgs {
            pages: self.pages,
            limit: self.limit,
            category: self.category.clone(),
            brand: self.brand.clone(),
            product_name: self.product_name.clone(),
        }
    }
}

/// Returned instead of an MCP error when the search yields nothing
#[derive(Debug, Serialize)]
struct NoProductsResponse {
    status: &'static str,
    message: String,
}

fn no_products() -> Result<CallToolResult, McpError> {
    let body = NoProductsResponse {
        status: "error",
        message: PipelineError::NoProducts.to_string(),
    };
    json_result(&body)
}

fn json_result<T: Serialize>(value: &T) -> Result<CallToolResult, McpError> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| McpError::internal_error(format!("Serialization error: {}", e), None))?;
    Ok(CallToolResult::success(vec![Content::text(json)]))
}

// ============================================================================
// Tool Implementations
// ============================================================================

#[tool_router]
impl FoodCalcService {
    #[tool(description = "Get the current status of the FoodCalc service including build info, upstream search URL, and process information")]
    async fn foodcalc_status(&self) -> Result<CallToolResult, McpError> {
        json_result(&self.status_tracker.get_status())
    }

    #[tool(description = "Get instructions for fetching products and calculating nutrition. Call this when unsure how to use the FoodCalc tools.")]
    fn calculator_instructions(&self) -> Result<CallToolResult, McpError> {
        Ok(CallToolResult::success(vec![Content::text(CALCULATOR_INSTRUCTIONS)]))
    }

    #[tool(description = "Fetch products from Open Food Facts and return flattened rows with per-100g nutrition. Optional case-sensitive filters on category, brand, and product name.")]
    async fn fetch_products(&self, Parameters(p): Parameters<FetchProductsParams>) -> Result<CallToolResult, McpError> {
        let args = FetchArgs::from(p);
        match tools::fetch_products(self.source.as_ref(), &args).await {
            Ok(products) => json_result(&FetchProductsResponse {
                count: products.len(),
                products,
            }),
            Err(PipelineError::NoProducts) => no_products(),
            Err(e) => Err(McpError::invalid_params(e.to_string(), None)),
        }
    }

    #[tool(description = "Fetch products, then scale each named product's per-100g nutrition to the given quantity and total the results. Products and quantities are comma-separated lists of equal length.")]
    async fn calculate_nutrition(&self, Parameters(p): Parameters<CalculateNutritionParams>) -> Result<CallToolResult, McpError> {
        let args = p.fetch_args();
        match tools::fetch_and_calculate(self.source.as_ref(), &args, &p.products, &p.quantities).await {
            Ok(result) => json_result(&result),
            Err(CalculateToolError::Pipeline(PipelineError::NoProducts)) => no_products(),
            Err(e) => Err(McpError::invalid_params(e.to_string(), None)),
        }
    }
}

// ============================================================================
// Server Handler
// ============================================================================

#[tool_handler]
impl ServerHandler for FoodCalcService {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "foodcalc".into(),
                version: crate::build_info::VERSION.into(),
                title: Some("FoodCalc".into()),
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "FoodCalc - Open Food Facts nutrition lookup. \
                 Call calculator_instructions first. \
                 fetch_products lists products with per-100g nutrients; \
                 calculate_nutrition scales named products to eaten quantities and totals them. \
                 foodcalc_status reports service health."
                    .into(),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_params_map_to_args() {
        let params: FetchProductsParams =
            serde_json::from_str(r#"{"pages": 2, "brand": "Ferrero"}"#).unwrap();
        let args = FetchArgs::from(params);
        assert_eq!(args.pages, Some(2));
        assert_eq!(args.limit, None);
        assert_eq!(args.brand.as_deref(), Some("Ferrero"));
    }

    #[test]
    fn test_calculate_params_require_lists() {
        assert!(serde_json::from_str::<CalculateNutritionParams>(r#"{"products": "a"}"#).is_err());
        let p: CalculateNutritionParams =
            serde_json::from_str(r#"{"products": "a", "quantities": "1", "limit": 5}"#).unwrap();
        assert_eq!(p.fetch_args().limit, Some(5));
    }
}
