//! Product fetch tool
//!
//! Shared entry point for the HTTP, MCP, and CLI surfaces: validates paging,
//! runs the pipeline, and returns a fresh result set.

use serde::Serialize;

use crate::models::ResultSet;
use crate::pipeline::{self, Paging, PipelineError, ProductFilter, DEFAULT_LIMIT, DEFAULT_PAGES};
use crate::source::ProductSource;

/// Caller-supplied fetch arguments, before validation
#[derive(Debug, Clone, Default)]
pub struct FetchArgs {
    pub pages: Option<i64>,
    pub limit: Option<i64>,
    pub category: Option<String>,
    pub brand: Option<String>,
    pub product_name: Option<String>,
}

impl FetchArgs {
    /// Validate paging, applying the defaults for absent values
    pub fn paging(&self) -> Result<Paging, PipelineError> {
        Paging::new(
            self.pages.unwrap_or(DEFAULT_PAGES),
            self.limit.unwrap_or(DEFAULT_LIMIT),
        )
    }

    pub fn filter(&self) -> ProductFilter {
        ProductFilter {
            category: self.category.clone(),
            brand: self.brand.clone(),
            product_name: self.product_name.clone(),
        }
    }
}

/// Response for fetch_products
#[derive(Debug, Serialize)]
pub struct FetchProductsResponse {
    pub count: usize,
    pub products: ResultSet,
}

/// Validate `args` and run fetch, extract, and filter
///
/// Paging is checked before any request goes out.
pub async fn fetch_products<S>(source: &S, args: &FetchArgs) -> Result<ResultSet, PipelineError>
where
    S: ProductSource + ?Sized,
{
    let paging = args.paging()?;
    tracing::info!(
        pages = paging.pages,
        limit = paging.page_size,
        category = args.category.as_deref().unwrap_or(""),
        brand = args.brand.as_deref().unwrap_or(""),
        product_name = args.product_name.as_deref().unwrap_or(""),
        "Fetching products"
    );
    pipeline::fetch_products(source, paging, &args.filter()).await
}
