//! Fetch, extract, and filter pipeline
//!
//! Produces a fresh [`ResultSet`] per call. Nothing is kept between calls;
//! callers hold the rows and hand them to the calculator themselves.

pub mod extract;
pub mod filter;

use thiserror::Error;

use crate::models::ResultSet;
use crate::source::{fetch_all, ProductSource};

pub use extract::{extract_row, extract_rows};
pub use filter::ProductFilter;

/// Default number of pages to fetch
pub const DEFAULT_PAGES: i64 = 1;
/// Default page size
pub const DEFAULT_LIMIT: i64 = 100;

/// Pipeline errors surfaced to callers
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PipelineError {
    #[error("Pages and limit must be positive integers.")]
    InvalidPaging { pages: i64, limit: i64 },

    #[error("No products were fetched. Please try again.")]
    NoProducts,
}

/// Validated paging parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paging {
    pub pages: u32,
    pub page_size: u32,
}

impl Paging {
    /// Validate caller-supplied paging; both values must be at least 1
    pub fn new(pages: i64, limit: i64) -> Result<Self, PipelineError> {
        let invalid = || PipelineError::InvalidPaging { pages, limit };
        if pages < 1 || limit < 1 {
            return Err(invalid());
        }
        Ok(Self {
            pages: u32::try_from(pages).map_err(|_| invalid())?,
            page_size: u32::try_from(limit).map_err(|_| invalid())?,
        })
    }
}

impl Default for Paging {
    fn default() -> Self {
        Self {
            pages: DEFAULT_PAGES as u32,
            page_size: DEFAULT_LIMIT as u32,
        }
    }
}

/// Fetch products, flatten them, and apply `filter`
///
/// Partial fetches are fine; only a fetch that yields nothing at all is an
/// error. A filter that removes every row is a successful empty result.
pub async fn fetch_products<S>(
    source: &S,
    paging: Paging,
    filter: &ProductFilter,
) -> Result<ResultSet, PipelineError>
where
    S: ProductSource + ?Sized,
{
    let raw = fetch_all(source, paging.pages, paging.page_size).await;
    if raw.is_empty() {
        tracing::warn!(pages = paging.pages, page_size = paging.page_size, "No products fetched");
        return Err(PipelineError::NoProducts);
    }

    let rows = extract_rows(&raw);
    let fetched = rows.len();
    let rows = filter.apply(rows);

    tracing::info!(fetched, kept = rows.len(), "Products extracted and filtered");
    Ok(rows)
}
