//! Product sources
//!
//! A [`ProductSource`] returns one page of raw product records. The
//! production source is the Open Food Facts search endpoint; tests plug in
//! in-memory sources.

mod open_food_facts;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::RawProduct;

pub use open_food_facts::{OpenFoodFactsClient, DEFAULT_SEARCH_URL};

/// Errors fetching a single page
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Search endpoint returned HTTP {status}")]
    Status { status: u16 },

    #[error("Could not decode search response: {0}")]
    Decode(String),
}

/// Something that can return one page of raw products
#[async_trait]
pub trait ProductSource: Send + Sync {
    /// Fetch page `page` (1-based) holding up to `page_size` products
    async fn fetch_page(&self, page: u32, page_size: u32) -> Result<Vec<RawProduct>, FetchError>;
}

/// Fetch pages `1..=pages` in order and concatenate their products
///
/// The first failing page is logged and ends the loop; whatever was
/// accumulated before it is returned. Never fails.
pub async fn fetch_all<S>(source: &S, pages: u32, page_size: u32) -> Vec<RawProduct>
where
    S: ProductSource + ?Sized,
{
    let mut products = Vec::new();

    for page in 1..=pages {
        match source.fetch_page(page, page_size).await {
            Ok(batch) => {
                tracing::debug!(page, count = batch.len(), "Fetched page");
                products.extend(batch);
            }
            Err(e) => {
                tracing::error!(page, page_size, error = %e, "Error fetching data, stopping");
                break;
            }
        }
    }

    tracing::info!(pages, page_size, total = products.len(), "Fetch finished");
    products
}
