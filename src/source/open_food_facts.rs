//! Open Food Facts search client
//!
//! Queries the legacy `/cgi/search.pl` endpoint with an empty search term,
//! which pages through the whole database.

use async_trait::async_trait;
use serde::Deserialize;

use super::{FetchError, ProductSource};
use crate::models::RawProduct;

/// Default search endpoint
pub const DEFAULT_SEARCH_URL: &str = "https://world.openfoodfacts.org/cgi/search.pl";

/// Search response body; only `products` is read
#[derive(Debug, Deserialize)]
struct SearchPage {
    #[serde(default)]
    products: Vec<RawProduct>,
}

/// HTTP client for the Open Food Facts search endpoint
#[derive(Debug, Clone)]
pub struct OpenFoodFactsClient {
    http_client: reqwest::Client,
    search_url: String,
}

impl OpenFoodFactsClient {
    /// Create a client for `search_url`, identifying as `user_agent`
    pub fn new(search_url: impl Into<String>, user_agent: &str) -> Result<Self, FetchError> {
        let search_url = search_url.into();
        let http_client = reqwest::Client::builder()
            .user_agent(user_agent)
            .build()
            .map_err(|source| FetchError::Transport {
                url: search_url.clone(),
                source,
            })?;

        Ok(Self {
            http_client,
            search_url,
        })
    }

    /// Build the GET request for one page
    fn page_request(&self, page: u32, page_size: u32) -> reqwest::RequestBuilder {
        let page = page.to_string();
        let page_size = page_size.to_string();
        self.http_client.get(&self.search_url).query(&[
            ("search_terms", ""),
            ("search_simple", "1"),
            ("action", "process"),
            ("json", "true"),
            ("page", page.as_str()),
            ("page_size", page_size.as_str()),
        ])
    }
}

#[async_trait]
impl ProductSource for OpenFoodFactsClient {
    async fn fetch_page(&self, page: u32, page_size: u32) -> Result<Vec<RawProduct>, FetchError> {
        tracing::debug!(page, page_size, url = %self.search_url, "Requesting search page");

        let response = self
            .page_request(page, page_size)
            .send()
            .await
            .map_err(|source| FetchError::Transport {
                url: self.search_url.clone(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
            });
        }

        let body: SearchPage = response
            .json()
            .await
            .map_err(|e| FetchError::Decode(e.to_string()))?;

        Ok(body.products)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_request_carries_paging_params() {
        let client = OpenFoodFactsClient::new(DEFAULT_SEARCH_URL, "foodcalc-test").unwrap();
        let request = client.page_request(3, 25).build().unwrap();
        let url = request.url();

        assert_eq!(url.host_str(), Some("world.openfoodfacts.org"));
        assert_eq!(url.path(), "/cgi/search.pl");

        let pairs: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        assert!(pairs.contains(&("page".to_string(), "3".to_string())));
        assert!(pairs.contains(&("page_size".to_string(), "25".to_string())));
        assert!(pairs.contains(&("json".to_string(), "true".to_string())));
        assert!(pairs.contains(&("search_terms".to_string(), String::new())));
    }

    #[test]
    fn test_search_page_without_products_is_empty() {
        let page: SearchPage = serde_json::from_str(r#"{"count": 0, "page": 1}"#).unwrap();
        assert!(page.products.is_empty());
    }

    #[tokio::test]
    async fn test_unreachable_host_is_transport_error() {
        let client = OpenFoodFactsClient::new("http://127.0.0.1:9/cgi/search.pl", "foodcalc-test").unwrap();
        let err = client.fetch_page(1, 1).await.unwrap_err();
        assert!(matches!(err, FetchError::Transport { .. }));
    }
}
