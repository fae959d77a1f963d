//! Integration tests for the HTTP API
//!
//! Drives the axum router in-process with an in-memory product source.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use foodcalc::models::RawProduct;
use foodcalc::server::{router, AppState};
use foodcalc::source::{FetchError, ProductSource};
use foodcalc::tools::StatusTracker;

/// Serves `pages` in order; any page past the end fails
struct FakeSource {
    pages: Vec<Vec<RawProduct>>,
    calls: AtomicU32,
}

#[async_trait]
impl ProductSource for FakeSource {
    async fn fetch_page(&self, page: u32, _page_size: u32) -> Result<Vec<RawProduct>, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.pages
            .get(page as usize - 1)
            .cloned()
            .ok_or(FetchError::Status { status: 502 })
    }
}

fn raw(value: Value) -> RawProduct {
    serde_json::from_value(value).unwrap()
}

fn catalogue() -> Vec<Vec<RawProduct>> {
    vec![
        vec![
            raw(json!({
                "product_name": "Coca-Cola Original",
                "brands": "Coca-Cola",
                "code": "5449000000996",
                "categories": "Beverages,Sodas",
                "nutriments": {"energy-kcal_100g": 42, "sugars_100g": 10.6}
            })),
            raw(json!({
                "product_name": "Pepsi Max",
                "brands": "Pepsi",
                "nutriments": {"energy-kcal_100g": 0.4}
            })),
        ],
        vec![raw(json!({
            "product_name": "Nutella",
            "brands": "Ferrero",
            "categories_tags": ["en:spreads"],
            "nutriments": {"fat_100g": 30, "sugars_100g": 56.3}
        }))],
    ]
}

fn app_with(pages: Vec<Vec<RawProduct>>) -> (Router, Arc<FakeSource>) {
    let source = Arc::new(FakeSource {
        pages,
        calls: AtomicU32::new(0),
    });
    let state = AppState::new(source.clone(), StatusTracker::new("http://fake.test/search"));
    (router(state), source)
}

async fn post_json(app: Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn test_fetch_data_returns_flat_rows() {
    let (app, source) = app_with(catalogue());
    let (status, body) = post_json(app, "/fetch_data", json!({"pages": 2, "limit": 2})).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "success");
    let rows = body["data"].as_array().unwrap();
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0]["product_name"], "Coca-Cola Original");
    assert_eq!(rows[1]["code"], "N/A");
    assert_eq!(rows[1]["fat_100g"], 0.0);
    assert_eq!(rows[2]["categories"], "en:spreads");
    assert_eq!(rows[2]["fat_100g"], 30.0);
    assert_eq!(source.calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_fetch_data_partial_pages() {
    let (app, source) = app_with(catalogue());
    let (status, body) = post_json(app, "/fetch_data", json!({"pages": "4", "limit": "2"})).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 3);
    // Page 3 fails, so page 4 is never requested
    assert_eq!(source.calls.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn test_fetch_data_filters() {
    let (app, _) = app_with(catalogue());
    let (_, body) = post_json(
        app,
        "/fetch_data",
        json!({"pages": 2, "brand": "Coca", "category": "Beverages", "product_name": ""}),
    )
    .await;

    let rows = body["data"].as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["brands"], "Coca-Cola");
}

#[tokio::test]
async fn test_fetch_data_rejects_non_positive_paging() {
    let (app, source) = app_with(catalogue());
    let (status, body) = post_json(app, "/fetch_data", json!({"pages": 0})).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], "error");
    assert_eq!(body["message"], "Pages and limit must be positive integers.");
    assert_eq!(source.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_fetch_data_rejects_malformed_body() {
    let (app, _) = app_with(catalogue());
    let (status, body) = post_json(app, "/fetch_data", json!({"limit": "lots"})).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], "error");
}

#[tokio::test]
async fn test_fetch_data_nothing_fetched() {
    let (app, _) = app_with(Vec::new());
    let (status, body) = post_json(app, "/fetch_data", json!({})).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "error");
    assert_eq!(body["message"], "No products were fetched. Please try again.");
}

#[tokio::test]
async fn test_calculate_over_fetched_rows() {
    let (app, _) = app_with(catalogue());
    let (_, fetched) = post_json(app.clone(), "/fetch_data", json!({"pages": 2})).await;

    let (status, body) = post_json(
        app,
        "/calculate",
        json!({
            "products": "nutella, coca, granola",
            "quantities": "50g, 330ml, 40",
            "rows": fetched["data"],
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "success");
    let data = &body["data"];
    let items = data["items"].as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["matched_name"], "Nutella");
    assert_eq!(items[0]["nutrients"]["fat_100g"], 15.0);
    assert_eq!(items[1]["nutrients"]["sugars_100g"], 34.98);
    assert_eq!(data["total"]["fat_100g"], 15.0);
    assert_eq!(data["total"]["sugars_100g"], 63.13);
    assert_eq!(data["total"]["energy-kcal_100g"], 138.6);
    assert_eq!(data["notices"], json!(["No data found for product: granola"]));
}

#[tokio::test]
async fn test_calculate_rejects_mismatched_lists() {
    let (app, _) = app_with(catalogue());
    let (status, body) = post_json(
        app,
        "/calculate",
        json!({"products": ["a", "b"], "quantities": [1, 2, 3], "rows": []}),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], "error");
    assert!(body["message"]
        .as_str()
        .unwrap()
        .starts_with("The number of products must match the number of quantities"));
}

#[tokio::test]
async fn test_calculate_rejects_bad_quantity() {
    let (app, _) = app_with(catalogue());
    let (status, body) = post_json(
        app,
        "/calculate",
        json!({"products": "nutella", "quantities": "a spoonful", "rows": []}),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], "error");
}

fn bulky_rows(count: usize) -> Value {
    let ingredients = "sugar, palm oil, hazelnuts 13%, skimmed milk powder 8.7%, ".repeat(20);
    let mut rows = vec![json!({"product_name": "Nutella", "fat_100g": 30})];
    rows.extend((0..count).map(|i| {
        json!({
            "product_name": format!("Spread {}", i),
            "ingredients_text": ingredients,
            "brands": "Generic",
            "sugars_100g": 50,
        })
    }));
    Value::Array(rows)
}

#[tokio::test]
async fn test_calculate_accepts_multi_megabyte_result_set() {
    let (app, _) = app_with(catalogue());
    let body = json!({"products": "nutella", "quantities": "50", "rows": bulky_rows(3000)});
    assert!(body.to_string().len() > 3 * 1024 * 1024);

    let (status, body) = post_json(app, "/calculate", body).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "success");
    assert_eq!(body["data"]["total"]["fat_100g"], 15.0);
}

#[tokio::test]
async fn test_calculate_body_limit_is_configurable() {
    let source = Arc::new(FakeSource {
        pages: catalogue(),
        calls: AtomicU32::new(0),
    });
    let state = AppState::new(source, StatusTracker::new("http://fake.test/search"))
        .with_calculate_body_limit(16 * 1024);
    let body = json!({"products": "nutella", "quantities": "50", "rows": bulky_rows(50)});

    let (status, body) = post_json(router(state), "/calculate", body).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], "error");
}

#[tokio::test]
async fn test_status() {
    let (app, _) = app_with(catalogue());
    let request = Request::builder().uri("/status").body(Body::empty()).unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["status"], "success");
    assert_eq!(body["data"]["search_url"], "http://fake.test/search");
    assert_eq!(body["data"]["process_id"], std::process::id());
}
