//! HTTP handlers
//!
//! `POST /fetch_data`, `POST /calculate`, and `GET /status`.

use std::fmt;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde::de::{self, Deserializer, Visitor};
use serde::Deserialize;

use crate::models::ResultSet;
use crate::nutrition::{calculate_nutrition, QuantityInput};
use crate::tools::{fetch_products, FetchArgs};

use super::response::{ApiError, ApiSuccess};
use super::AppState;

/// Body of `POST /fetch_data`
///
/// `pages` and `limit` accept numbers or numeric strings, since browser form
/// values arrive as strings.
#[derive(Debug, Default, Deserialize)]
pub struct FetchDataRequest {
    #[serde(default, deserialize_with = "lenient_int")]
    pub pages: Option<i64>,
    #[serde(default, deserialize_with = "lenient_int")]
    pub limit: Option<i64>,
    pub category: Option<String>,
    pub brand: Option<String>,
    pub product_name: Option<String>,
}

impl From<FetchDataRequest> for FetchArgs {
    fn from(req: FetchDataRequest) -> Self {
        Self {
            pages: req.pages,
            limit: req.limit,
            category: req.category,
            brand: req.brand,
            product_name: req.product_name,
        }
    }
}

/// A list given either as a JSON array or as one comma-separated string
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ListInput<T> {
    List(Vec<T>),
    Csv(String),
}

/// Body of `POST /calculate`
///
/// `rows` is the result set a previous `/fetch_data` call returned.
#[derive(Debug, Deserialize)]
pub struct CalculateRequest {
    pub products: ListInput<String>,
    pub quantities: ListInput<QuantityInput>,
    #[serde(default)]
    pub rows: ResultSet,
}

impl CalculateRequest {
    fn products(&self) -> Vec<String> {
        match &self.products {
            ListInput::List(items) => items.clone(),
            ListInput::Csv(s) => s.split(',').map(str::to_string).collect(),
        }
    }

    fn quantities(&self) -> Vec<QuantityInput> {
        match &self.quantities {
            ListInput::List(items) => items.clone(),
            ListInput::Csv(s) => s.split(',').map(QuantityInput::from).collect(),
        }
    }
}

pub async fn fetch_data(
    State(state): State<AppState>,
    body: Result<Json<FetchDataRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(request) = body?;
    let rows = fetch_products(state.source.as_ref(), &request.into()).await?;
    Ok(ApiSuccess::new(rows))
}

pub async fn calculate(
    body: Result<Json<CalculateRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(request) = body?;
    let result = calculate_nutrition(&request.products(), &request.quantities(), &request.rows)?;
    Ok(ApiSuccess::new(result.rounded()))
}

pub async fn status(State(state): State<AppState>) -> impl IntoResponse {
    ApiSuccess::new(state.status.get_status())
}

/// Deserialize an optional integer from a number or a numeric string
fn lenient_int<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    struct LenientInt;

    impl<'de> Visitor<'de> for LenientInt {
        type Value = Option<i64>;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("an integer or a string holding one")
        }

        fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_some<D: Deserializer<'de>>(self, d: D) -> Result<Self::Value, D::Error> {
            d.deserialize_any(self)
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
            Ok(Some(v))
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
            i64::try_from(v)
                .map(Some)
                .map_err(|_| E::custom(format!("integer {} is too large", v)))
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
            if v.fract() == 0.0 && v.abs() < i64::MAX as f64 {
                Ok(Some(v as i64))
            } else {
                Err(E::custom(format!("expected an integer, got {}", v)))
            }
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
            let trimmed = v.trim();
            if trimmed.is_empty() {
                return Ok(None);
            }
            trimmed
                .parse()
                .map(Some)
                .map_err(|_| E::custom(format!("expected an integer, got '{}'", v)))
        }
    }

    deserializer.deserialize_option(LenientInt)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_request_accepts_strings_and_numbers() {
        let req: FetchDataRequest =
            serde_json::from_str(r#"{"pages": "2", "limit": 10, "brand": "Coca"}"#).unwrap();
        assert_eq!(req.pages, Some(2));
        assert_eq!(req.limit, Some(10));
        assert_eq!(req.brand.as_deref(), Some("Coca"));
        assert_eq!(req.category, None);
    }

    #[test]
    fn test_fetch_request_defaults() {
        let req: FetchDataRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(req.pages, None);
        assert_eq!(req.limit, None);

        let req: FetchDataRequest = serde_json::from_str(r#"{"pages": null, "limit": ""}"#).unwrap();
        assert_eq!(req.pages, None);
        assert_eq!(req.limit, None);
    }

    #[test]
    fn test_fetch_request_rejects_non_integers() {
        assert!(serde_json::from_str::<FetchDataRequest>(r#"{"pages": "two"}"#).is_err());
        assert!(serde_json::from_str::<FetchDataRequest>(r#"{"limit": 1.5}"#).is_err());
        assert!(serde_json::from_str::<FetchDataRequest>(r#"{"pages": true}"#).is_err());
    }

    #[test]
    fn test_calculate_request_list_forms() {
        let req: CalculateRequest = serde_json::from_str(
            r#"{"products": "Nutella, Coca", "quantities": ["50g", 330]}"#,
        )
        .unwrap();
        assert_eq!(req.products(), vec!["Nutella".to_string(), " Coca".to_string()]);
        assert_eq!(
            req.quantities(),
            vec![QuantityInput::Text("50g".into()), QuantityInput::Number(330.0)]
        );
        assert!(req.rows.is_empty());

        let req: CalculateRequest =
            serde_json::from_str(r#"{"products": ["a"], "quantities": "100ml"}"#).unwrap();
        assert_eq!(req.quantities(), vec![QuantityInput::Text("100ml".into())]);
    }
}
