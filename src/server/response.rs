//! JSON envelopes and HTTP error mapping
//!
//! Every response body is `{"status": "success", "data": ...}` or
//! `{"status": "error", "message": ...}`.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use crate::nutrition::CalcError;
use crate::pipeline::PipelineError;

/// Envelope status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Success,
    Error,
}

/// Successful response body
#[derive(Debug, Serialize)]
pub struct ApiSuccess<T: Serialize> {
    pub status: Status,
    pub data: T,
}

impl<T: Serialize> ApiSuccess<T> {
    pub fn new(data: T) -> Json<Self> {
        Json(Self {
            status: Status::Success,
            data,
        })
    }
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ApiFailure {
    pub status: Status,
    pub message: String,
}

/// Errors returned by HTTP handlers
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("No products were fetched. Please try again.")]
    NoProducts,

    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            // An empty upstream result is a user-visible condition, not a failed request
            ApiError::NoProducts => StatusCode::OK,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        } else {
            tracing::warn!(error = %self, "Request rejected");
        }
        let body = ApiFailure {
            status: Status::Error,
            message: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

impl From<PipelineError> for ApiError {
    fn from(e: PipelineError) -> Self {
        match e {
            PipelineError::InvalidPaging { .. } => ApiError::BadRequest(e.to_string()),
            PipelineError::NoProducts => ApiError::NoProducts,
        }
    }
}

impl From<CalcError> for ApiError {
    fn from(e: CalcError) -> Self {
        ApiError::BadRequest(e.to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}
