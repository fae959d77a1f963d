//! HTTP API
//!
//! A small axum router over the fetch pipeline and the calculator. The
//! server keeps no product data between requests: `/calculate` receives the
//! rows it should work on in its request body.

pub mod handlers;
pub mod response;

use std::any::Any;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::TraceLayer;

use crate::config::DEFAULT_MAX_BODY_BYTES;
use crate::source::ProductSource;
use crate::tools::StatusTracker;

use response::{ApiFailure, Status};

/// Shared, read-only application state
#[derive(Clone)]
pub struct AppState {
    pub source: Arc<dyn ProductSource>,
    pub status: Arc<StatusTracker>,
    /// Largest `/calculate` body accepted, in bytes
    pub calculate_body_limit: usize,
}

impl AppState {
    pub fn new(source: Arc<dyn ProductSource>, status: StatusTracker) -> Self {
        Self {
            source,
            status: Arc::new(status),
            calculate_body_limit: DEFAULT_MAX_BODY_BYTES,
        }
    }

    pub fn with_calculate_body_limit(mut self, bytes: usize) -> Self {
        self.calculate_body_limit = bytes;
        self
    }
}

/// Build the application router
///
/// `/calculate` gets its own body limit since callers send back the rows
/// `/fetch_data` returned, which easily exceed axum's 2 MB default.
pub fn router(state: AppState) -> Router {
    let calculate_limit = DefaultBodyLimit::max(state.calculate_body_limit);
    Router::new()
        .route("/fetch_data", post(handlers::fetch_data))
        .route("/calculate", post(handlers::calculate).layer(calculate_limit))
        .route("/status", get(handlers::status))
        .with_state(state)
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(TraceLayer::new_for_http())
}

/// Turn a handler panic into the generic JSON error envelope
fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = err
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| err.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");
    tracing::error!(detail, "Handler panicked");

    let body = ApiFailure {
        status: Status::Error,
        message: "Internal server error".to_string(),
    };
    (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
}

/// Bind `addr` and serve until the process is stopped
pub async fn serve(addr: SocketAddr, state: AppState) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(addr = %listener.local_addr()?, "HTTP API listening");
    axum::serve(listener, router(state)).await
}
