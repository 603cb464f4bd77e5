//! General-purpose middleware for the API.
//!
//! Access logging, the in-flight request cap with its per-request timeout, and
//! the JSON fallback for unknown routes.

use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::extract::{Request, State};
use axum::http::{StatusCode, Uri};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use tokio::sync::Semaphore;
use tracing::{error, info, warn};

use crate::config::{ServerConfig, ACCESS_TARGET};
use crate::errors::AppError;

/// Bounds applied to every request: how many run at once and for how long.
#[derive(Clone, Debug)]
pub struct RequestLimits {
    permits: Arc<Semaphore>,
    timeout: Duration,
}

impl RequestLimits {
    pub fn new(concurrency: usize, timeout: Duration) -> Self {
        Self {
            permits: Arc::new(Semaphore::new(concurrency.clamp(1, Semaphore::MAX_PERMITS))),
            timeout,
        }
    }

    pub fn from_config(server: &ServerConfig) -> Self {
        Self::new(server.concurrency(), server.request_timeout())
    }
}

/// Wait for a free slot, then run the request under the timeout. A request
/// that runs out of time is dropped and answered with 503.
pub async fn enforce_limits(
    State(limits): State<RequestLimits>,
    request: Request,
    next: Next,
) -> Response {
    let Ok(_permit) = limits.permits.acquire().await else {
        return AppError::Internal("request slots closed".into()).into_response();
    };

    let method = request.method().clone();
    let path = request.uri().path().to_string();

    match tokio::time::timeout(limits.timeout, next.run(request)).await {
        Ok(response) => response,
        Err(_) => {
            error!(%method, %path, timeout_secs = limits.timeout.as_secs_f64(), "request timed out");
            AppError::Timeout.into_response()
        }
    }
}

pub async fn access_log(request: Request, next: Next) -> Response {
    let started = Instant::now();
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    let response = next.run(request).await;

    info!(
        target: ACCESS_TARGET,
        %method,
        %path,
        status = response.status().as_u16(),
        latency_ms = started.elapsed().as_millis() as u64,
        "request"
    );
    response
}

pub async fn not_found(uri: Uri) -> Response {
    warn!(%uri, "404 Not Found");
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "error": "Not Found", "path": uri.to_string() })),
    )
        .into_response()
}
