//! Central module for organizing the application's HTTP API.
//!
//! Each submodule owns one surface: the MoySklad vendor API, the signed v2
//! webhooks, the iframe widgets, the orders endpoint and the system routes.
//! `router` assembles them with the shared middleware stack.

pub mod iframe;
pub mod orders;
pub mod system;
pub mod vendor;
pub mod webhook;

use axum::middleware::{from_fn, from_fn_with_state};
use axum::Router;
use serde::de::DeserializeOwned;

use crate::errors::{AppError, AppResult};
use crate::middleware::{self, RequestLimits};
use crate::state::AppState;

pub fn router(state: AppState) -> Router {
    let limits = RequestLimits::from_config(&state.config.server);

    Router::new()
        .merge(system::routes::system_router(&state))
        .merge(vendor::routes::vendor_router(&state))
        .merge(webhook::routes::webhook_router(&state))
        .merge(iframe::routes::iframe_router())
        .merge(orders::routes::orders_router())
        .fallback(middleware::not_found)
        .layer(from_fn_with_state(limits, middleware::enforce_limits))
        .layer(from_fn(middleware::access_log))
        .with_state(state)
}

/// Decode a JSON body, answering 400 on anything malformed.
pub(crate) fn parse_json<T: DeserializeOwned>(body: &[u8]) -> AppResult<T> {
    serde_json::from_slice(body).map_err(|e| AppError::BadRequest(format!("Invalid JSON body: {}", e)))
}
