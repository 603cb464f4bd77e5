//! Handler functions for the root banner, health checks and debug listing.

use axum::extract::State;
use axum::Json;
use chrono::Utc;
use serde_json::{json, Value};

use crate::errors::AppResult;
use crate::state::AppState;

pub async fn root() -> Json<Value> {
    Json(json!({
        "app": "ExpenseSMS",
        "status": "running",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": Utc::now().to_rfc3339(),
    }))
}

pub async fn health() -> Json<Value> {
    Json(json!({ "status": "healthy" }))
}

/// Lists connected account ids. Only routed when debug endpoints are enabled.
pub async fn debug_accounts(State(state): State<AppState>) -> AppResult<Json<Value>> {
    let accounts = state.accounts.account_ids().await?;
    Ok(Json(json!({
        "total_accounts": accounts.len(),
        "accounts": accounts,
    })))
}
