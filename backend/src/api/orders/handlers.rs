//! Handler for listing customer orders of one account.
//!
//! Validates the query, clamps paging and delegates to `services::order_service`.

use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use expensesms_adapters::OrderQuery;

use crate::errors::{AppError, AppResult};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct OrdersParams {
    #[serde(default)]
    pub account: Option<String>,
    #[serde(default)]
    pub limit: Option<u32>,
    #[serde(default)]
    pub offset: Option<u32>,
}

/// GET /expensesms/api/orders?account=<id>
pub async fn list_orders(
    State(state): State<AppState>,
    Query(params): Query<OrdersParams>,
) -> AppResult<Json<Value>> {
    let account_id = params
        .account
        .filter(|a| !a.trim().is_empty())
        .ok_or_else(|| AppError::BadRequest("account query parameter is required".into()))?;

    let orders = state
        .orders
        .orders(&account_id, OrderQuery::new(params.limit, params.offset))
        .await?;

    Ok(Json(json!({ "count": orders.len(), "orders": orders })))
}
