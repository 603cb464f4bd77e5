//! Defines the HTTP route of the orders endpoint.

use axum::routing::get;
use axum::Router;

use super::handlers::list_orders;
use crate::state::AppState;

pub fn orders_router() -> Router<AppState> {
    Router::new().route("/expensesms/api/orders", get(list_orders))
}
