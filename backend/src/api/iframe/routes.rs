//! Defines the HTTP routes serving the iframe widgets.

use axum::routing::get;
use axum::Router;

use super::handlers::{customer_order, index, settings};
use crate::state::AppState;

pub fn iframe_router() -> Router<AppState> {
    Router::new()
        .route("/expensesms", get(index))
        .route("/iframe/customer-order", get(customer_order))
        .route("/iframe/settings", get(settings))
}
