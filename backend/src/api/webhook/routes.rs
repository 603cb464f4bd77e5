//! Defines the HTTP routes of the v2 webhooks.

use axum::middleware::from_fn_with_state;
use axum::routing::post;
use axum::Router;

use super::handlers::{iframe_link, installed, status, uninstalled};
use crate::auth::require_signature;
use crate::state::AppState;

pub fn webhook_router(state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/expensesms/api/moysklad/v2/apps/status", post(status))
        .route("/expensesms/api/moysklad/v2/apps/installed", post(installed))
        .route("/expensesms/api/moysklad/v2/apps/uninstalled", post(uninstalled))
        .route("/expensesms/api/moysklad/v2/apps/iframe", post(iframe_link))
        .route_layer(from_fn_with_state(state.verifier.clone(), require_signature))
}
