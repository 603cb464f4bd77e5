//! Defines the service routes. `/debug/accounts` is only mounted when enabled
//! in the config.

use axum::routing::get;
use axum::Router;

use super::handlers::{debug_accounts, health, root};
use crate::state::AppState;

pub fn system_router(state: &AppState) -> Router<AppState> {
    let router = Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/expensesms/health", get(health));

    if state.config.app.debug_endpoints {
        router.route("/debug/accounts", get(debug_accounts))
    } else {
        router
    }
}
