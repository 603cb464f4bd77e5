//! Shared state handed to every request handler.

use std::sync::Arc;

use expensesms_adapters::InventoryAdapter;

use crate::auth::SignatureVerifier;
use crate::config::Config;
use crate::database::AccountStore;
use crate::services::{AccountManager, OrderService};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub accounts: AccountManager,
    pub orders: OrderService,
    pub verifier: SignatureVerifier,
}

impl AppState {
    pub fn new(
        config: Config,
        store: Arc<dyn AccountStore>,
        adapter: Arc<dyn InventoryAdapter>,
    ) -> Self {
        let verifier = SignatureVerifier::new(config.app.effective_secret());
        let accounts = AccountManager::new(store);
        let orders = OrderService::new(adapter, accounts.clone());

        Self {
            config: Arc::new(config),
            accounts,
            orders,
            verifier,
        }
    }
}
