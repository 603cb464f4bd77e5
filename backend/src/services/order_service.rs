//! Reads customer orders from MoySklad on behalf of an account.

use std::sync::Arc;

use tracing::{debug, warn};

use expensesms_adapters::{AdapterError, CustomerOrder, InventoryAdapter, OrderQuery};

use super::AccountManager;
use crate::errors::AppResult;

#[derive(Clone)]
pub struct OrderService {
    adapter: Arc<dyn InventoryAdapter>,
    accounts: AccountManager,
}

impl OrderService {
    pub fn new(adapter: Arc<dyn InventoryAdapter>, accounts: AccountManager) -> Self {
        Self { adapter, accounts }
    }

    pub async fn orders(&self, account_id: &str, query: OrderQuery) -> AppResult<Vec<CustomerOrder>> {
        let token = self.accounts.access_token(account_id).await?;

        match self.adapter.customer_orders(&token, &query).await {
            Ok(orders) => {
                debug!(%account_id, count = orders.len(), "fetched customer orders");
                Ok(orders)
            }
            Err(AdapterError::Unauthorized) => {
                warn!(%account_id, "stored access token was rejected by MoySklad");
                Err(AdapterError::Unauthorized.into())
            }
            Err(e) => Err(e.into()),
        }
    }
}
