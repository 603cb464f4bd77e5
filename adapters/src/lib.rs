//! Core `adapters` crate for abstracting access to the MoySklad platform.
//!
//! This crate defines the `InventoryAdapter` trait, which outlines the operations
//! the backend needs from the inventory platform, and provides the concrete
//! implementation backed by the MoySklad JSON API.

pub mod errors;
pub mod models;
pub mod moysklad;

use async_trait::async_trait;

pub use errors::AdapterError;
pub use models::{CustomerOrder, OrderQuery, OrderState};
pub use moysklad::MoyskladClient;

/// Read access to the inventory platform on behalf of one account.
///
/// Every call carries the account's access token: the adapter itself is
/// shared between all accounts and holds no per-account state.
#[async_trait]
pub trait InventoryAdapter: Send + Sync {
    /// Fetch one page of customer orders.
    async fn customer_orders(
        &self,
        access_token: &str,
        query: &OrderQuery,
    ) -> Result<Vec<CustomerOrder>, AdapterError>;
}
