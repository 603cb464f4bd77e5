//! Module for account storage.
//!
//! Account records (one per MoySklad account that installed the app) live
//! behind the `AccountStore` trait. The in-memory store is the default; the
//! file store keeps the same map on disk so activations survive restarts.

pub mod file;
pub mod memory;
pub mod models;

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;
use tracing::info;

use crate::config::StorageConfig;

pub use file::FileStore;
pub use memory::MemoryStore;
pub use models::{AccountRecord, AppStatus};

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("corrupt account store: {0}")]
    Serialization(#[from] serde_json::Error),
}

#[async_trait]
pub trait AccountStore: Send + Sync {
    async fn get(&self, account_id: &str) -> Result<Option<AccountRecord>, StorageError>;

    /// Insert or replace the record for `record.account_id`.
    async fn upsert(&self, record: AccountRecord) -> Result<(), StorageError>;

    /// Remove a record; returns whether one existed.
    async fn remove(&self, account_id: &str) -> Result<bool, StorageError>;

    /// All account ids, sorted.
    async fn list_ids(&self) -> Result<Vec<String>, StorageError>;

    async fn count(&self) -> Result<usize, StorageError>;
}

/// Open the store selected by `config`.
pub async fn open(config: &StorageConfig) -> Result<Arc<dyn AccountStore>, StorageError> {
    match &config.path {
        Some(path) => {
            let store = FileStore::open(path).await?;
            info!(path = %path.display(), accounts = store.loaded_count(), "opened file account store");
            Ok(Arc::new(store))
        }
        None => {
            info!("using in-memory account store");
            Ok(Arc::new(MemoryStore::new()))
        }
    }
}
