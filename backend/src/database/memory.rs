//! In-process account store.
//!
//! Records live in a `HashMap` behind a read-write lock and are lost on restart.

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::RwLock;

use super::{AccountRecord, AccountStore, StorageError};

#[derive(Default)]
pub struct MemoryStore {
    accounts: RwLock<HashMap<String, AccountRecord>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AccountStore for MemoryStore {
    async fn get(&self, account_id: &str) -> Result<Option<AccountRecord>, StorageError> {
        Ok(self.accounts.read().get(account_id).cloned())
    }

    async fn upsert(&self, record: AccountRecord) -> Result<(), StorageError> {
        self.accounts
            .write()
            .insert(record.account_id.clone(), record);
        Ok(())
    }

    async fn remove(&self, account_id: &str) -> Result<bool, StorageError> {
        Ok(self.accounts.write().remove(account_id).is_some())
    }

    async fn list_ids(&self) -> Result<Vec<String>, StorageError> {
        let mut ids: Vec<String> = self.accounts.read().keys().cloned().collect();
        ids.sort();
        Ok(ids)
    }

    async fn count(&self) -> Result<usize, StorageError> {
        Ok(self.accounts.read().len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn upsert_replaces_and_remove_reports_presence() {
        let store = MemoryStore::new();
        store.upsert(AccountRecord::activated("app", "b")).await.unwrap();
        store.upsert(AccountRecord::activated("app", "a")).await.unwrap();

        let mut again = AccountRecord::activated("app", "a");
        again.access_token = Some("t".into());
        store.upsert(again).await.unwrap();

        assert_eq!(store.count().await.unwrap(), 2);
        assert_eq!(store.list_ids().await.unwrap(), vec!["a", "b"]);
        assert_eq!(
            store.get("a").await.unwrap().unwrap().access_token.as_deref(),
            Some("t")
        );

        assert!(store.remove("a").await.unwrap());
        assert!(!store.remove("a").await.unwrap());
        assert!(store.get("a").await.unwrap().is_none());
    }
}
