//! Account store persisted as a single JSON object on disk.
//!
//! The whole map is rewritten after each mutation: written to a sibling temp
//! file, then renamed over the original.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::{AccountRecord, AccountStore, StorageError};

pub struct FileStore {
    path: PathBuf,
    // Held across the write so snapshots hit the disk in mutation order.
    accounts: Mutex<HashMap<String, AccountRecord>>,
    loaded: usize,
}

impl FileStore {
    /// Open the store at `path`. A missing file is an empty store.
    pub async fn open(path: &Path) -> Result<Self, StorageError> {
        let accounts = match tokio::fs::read(path).await {
            Ok(bytes) if bytes.iter().all(u8::is_ascii_whitespace) => HashMap::new(),
            Ok(bytes) => serde_json::from_slice(&bytes)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => HashMap::new(),
            Err(e) => return Err(e.into()),
        };

        Ok(Self {
            path: path.to_path_buf(),
            loaded: accounts.len(),
            accounts: Mutex::new(accounts),
        })
    }

    /// Number of records found when the store was opened.
    pub fn loaded_count(&self) -> usize {
        self.loaded
    }

    async fn persist(&self, accounts: &HashMap<String, AccountRecord>) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        let bytes = serde_json::to_vec_pretty(accounts)?;
        let tmp = self.path.with_extension("tmp");
        tokio::fs::write(&tmp, bytes).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}

#[async_trait]
impl AccountStore for FileStore {
    async fn get(&self, account_id: &str) -> Result<Option<AccountRecord>, StorageError> {
        Ok(self.accounts.lock().await.get(account_id).cloned())
    }

    async fn upsert(&self, record: AccountRecord) -> Result<(), StorageError> {
        let mut accounts = self.accounts.lock().await;
        let mut next = accounts.clone();
        next.insert(record.account_id.clone(), record);
        self.persist(&next).await?;
        *accounts = next;
        Ok(())
    }

    async fn remove(&self, account_id: &str) -> Result<bool, StorageError> {
        let mut accounts = self.accounts.lock().await;
        if !accounts.contains_key(account_id) {
            return Ok(false);
        }
        let mut next = accounts.clone();
        next.remove(account_id);
        self.persist(&next).await?;
        *accounts = next;
        Ok(true)
    }

    async fn list_ids(&self) -> Result<Vec<String>, StorageError> {
        let mut ids: Vec<String> = self.accounts.lock().await.keys().cloned().collect();
        ids.sort();
        Ok(ids)
    }

    async fn count(&self) -> Result<usize, StorageError> {
        Ok(self.accounts.lock().await.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn records_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("accounts.json");

        let store = FileStore::open(&path).await.unwrap();
        assert_eq!(store.loaded_count(), 0);

        let mut record = AccountRecord::activated("app-1", "acc-1");
        record.access_token = Some("secret-token".into());
        store.upsert(record.clone()).await.unwrap();
        store.upsert(AccountRecord::activated("app-1", "acc-2")).await.unwrap();
        assert!(store.remove("acc-2").await.unwrap());

        let reopened = FileStore::open(&path).await.unwrap();
        assert_eq!(reopened.loaded_count(), 1);
        assert_eq!(reopened.count().await.unwrap(), 1);
        assert_eq!(reopened.get("acc-1").await.unwrap(), Some(record));
        assert!(!path.with_extension("tmp").exists());
    }

    #[tokio::test]
    async fn failed_write_leaves_store_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let parent = dir.path().join("data");
        let path = parent.join("accounts.json");

        let store = FileStore::open(&path).await.unwrap();
        store.upsert(AccountRecord::activated("app", "kept")).await.unwrap();

        // A plain file where the directory was makes every write fail.
        std::fs::remove_dir_all(&parent).unwrap();
        std::fs::write(&parent, b"").unwrap();

        assert!(store.upsert(AccountRecord::activated("app", "acc")).await.is_err());
        assert!(store.get("acc").await.unwrap().is_none());

        assert!(store.remove("kept").await.is_err());
        assert!(store.get("kept").await.unwrap().is_some());
        assert_eq!(store.list_ids().await.unwrap(), vec!["kept"]);
    }

    #[tokio::test]
    async fn corrupt_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("accounts.json");
        std::fs::write(&path, b"{not json").unwrap();

        let err = FileStore::open(&path).await.err();
        assert!(matches!(err, Some(StorageError::Serialization(_))));
    }
}
