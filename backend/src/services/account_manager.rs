//! Manages the application lifecycle for MoySklad accounts.
//!
//! Activation stores the access token MoySklad hands over, deactivation drops
//! the account, and status reports whether the app is ready for an account.

use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};

use crate::database::{AccountRecord, AccountStore, AppStatus};
use crate::errors::{AppError, AppResult};

/// Visible prefix of an access token in logs.
const TOKEN_LOG_PREFIX: usize = 10;

/// Everything known about an account at activation time.
#[derive(Debug, Clone, Default)]
pub struct Activation {
    pub app_id: String,
    pub account_id: String,
    pub account_name: Option<String>,
    pub access_token: Option<String>,
    pub cause: Option<String>,
}

#[derive(Clone)]
pub struct AccountManager {
    store: Arc<dyn AccountStore>,
}

impl AccountManager {
    pub fn new(store: Arc<dyn AccountStore>) -> Self {
        Self { store }
    }

    pub async fn activate(&self, activation: Activation) -> AppResult<AppStatus> {
        if activation.account_id.trim().is_empty() {
            return Err(AppError::BadRequest("accountId is required".into()));
        }

        let previous = self.store.get(&activation.account_id).await?;
        let access_token = activation
            .access_token
            .filter(|t| !t.is_empty())
            .or_else(|| previous.as_ref().and_then(|p| p.access_token.clone()));

        match &access_token {
            Some(token) => info!(
                app_id = %activation.app_id,
                account_id = %activation.account_id,
                cause = activation.cause.as_deref().unwrap_or("-"),
                access_token = %mask_token(token),
                "activating application"
            ),
            None => warn!(
                app_id = %activation.app_id,
                account_id = %activation.account_id,
                "activating application without an access token"
            ),
        }

        let record = AccountRecord {
            app_id: activation.app_id,
            account_id: activation.account_id,
            account_name: activation
                .account_name
                .or_else(|| previous.and_then(|p| p.account_name)),
            access_token,
            status: AppStatus::Activated,
            activated_at: Utc::now(),
        };
        self.store.upsert(record).await?;

        Ok(AppStatus::Activated)
    }

    /// Forget an account. Unknown accounts are not an error. `app_id` is only
    /// known on the vendor API path.
    pub async fn deactivate(&self, app_id: Option<&str>, account_id: &str) -> AppResult<bool> {
        let existed = self.store.remove(account_id).await?;
        info!(app_id = app_id.unwrap_or("-"), %account_id, existed, "deactivated application");
        Ok(existed)
    }

    pub async fn status(&self, account_id: &str) -> AppResult<AppStatus> {
        Ok(self
            .store
            .get(account_id)
            .await?
            .map(|record| record.status)
            .unwrap_or(AppStatus::SettingsRequired))
    }

    /// The stored access token of an account.
    pub async fn access_token(&self, account_id: &str) -> AppResult<String> {
        let record = self
            .store
            .get(account_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Unknown account {}", account_id)))?;

        record
            .access_token
            .ok_or_else(|| AppError::SettingsRequired(account_id.to_string()))
    }

    pub async fn account_ids(&self) -> AppResult<Vec<String>> {
        Ok(self.store.list_ids().await?)
    }
}

/// Shorten a token for logging.
pub fn mask_token(token: &str) -> String {
    let prefix: String = token.chars().take(TOKEN_LOG_PREFIX).collect();
    format!("{}...", prefix)
}
