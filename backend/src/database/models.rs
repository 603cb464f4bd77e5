//! Rust structs that represent stored account records.
//!
//! These models define the structure of data as it is kept by the account
//! store. They differ from the API payloads MoySklad sends, which are mapped
//! onto them by the services layer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Application state for one account as reported back to MoySklad.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AppStatus {
    Activated,
    SettingsRequired,
}

impl AppStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AppStatus::Activated => "Activated",
            AppStatus::SettingsRequired => "SettingsRequired",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountRecord {
    pub app_id: String,
    pub account_id: String,
    #[serde(default)]
    pub account_name: Option<String>,
    #[serde(default)]
    pub access_token: Option<String>,
    pub status: AppStatus,
    pub activated_at: DateTime<Utc>,
}

impl AccountRecord {
    pub fn activated(app_id: impl Into<String>, account_id: impl Into<String>) -> Self {
        Self {
            app_id: app_id.into(),
            account_id: account_id.into(),
            account_name: None,
            access_token: None,
            status: AppStatus::Activated,
            activated_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_serializes_as_platform_strings() {
        assert_eq!(
            serde_json::to_string(&AppStatus::SettingsRequired).unwrap(),
            "\"SettingsRequired\""
        );
        assert_eq!(AppStatus::Activated.as_str(), "Activated");
    }
}
