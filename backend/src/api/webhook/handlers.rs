//! Handler functions for the v2 webhooks.

use axum::body::Bytes;
use axum::extract::State;
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::info;
use url::Url;

use crate::api::parse_json;
use crate::errors::{AppError, AppResult};
use crate::services::Activation;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstalledEvent {
    #[serde(default)]
    pub account_id: Option<String>,
    #[serde(default, rename = "access_token")]
    pub access_token: Option<String>,
    #[serde(default)]
    pub app_uid: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountEvent {
    #[serde(default)]
    pub account_id: Option<String>,
    #[serde(default)]
    pub app_uid: Option<String>,
    #[serde(default)]
    pub context_key: Option<String>,
}

fn required(account_id: Option<String>) -> AppResult<String> {
    account_id
        .filter(|id| !id.trim().is_empty())
        .ok_or_else(|| AppError::BadRequest("accountId is required".into()))
}

pub async fn status() -> Json<Value> {
    info!("application status requested");
    Json(json!({ "status": "ok", "version": env!("CARGO_PKG_VERSION") }))
}

pub async fn installed(State(state): State<AppState>, body: Bytes) -> AppResult<Json<Value>> {
    let event: InstalledEvent = parse_json(&body)?;
    let account_id = required(event.account_id)?;

    state
        .accounts
        .activate(Activation {
            app_id: event.app_uid.unwrap_or_default(),
            account_id,
            access_token: event.access_token,
            cause: Some("Install".into()),
            ..Default::default()
        })
        .await?;

    Ok(Json(json!({ "status": "installed" })))
}

pub async fn uninstalled(State(state): State<AppState>, body: Bytes) -> AppResult<Json<Value>> {
    let event: AccountEvent = parse_json(&body)?;
    let account_id = required(event.account_id)?;

    state
        .accounts
        .deactivate(event.app_uid.as_deref(), &account_id)
        .await?;
    Ok(Json(json!({ "status": "uninstalled" })))
}

/// Answer with the URL MoySklad should load in the iframe for this account.
pub async fn iframe_link(State(state): State<AppState>, body: Bytes) -> AppResult<Json<Value>> {
    let event: AccountEvent = parse_json(&body)?;
    let account_id = required(event.account_id)?;
    info!(
        context_key = event.context_key.as_deref().unwrap_or("-"),
        %account_id,
        "iframe requested"
    );

    let url = iframe_url(&state.config.app.public_url, &account_id)?;
    Ok(Json(json!({ "type": "iframe", "url": url.as_str() })))
}

fn iframe_url(public_url: &str, account_id: &str) -> AppResult<Url> {
    let mut url = Url::parse(&format!("{}/expensesms", public_url.trim_end_matches('/')))
        .map_err(|e| AppError::Internal(format!("invalid public_url: {}", e)))?;
    url.query_pairs_mut().append_pair("account", account_id);
    Ok(url)
}
