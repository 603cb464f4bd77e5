//! MoySklad-specific adapter implementation.
//!
//! This file contains the concrete implementation of the `InventoryAdapter` trait
//! for the MoySklad JSON API (remap 1.2): the HTTP client wrapper, request
//! building and response mapping.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header, Client, StatusCode};
use tracing::debug;

use crate::errors::AdapterError;
use crate::models::{CustomerOrder, ListResponse, OrderQuery};
use crate::InventoryAdapter;

pub const DEFAULT_API_URL: &str = "https://api.moysklad.ru/api/remap/1.2";

pub struct MoyskladClient {
    http: Client,
    api_url: String,
}

impl MoyskladClient {
    pub fn new(api_url: &str, timeout: Duration) -> Result<Self, AdapterError> {
        let api_url = api_url.trim_end_matches('/');
        if !(api_url.starts_with("http://") || api_url.starts_with("https://")) {
            return Err(AdapterError::InvalidUrl(api_url.to_string()));
        }

        // gzip is mandatory for the JSON API; reqwest negotiates and decodes it.
        let http = Client::builder()
            .timeout(timeout)
            .gzip(true)
            .user_agent(concat!("expensesms/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            api_url: api_url.to_string(),
        })
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.api_url, path.trim_start_matches('/'))
    }
}

#[async_trait]
impl InventoryAdapter for MoyskladClient {
    async fn customer_orders(
        &self,
        access_token: &str,
        query: &OrderQuery,
    ) -> Result<Vec<CustomerOrder>, AdapterError> {
        let url = self.endpoint("entity/customerorder");
        debug!(%url, limit = query.limit, offset = query.offset, "fetching customer orders");

        let response = self
            .http
            .get(&url)
            .bearer_auth(access_token)
            .header(header::ACCEPT, "application/json;charset=utf-8")
            .query(&[("limit", query.limit), ("offset", query.offset)])
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(AdapterError::Unauthorized);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AdapterError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response.bytes().await?;
        let list: ListResponse<CustomerOrder> = serde_json::from_slice(&bytes)?;
        Ok(list.rows)
    }
}
