//! Data models of the MoySklad JSON API used by the backend.
//!
//! Only the fields the service reads are mapped; everything else in the
//! upstream payloads is ignored on decode.

use serde::{Deserialize, Serialize};

/// Smallest and largest page size accepted by the upstream API for our use.
pub const MIN_PAGE_LIMIT: u32 = 1;
pub const MAX_PAGE_LIMIT: u32 = 100;
pub const DEFAULT_PAGE_LIMIT: u32 = 25;

/// Paging parameters for list requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderQuery {
    pub limit: u32,
    pub offset: u32,
}

impl OrderQuery {
    /// Build a query, clamping `limit` into the accepted range.
    pub fn new(limit: Option<u32>, offset: Option<u32>) -> Self {
        let limit = limit
            .unwrap_or(DEFAULT_PAGE_LIMIT)
            .clamp(MIN_PAGE_LIMIT, MAX_PAGE_LIMIT);
        Self {
            limit,
            offset: offset.unwrap_or(0),
        }
    }
}

impl Default for OrderQuery {
    fn default() -> Self {
        Self::new(None, None)
    }
}

/// Workflow state attached to a document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderState {
    #[serde(default)]
    pub name: Option<String>,
}

/// A customer order (`entity/customerorder`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerOrder {
    pub id: String,
    pub name: String,
    /// Document date as sent by the platform (`YYYY-MM-DD HH:MM:SS.sss`).
    #[serde(default)]
    pub moment: Option<String>,
    /// Total in minor currency units.
    #[serde(default)]
    pub sum: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<OrderState>,
}

/// Envelope of every list endpoint.
#[derive(Debug, Deserialize)]
pub(crate) struct ListResponse<T> {
    #[serde(default = "Vec::new")]
    pub rows: Vec<T>,
}
