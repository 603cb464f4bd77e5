//! Custom error types specific to the `adapters` crate.
//!
//! These errors cover transport failures, unexpected responses and payload
//! decoding when talking to the MoySklad JSON API.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AdapterError {
    #[error("request to inventory API failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("inventory API rejected the access token")]
    Unauthorized,

    #[error("inventory API answered {status}: {body}")]
    Status { status: u16, body: String },

    #[error("failed to decode inventory API response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("invalid inventory API url: {0}")]
    InvalidUrl(String),
}
