//! Authentication of calls coming from MoySklad.
//!
//! Webhooks are signed with an HMAC of the body, vendor API calls carry a
//! bearer JWT. Both are keyed by the application secret.

pub mod errors;
pub mod middleware;
pub mod models;
pub mod service;

pub use errors::*;
pub use middleware::*;
pub use models::*;
pub use service::*;
