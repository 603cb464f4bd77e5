//! Module for the signed v2 application webhooks.
//!
//! MoySklad posts install, uninstall, status and iframe events here. Each body
//! is signed with the app secret in the `X-Lognex-Signature` header.

pub mod handlers;
pub mod routes;
