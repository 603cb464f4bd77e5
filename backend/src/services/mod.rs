//! Module for core business logic services.
//!
//! This module encapsulates the operations behind the HTTP handlers: the app
//! activation lifecycle per account and reading orders from MoySklad with the
//! account's stored token.

pub mod account_manager;
pub mod order_service;

pub use account_manager::{mask_token, AccountManager, Activation};
pub use order_service::OrderService;
