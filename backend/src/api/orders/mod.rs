//! Module for the orders endpoint, which proxies customer orders from
//! MoySklad using the account's stored access token.

pub mod handlers;
pub mod routes;
