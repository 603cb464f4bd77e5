//! ExpenseSMS backend.
//!
//! An axum service that plugs into MoySklad as a vendor application: it
//! handles the activation lifecycle, verifies signed calls, serves the iframe
//! widgets and reads orders through the `expensesms_adapters` crate.

pub mod api;
pub mod auth;
pub mod config;
pub mod database;
pub mod errors;
pub mod middleware;
pub mod server;
pub mod services;
pub mod state;

pub use config::Config;
pub use errors::{AppError, AppResult};
pub use state::AppState;
