//! Service endpoints: root banner, health checks and the optional debug view.

pub mod handlers;
pub mod routes;
