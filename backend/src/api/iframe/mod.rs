//! Module for the HTML widgets MoySklad embeds in iframes.

pub mod handlers;
pub mod page;
pub mod routes;
