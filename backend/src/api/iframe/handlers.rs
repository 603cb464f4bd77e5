//! Handler functions for the iframe widgets.
//!
//! MoySklad passes an opaque `contextKey` in the query string; it is echoed
//! into the page so the widget script can resolve the current user.

use axum::extract::Query;
use axum::response::Html;
use serde::Deserialize;
use tracing::info;

use super::page::{render, Widget};

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetParams {
    #[serde(default)]
    pub context_key: Option<String>,
    #[serde(default)]
    pub account: Option<String>,
}

pub async fn index(Query(params): Query<WidgetParams>) -> Html<String> {
    Html(render(Widget::Landing, &params))
}

pub async fn customer_order(Query(params): Query<WidgetParams>) -> Html<String> {
    info!(context_key = params.context_key.as_deref().unwrap_or(""), "loading customer order widget");
    Html(render(Widget::CustomerOrder, &params))
}

pub async fn settings(Query(params): Query<WidgetParams>) -> Html<String> {
    info!(context_key = params.context_key.as_deref().unwrap_or(""), "loading settings widget");
    Html(render(Widget::Settings, &params))
}
