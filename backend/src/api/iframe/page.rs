//! HTML rendering for the widgets. All interpolated values are escaped.

use super::handlers::WidgetParams;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Widget {
    Landing,
    CustomerOrder,
    Settings,
}

impl Widget {
    pub fn title(&self) -> &'static str {
        match self {
            Widget::Landing => "ExpenseSMS",
            Widget::CustomerOrder => "ExpenseSMS - Заказ покупателя",
            Widget::Settings => "ExpenseSMS - Настройки",
        }
    }

    /// Value of the `data-widget` attribute the front-end script switches on.
    pub fn kind(&self) -> &'static str {
        match self {
            Widget::Landing => "landing",
            Widget::CustomerOrder => "customer_order",
            Widget::Settings => "settings",
        }
    }
}

pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

pub fn render(widget: Widget, params: &WidgetParams) -> String {
    let title = escape_html(widget.title());
    let context_key = escape_html(params.context_key.as_deref().unwrap_or(""));
    let account = escape_html(params.account.as_deref().unwrap_or(""));

    format!(
        r#"<!DOCTYPE html>
<html lang="ru">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
<style>
body {{ font-family: -apple-system, "Segoe UI", Roboto, sans-serif; margin: 0; padding: 12px; color: #333; }}
h1 {{ font-size: 16px; margin: 0 0 8px; }}
.meta {{ font-size: 12px; color: #888; }}
</style>
</head>
<body>
<div id="app" data-widget="{kind}" data-context-key="{context_key}" data-account="{account}">
<h1>{title}</h1>
<p class="meta">contextKey: <code>{context_key}</code></p>
</div>
</body>
</html>
"#,
        title = title,
        kind = widget.kind(),
        context_key = context_key,
        account = account,
    )
}
