//! HTML for the checkout page.
//!
//! Either a form that auto-submits to the Robokassa endpoint, or a pay button
//! that opens the Robokassa inline widget.

use crate::domain::robokassa::{PaymentRequest, RedirectMode};

/// Widget script served by Robokassa.
const WIDGET_SCRIPT: &str = "https://auth.robokassa.ru/Merchant/bundle/robokassa_iframe.js";

/// Renders the page that hands the buyer over to Robokassa.
pub fn checkout_page(request: &PaymentRequest) -> String {
    let body = match request.mode {
        RedirectMode::PostForm => post_form(request),
        RedirectMode::Widget => widget_button(request),
    };
    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>Robokassa</title>\n</head>\n<body>\n{}</body>\n</html>\n",
        body
    )
}

fn post_form(request: &PaymentRequest) -> String {
    let mut html = format!(
        "<form id=\"robokassa-redirect\" method=\"post\" action=\"{}\">\n",
        escape_html(request.endpoint)
    );
    for (name, value) in &request.fields {
        html.push_str(&format!(
            "<input type=\"hidden\" name=\"{}\" value=\"{}\">\n",
            escape_html(name),
            escape_html(value)
        ));
    }
    html.push_str("<noscript><button type=\"submit\">Pay</button></noscript>\n</form>\n");
    html.push_str("<script>document.getElementById('robokassa-redirect').submit();</script>\n");
    html
}

fn widget_button(request: &PaymentRequest) -> String {
    format!(
        "<p>Thank you for your order. Press the button below to pay.</p>\n\
         <script src=\"{}\"></script>\n\
         <button type=\"button\" id=\"robokassa\" onmousedown=\"Robokassa.StartPayment({{{}}})\">Pay</button>\n",
        WIDGET_SCRIPT,
        escape_html(&request.widget_params())
    )
}

/// Escapes text for HTML element content and double-quoted attributes.
pub fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            other => escaped.push(other),
        }
    }
    escaped
}
