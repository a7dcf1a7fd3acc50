//! Outbound payment request assembly.
//!
//! Produces the field list posted to the Robokassa payment page, signed
//! with password #1. Field order is fixed and built once.

use serde::Serialize;
use thiserror::Error;

use crate::domain::payment::OrderSnapshot;

use super::gateway::PaymentGatewayConfig;
use super::receipt::ReceiptPayload;
use super::signature::{SignatureInput, SHOP_LABEL, SHOP_LABEL_PARAM};

/// Field names as expected by the payment page.
pub mod field {
    pub const MERCHANT_LOGIN: &str = "MerchantLogin";
    pub const OUT_SUM: &str = "OutSum";
    pub const INV_ID: &str = "InvId";
    pub const EMAIL: &str = "email";
    pub const RECEIPT: &str = "receipt";
    pub const IS_TEST: &str = "IsTest";
    pub const SIGNATURE_VALUE: &str = "SignatureValue";
    pub const INC_CURR_LABEL: &str = "IncCurrLabel";
}

/// Errors raised while building a payment request.
#[derive(Debug, Error)]
pub enum PaymentRequestError {
    #[error("Merchant login is not configured")]
    MissingMerchantLogin,

    #[error("Order {0} has no items")]
    EmptyOrder(String),

    #[error("Receipt serialization failed: {0}")]
    Receipt(#[from] serde_json::Error),
}

/// How the buyer is sent to Robokassa.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RedirectMode {
    /// Auto-submitted POST form to the country endpoint.
    PostForm,
    /// `Robokassa.StartPayment({...})` inline widget.
    Widget,
}

/// A signed payment request ready to be rendered.
#[derive(Debug, Clone, Serialize)]
pub struct PaymentRequest {
    pub endpoint: &'static str,
    pub mode: RedirectMode,
    pub fields: Vec<(&'static str, String)>,
}

impl PaymentRequest {
    /// Value of the first field named `name`.
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn signature(&self) -> Option<&str> {
        self.field(field::SIGNATURE_VALUE)
    }

    pub fn is_test(&self) -> bool {
        self.field(field::IS_TEST) == Some("1")
    }

    /// Widget parameter list: `Name: 'value', ...`, without `IsTest`.
    ///
    /// Values are escaped for a single-quoted JavaScript string; callers
    /// still HTML-escape the result when placing it in an attribute.
    pub fn widget_params(&self) -> String {
        self.fields
            .iter()
            .filter(|(key, _)| *key != field::IS_TEST)
            .map(|(key, value)| format!("{}: '{}'", key, escape_js_single_quoted(value)))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

fn escape_js_single_quoted(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '\'' => escaped.push_str("\\'"),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            '<' => escaped.push_str("\\x3C"),
            other => escaped.push(other),
        }
    }
    escaped
}

/// Assembles signed payment requests for one gateway configuration.
pub struct OutboundRequestBuilder<'a> {
    config: &'a PaymentGatewayConfig,
}

impl<'a> OutboundRequestBuilder<'a> {
    pub fn new(config: &'a PaymentGatewayConfig) -> Self {
        Self { config }
    }

    /// Builds the request for `order`.
    ///
    /// `test_mode` adds `IsTest=1`; `currency_label` adds `IncCurrLabel`.
    ///
    /// # Errors
    ///
    /// - `MissingMerchantLogin` - login not configured
    /// - `EmptyOrder` - nothing to put on the receipt
    /// - `Receipt` - receipt JSON could not be produced
    pub fn build(
        &self,
        order: &OrderSnapshot,
        test_mode: bool,
        currency_label: Option<&str>,
    ) -> Result<PaymentRequest, PaymentRequestError> {
        if !self.config.has_merchant_login() {
            return Err(PaymentRequestError::MissingMerchantLogin);
        }
        if order.items.is_empty() {
            return Err(PaymentRequestError::EmptyOrder(order.id.to_string()));
        }

        let endpoint = self.config.country.endpoint();
        let receipt = ReceiptPayload::from_order(order, self.config).encode()?;
        let out_sum = order.total.to_out_sum();
        let inv_id = order.id.to_string();

        let input = SignatureInput::outbound(
            &self.config.merchant_login,
            &out_sum,
            &inv_id,
            &receipt,
            &self.config.pass1,
        );
        let signature = self.config.codec().sign(&input);

        let mut fields = vec![
            (field::MERCHANT_LOGIN, self.config.merchant_login.clone()),
            (field::OUT_SUM, out_sum),
            (field::INV_ID, inv_id),
            (field::EMAIL, order.email.clone()),
            (field::RECEIPT, receipt),
            (SHOP_LABEL_PARAM, SHOP_LABEL.to_string()),
        ];
        if test_mode {
            fields.push((field::IS_TEST, "1".to_string()));
        }
        fields.push((field::SIGNATURE_VALUE, signature));
        if let Some(label) = currency_label.filter(|label| !label.trim().is_empty()) {
            fields.push((field::INC_CURR_LABEL, label.to_string()));
        }

        let mode = if self.config.widget {
            RedirectMode::Widget
        } else {
            RedirectMode::PostForm
        };

        Ok(PaymentRequest {
            endpoint,
            mode,
            fields,
        })
    }
}
