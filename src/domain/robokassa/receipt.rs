//! Fiscal receipt embedded in the payment request.
//!
//! Russian shops itemize the settlement method and subject for every line;
//! other countries send only quantity, unit cost and tax. Each line carries
//! the per-unit `cost`; Robokassa multiplies by `quantity` itself.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Serialize, Serializer};

use crate::domain::foundation::format_two_places;
use crate::domain::payment::OrderSnapshot;

use super::fiscal::{PaymentMethod, PaymentObject, TaxSystem, VatRate};
use super::gateway::PaymentGatewayConfig;

/// One receipt line.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReceiptItem {
    pub name: String,
    #[serde(serialize_with = "serialize_quantity")]
    pub quantity: Decimal,
    /// Unit price, two decimal places.
    pub cost: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<PaymentMethod>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_object: Option<PaymentObject>,
    pub tax: VatRate,
}

/// `{sno, items}` as sent in the `receipt` parameter.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReceiptPayload {
    pub sno: TaxSystem,
    pub items: Vec<ReceiptItem>,
}

impl ReceiptPayload {
    /// Builds the receipt for `order` in the shape the configured country expects.
    pub fn from_order(order: &OrderSnapshot, config: &PaymentGatewayConfig) -> Self {
        let itemize = config.country.itemizes_settlement();
        let items = order
            .items
            .iter()
            .map(|item| ReceiptItem {
                name: item.name.clone(),
                quantity: item.quantity,
                cost: format_two_places(item.unit_price),
                payment_method: itemize.then_some(config.payment_method),
                payment_object: itemize.then_some(config.payment_object),
                tax: config.tax,
            })
            .collect();

        Self {
            sno: config.sno,
            items,
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// URL-encoded JSON, the exact string that is both sent and signed.
    pub fn encode(&self) -> Result<String, serde_json::Error> {
        Ok(urlencoding::encode(&self.to_json()?).into_owned())
    }
}

/// Whole quantities go out as integers, fractional ones as numbers.
fn serialize_quantity<S: Serializer>(quantity: &Decimal, serializer: S) -> Result<S::Ok, S::Error> {
    let normalized = quantity.normalize();
    if normalized.fract().is_zero() {
        if let Some(whole) = normalized.to_u64() {
            return serializer.serialize_u64(whole);
        }
    }
    match normalized.to_f64() {
        Some(value) => serializer.serialize_f64(value),
        None => serializer.serialize_str(&normalized.to_string()),
    }
}
