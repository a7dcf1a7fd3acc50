//! Read-only order view supplied by the external order system.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{InvoiceId, Money, ValidationError};

use super::record::Payable;

/// One purchased line of an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawOrderItem")]
pub struct OrderItem {
    /// Title of the purchased product variation.
    pub name: String,
    pub unit_price: Decimal,
    pub quantity: Decimal,
}

#[derive(Deserialize)]
struct RawOrderItem {
    name: String,
    unit_price: Decimal,
    quantity: Decimal,
}

impl TryFrom<RawOrderItem> for OrderItem {
    type Error = ValidationError;

    fn try_from(raw: RawOrderItem) -> Result<Self, Self::Error> {
        OrderItem::new(raw.name, raw.unit_price, raw.quantity)
    }
}

impl OrderItem {
    pub fn new(
        name: impl Into<String>,
        unit_price: Decimal,
        quantity: Decimal,
    ) -> Result<Self, ValidationError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ValidationError::empty_field("item.name"));
        }
        if unit_price.is_sign_negative() {
            return Err(ValidationError::invalid_format(
                "item.unit_price",
                "price cannot be negative",
            ));
        }
        if quantity <= Decimal::ZERO {
            return Err(ValidationError::invalid_format(
                "item.quantity",
                "quantity must be positive",
            ));
        }
        Ok(Self {
            name,
            unit_price,
            quantity,
        })
    }
}

/// Snapshot of an order at checkout time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderSnapshot {
    pub id: InvoiceId,
    pub total: Money,
    pub email: String,
    pub items: Vec<OrderItem>,
    /// Order-level `IncCurrLabel` preference (preselected payment method).
    #[serde(default)]
    pub currency_label: Option<String>,
}

impl OrderSnapshot {
    pub fn new(id: InvoiceId, total: Money, email: impl Into<String>) -> Self {
        Self {
            id,
            total,
            email: email.into(),
            items: Vec::new(),
            currency_label: None,
        }
    }

    pub fn with_item(mut self, item: OrderItem) -> Self {
        self.items.push(item);
        self
    }

    pub fn with_currency_label(mut self, label: impl Into<String>) -> Self {
        self.currency_label = Some(label.into());
        self
    }
}

impl Payable for OrderSnapshot {
    fn invoice_id(&self) -> InvoiceId {
        self.id
    }

    fn recorded_amount(&self) -> &Money {
        &self.total
    }
}
