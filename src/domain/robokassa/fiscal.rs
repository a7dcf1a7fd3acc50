//! Shop country and fiscal receipt classifiers.
//!
//! Option sets match what Robokassa accepts in the `receipt` parameter.

use serde::{Deserialize, Serialize};

/// Country the shop is registered in. Selects the endpoint and receipt shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Country {
    #[default]
    #[serde(rename = "RU", alias = "ru")]
    Ru,
    #[serde(rename = "KZ", alias = "kz")]
    Kz,
}

impl Country {
    /// Payment page the buyer is redirected to.
    pub fn endpoint(&self) -> &'static str {
        match self {
            Country::Ru => "https://auth.robokassa.ru/Merchant/Index.aspx",
            Country::Kz => "https://auth.robokassa.kz/Merchant/Index.aspx",
        }
    }

    /// Whether receipt items carry `payment_method` / `payment_object`.
    pub fn itemizes_settlement(&self) -> bool {
        matches!(self, Country::Ru)
    }
}

/// Taxation system of the shop (`sno`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaxSystem {
    #[default]
    None,
    Osn,
    UsnIncome,
    UsnIncomeOutcome,
    Envd,
    Esn,
    Patent,
}

/// Settlement method sign (`payment_method`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    #[default]
    None,
    FullPrepayment,
    Prepayment,
    Advance,
    FullPayment,
    PartialPayment,
    Credit,
}

/// Settlement subject sign (`payment_object`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentObject {
    #[default]
    None,
    Commodity,
    Excise,
    Job,
    Service,
    Payment,
}

/// VAT rate applied to each receipt item (`tax`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VatRate {
    #[default]
    None,
    Vat0,
    Vat10,
    Vat110,
    Vat20,
    Vat120,
    /// 12% rate used by Kazakhstan shops.
    Vat12,
}
