//! ResultURL notification as received from Robokassa.
//!
//! Transient: parsed from the form body, validated, then discarded.

use std::collections::BTreeMap;

/// Prefix of merchant-defined shop parameters (`shp_label`, `Shp_item`, ...).
const SHOP_PARAM_PREFIX: &str = "shp_";

pub const OUT_SUM: &str = "OutSum";
pub const INV_ID: &str = "InvId";
pub const SIGNATURE_VALUE: &str = "SignatureValue";

/// Incoming notification fields, keyed by name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotificationRecord {
    fields: BTreeMap<String, String>,
}

impl NotificationRecord {
    pub fn new(fields: BTreeMap<String, String>) -> Self {
        Self { fields }
    }

    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            fields: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Presence is by key; an empty value still counts as present.
    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    pub fn out_sum(&self) -> Option<&str> {
        self.get(OUT_SUM)
    }

    pub fn inv_id(&self) -> Option<&str> {
        self.get(INV_ID)
    }

    pub fn signature_value(&self) -> Option<&str> {
        self.get(SIGNATURE_VALUE)
    }

    /// Shop parameters, matched case-insensitively on the `shp_` prefix.
    pub fn shop_params(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields
            .iter()
            .filter(|(key, _)| {
                key.len() > SHOP_PARAM_PREFIX.len()
                    && key
                        .get(..SHOP_PARAM_PREFIX.len())
                        .is_some_and(|prefix| prefix.eq_ignore_ascii_case(SHOP_PARAM_PREFIX))
            })
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }
}

impl From<BTreeMap<String, String>> for NotificationRecord {
    fn from(fields: BTreeMap<String, String>) -> Self {
        Self::new(fields)
    }
}

/// Body Robokassa expects after a successful notification: `OK` + invoice id.
pub fn acknowledgement(inv_id: &str) -> String {
    format!("OK{}", inv_id)
}
