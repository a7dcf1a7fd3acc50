//! Robokassa merchant configuration

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use super::error::ValidationError;
use crate::domain::robokassa::{
    Country, DigestAlgorithm, PaymentGatewayConfig, PaymentMethod, PaymentObject, TaxSystem,
    VatRate, DEFAULT_NOTIFICATION_CURRENCY,
};

/// Robokassa shop settings
///
/// Mirrors the "Technical settings" page of the Robokassa merchant account.
/// The digest algorithm must match the one selected there.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RobokassaConfig {
    /// Shop identifier (`MerchantLogin`)
    pub merchant_login: String,

    /// Password #1, signs payment requests
    pub pass1: SecretString,

    /// Password #2, verifies ResultURL notifications
    pub pass2: SecretString,

    /// Signature digest: md5, ripemd160, sha1, sha256, sha384 or sha512
    pub hash_type: DigestAlgorithm,

    /// Shop country: RU or KZ
    pub country: Country,

    /// Taxation system printed on receipts
    pub sno: TaxSystem,

    /// Receipt payment method
    pub payment_method: PaymentMethod,

    /// Receipt payment object
    pub payment_object: PaymentObject,

    /// Receipt VAT rate
    pub tax: VatRate,

    /// Log rejected notifications at warn level
    pub logging: bool,

    /// Send every payment in test mode
    pub test_mode: bool,

    /// Use the inline payment widget instead of a redirect form
    pub widget: bool,

    /// Currency of notified amounts
    pub notification_currency: String,
}

impl Default for RobokassaConfig {
    fn default() -> Self {
        Self {
            merchant_login: String::new(),
            pass1: SecretString::new(String::new()),
            pass2: SecretString::new(String::new()),
            hash_type: DigestAlgorithm::Md5,
            country: Country::default(),
            sno: TaxSystem::default(),
            payment_method: PaymentMethod::default(),
            payment_object: PaymentObject::default(),
            tax: VatRate::default(),
            logging: false,
            test_mode: false,
            widget: false,
            notification_currency: DEFAULT_NOTIFICATION_CURRENCY.to_string(),
        }
    }
}

impl RobokassaConfig {
    /// Validate Robokassa configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.merchant_login.trim().is_empty() {
            return Err(ValidationError::MissingRequired("ROBOKASSA__MERCHANT_LOGIN"));
        }
        if self.pass1.expose_secret().is_empty() {
            return Err(ValidationError::MissingRequired("ROBOKASSA__PASS1"));
        }
        if self.pass2.expose_secret().is_empty() {
            return Err(ValidationError::MissingRequired("ROBOKASSA__PASS2"));
        }
        if self.pass1.expose_secret() == self.pass2.expose_secret() {
            return Err(ValidationError::IdenticalPasswords);
        }

        let currency = self.notification_currency.trim();
        if currency.len() != 3 || !currency.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(ValidationError::InvalidCurrency(
                self.notification_currency.clone(),
            ));
        }

        Ok(())
    }

    /// Gateway settings handed to the signing and validation code
    pub fn gateway(&self) -> PaymentGatewayConfig {
        PaymentGatewayConfig {
            merchant_login: self.merchant_login.trim().to_string(),
            pass1: self.pass1.clone(),
            pass2: self.pass2.clone(),
            algorithm: self.hash_type,
            country: self.country,
            sno: self.sno,
            payment_method: self.payment_method,
            payment_object: self.payment_object,
            tax: self.tax,
            logging: self.logging,
            test_mode: self.test_mode,
            widget: self.widget,
            notification_currency: self.notification_currency.trim().to_ascii_uppercase(),
        }
    }
}
