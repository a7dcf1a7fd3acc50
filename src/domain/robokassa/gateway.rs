//! Gateway settings used by the signing and validation code.

use secrecy::SecretString;

use super::fiscal::{Country, PaymentMethod, PaymentObject, TaxSystem, VatRate};
use super::signature::{DigestAlgorithm, SignatureCodec};

/// Currency Robokassa notifications are settled in unless configured otherwise.
pub const DEFAULT_NOTIFICATION_CURRENCY: &str = "RUB";

/// Merchant settings for one Robokassa shop. Immutable per request.
#[derive(Debug, Clone)]
pub struct PaymentGatewayConfig {
    /// Shop identifier (`MerchantLogin`).
    pub merchant_login: String,
    /// Password #1, signs outbound payment requests.
    pub pass1: SecretString,
    /// Password #2, verifies ResultURL notifications.
    pub pass2: SecretString,
    pub algorithm: DigestAlgorithm,
    pub country: Country,
    pub sno: TaxSystem,
    pub payment_method: PaymentMethod,
    pub payment_object: PaymentObject,
    pub tax: VatRate,
    /// Emit rejection details at warn level.
    pub logging: bool,
    /// Send `IsTest=1` with every payment request.
    pub test_mode: bool,
    /// Render the inline widget instead of a POST redirect form.
    pub widget: bool,
    /// Currency the notified `OutSum` is interpreted in.
    pub notification_currency: String,
}

impl PaymentGatewayConfig {
    /// Creates settings with defaults for everything but credentials.
    pub fn new(
        merchant_login: impl Into<String>,
        pass1: impl Into<String>,
        pass2: impl Into<String>,
    ) -> Self {
        Self {
            merchant_login: merchant_login.into(),
            pass1: SecretString::new(pass1.into()),
            pass2: SecretString::new(pass2.into()),
            algorithm: DigestAlgorithm::Md5,
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

    pub fn with_algorithm(mut self, algorithm: DigestAlgorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    pub fn with_country(mut self, country: Country) -> Self {
        self.country = country;
        self
    }

    pub fn codec(&self) -> SignatureCodec {
        SignatureCodec::new(self.algorithm)
    }

    pub fn has_merchant_login(&self) -> bool {
        !self.merchant_login.trim().is_empty()
    }
}
