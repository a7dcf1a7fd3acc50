//! Robokassa signature computation and verification.
//!
//! A signature is the lower-case hex digest of the signed fields joined with
//! `:`. The digest algorithm is chosen per shop in the Robokassa merchant
//! settings and must match the gateway configuration.
//!
//! Comparison is case-insensitive (Robokassa sends upper-case hex) and
//! constant-time.

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use sha2::Digest;
use std::fmt;
use std::str::FromStr;
use subtle::ConstantTimeEq;
use thiserror::Error;

/// Fixed shop parameter value sent with every payment.
pub const SHOP_LABEL: &str = "drupal_official";

/// Name of the fixed shop parameter.
pub const SHOP_LABEL_PARAM: &str = "shp_label";

/// Separator between signed fields.
const FIELD_SEPARATOR: &str = ":";

/// Errors raised while computing signatures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SignatureError {
    #[error("Unsupported digest algorithm: {0}")]
    UnsupportedAlgorithm(String),
}

/// One-way hash used for signing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DigestAlgorithm {
    Md5,
    Ripemd160,
    Sha1,
    Sha256,
    Sha384,
    Sha512,
}

impl DigestAlgorithm {
    pub const ALL: [DigestAlgorithm; 6] = [
        DigestAlgorithm::Md5,
        DigestAlgorithm::Ripemd160,
        DigestAlgorithm::Sha1,
        DigestAlgorithm::Sha256,
        DigestAlgorithm::Sha384,
        DigestAlgorithm::Sha512,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DigestAlgorithm::Md5 => "md5",
            DigestAlgorithm::Ripemd160 => "ripemd160",
            DigestAlgorithm::Sha1 => "sha1",
            DigestAlgorithm::Sha256 => "sha256",
            DigestAlgorithm::Sha384 => "sha384",
            DigestAlgorithm::Sha512 => "sha512",
        }
    }

    /// Hashes `input`, returning lower-case hex.
    pub fn hex_digest(&self, input: &[u8]) -> String {
        match self {
            DigestAlgorithm::Md5 => hex_digest::<md5::Md5>(input),
            DigestAlgorithm::Ripemd160 => hex_digest::<ripemd::Ripemd160>(input),
            DigestAlgorithm::Sha1 => hex_digest::<sha1::Sha1>(input),
            DigestAlgorithm::Sha256 => hex_digest::<sha2::Sha256>(input),
            DigestAlgorithm::Sha384 => hex_digest::<sha2::Sha384>(input),
            DigestAlgorithm::Sha512 => hex_digest::<sha2::Sha512>(input),
        }
    }
}

impl fmt::Display for DigestAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DigestAlgorithm {
    type Err = SignatureError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DigestAlgorithm::ALL
            .into_iter()
            .find(|algorithm| algorithm.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| SignatureError::UnsupportedAlgorithm(s.to_string()))
    }
}

fn hex_digest<D: Digest>(input: &[u8]) -> String {
    hex::encode(D::digest(input))
}

/// Ordered list of fields to sign.
///
/// The field order is fixed by the protocol and differs between the
/// outbound request and the inbound notification. Holds a shared secret,
/// so `Debug` never prints the fields.
#[derive(Clone)]
pub struct SignatureInput {
    fields: Vec<String>,
}

impl SignatureInput {
    pub fn new<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            fields: fields.into_iter().map(Into::into).collect(),
        }
    }

    /// `MerchantLogin:OutSum:InvId:Receipt:pass1:shp_label=...`
    pub fn outbound(
        merchant_login: &str,
        out_sum: &str,
        inv_id: &str,
        encoded_receipt: &str,
        pass1: &SecretString,
    ) -> Self {
        Self::new([
            merchant_login.to_string(),
            out_sum.to_string(),
            inv_id.to_string(),
            encoded_receipt.to_string(),
            pass1.expose_secret().clone(),
            shop_label_field(),
        ])
    }

    /// `OutSum:InvId:pass2:shp_label=...`
    pub fn inbound(out_sum: &str, inv_id: &str, pass2: &SecretString) -> Self {
        Self::new([
            out_sum.to_string(),
            inv_id.to_string(),
            pass2.expose_secret().clone(),
            shop_label_field(),
        ])
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// The canonical string that gets hashed.
    pub fn joined(&self) -> String {
        self.fields.join(FIELD_SEPARATOR)
    }
}

impl fmt::Debug for SignatureInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignatureInput")
            .field("fields", &self.fields.len())
            .finish_non_exhaustive()
    }
}

/// `shp_label=drupal_official`, the shop parameter as it appears in signed strings.
pub fn shop_label_field() -> String {
    format!("{}={}", SHOP_LABEL_PARAM, SHOP_LABEL)
}

/// Signs and verifies with one configured algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SignatureCodec {
    algorithm: DigestAlgorithm,
}

impl SignatureCodec {
    pub fn new(algorithm: DigestAlgorithm) -> Self {
        Self { algorithm }
    }

    pub fn algorithm(&self) -> DigestAlgorithm {
        self.algorithm
    }

    /// Lower-case hex digest of the joined input.
    pub fn sign(&self, input: &SignatureInput) -> String {
        self.algorithm.hex_digest(input.joined().as_bytes())
    }

    /// Recomputes the signature and compares it with `provided`.
    pub fn verify(&self, input: &SignatureInput, provided: &str) -> bool {
        equals_case_insensitive(&self.sign(input), provided)
    }
}

/// Digest of `fields` joined with `:`.
pub fn digest(fields: &[&str], algorithm: DigestAlgorithm) -> String {
    algorithm.hex_digest(fields.join(FIELD_SEPARATOR).as_bytes())
}

/// Like [`digest`], with the algorithm given by name.
///
/// # Errors
///
/// `SignatureError::UnsupportedAlgorithm` for names outside the supported set.
pub fn digest_named(fields: &[&str], algorithm: &str) -> Result<String, SignatureError> {
    Ok(digest(fields, algorithm.parse()?))
}

/// Case-insensitive, constant-time comparison of two hex signatures.
pub fn equals_case_insensitive(a: &str, b: &str) -> bool {
    let a = a.to_ascii_uppercase();
    let b = b.to_ascii_uppercase();
    if a.len() != b.len() {
        return false;
    }
    a.as_bytes().ct_eq(b.as_bytes()).into()
}
