//! Payment record model
//!
//! A payment belongs to a customer and an order and carries exactly one
//! variant payload: a credit card or a PayPal account. The variant tag and
//! the payload travel together as [`PaymentInfo`], so a record can never
//! hold a payload that disagrees with its `type`.

use crate::core::codec::VariantCodec;
use crate::core::error::{PaymentError, Result};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;
use uuid::Uuid;

/// Opaque payment identifier issued by the store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PaymentId(Uuid);

impl PaymentId {
    /// Generate a fresh random identifier
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for PaymentId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for PaymentId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl fmt::Display for PaymentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for PaymentId {
    type Err = PaymentError;

    /// An id that cannot be parsed can never have been issued, so it is
    /// reported as `NotFound` with the raw input.
    fn from_str(s: &str) -> Result<Self> {
        Uuid::parse_str(s.trim())
            .map(Self)
            .map_err(|_| PaymentError::not_found(s))
    }
}

/// The payment variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentType {
    CreditCard,
    Paypal,
}

impl PaymentType {
    /// Canonical lowercase name
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentType::CreditCard => "credit_card",
            PaymentType::Paypal => "paypal",
        }
    }

    /// Resolve a user-supplied variant name
    ///
    /// Case-insensitive; spaces and dashes count as underscores and the
    /// underscore is optional, so `"Credit Card"`, `"credit-card"` and
    /// `"CreditCard"` all resolve to [`PaymentType::CreditCard`].
    pub fn parse(input: &str) -> Option<Self> {
        let key: String = input
            .trim()
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_'))
            .flat_map(char::to_lowercase)
            .collect();

        match key.as_str() {
            "creditcard" => Some(PaymentType::CreditCard),
            "paypal" => Some(PaymentType::Paypal),
            _ => None,
        }
    }
}

impl fmt::Display for PaymentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Credit card payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreditCardInfo {
    pub credit_card_number: String,
    pub card_holder_name: String,
    pub expiration_month: u8,
    pub expiration_year: u16,
    pub security_code: String,
}

/// PayPal payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaypalInfo {
    pub email: String,
    pub phone_number: String,
    pub token: String,
}

/// Variant payload tagged by its payment type
///
/// Serializes as two sibling fields, `"type"` and `"info"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "info", rename_all = "snake_case")]
pub enum PaymentInfo {
    CreditCard(CreditCardInfo),
    Paypal(PaypalInfo),
}

impl PaymentInfo {
    pub fn payment_type(&self) -> PaymentType {
        match self {
            PaymentInfo::CreditCard(_) => PaymentType::CreditCard,
            PaymentInfo::Paypal(_) => PaymentType::Paypal,
        }
    }

    pub fn as_credit_card(&self) -> Option<&CreditCardInfo> {
        match self {
            PaymentInfo::CreditCard(info) => Some(info),
            PaymentInfo::Paypal(_) => None,
        }
    }

    pub fn as_paypal(&self) -> Option<&PaypalInfo> {
        match self {
            PaymentInfo::Paypal(info) => Some(info),
            PaymentInfo::CreditCard(_) => None,
        }
    }
}

/// Plain input for create and update
///
/// `info` is the raw variant payload; it is only trusted once the codec
/// has turned it into a [`PaymentInfo`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentRequest {
    pub customer_id: i64,
    pub order_id: i64,
    pub available: bool,
    #[serde(rename = "type")]
    pub payment_type: String,
    pub info: serde_json::Value,
}

/// A validated payment that has not been stored yet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentDraft {
    pub customer_id: u64,
    pub order_id: u64,
    pub available: bool,
    pub info: PaymentInfo,
}

impl PaymentDraft {
    /// Build a draft, validating ownership ids and the variant payload
    pub fn new(
        customer_id: i64,
        order_id: i64,
        available: bool,
        payment_type: &str,
        raw_info: &serde_json::Value,
        codec: &VariantCodec,
    ) -> Result<Self> {
        let customer_id = owner_id("customer_id", customer_id)?;
        let order_id = owner_id("order_id", order_id)?;
        let info = codec.validate(payment_type, raw_info)?;

        Ok(Self {
            customer_id,
            order_id,
            available,
            info,
        })
    }

    pub fn from_request(request: &PaymentRequest, codec: &VariantCodec) -> Result<Self> {
        Self::new(
            request.customer_id,
            request.order_id,
            request.available,
            &request.payment_type,
            &request.info,
            codec,
        )
    }

    /// Attach the store-issued id
    pub fn into_record(self, id: PaymentId) -> PaymentRecord {
        PaymentRecord {
            id,
            customer_id: self.customer_id,
            order_id: self.order_id,
            available: self.available,
            info: self.info,
        }
    }
}

/// Customer and order ids are positive integers
pub(crate) fn owner_id(field: &'static str, value: i64) -> Result<u64> {
    u64::try_from(value)
        .ok()
        .filter(|v| *v > 0)
        .ok_or_else(|| PaymentError::validation(field, "must be a positive integer"))
}

/// A stored payment
///
/// Two records are the same entity when their ids match, whatever their
/// payloads; equality, ordering and hashing only look at `id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentRecord {
    pub id: PaymentId,
    pub customer_id: u64,
    pub order_id: u64,
    pub available: bool,
    #[serde(flatten)]
    pub info: PaymentInfo,
}

impl PaymentRecord {
    pub fn payment_type(&self) -> PaymentType {
        self.info.payment_type()
    }
}

impl PartialEq for PaymentRecord {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for PaymentRecord {}

impl Hash for PaymentRecord {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl PartialOrd for PaymentRecord {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for PaymentRecord {
    fn cmp(&self, other: &Self) -> Ordering {
        self.id.cmp(&other.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::codec::CodecConfig;
    use serde_json::json;

    fn codec() -> VariantCodec {
        VariantCodec::new(CodecConfig {
            min_expiration_year: Some(2026),
            ..CodecConfig::default()
        })
    }

    fn paypal_info() -> serde_json::Value {
        json!({"email": "a@b.co", "phone_number": "5551234567", "token": "tok"})
    }

    #[test]
    fn test_payment_type_parse_variants() {
        assert_eq!(PaymentType::parse("credit_card"), Some(PaymentType::CreditCard));
        assert_eq!(PaymentType::parse("Credit Card"), Some(PaymentType::CreditCard));
        assert_eq!(PaymentType::parse("credit-card"), Some(PaymentType::CreditCard));
        assert_eq!(PaymentType::parse("CreditCard"), Some(PaymentType::CreditCard));
        assert_eq!(PaymentType::parse("PayPal"), Some(PaymentType::Paypal));
        assert_eq!(PaymentType::parse(" paypal "), Some(PaymentType::Paypal));
        assert_eq!(PaymentType::parse("bitcoin"), None);
        assert_eq!(PaymentType::parse(""), None);
    }

    #[test]
    fn test_payment_id_parse_garbage_is_not_found() {
        let err = "not-a-uuid".parse::<PaymentId>().unwrap_err();
        assert!(matches!(err, PaymentError::NotFound { ref id } if id == "not-a-uuid"));
    }

    #[test]
    fn test_draft_rejects_non_positive_owner_ids() {
        let codec = codec();
        let err = PaymentDraft::new(0, 1, true, "paypal", &paypal_info(), &codec).unwrap_err();
        assert_eq!(err.field(), Some("customer_id"));

        let err = PaymentDraft::new(1, -4, true, "paypal", &paypal_info(), &codec).unwrap_err();
        assert_eq!(err.field(), Some("order_id"));
    }

    #[test]
    fn test_draft_rejects_bad_payload() {
        let err = PaymentDraft::new(1, 1, true, "paypal", &json!({"token": "t"}), &codec())
            .unwrap_err();
        assert!(matches!(err, PaymentError::Validation { .. }));
    }

    #[test]
    fn test_record_serializes_type_and_info_as_siblings() {
        let record = PaymentDraft::new(1, 10, false, "paypal", &paypal_info(), &codec())
            .unwrap()
            .into_record(PaymentId::new());

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["type"], "paypal");
        assert_eq!(json["info"]["email"], "a@b.co");
        assert_eq!(json["customer_id"], 1);
        assert_eq!(json["available"], false);

        let parsed: PaymentRecord = serde_json::from_value(json).unwrap();
        assert_eq!(parsed.id, record.id);
        assert_eq!(parsed.info, record.info);
    }

    #[test]
    fn test_record_equality_is_by_id() {
        let id = PaymentId::new();
        let a = PaymentDraft::new(1, 10, true, "paypal", &paypal_info(), &codec())
            .unwrap()
            .into_record(id);
        let mut b = a.clone();
        b.available = false;
        b.customer_id = 99;

        assert_eq!(a, b);

        let other = PaymentDraft::new(1, 10, true, "paypal", &paypal_info(), &codec())
            .unwrap()
            .into_record(PaymentId::new());
        assert_ne!(a, other);
        assert_eq!(a.info, other.info);
    }
}
