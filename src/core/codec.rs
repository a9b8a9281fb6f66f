//! Variant codec
//!
//! Turns a raw JSON payload into a canonical [`PaymentInfo`] for one of the
//! known variants. This is the only place that dispatches on the payment
//! type; everything else handles `PaymentInfo` as a whole.
//!
//! Normalization rules:
//! - string fields are trimmed
//! - `expiration_month` / `expiration_year` accept numbers or numeric strings
//! - fields of the other variant, and unknown keys, are dropped

use crate::core::error::{PaymentError, Result};
use crate::core::payment::{CreditCardInfo, PaymentInfo, PaymentType, PaypalInfo};
use chrono::Datelike;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::sync::OnceLock;
use validator::{ValidateEmail, ValidateLength};

/// Limits applied by the codec
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodecConfig {
    pub card_number_min_digits: u64,
    pub card_number_max_digits: u64,
    pub card_holder_max_len: u64,
    /// Earliest accepted expiration year; the current year when unset
    pub min_expiration_year: Option<i32>,
    pub max_expiration_year: i32,
    pub email_max_len: u64,
    pub phone_max_len: u64,
    pub token_max_len: u64,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            card_number_min_digits: 12,
            card_number_max_digits: 19,
            card_holder_max_len: 30,
            min_expiration_year: None,
            max_expiration_year: 9999,
            email_max_len: 254,
            phone_max_len: 20,
            token_max_len: 64,
        }
    }
}

/// Validates and normalizes variant payloads
#[derive(Debug, Clone, Default)]
pub struct VariantCodec {
    config: CodecConfig,
}

impl VariantCodec {
    pub fn new(config: CodecConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    /// Resolve a raw `type` value, failing with `UnsupportedVariant`
    pub fn resolve_type(&self, raw: &str) -> Result<PaymentType> {
        PaymentType::parse(raw).ok_or_else(|| PaymentError::unsupported_variant(raw))
    }

    /// Validate `raw` against the shape selected by `payment_type`
    pub fn validate(&self, payment_type: &str, raw: &Value) -> Result<PaymentInfo> {
        let payment_type = self.resolve_type(payment_type)?;
        self.validate_as(payment_type, raw)
    }

    pub fn validate_as(&self, payment_type: PaymentType, raw: &Value) -> Result<PaymentInfo> {
        let fields = match raw {
            Value::Object(fields) => fields,
            Value::Null => return Err(PaymentError::validation("info", "is required")),
            _ => return Err(PaymentError::validation("info", "must be an object")),
        };

        match payment_type {
            PaymentType::CreditCard => self.credit_card(fields).map(PaymentInfo::CreditCard),
            PaymentType::Paypal => self.paypal(fields).map(PaymentInfo::Paypal),
        }
    }

    fn min_expiration_year(&self) -> i32 {
        self.config
            .min_expiration_year
            .unwrap_or_else(|| chrono::Utc::now().year())
    }

    fn credit_card(&self, fields: &Map<String, Value>) -> Result<CreditCardInfo> {
        let config = &self.config;

        let credit_card_number = text(fields, "credit_card_number")?;
        digits(
            "credit_card_number",
            &credit_card_number,
            config.card_number_min_digits,
            config.card_number_max_digits,
        )?;

        let card_holder_name = text(fields, "card_holder_name")?;
        if !card_holder_name.validate_length(None, Some(config.card_holder_max_len), None) {
            return Err(PaymentError::validation(
                "card_holder_name",
                format!("must be at most {} characters", config.card_holder_max_len),
            ));
        }

        let month = integer(fields, "expiration_month")?;
        let expiration_month = u8::try_from(month)
            .ok()
            .filter(|m| (1..=12).contains(m))
            .ok_or_else(|| PaymentError::validation("expiration_month", "must be between 1 and 12"))?;

        let min_year = self.min_expiration_year();
        let year = integer(fields, "expiration_year")?;
        let expiration_year = i32::try_from(year)
            .ok()
            .filter(|y| (min_year..=config.max_expiration_year).contains(y))
            .and_then(|y| u16::try_from(y).ok())
            .ok_or_else(|| {
                PaymentError::validation(
                    "expiration_year",
                    format!(
                        "must be between {} and {}",
                        min_year, config.max_expiration_year
                    ),
                )
            })?;

        let security_code = text(fields, "security_code")?;
        digits("security_code", &security_code, 3, 4)?;

        Ok(CreditCardInfo {
            credit_card_number,
            card_holder_name,
            expiration_month,
            expiration_year,
            security_code,
        })
    }

    fn paypal(&self, fields: &Map<String, Value>) -> Result<PaypalInfo> {
        let config = &self.config;

        let email = text(fields, "email")?;
        if !email.validate_length(None, Some(config.email_max_len), None)
            || !email.validate_email()
            || !is_basic_email(&email)
        {
            return Err(PaymentError::validation(
                "email",
                "must be a valid email address",
            ));
        }

        // Free-form: national formats and extensions are all accepted
        let phone_number = text(fields, "phone_number")?;
        if !phone_number.validate_length(None, Some(config.phone_max_len), None) {
            return Err(PaymentError::validation(
                "phone_number",
                format!("must be at most {} characters", config.phone_max_len),
            ));
        }

        let token = text(fields, "token")?;
        if !token.validate_length(None, Some(config.token_max_len), None) {
            return Err(PaymentError::validation(
                "token",
                format!("must be at most {} characters", config.token_max_len),
            ));
        }

        Ok(PaypalInfo {
            email,
            phone_number,
            token,
        })
    }
}

fn required<'a>(fields: &'a Map<String, Value>, field: &'static str) -> Result<&'a Value> {
    match fields.get(field) {
        None | Some(Value::Null) => Err(PaymentError::validation(field, "is required")),
        Some(value) => Ok(value),
    }
}

/// Non-empty trimmed string
fn text(fields: &Map<String, Value>, field: &'static str) -> Result<String> {
    let value = required(fields, field)?
        .as_str()
        .ok_or_else(|| PaymentError::validation(field, "must be a string"))?
        .trim();

    if value.is_empty() {
        return Err(PaymentError::validation(field, "must not be empty"));
    }
    Ok(value.to_string())
}

/// Whole number given either as a JSON number or a numeric string
fn integer(fields: &Map<String, Value>, field: &'static str) -> Result<i64> {
    let value = required(fields, field)?;
    let parsed = match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64)),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    };
    parsed.ok_or_else(|| PaymentError::validation(field, "must be an integer"))
}

fn digits(field: &'static str, value: &str, min: u64, max: u64) -> Result<()> {
    static DIGITS_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = DIGITS_REGEX.get_or_init(|| Regex::new(r"^[0-9]+$").unwrap());

    if !regex.is_match(value) {
        return Err(PaymentError::validation(field, "must contain only digits"));
    }
    if !value.validate_length(Some(min), Some(max), None) {
        return Err(PaymentError::validation(
            field,
            format!("must be {} to {} digits long", min, max),
        ));
    }
    Ok(())
}

fn is_basic_email(email: &str) -> bool {
    static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = EMAIL_REGEX.get_or_init(|| {
        Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").unwrap()
    });
    regex.is_match(email)
}
