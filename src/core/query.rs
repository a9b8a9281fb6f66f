//! Payment query filter
//!
//! A [`PaymentQuery`] holds up to four exact-match criteria combined with
//! logical AND. A missing criterion places no constraint, so the empty
//! query matches every record.
//!
//! # Example
//! ```rust,ignore
//! // Typed
//! let query = PaymentQuery::new().customer(7).available(true);
//!
//! // From a query string: GET /payments?available=Yes&type=PayPal
//! let query = PaymentQuery::from_pairs([("available", "Yes"), ("type", "PayPal")])?;
//! ```

use crate::core::error::{PaymentError, Result};
use crate::core::flag::parse_flag;
use crate::core::payment::{PaymentRecord, PaymentType};
use serde::Serialize;
use serde_json::Value;

/// Recognised criterion names
pub const QUERY_FIELDS: [&str; 4] = ["customer_id", "order_id", "available", "type"];

/// Exact-match criteria over payment records
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PaymentQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub available: Option<bool>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub payment_type: Option<PaymentType>,
}

impl PaymentQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn customer(mut self, customer_id: u64) -> Self {
        self.customer_id = Some(customer_id);
        self
    }

    pub fn order(mut self, order_id: u64) -> Self {
        self.order_id = Some(order_id);
        self
    }

    pub fn available(mut self, available: bool) -> Self {
        self.available = Some(available);
        self
    }

    pub fn of_type(mut self, payment_type: PaymentType) -> Self {
        self.payment_type = Some(payment_type);
        self
    }

    /// Build a query from raw string criteria
    ///
    /// Blank values are treated as absent, which is what an HTML form sends
    /// for a field left empty. Unknown names fail with `InvalidQuery`, and
    /// so does a name repeated with a different value.
    pub fn from_pairs<I, K, V>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut query = Self::default();
        for (key, value) in pairs {
            let (key, value) = (key.as_ref(), value.as_ref());
            let earlier = query.clone();
            query.set(key, value)?;

            let consistent = keep_earlier(earlier.customer_id, &mut query.customer_id)
                & keep_earlier(earlier.order_id, &mut query.order_id)
                & keep_earlier(earlier.available, &mut query.available)
                & keep_earlier(earlier.payment_type, &mut query.payment_type);
            if !consistent {
                return Err(PaymentError::invalid_query(
                    key,
                    value,
                    "given more than once with different values",
                ));
            }
        }
        Ok(query)
    }

    /// Build a query from a JSON object of criteria
    ///
    /// Values may be JSON numbers, booleans or strings; `null` is absent.
    pub fn from_json(criteria: &Value) -> Result<Self> {
        let object = match criteria {
            Value::Null => return Ok(Self::default()),
            Value::Object(object) => object,
            other => {
                return Err(PaymentError::invalid_query(
                    "filter",
                    other.to_string(),
                    "criteria must be an object",
                ));
            }
        };

        let mut query = Self::default();
        for (key, value) in object {
            match value {
                Value::Null => {}
                Value::String(s) => query.set(key, s)?,
                Value::Bool(b) => query.set(key, &b.to_string())?,
                Value::Number(n) => query.set(key, &n.to_string())?,
                other => {
                    return Err(PaymentError::invalid_query(
                        key.as_str(),
                        other.to_string(),
                        "must be a scalar value",
                    ));
                }
            }
        }
        Ok(query)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let trimmed = value.trim();

        match key {
            "customer_id" => self.customer_id = positive(key, trimmed)?,
            "order_id" => self.order_id = positive(key, trimmed)?,
            "available" => {
                self.available = if trimmed.is_empty() {
                    None
                } else {
                    Some(parse_flag(trimmed).ok_or_else(|| {
                        PaymentError::invalid_query(key, value, "must be true/false or Yes/No")
                    })?)
                }
            }
            "type" => {
                self.payment_type = if trimmed.is_empty() {
                    None
                } else {
                    Some(PaymentType::parse(trimmed).ok_or_else(|| {
                        PaymentError::invalid_query(key, value, "must be credit_card or paypal")
                    })?)
                }
            }
            _ => {
                return Err(PaymentError::invalid_query(
                    key,
                    value,
                    format!("unknown filter, expected one of {:?}", QUERY_FIELDS),
                ));
            }
        }
        Ok(())
    }

    /// True when no criterion is set
    pub fn is_empty(&self) -> bool {
        self.customer_id.is_none()
            && self.order_id.is_none()
            && self.available.is_none()
            && self.payment_type.is_none()
    }

    /// Test a record against every set criterion
    pub fn matches(&self, record: &PaymentRecord) -> bool {
        self.customer_id.is_none_or(|id| record.customer_id == id)
            && self.order_id.is_none_or(|id| record.order_id == id)
            && self.available.is_none_or(|a| record.available == a)
            && self.payment_type.is_none_or(|t| record.payment_type() == t)
    }

    /// Keep the matching records, preserving their order
    pub fn apply(&self, records: Vec<PaymentRecord>) -> Vec<PaymentRecord> {
        if self.is_empty() {
            return records;
        }
        records.into_iter().filter(|r| self.matches(r)).collect()
    }
}

/// Reconcile a repeated criterion with its earlier value
///
/// A blank repeat keeps the earlier value. Returns false when both are set
/// and disagree.
fn keep_earlier<T: PartialEq + Copy>(earlier: Option<T>, current: &mut Option<T>) -> bool {
    match (earlier, *current) {
        (Some(_), None) => {
            *current = earlier;
            true
        }
        (Some(a), Some(b)) => a == b,
        (None, _) => true,
    }
}

fn positive(key: &str, value: &str) -> Result<Option<u64>> {
    if value.is_empty() {
        return Ok(None);
    }
    value
        .parse::<u64>()
        .ok()
        .filter(|v| *v > 0)
        .map(Some)
        .ok_or_else(|| PaymentError::invalid_query(key, value, "must be a positive integer"))
}
