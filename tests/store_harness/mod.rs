//! Shared test harness for payment store testing
//!
//! Provides draft and request builders plus the `payment_store_tests!`
//! conformance suite.
//!
//! # Usage
//!
//! From any integration test file in `tests/`:
//! ```rust,ignore
//! #[macro_use]
//! mod store_harness;
//! use store_harness::*;
//! ```

#![allow(dead_code)]

#[macro_use]
pub mod store_tests;

use payments::core::{
    CodecConfig, CreditCardInfo, PaymentDraft, PaymentInfo, PaymentRequest, PaypalInfo,
    VariantCodec,
};
use serde_json::{Value, json};

/// Codec with a fixed expiration floor so fixtures do not age
pub fn test_codec() -> VariantCodec {
    VariantCodec::new(CodecConfig {
        min_expiration_year: Some(2026),
        ..CodecConfig::default()
    })
}

pub fn card_info() -> Value {
    json!({
        "credit_card_number": "4111111111111111",
        "card_holder_name": "A Lee",
        "expiration_month": 9,
        "expiration_year": 2030,
        "security_code": "123"
    })
}

pub fn paypal_info() -> Value {
    json!({
        "email": "jane@example.com",
        "phone_number": "+15551234567",
        "token": "tok_123"
    })
}

pub fn card_request(customer_id: i64, order_id: i64) -> PaymentRequest {
    PaymentRequest {
        customer_id,
        order_id,
        available: true,
        payment_type: "credit_card".to_string(),
        info: card_info(),
    }
}

pub fn paypal_request(customer_id: i64, order_id: i64) -> PaymentRequest {
    PaymentRequest {
        customer_id,
        order_id,
        available: true,
        payment_type: "paypal".to_string(),
        info: paypal_info(),
    }
}

pub fn card_draft(customer_id: u64, order_id: u64) -> PaymentDraft {
    PaymentDraft {
        customer_id,
        order_id,
        available: true,
        info: PaymentInfo::CreditCard(CreditCardInfo {
            credit_card_number: "4111111111111111".to_string(),
            card_holder_name: "A Lee".to_string(),
            expiration_month: 9,
            expiration_year: 2030,
            security_code: "123".to_string(),
        }),
    }
}

pub fn paypal_draft(customer_id: u64, order_id: u64) -> PaymentDraft {
    PaymentDraft {
        customer_id,
        order_id,
        available: false,
        info: PaymentInfo::Paypal(PaypalInfo {
            email: "jane@example.com".to_string(),
            phone_number: "+15551234567".to_string(),
            token: "tok_123".to_string(),
        }),
    }
}
