//! # payments-rs
//!
//! Payment method records (credit card and PayPal) behind a validated
//! CRUD + query REST API.
//!
//! ## Features
//!
//! - **Two payment variants**: each record carries exactly one of credit card
//!   or PayPal details, checked against the declared type
//! - **Field-precise validation**: every rejection names the offending field
//! - **Exact-match queries**: filter by owner, order, availability and type
//! - **Pluggable storage**: the service talks to a `PaymentStore` trait
//! - **Mutation events**: successful writes are broadcast on an event bus
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use payments::prelude::*;
//!
//! let service = PaymentService::new(
//!     InMemoryPaymentStore::new(),
//!     VariantCodec::new(CodecConfig::default()),
//! );
//!
//! let payment = service
//!     .create(PaymentRequest {
//!         customer_id: 1,
//!         order_id: 10,
//!         available: true,
//!         payment_type: "paypal".to_string(),
//!         info: json!({
//!             "email": "jane@example.com",
//!             "phone_number": "+15551234567",
//!             "token": "tok_1"
//!         }),
//!     })
//!     .await?;
//!
//! let toggled = service.toggle_availability(&payment.id).await?;
//! assert!(!toggled.available);
//! ```

pub mod config;
pub mod core;
pub mod server;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core ===
    pub use crate::core::{
        CodecConfig, CreditCardInfo, EventBus, EventEnvelope, PaymentDraft, PaymentError,
        PaymentEvent, PaymentId, PaymentInfo, PaymentQuery, PaymentRecord, PaymentRequest,
        PaymentService, PaymentStore, PaymentType, PaypalInfo, VariantCodec,
    };

    // === Storage ===
    pub use crate::storage::InMemoryPaymentStore;

    // === Config ===
    pub use crate::config::PaymentsConfig;

    // === Server ===
    pub use crate::server::{AppState, ServerBuilder};

    // === External dependencies ===
    pub use async_trait::async_trait;
    pub use serde::{Deserialize, Serialize};
    pub use serde_json::{Value, json};
}
