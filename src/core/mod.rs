//! Core module containing the payment model, validation and service

pub mod codec;
pub mod error;
pub mod events;
pub mod flag;
pub mod payment;
pub mod query;
pub mod service;
pub mod store;

pub use codec::{CodecConfig, VariantCodec};
pub use error::{ErrorResponse, PaymentError};
pub use events::{EventBus, EventEnvelope, PaymentEvent};
pub use payment::{
    CreditCardInfo, PaymentDraft, PaymentId, PaymentInfo, PaymentRecord, PaymentRequest,
    PaymentType, PaypalInfo,
};
pub use query::PaymentQuery;
pub use service::PaymentService;
pub use store::{Mutation, PaymentStore};
