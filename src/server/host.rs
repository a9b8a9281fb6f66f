//! Server host for transport-agnostic API exposure
//!
//! The host holds everything an exposure needs (the service and the loaded
//! configuration) without knowing anything about HTTP.

use crate::config::PaymentsConfig;
use crate::core::codec::VariantCodec;
use crate::core::events::EventBus;
use crate::core::service::PaymentService;
use crate::core::store::PaymentStore;
use std::sync::Arc;

/// Host context containing all service state
pub struct ServerHost {
    pub config: Arc<PaymentsConfig>,
    pub service: PaymentService,
}

impl ServerHost {
    /// Wire the service from a store and configuration
    ///
    /// The event bus is attached unless `events.capacity` is 0.
    pub fn new(store: Arc<dyn PaymentStore>, config: PaymentsConfig) -> Self {
        let codec = VariantCodec::new(config.validation.clone());
        let mut service = PaymentService::from_arc(store, codec);
        if config.events.capacity > 0 {
            service = service.with_event_bus(EventBus::new(config.events.capacity));
        }

        Self {
            config: Arc::new(config),
            service,
        }
    }

    /// Get a reference to the event bus (if configured)
    pub fn event_bus(&self) -> Option<&EventBus> {
        self.service.event_bus()
    }
}
