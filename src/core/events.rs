//! Payment event bus
//!
//! Successful mutations are published on a `tokio::sync::broadcast` channel
//! so listeners (audit logs, push notifications) can follow the store without
//! polling it. Publishing never fails the mutation that triggered it.
//!
//! ```rust,ignore
//! let bus = EventBus::new(1024);
//! let mut rx = bus.subscribe();
//!
//! let service = PaymentService::new(store, codec).with_event_bus(bus);
//! service.create(request).await?;
//!
//! if let Ok(envelope) = rx.recv().await {
//!     println!("{} {}", envelope.event.action(), envelope.event.payment_id());
//! }
//! ```

use crate::core::payment::{PaymentId, PaymentRecord};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use uuid::Uuid;

/// A committed change to a payment
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum PaymentEvent {
    Created { payment: PaymentRecord },
    Updated { payment: PaymentRecord },
    AvailabilityToggled { payment_id: PaymentId, available: bool },
    Deleted { payment_id: PaymentId },
}

impl PaymentEvent {
    pub fn payment_id(&self) -> PaymentId {
        match self {
            PaymentEvent::Created { payment } | PaymentEvent::Updated { payment } => payment.id,
            PaymentEvent::AvailabilityToggled { payment_id, .. }
            | PaymentEvent::Deleted { payment_id } => *payment_id,
        }
    }

    pub fn action(&self) -> &'static str {
        match self {
            PaymentEvent::Created { .. } => "created",
            PaymentEvent::Updated { .. } => "updated",
            PaymentEvent::AvailabilityToggled { .. } => "availability_toggled",
            PaymentEvent::Deleted { .. } => "deleted",
        }
    }
}

/// Envelope wrapping an event with metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventEnvelope {
    /// Unique event ID
    pub id: Uuid,
    /// When the event occurred
    pub timestamp: DateTime<Utc>,
    pub event: PaymentEvent,
}

impl EventEnvelope {
    pub fn new(event: PaymentEvent) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            event,
        }
    }
}

/// Broadcast-based event bus
///
/// Cheap to clone; all clones share the same channel.
#[derive(Debug, Clone)]
pub struct EventBus {
    sender: broadcast::Sender<EventEnvelope>,
}

impl EventBus {
    /// Create a bus buffering up to `capacity` events per slow receiver
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish an event to all subscribers
    ///
    /// Returns the number of receivers that will see it. With no
    /// subscribers the event is dropped.
    pub fn publish(&self, event: PaymentEvent) -> usize {
        let envelope = EventEnvelope::new(event);
        // send() returns Err only if there are no receivers, which is fine
        self.sender.send(envelope).unwrap_or(0)
    }

    /// Subscribe to events published from now on
    pub fn subscribe(&self) -> broadcast::Receiver<EventEnvelope> {
        self.sender.subscribe()
    }

    pub fn receiver_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(1024)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_serializes_action_tag() {
        let id = PaymentId::new();
        let event = PaymentEvent::AvailabilityToggled {
            payment_id: id,
            available: false,
        };

        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["action"], "availability_toggled");
        assert_eq!(json["payment_id"], id.to_string());
        assert_eq!(json["available"], false);
        assert_eq!(event.payment_id(), id);
    }

    #[tokio::test]
    async fn test_event_bus_publish_subscribe() {
        let bus = EventBus::new(16);
        let mut rx = bus.subscribe();
        let id = PaymentId::new();

        assert_eq!(bus.publish(PaymentEvent::Deleted { payment_id: id }), 1);

        let received = rx.recv().await.unwrap();
        assert_eq!(received.event.payment_id(), id);
        assert_eq!(received.event.action(), "deleted");
    }

    #[test]
    fn test_event_bus_publish_without_subscribers() {
        let bus = EventBus::default();
        let receivers = bus.publish(PaymentEvent::Deleted {
            payment_id: PaymentId::new(),
        });
        assert_eq!(receivers, 0);
    }

    #[test]
    fn test_event_bus_clone_shares_channel() {
        let bus = EventBus::new(16);
        let _rx = bus.subscribe();

        let bus2 = bus.clone();
        assert_eq!(bus2.receiver_count(), 1);
    }
}
