//! Payment service
//!
//! The orchestrator behind every transport: it validates input through the
//! [`VariantCodec`], filters with [`PaymentQuery`] and reads or mutates the
//! [`PaymentStore`]. Each call is a short synchronous unit of work; failed
//! creates and updates leave the store exactly as they found it.

use crate::core::codec::VariantCodec;
use crate::core::error::{PaymentError, Result};
use crate::core::events::{EventBus, PaymentEvent};
use crate::core::payment::{PaymentDraft, PaymentId, PaymentRecord, PaymentRequest, owner_id};
use crate::core::query::PaymentQuery;
use crate::core::store::PaymentStore;
use std::sync::Arc;

/// CRUD, toggle and query operations over payment records
#[derive(Clone)]
pub struct PaymentService {
    store: Arc<dyn PaymentStore>,
    codec: Arc<VariantCodec>,
    event_bus: Option<EventBus>,
}

impl PaymentService {
    pub fn new(store: impl PaymentStore + 'static, codec: VariantCodec) -> Self {
        Self::from_arc(Arc::new(store), codec)
    }

    pub fn from_arc(store: Arc<dyn PaymentStore>, codec: VariantCodec) -> Self {
        Self {
            store,
            codec: Arc::new(codec),
            event_bus: None,
        }
    }

    /// Publish committed mutations on `bus`
    pub fn with_event_bus(mut self, bus: EventBus) -> Self {
        self.event_bus = Some(bus);
        self
    }

    pub fn codec(&self) -> &VariantCodec {
        &self.codec
    }

    pub fn event_bus(&self) -> Option<&EventBus> {
        self.event_bus.as_ref()
    }

    fn publish(&self, event: PaymentEvent) {
        if let Some(bus) = &self.event_bus {
            bus.publish(event);
        }
    }

    /// Validate and store a new payment
    pub async fn create(&self, request: PaymentRequest) -> Result<PaymentRecord> {
        tracing::info!(
            customer_id = request.customer_id,
            order_id = request.order_id,
            payment_type = %request.payment_type,
            "Creating payment"
        );

        let draft = PaymentDraft::from_request(&request, &self.codec)?;
        let created = self.store.insert(draft).await?;

        tracing::info!(payment_id = %created.id, "Payment created");
        self.publish(PaymentEvent::Created {
            payment: created.clone(),
        });
        Ok(created)
    }

    pub async fn get(&self, id: &PaymentId) -> Result<PaymentRecord> {
        tracing::info!(payment_id = %id, "Processing lookup");
        self.store
            .get(id)
            .await?
            .ok_or_else(|| PaymentError::not_found(id))
    }

    /// All payments in insertion order
    pub async fn list(&self) -> Result<Vec<PaymentRecord>> {
        tracing::info!("Processing all payments");
        self.store.list().await
    }

    /// Payments matching every criterion of `query`
    pub async fn query(&self, query: &PaymentQuery) -> Result<Vec<PaymentRecord>> {
        tracing::info!(
            customer_id = ?query.customer_id,
            order_id = ?query.order_id,
            available = ?query.available,
            payment_type = ?query.payment_type,
            "Processing query"
        );
        let records = self.store.list().await?;
        Ok(query.apply(records))
    }

    /// Replace `available` and `info` of an existing payment
    ///
    /// Ownership ids and the payment type are fixed at creation: a request
    /// carrying different values is rejected with a validation error on that
    /// field. All checks run under the record's lock, and any failure leaves
    /// the stored record unchanged.
    pub async fn update(&self, id: &PaymentId, request: PaymentRequest) -> Result<PaymentRecord> {
        tracing::info!(payment_id = %id, "Updating payment");

        let codec = self.codec.clone();
        let updated = self
            .store
            .modify(
                id,
                Box::new(move |record: &mut PaymentRecord| {
                    if owner_id("customer_id", request.customer_id)? != record.customer_id {
                        return Err(PaymentError::validation(
                            "customer_id",
                            "cannot be changed after creation",
                        ));
                    }
                    if owner_id("order_id", request.order_id)? != record.order_id {
                        return Err(PaymentError::validation(
                            "order_id",
                            "cannot be changed after creation",
                        ));
                    }

                    let payment_type = codec.resolve_type(&request.payment_type)?;
                    if payment_type != record.payment_type() {
                        return Err(PaymentError::validation(
                            "type",
                            format!(
                                "cannot be changed after creation (stored as {})",
                                record.payment_type()
                            ),
                        ));
                    }

                    let info = codec.validate_as(payment_type, &request.info)?;
                    record.available = request.available;
                    record.info = info;
                    Ok(())
                }),
            )
            .await?
            .ok_or_else(|| PaymentError::not_found(id))?;

        tracing::info!(payment_id = %id, "Payment updated");
        self.publish(PaymentEvent::Updated {
            payment: updated.clone(),
        });
        Ok(updated)
    }

    /// Flip `available`, leaving everything else alone
    pub async fn toggle_availability(&self, id: &PaymentId) -> Result<PaymentRecord> {
        tracing::info!(payment_id = %id, "Toggling payment availability");

        let toggled = self
            .store
            .modify(
                id,
                Box::new(|record: &mut PaymentRecord| {
                    record.available = !record.available;
                    Ok(())
                }),
            )
            .await?
            .ok_or_else(|| PaymentError::not_found(id))?;

        self.publish(PaymentEvent::AvailabilityToggled {
            payment_id: toggled.id,
            available: toggled.available,
        });
        Ok(toggled)
    }

    /// Remove a payment permanently
    ///
    /// Deleting an id that no longer exists, including a second delete of
    /// the same id, fails with `NotFound`.
    pub async fn delete(&self, id: &PaymentId) -> Result<()> {
        tracing::info!(payment_id = %id, "Deleting payment");

        self.store
            .remove(id)
            .await?
            .ok_or_else(|| PaymentError::not_found(id))?;

        self.publish(PaymentEvent::Deleted { payment_id: *id });
        Ok(())
    }
}
