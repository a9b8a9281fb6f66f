//! In-memory implementation of PaymentStore for testing and development

use crate::core::error::{PaymentError, Result};
use crate::core::payment::{PaymentDraft, PaymentId, PaymentRecord};
use crate::core::store::{Mutation, PaymentStore};
use async_trait::async_trait;
use indexmap::IndexMap;
use std::sync::{Arc, Mutex, RwLock};

/// A record plus its removal marker, guarded by its own mutex
struct Slot {
    record: PaymentRecord,
    removed: bool,
}

type SharedSlot = Arc<Mutex<Slot>>;

/// In-memory payment store
///
/// Records live in an insertion-ordered map of per-record slots. The map
/// lock is only held for lookups and structural changes; reads and writes
/// of a record happen under that record's own mutex, so operations on
/// different ids never wait on each other.
#[derive(Clone, Default)]
pub struct InMemoryPaymentStore {
    records: Arc<RwLock<IndexMap<PaymentId, SharedSlot>>>,
}

impl InMemoryPaymentStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&self, id: &PaymentId) -> Result<Option<SharedSlot>> {
        let records = self
            .records
            .read()
            .map_err(|e| PaymentError::storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(records.get(id).cloned())
    }
}

fn lock(slot: &SharedSlot) -> Result<std::sync::MutexGuard<'_, Slot>> {
    slot.lock()
        .map_err(|e| PaymentError::storage(format!("Failed to acquire record lock: {}", e)))
}

#[async_trait]
impl PaymentStore for InMemoryPaymentStore {
    async fn insert(&self, draft: PaymentDraft) -> Result<PaymentRecord> {
        let mut records = self
            .records
            .write()
            .map_err(|e| PaymentError::storage(format!("Failed to acquire write lock: {}", e)))?;

        let mut id = PaymentId::new();
        while records.contains_key(&id) {
            id = PaymentId::new();
        }

        let record = draft.into_record(id);
        records.insert(
            id,
            Arc::new(Mutex::new(Slot {
                record: record.clone(),
                removed: false,
            })),
        );
        tracing::debug!(payment_id = %id, "Stored payment");

        Ok(record)
    }

    async fn get(&self, id: &PaymentId) -> Result<Option<PaymentRecord>> {
        let Some(slot) = self.slot(id)? else {
            return Ok(None);
        };
        let slot = lock(&slot)?;

        Ok((!slot.removed).then(|| slot.record.clone()))
    }

    async fn list(&self) -> Result<Vec<PaymentRecord>> {
        let records = self
            .records
            .read()
            .map_err(|e| PaymentError::storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut listed = Vec::with_capacity(records.len());
        for slot in records.values() {
            let slot = lock(slot)?;
            if !slot.removed {
                listed.push(slot.record.clone());
            }
        }
        Ok(listed)
    }

    async fn modify(&self, id: &PaymentId, mutation: Mutation) -> Result<Option<PaymentRecord>> {
        let Some(slot) = self.slot(id)? else {
            return Ok(None);
        };
        let mut slot = lock(&slot)?;
        if slot.removed {
            return Ok(None);
        }

        // Work on a copy so a failed mutation leaves nothing behind
        let mut candidate = slot.record.clone();
        mutation(&mut candidate)?;
        slot.record = candidate.clone();
        tracing::debug!(payment_id = %id, "Modified payment");

        Ok(Some(candidate))
    }

    async fn remove(&self, id: &PaymentId) -> Result<Option<PaymentRecord>> {
        let removed = {
            let mut records = self.records.write().map_err(|e| {
                PaymentError::storage(format!("Failed to acquire write lock: {}", e))
            })?;
            records.shift_remove(id)
        };
        let Some(slot) = removed else {
            return Ok(None);
        };

        // A modify that already holds this slot finishes first; later ones
        // see the marker and report the record as gone.
        let mut slot = lock(&slot)?;
        slot.removed = true;
        tracing::debug!(payment_id = %id, "Removed payment");

        Ok(Some(slot.record.clone()))
    }
}
