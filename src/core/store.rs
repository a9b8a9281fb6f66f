//! Record store trait
//!
//! The service is agnostic to how payments are persisted. A store only has
//! to issue unique ids and offer an atomic read-then-write per record.

use crate::core::error::Result;
use crate::core::payment::{PaymentDraft, PaymentId, PaymentRecord};
use async_trait::async_trait;

/// In-place change applied to a single record by [`PaymentStore::modify`]
///
/// Returning an error aborts the change; the stored record stays as it was.
pub type Mutation = Box<dyn FnOnce(&mut PaymentRecord) -> Result<()> + Send>;

/// Storage for payment records
///
/// Implementations must serialize `modify` and `remove` calls that target the
/// same id, and must never hand out an id twice.
#[async_trait]
pub trait PaymentStore: Send + Sync {
    /// Persist a draft under a freshly issued id
    async fn insert(&self, draft: PaymentDraft) -> Result<PaymentRecord>;

    /// Get a record by id
    async fn get(&self, id: &PaymentId) -> Result<Option<PaymentRecord>>;

    /// All records in insertion order
    async fn list(&self) -> Result<Vec<PaymentRecord>>;

    /// Apply `mutation` to the record atomically
    ///
    /// Returns `None` when no record has this id.
    async fn modify(&self, id: &PaymentId, mutation: Mutation) -> Result<Option<PaymentRecord>>;

    /// Remove a record permanently, returning it
    async fn remove(&self, id: &PaymentId) -> Result<Option<PaymentRecord>>;
}
