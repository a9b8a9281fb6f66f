//! Macro-generated test suite for `PaymentStore` contract validation.
//!
//! # Usage
//!
//! ```rust,ignore
//! #[macro_use]
//! mod store_harness;
//!
//! use store_harness::*;
//! use payments::storage::InMemoryPaymentStore;
//!
//! payment_store_tests!(InMemoryPaymentStore::new());
//! ```
//!
//! # Generated Tests
//!
//! - `test_insert_and_get` - insert then retrieve, all fields intact
//! - `test_get_missing` - unknown id returns None
//! - `test_list_empty` / `test_list_insertion_order`
//! - `test_modify_commits` / `test_modify_rollback` / `test_modify_missing`
//! - `test_remove_then_everything_misses`
//! - `test_concurrent_inserts` - parallel inserts issue distinct ids
//! - `test_concurrent_toggles` - parallel modifies on one id are serialized

/// Generate a full `PaymentStore` conformance test suite.
///
/// `$factory` is re-evaluated for each test. For the concurrency tests the
/// store must also be `Clone + 'static` (shared state via Arc).
#[macro_export]
macro_rules! payment_store_tests {
    ($factory:expr) => {
        mod payment_store_contract_tests {
            use super::*;
            use payments::core::error::PaymentError;
            use payments::core::{PaymentId, PaymentRecord, PaymentStore};
            use std::collections::HashSet;

            #[tokio::test]
            async fn test_insert_and_get() {
                let store = $factory;
                let draft = card_draft(1, 10);

                let created = store.insert(draft.clone()).await.unwrap();
                assert_eq!(created.customer_id, 1);
                assert_eq!(created.order_id, 10);
                assert!(created.available);
                assert_eq!(created.info, draft.info);

                let fetched = store.get(&created.id).await.unwrap().unwrap();
                assert_eq!(fetched.id, created.id);
                assert_eq!(fetched.info, draft.info);
            }

            #[tokio::test]
            async fn test_get_missing() {
                let store = $factory;
                assert!(store.get(&PaymentId::new()).await.unwrap().is_none());
            }

            #[tokio::test]
            async fn test_list_empty() {
                let store = $factory;
                assert!(store.list().await.unwrap().is_empty());
            }

            #[tokio::test]
            async fn test_list_insertion_order() {
                let store = $factory;
                let mut ids = Vec::new();
                for customer in 1..=5 {
                    ids.push(store.insert(card_draft(customer, 1)).await.unwrap().id);
                }

                let listed: Vec<_> = store.list().await.unwrap().iter().map(|r| r.id).collect();
                assert_eq!(listed, ids);
            }

            #[tokio::test]
            async fn test_modify_commits() {
                let store = $factory;
                let created = store.insert(paypal_draft(2, 20)).await.unwrap();

                let modified = store
                    .modify(
                        &created.id,
                        Box::new(|record: &mut PaymentRecord| {
                            record.available = true;
                            Ok(())
                        }),
                    )
                    .await
                    .unwrap()
                    .unwrap();
                assert!(modified.available);

                let fetched = store.get(&created.id).await.unwrap().unwrap();
                assert!(fetched.available);
            }

            #[tokio::test]
            async fn test_modify_rollback() {
                let store = $factory;
                let created = store.insert(paypal_draft(2, 20)).await.unwrap();

                let err = store
                    .modify(
                        &created.id,
                        Box::new(|record: &mut PaymentRecord| {
                            record.available = true;
                            record.customer_id = 99;
                            Err(PaymentError::validation("email", "is required"))
                        }),
                    )
                    .await
                    .unwrap_err();
                assert_eq!(err.field(), Some("email"));

                let fetched = store.get(&created.id).await.unwrap().unwrap();
                assert!(!fetched.available);
                assert_eq!(fetched.customer_id, 2);
            }

            #[tokio::test]
            async fn test_modify_missing() {
                let store = $factory;
                let result = store
                    .modify(&PaymentId::new(), Box::new(|_: &mut PaymentRecord| Ok(())))
                    .await
                    .unwrap();
                assert!(result.is_none());
            }

            #[tokio::test]
            async fn test_remove_then_everything_misses() {
                let store = $factory;
                let created = store.insert(card_draft(1, 10)).await.unwrap();

                let removed = store.remove(&created.id).await.unwrap().unwrap();
                assert_eq!(removed.id, created.id);

                assert!(store.get(&created.id).await.unwrap().is_none());
                assert!(store.list().await.unwrap().is_empty());
                assert!(
                    store
                        .modify(&created.id, Box::new(|_: &mut PaymentRecord| Ok(())))
                        .await
                        .unwrap()
                        .is_none()
                );
                assert!(store.remove(&created.id).await.unwrap().is_none());
            }

            #[tokio::test]
            async fn test_concurrent_inserts() {
                let store = $factory;
                let mut handles = Vec::new();
                for customer in 1..=20u64 {
                    let store = store.clone();
                    handles.push(tokio::spawn(async move {
                        store.insert(card_draft(customer, 1)).await.unwrap().id
                    }));
                }

                let ids: HashSet<_> = futures::future::join_all(handles)
                    .await
                    .into_iter()
                    .map(|r| r.unwrap())
                    .collect();
                assert_eq!(ids.len(), 20);
                assert_eq!(store.list().await.unwrap().len(), 20);
            }

            #[tokio::test]
            async fn test_concurrent_toggles() {
                let store = $factory;
                let created = store.insert(card_draft(1, 10)).await.unwrap();

                let mut handles = Vec::new();
                for _ in 0..10 {
                    let store = store.clone();
                    let id = created.id;
                    handles.push(tokio::spawn(async move {
                        store
                            .modify(
                                &id,
                                Box::new(|record: &mut PaymentRecord| {
                                    record.available = !record.available;
                                    Ok(())
                                }),
                            )
                            .await
                            .unwrap()
                    }));
                }
                for handle in handles {
                    handle.await.unwrap();
                }

                // An even number of flips lands back where it started
                let fetched = store.get(&created.id).await.unwrap().unwrap();
                assert!(fetched.available);
            }
        }
    };
}
