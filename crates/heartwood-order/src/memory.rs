//! In-memory reference implementation of the order store.
//!
//! Deterministic and test-friendly. Production deployments should use the
//! Postgres adapter as the source of truth.

use crate::traits::{DraftOrder, NotifiedFlags, OrderStore};
use crate::{OrderStoreError, OrderStoreResult};
use async_trait::async_trait;
use chrono::Utc;
use heartwood_types::{OrderId, OrderRecord};
use std::collections::HashMap;
use std::sync::RwLock;

/// In-memory order store.
#[derive(Default)]
pub struct InMemoryOrderStore {
    orders: RwLock<HashMap<OrderId, OrderRecord>>,
}

impl InMemoryOrderStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.orders.read().map(|g| g.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl OrderStore for InMemoryOrderStore {
    async fn create_draft_order(&self, draft: DraftOrder) -> OrderStoreResult<OrderRecord> {
        let mut guard = self
            .orders
            .write()
            .map_err(|_| OrderStoreError::Backend("orders lock poisoned".to_string()))?;

        let record = OrderRecord {
            id: OrderId::generate(),
            payment_intent_id: draft.payment_intent_id,
            amount_cents: draft.amount_cents,
            currency: draft.currency,
            capture_method: draft.capture_method,
            items: draft.items,
            metadata: draft.metadata,
            created_at: Utc::now(),
            merchant_notified_at: None,
            customer_notified_at: None,
        };
        guard.insert(record.id.clone(), record.clone());
        Ok(record)
    }

    async fn get_order(&self, id: &OrderId) -> OrderStoreResult<Option<OrderRecord>> {
        let guard = self
            .orders
            .read()
            .map_err(|_| OrderStoreError::Backend("orders lock poisoned".to_string()))?;
        Ok(guard.get(id).cloned())
    }

    async fn mark_order_notified(
        &self,
        id: &OrderId,
        flags: NotifiedFlags,
    ) -> OrderStoreResult<()> {
        let mut guard = self
            .orders
            .write()
            .map_err(|_| OrderStoreError::Backend("orders lock poisoned".to_string()))?;
        let record = guard
            .get_mut(id)
            .ok_or_else(|| OrderStoreError::NotFound(format!("order {} not found", id)))?;

        let now = Utc::now();
        if flags.merchant {
            record.merchant_notified_at = Some(now);
        }
        if flags.customer {
            record.customer_notified_at = Some(now);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use heartwood_types::{CaptureMethod, Cents};
    use serde_json::json;

    fn draft() -> DraftOrder {
        DraftOrder {
            payment_intent_id: "pi_123".to_string(),
            amount_cents: Cents::new(16000),
            currency: "usd".to_string(),
            capture_method: CaptureMethod::Auto,
            items: json!([]),
            metadata: json!({}),
        }
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let store = InMemoryOrderStore::new();
        let record = store.create_draft_order(draft()).await.unwrap();
        assert_eq!(record.amount_cents, Cents::new(16000));

        let fetched = store.get_order(&record.id).await.unwrap().unwrap();
        assert_eq!(fetched.payment_intent_id, "pi_123");
        assert!(fetched.merchant_notified_at.is_none());
    }

    #[tokio::test]
    async fn test_mark_notified() {
        let store = InMemoryOrderStore::new();
        let record = store.create_draft_order(draft()).await.unwrap();

        store
            .mark_order_notified(&record.id, NotifiedFlags::merchant())
            .await
            .unwrap();
        let fetched = store.get_order(&record.id).await.unwrap().unwrap();
        assert!(fetched.merchant_notified_at.is_some());
        assert!(fetched.customer_notified_at.is_none());

        store
            .mark_order_notified(&record.id, NotifiedFlags::customer())
            .await
            .unwrap();
        let fetched = store.get_order(&record.id).await.unwrap().unwrap();
        assert!(fetched.customer_notified_at.is_some());
    }

    #[tokio::test]
    async fn test_mark_notified_missing_order() {
        let store = InMemoryOrderStore::new();
        let result = store
            .mark_order_notified(&OrderId::new("ord_missing"), NotifiedFlags::merchant())
            .await;
        assert!(matches!(result, Err(OrderStoreError::NotFound(_))));
    }
}
