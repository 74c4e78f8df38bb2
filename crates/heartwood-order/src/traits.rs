use crate::OrderStoreResult;
use async_trait::async_trait;
use heartwood_types::{CaptureMethod, Cents, OrderId, OrderRecord};
use serde_json::Value;

/// The fields written at payment-intent creation. Everything else on the
/// record (id, timestamps) is assigned by the store.
#[derive(Clone, Debug)]
pub struct DraftOrder {
    pub payment_intent_id: String,
    pub amount_cents: Cents,
    pub currency: String,
    pub capture_method: CaptureMethod,
    /// Cart lines as they were sanitized at write time.
    pub items: Value,
    /// Contact, addresses, shipping method, promo code, notes.
    pub metadata: Value,
}

/// Which notification timestamps to stamp.
#[derive(Clone, Copy, Debug, Default)]
pub struct NotifiedFlags {
    pub merchant: bool,
    pub customer: bool,
}

impl NotifiedFlags {
    pub fn merchant() -> Self {
        Self {
            merchant: true,
            customer: false,
        }
    }

    pub fn customer() -> Self {
        Self {
            merchant: false,
            customer: true,
        }
    }
}

/// Storage interface for draft orders.
///
/// Records are immutable once written except for the notification
/// timestamps; there is no update or delete.
#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Persist a new draft order and return the stored record.
    async fn create_draft_order(&self, draft: DraftOrder) -> OrderStoreResult<OrderRecord>;

    /// Fetch one order by id.
    async fn get_order(&self, id: &OrderId) -> OrderStoreResult<Option<OrderRecord>>;

    /// Stamp the requested notification timestamps with the current time.
    async fn mark_order_notified(
        &self,
        id: &OrderId,
        flags: NotifiedFlags,
    ) -> OrderStoreResult<()>;
}
