//! PostgreSQL adapter for the order store.
//!
//! The transactional source-of-truth backend. Cart lines and metadata are
//! stored as the JSONB that was actually written, so schema drift between
//! writer versions is absorbed by the reconstruction path, not the database.

use crate::traits::{DraftOrder, NotifiedFlags, OrderStore};
use crate::{OrderStoreError, OrderStoreResult};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use heartwood_types::{CaptureMethod, Cents, OrderId, OrderRecord};
use sqlx::postgres::{PgPool, PgPoolOptions};
use sqlx::Row;

/// PostgreSQL-backed order store.
#[derive(Clone)]
pub struct PostgresOrderStore {
    pool: PgPool,
}

impl PostgresOrderStore {
    /// Connect to PostgreSQL and initialize the schema.
    pub async fn connect(database_url: &str) -> OrderStoreResult<Self> {
        Self::connect_with_options(database_url, 10, 5).await
    }

    /// Connect with explicit pool parameters.
    pub async fn connect_with_options(
        database_url: &str,
        max_connections: u32,
        connect_timeout_secs: u64,
    ) -> OrderStoreResult<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(std::time::Duration::from_secs(connect_timeout_secs))
            .connect(database_url)
            .await
            .map_err(|e| OrderStoreError::Backend(format!("failed to connect postgres: {e}")))?;
        let store = Self { pool };
        store.init_schema().await?;
        Ok(store)
    }

    /// Create adapter from an existing pool.
    pub async fn from_pool(pool: PgPool) -> OrderStoreResult<Self> {
        let store = Self { pool };
        store.init_schema().await?;
        Ok(store)
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    async fn init_schema(&self) -> OrderStoreResult<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS heartwood_orders (
                id TEXT PRIMARY KEY,
                payment_intent_id TEXT NOT NULL,
                amount_cents BIGINT NOT NULL,
                currency TEXT NOT NULL,
                capture_method TEXT NOT NULL,
                items JSONB NOT NULL,
                metadata JSONB NOT NULL,
                created_at TIMESTAMPTZ NOT NULL,
                merchant_notified_at TIMESTAMPTZ,
                customer_notified_at TIMESTAMPTZ
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(|e| OrderStoreError::Backend(format!("failed to init schema: {e}")))?;
        tracing::debug!("heartwood_orders schema ensured");
        Ok(())
    }

    fn row_to_record(row: &sqlx::postgres::PgRow) -> OrderStoreResult<OrderRecord> {
        let amount: i64 = row
            .try_get("amount_cents")
            .map_err(|e| OrderStoreError::Serialization(e.to_string()))?;
        let capture: String = row
            .try_get("capture_method")
            .map_err(|e| OrderStoreError::Serialization(e.to_string()))?;
        Ok(OrderRecord {
            id: OrderId::new(
                row.try_get::<String, _>("id")
                    .map_err(|e| OrderStoreError::Serialization(e.to_string()))?,
            ),
            payment_intent_id: row
                .try_get("payment_intent_id")
                .map_err(|e| OrderStoreError::Serialization(e.to_string()))?,
            amount_cents: Cents::new(amount.max(0) as u64),
            currency: row
                .try_get("currency")
                .map_err(|e| OrderStoreError::Serialization(e.to_string()))?,
            capture_method: CaptureMethod::parse_lenient(&capture),
            items: row
                .try_get("items")
                .map_err(|e| OrderStoreError::Serialization(e.to_string()))?,
            metadata: row
                .try_get("metadata")
                .map_err(|e| OrderStoreError::Serialization(e.to_string()))?,
            created_at: row
                .try_get("created_at")
                .map_err(|e| OrderStoreError::Serialization(e.to_string()))?,
            merchant_notified_at: row
                .try_get("merchant_notified_at")
                .map_err(|e| OrderStoreError::Serialization(e.to_string()))?,
            customer_notified_at: row
                .try_get("customer_notified_at")
                .map_err(|e| OrderStoreError::Serialization(e.to_string()))?,
        })
    }
}

#[async_trait]
impl OrderStore for PostgresOrderStore {
    async fn create_draft_order(&self, draft: DraftOrder) -> OrderStoreResult<OrderRecord> {
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

        sqlx::query(
            r#"
            INSERT INTO heartwood_orders
                (id, payment_intent_id, amount_cents, currency, capture_method,
                 items, metadata, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(record.id.as_str())
        .bind(&record.payment_intent_id)
        .bind(record.amount_cents.0.min(i64::MAX as u64) as i64)
        .bind(&record.currency)
        .bind(match record.capture_method {
            CaptureMethod::Auto => "auto",
            CaptureMethod::Manual => "manual",
        })
        .bind(&record.items)
        .bind(&record.metadata)
        .bind(record.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| OrderStoreError::Backend(format!("failed to insert order: {e}")))?;

        Ok(record)
    }

    async fn get_order(&self, id: &OrderId) -> OrderStoreResult<Option<OrderRecord>> {
        let row = sqlx::query("SELECT * FROM heartwood_orders WHERE id = $1")
            .bind(id.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| OrderStoreError::Backend(format!("failed to fetch order: {e}")))?;
        row.as_ref().map(Self::row_to_record).transpose()
    }

    async fn mark_order_notified(
        &self,
        id: &OrderId,
        flags: NotifiedFlags,
    ) -> OrderStoreResult<()> {
        let now: DateTime<Utc> = Utc::now();
        let result = sqlx::query(
            r#"
            UPDATE heartwood_orders SET
                merchant_notified_at = CASE WHEN $2 THEN $4 ELSE merchant_notified_at END,
                customer_notified_at = CASE WHEN $3 THEN $4 ELSE customer_notified_at END
            WHERE id = $1
            "#,
        )
        .bind(id.as_str())
        .bind(flags.merchant)
        .bind(flags.customer)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(|e| OrderStoreError::Backend(format!("failed to update order: {e}")))?;

        if result.rows_affected() == 0 {
            return Err(OrderStoreError::NotFound(format!("order {} not found", id)));
        }
        Ok(())
    }
}
