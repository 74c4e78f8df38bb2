use thiserror::Error;

/// Result type for order storage operations.
pub type OrderStoreResult<T> = Result<T, OrderStoreError>;

/// Order-store errors.
#[derive(Debug, Error)]
pub enum OrderStoreError {
    #[error("order not found: {0}")]
    NotFound(String),

    #[error("conflict: {0}")]
    Conflict(String),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("backend error: {0}")]
    Backend(String),
}
