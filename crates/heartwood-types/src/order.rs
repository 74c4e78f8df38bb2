//! Persisted order records and the derived, read-only summary view.

use crate::cart::CartConfig;
use crate::money::Cents;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use uuid::Uuid;

/// Unique identifier for a draft order.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OrderId(String);

impl OrderId {
    pub fn generate() -> Self {
        Self(format!("ord_{}", Uuid::new_v4().simple()))
    }

    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Whether the processor captures immediately or authorizes for later capture.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CaptureMethod {
    #[default]
    Auto,
    Manual,
}

impl CaptureMethod {
    /// Lenient parse; anything unrecognized falls back to `Auto`.
    pub fn parse_lenient(value: &str) -> Self {
        match value {
            "manual" => CaptureMethod::Manual,
            _ => CaptureMethod::Auto,
        }
    }

    /// Wire value expected by the payment processor.
    pub const fn processor_value(self) -> &'static str {
        match self {
            CaptureMethod::Auto => "automatic",
            CaptureMethod::Manual => "manual",
        }
    }
}

/// The draft order persisted at payment-intent creation.
///
/// Immutable once written, except for the two notification timestamps.
/// `items` and `metadata` are stored as the JSON that was actually written;
/// older schema versions may have written different shapes, so readers go
/// through the drift-tolerant reconstruction path rather than typed decode.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct OrderRecord {
    pub id: OrderId,
    pub payment_intent_id: String,
    pub amount_cents: Cents,
    pub currency: String,
    pub capture_method: CaptureMethod,
    pub items: Value,
    pub metadata: Value,
    pub created_at: DateTime<Utc>,
    pub merchant_notified_at: Option<DateTime<Utc>>,
    pub customer_notified_at: Option<DateTime<Utc>>,
}

/// One reconstructed item line inside an [`OrderSummary`].
#[derive(Clone, Debug, Serialize)]
pub struct SummaryItem {
    pub name: String,
    pub quantity: u32,
    pub unit_price_formatted: String,
    pub line_total_formatted: String,
    /// Parsed board configuration, when the stored item carried one.
    pub config: Option<CartConfig>,
}

/// Human-readable order view, rebuilt fresh from an [`OrderRecord`] every
/// time it is needed. Never persisted.
#[derive(Clone, Debug, Default, Serialize)]
pub struct OrderSummary {
    pub order_id: String,
    pub payment_intent_id: String,
    pub amount_formatted: String,
    pub currency: String,
    pub capture_method: CaptureMethod,
    pub items: Vec<SummaryItem>,
    pub contact_name: String,
    pub contact_email: String,
    pub contact_phone: String,
    pub shipping_address_lines: Vec<String>,
    pub billing_address_lines: Vec<String>,
    pub shipping_method: String,
    pub promo_code: String,
    pub notes: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_id_prefix() {
        let id = OrderId::generate();
        assert!(id.as_str().starts_with("ord_"));
    }

    #[test]
    fn test_capture_method_lenient() {
        assert_eq!(CaptureMethod::parse_lenient("manual"), CaptureMethod::Manual);
        assert_eq!(CaptureMethod::parse_lenient("auto"), CaptureMethod::Auto);
        assert_eq!(CaptureMethod::parse_lenient("???"), CaptureMethod::Auto);
        assert_eq!(CaptureMethod::Auto.processor_value(), "automatic");
    }
}
