//! Reconstruction of a readable order summary from a persisted record.
//!
//! The record may have been written by an older schema version, or the
//! metadata may simply be malformed. Every field here degrades to an empty
//! default rather than failing; this path feeds outbound notifications and
//! must never abort on bad data.

use heartwood_codec::coerce_items;
use heartwood_types::{Cents, OrderRecord, OrderSummary, SummaryItem};
use serde_json::Value;

/// Currencies whose minor unit is the whole unit (no decimal places).
const ZERO_DECIMAL: &[&str] = &["jpy", "krw", "vnd"];

/// Render integer minor units as a human-readable money string.
///
/// Known symbols are prefixed (`$160.00`); anything else renders as
/// `160.00 XYZ`.
pub fn format_money(amount: Cents, currency: &str) -> String {
    let code = currency.trim().to_ascii_lowercase();
    let body = if ZERO_DECIMAL.contains(&code.as_str()) {
        format!("{}", amount.0)
    } else {
        format!("{}.{:02}", amount.0 / 100, amount.0 % 100)
    };
    match code.as_str() {
        "usd" => format!("${body}"),
        "eur" => format!("€{body}"),
        "gbp" => format!("£{body}"),
        _ => format!("{body} {}", code.to_ascii_uppercase()),
    }
}

fn str_field(raw: &Value, key: &str) -> String {
    raw.get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

/// Flatten an address object into printable lines, skipping absent parts.
///
/// Anything that is not an object (including the string `"oops"` an old
/// client once stored) yields no lines.
pub fn address_lines(raw: &Value) -> Vec<String> {
    if !raw.is_object() {
        return Vec::new();
    }
    let mut lines = Vec::new();

    let street = str_field(raw, "street");
    if !street.is_empty() {
        lines.push(street);
    }
    let unit = str_field(raw, "unit");
    if !unit.is_empty() {
        lines.push(unit);
    }

    let city = str_field(raw, "city");
    let state = str_field(raw, "state");
    let postal = str_field(raw, "postalCode");
    let locality = [city, state, postal]
        .into_iter()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(", ");
    if !locality.is_empty() {
        lines.push(locality);
    }

    let country = str_field(raw, "country");
    if !country.is_empty() {
        lines.push(country);
    }
    lines
}

/// Rebuild the readable summary for one persisted order.
///
/// Produced fresh on every call; never persisted.
pub fn build_order_summary(order: &OrderRecord) -> OrderSummary {
    let items = coerce_items(&order.items)
        .into_iter()
        .map(|item| SummaryItem {
            unit_price_formatted: format_money(item.unit_price, &order.currency),
            line_total_formatted: format_money(item.line_total(), &order.currency),
            name: item.name,
            quantity: item.quantity,
            config: item.config,
        })
        .collect();

    let meta = &order.metadata;
    let contact = meta.get("contact").cloned().unwrap_or(Value::Null);

    OrderSummary {
        order_id: order.id.to_string(),
        payment_intent_id: order.payment_intent_id.clone(),
        amount_formatted: format_money(order.amount_cents, &order.currency),
        currency: order.currency.clone(),
        capture_method: order.capture_method,
        items,
        contact_name: str_field(&contact, "name"),
        contact_email: str_field(&contact, "email"),
        contact_phone: str_field(&contact, "phone"),
        shipping_address_lines: address_lines(meta.get("shippingAddress").unwrap_or(&Value::Null)),
        billing_address_lines: address_lines(meta.get("billingAddress").unwrap_or(&Value::Null)),
        shipping_method: str_field(meta, "shippingMethod"),
        promo_code: str_field(meta, "promoCode"),
        notes: str_field(meta, "notes"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use heartwood_types::{CaptureMethod, OrderId};
    use serde_json::json;

    fn record(items: Value, metadata: Value) -> OrderRecord {
        OrderRecord {
            id: OrderId::new("ord_test"),
            payment_intent_id: "pi_123".to_string(),
            amount_cents: Cents::new(16000),
            currency: "usd".to_string(),
            capture_method: CaptureMethod::Auto,
            items,
            metadata,
            created_at: Utc::now(),
            merchant_notified_at: None,
            customer_notified_at: None,
        }
    }

    #[test]
    fn test_format_money() {
        assert_eq!(format_money(Cents::new(16000), "usd"), "$160.00");
        assert_eq!(format_money(Cents::new(995), "usd"), "$9.95");
        assert_eq!(format_money(Cents::new(5), "eur"), "€0.05");
        assert_eq!(format_money(Cents::new(1200), "jpy"), "1200 JPY");
        assert_eq!(format_money(Cents::new(1234), "aud"), "12.34 AUD");
    }

    #[test]
    fn test_address_lines_skips_absent_parts() {
        let lines = address_lines(&json!({
            "street": "12 Shoreline Rd",
            "city": "Portland",
            "state": "OR",
            "postalCode": "97201",
            "country": "US",
        }));
        assert_eq!(
            lines,
            ["12 Shoreline Rd", "Portland, OR, 97201", "US"]
        );

        let lines = address_lines(&json!({"city": "Portland"}));
        assert_eq!(lines, ["Portland"]);
    }

    #[test]
    fn test_string_address_yields_no_lines() {
        // Old schema versions stored the address as a bare string.
        let order = record(json!([]), json!({"shippingAddress": "oops"}));
        let summary = build_order_summary(&order);
        assert!(summary.shipping_address_lines.is_empty());
    }

    #[test]
    fn test_summary_from_well_formed_record() {
        let order = record(
            json!([{"id": "brd-1", "name": "Custom board", "unitPrice": 16000, "quantity": 2}]),
            json!({
                "contact": {"name": "Sam Reyes", "email": "sam@example.com"},
                "shippingMethod": "expedited",
                "promoCode": "WOOD10",
                "notes": "leave at door",
            }),
        );
        let summary = build_order_summary(&order);
        assert_eq!(summary.amount_formatted, "$160.00");
        assert_eq!(summary.items.len(), 1);
        assert_eq!(summary.items[0].unit_price_formatted, "$160.00");
        assert_eq!(summary.items[0].line_total_formatted, "$320.00");
        assert_eq!(summary.contact_name, "Sam Reyes");
        assert_eq!(summary.contact_email, "sam@example.com");
        assert_eq!(summary.contact_phone, "");
        assert_eq!(summary.shipping_method, "expedited");
        assert_eq!(summary.promo_code, "WOOD10");
        assert_eq!(summary.notes, "leave at door");
    }

    #[test]
    fn test_summary_tolerates_garbage_everywhere() {
        let order = record(
            json!({"definitely": "not an array"}),
            json!(["not", "an", "object"]),
        );
        let summary = build_order_summary(&order);
        assert!(summary.items.is_empty());
        assert_eq!(summary.contact_name, "");
        assert!(summary.shipping_address_lines.is_empty());
        assert!(summary.billing_address_lines.is_empty());
    }
}
