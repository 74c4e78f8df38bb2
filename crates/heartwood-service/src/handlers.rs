//! HTTP handlers for the checkout surface.
//!
//! The create-intent body is taken as raw JSON and picked apart leniently:
//! shape problems in required fields become structured validation issues,
//! and everything else follows the codec's default-on-malformed policy.

use crate::error::{Issue, ServiceError};
use crate::processor::{IntentRequest, ProcessorError};
use crate::state::AppState;
use axum::{extract::State, http::HeaderMap, Json};
use heartwood_codec::coerce_items;
use heartwood_notify::DispatchOutcome;
use heartwood_order::{build_order_summary, DraftOrder, NotifiedFlags};
use heartwood_pricing::{Destination, PromoCode, ShippingMethod};
use heartwood_types::{CaptureMethod, CartItem, Cents};
use serde::Serialize;
use serde_json::{json, Value};
use std::collections::BTreeMap;

/// Create-payment-intent response body.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IntentCreatedResponse {
    pub id: String,
    pub client_secret: String,
    pub amount: Cents,
    pub currency: String,
    pub subtotal: Cents,
    pub shipping: Cents,
    pub tax: Cents,
    pub discount: Cents,
    pub shipping_method: String,
    pub promo_code: Option<String>,
    pub contact: Value,
    pub shipping_address: Value,
    pub billing_address: Value,
    pub notes: Option<String>,
    pub order_total: Cents,
    pub capture: CaptureMethod,
    pub warnings: Vec<String>,
}

/// Liveness probe.
pub async fn health_check() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

fn object_or_null(raw: Option<&Value>) -> Value {
    match raw {
        Some(value) if value.is_object() => value.clone(),
        _ => Value::Null,
    }
}

fn opt_string(body: &Value, key: &str) -> Option<String> {
    body.get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn nested_string(raw: &Value, key: &str) -> Option<String> {
    raw.get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn validate(body: &Value, items: &[CartItem]) -> Vec<Issue> {
    let mut issues = Vec::new();

    if !body.is_object() {
        issues.push(Issue::new("body", "request body must be a JSON object"));
        return issues;
    }

    match body.get("items") {
        None | Some(Value::Null) => issues.push(Issue::new("items", "items are required")),
        Some(_) if items.is_empty() => {
            issues.push(Issue::new("items", "at least one valid cart line is required"));
        }
        Some(_) => {}
    }

    match body.get("capture") {
        None | Some(Value::Null) => {}
        Some(Value::String(s)) if s == "auto" || s == "manual" => {}
        Some(_) => issues.push(Issue::new("capture", "capture must be \"auto\" or \"manual\"")),
    }

    match body.get("customerEmail") {
        None | Some(Value::Null) => {}
        Some(Value::String(s)) if s.contains('@') => {}
        Some(_) => issues.push(Issue::new("customerEmail", "not a valid email address")),
    }

    issues
}

fn idempotency_key(headers: &HeaderMap, body: &Value) -> Option<String> {
    headers
        .get("x-idempotency-key")
        .and_then(|value| value.to_str().ok())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .or_else(|| opt_string(body, "idempotencyKey"))
}

/// Best-effort tail of the checkout flow: persist the draft order, then
/// reconstruct its summary and dispatch notifications. Every failure here
/// is logged and swallowed; the payer already has their client secret.
pub async fn persist_and_notify(state: AppState, draft: DraftOrder) -> Option<DispatchOutcome> {
    let record = match state.orders.create_draft_order(draft).await {
        Ok(record) => record,
        Err(err) => {
            tracing::warn!(%err, "failed to persist draft order; payment continues");
            return None;
        }
    };

    let summary = build_order_summary(&record);
    let outcome = state.notifier.notify_all(&summary).await;

    if outcome.merchant_sent || outcome.customer_sent {
        let flags = NotifiedFlags {
            merchant: outcome.merchant_sent,
            customer: outcome.customer_sent,
        };
        if let Err(err) = state.orders.mark_order_notified(&record.id, flags).await {
            tracing::warn!(order_id = %record.id, %err, "failed to stamp notification times");
        }
    }
    Some(outcome)
}

/// POST /api/payment-intents
pub async fn create_payment_intent(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Result<Json<IntentCreatedResponse>, ServiceError> {
    let items = coerce_items(body.get("items").unwrap_or(&Value::Null));
    let issues = validate(&body, &items);
    if !issues.is_empty() {
        return Err(ServiceError::Validation(issues));
    }

    if !state.processor.is_configured() {
        return Err(ServiceError::Configuration(
            "payment processor secret is not configured".to_string(),
        ));
    }

    let shipping_raw = body.get("shippingAddress").unwrap_or(&Value::Null);
    let destination = Destination {
        country: nested_string(shipping_raw, "country"),
        state: nested_string(shipping_raw, "state"),
        postal_code: nested_string(shipping_raw, "postalCode"),
    };
    let method = opt_string(&body, "shippingMethod")
        .as_deref()
        .map(ShippingMethod::parse_lenient)
        .unwrap_or_default();
    let promo_code_raw = opt_string(&body, "promoCode");
    let promo = promo_code_raw.as_deref().and_then(PromoCode::parse);

    let mut quote = state.engine.quote_order(&items, &destination, method, promo);
    if promo_code_raw.is_some() && promo.is_none() {
        quote.warnings.push("unrecognized promo code ignored".to_string());
    }

    let capture = opt_string(&body, "capture")
        .as_deref()
        .map(CaptureMethod::parse_lenient)
        .unwrap_or_default();
    let notes = opt_string(&body, "notes");
    let customer_email = opt_string(&body, "customerEmail");

    let mut metadata = BTreeMap::new();
    metadata.insert("subtotal".to_string(), quote.subtotal.to_string());
    metadata.insert("shipping".to_string(), quote.shipping.to_string());
    metadata.insert("tax".to_string(), quote.tax.to_string());
    metadata.insert("discount".to_string(), quote.discount.to_string());
    metadata.insert("item_count".to_string(), items.len().to_string());

    let intent = state
        .processor
        .create_intent(&IntentRequest {
            amount: quote.grand_total,
            currency: quote.currency.clone(),
            capture_method: capture,
            metadata,
            customer: None,
            setup_future_usage: None,
            idempotency_key: idempotency_key(&headers, &body),
        })
        .await
        .map_err(|err| match err {
            ProcessorError::NotConfigured => ServiceError::Configuration(
                "payment processor secret is not configured".to_string(),
            ),
            ProcessorError::Rejected { status, message } => {
                ServiceError::Upstream { status, message }
            }
            ProcessorError::Transport(message) => ServiceError::Upstream {
                status: 502,
                message,
            },
        })?;

    let contact = {
        let mut contact = object_or_null(body.get("contact"));
        match (&customer_email, contact.as_object_mut()) {
            (Some(email), Some(map)) => {
                map.entry("email".to_string())
                    .or_insert_with(|| Value::String(email.clone()));
            }
            (Some(email), None) => contact = json!({ "email": email }),
            _ => {}
        }
        contact
    };
    let shipping_address = object_or_null(body.get("shippingAddress"));
    let billing_same = body
        .get("billingSameAsShipping")
        .and_then(Value::as_bool)
        .unwrap_or(false);
    let billing_address = if billing_same {
        shipping_address.clone()
    } else {
        object_or_null(body.get("billingAddress"))
    };

    let draft = DraftOrder {
        payment_intent_id: intent.id.clone(),
        amount_cents: quote.grand_total,
        currency: quote.currency.clone(),
        capture_method: capture,
        items: serde_json::to_value(&items).unwrap_or(Value::Null),
        metadata: json!({
            "contact": contact,
            "shippingAddress": shipping_address,
            "billingAddress": billing_address,
            "notes": notes,
            "shippingMethod": method.as_str(),
            "promoCode": quote.promo_code,
        }),
    };
    // Fire and forget: the payer must not wait on persistence or email.
    tokio::spawn(persist_and_notify(state.clone(), draft));

    Ok(Json(IntentCreatedResponse {
        id: intent.id,
        client_secret: intent.client_secret,
        amount: quote.grand_total,
        currency: quote.currency.clone(),
        subtotal: quote.subtotal,
        shipping: quote.shipping,
        tax: quote.tax,
        discount: quote.discount,
        shipping_method: method.as_str().to_string(),
        promo_code: quote.promo_code.map(str::to_string),
        contact,
        shipping_address,
        billing_address,
        notes,
        order_total: quote.grand_total,
        capture,
        warnings: quote.warnings,
    }))
}
