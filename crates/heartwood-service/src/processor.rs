//! Payment processor collaborator.
//!
//! A narrow trait plus the Stripe HTTP transport. The trait keeps checkout
//! logic testable without network access; the transport is plugged in at
//! startup.

use async_trait::async_trait;
use heartwood_types::{CaptureMethod, Cents};
use serde::Deserialize;
use std::collections::BTreeMap;
use thiserror::Error;

const DEFAULT_STRIPE_ENDPOINT: &str = "https://api.stripe.com/v1/payment_intents";

/// Processor-level failures.
#[derive(Debug, Error)]
pub enum ProcessorError {
    #[error("payment processor is not configured")]
    NotConfigured,

    /// The processor rejected the request; status and message are carried
    /// verbatim for the caller.
    #[error("processor rejected request ({status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("transport error: {0}")]
    Transport(String),
}

/// Everything sent with a create-intent call.
#[derive(Clone, Debug)]
pub struct IntentRequest {
    pub amount: Cents,
    pub currency: String,
    pub capture_method: CaptureMethod,
    /// Pricing breakdown fields, stringified for the processor dashboard.
    pub metadata: BTreeMap<String, String>,
    pub customer: Option<String>,
    pub setup_future_usage: Option<String>,
    /// Caller-supplied; retried submissions with the same key do not create
    /// duplicate charges.
    pub idempotency_key: Option<String>,
}

/// The subset of the processor response checkout needs.
#[derive(Clone, Debug, Deserialize)]
pub struct IntentResponse {
    pub id: String,
    pub client_secret: String,
}

/// Payment processor seam.
#[async_trait]
pub trait PaymentProcessor: Send + Sync {
    /// Whether the required credential is present. Checked before any
    /// external call so a misconfigured deployment fails fast.
    fn is_configured(&self) -> bool;

    async fn create_intent(&self, request: &IntentRequest) -> Result<IntentResponse, ProcessorError>;
}

#[derive(Debug, Deserialize)]
struct StripeErrorBody {
    error: Option<StripeErrorDetail>,
}

#[derive(Debug, Deserialize)]
struct StripeErrorDetail {
    message: Option<String>,
}

/// Stripe payment-intents transport.
pub struct StripeProcessor {
    client: reqwest::Client,
    endpoint: String,
    secret_key: Option<String>,
}

impl StripeProcessor {
    pub fn new(secret_key: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: DEFAULT_STRIPE_ENDPOINT.to_string(),
            secret_key: secret_key.filter(|k| !k.is_empty()),
        }
    }

    /// Point at a different endpoint (test servers).
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    fn form_fields(request: &IntentRequest) -> Vec<(String, String)> {
        let mut fields = vec![
            ("amount".to_string(), request.amount.0.to_string()),
            ("currency".to_string(), request.currency.clone()),
            (
                "capture_method".to_string(),
                request.capture_method.processor_value().to_string(),
            ),
        ];
        for (key, value) in &request.metadata {
            fields.push((format!("metadata[{key}]"), value.clone()));
        }
        if let Some(customer) = &request.customer {
            fields.push(("customer".to_string(), customer.clone()));
        }
        if let Some(usage) = &request.setup_future_usage {
            fields.push(("setup_future_usage".to_string(), usage.clone()));
        }
        fields
    }
}

#[async_trait]
impl PaymentProcessor for StripeProcessor {
    fn is_configured(&self) -> bool {
        self.secret_key.is_some()
    }

    async fn create_intent(&self, request: &IntentRequest) -> Result<IntentResponse, ProcessorError> {
        let secret = self.secret_key.as_ref().ok_or(ProcessorError::NotConfigured)?;

        let mut call = self
            .client
            .post(&self.endpoint)
            .bearer_auth(secret)
            .form(&Self::form_fields(request));
        if let Some(key) = &request.idempotency_key {
            call = call.header("Idempotency-Key", key);
        }

        let response = call
            .send()
            .await
            .map_err(|e| ProcessorError::Transport(e.to_string()))?;
        let status = response.status();

        if !status.is_success() {
            let message = response
                .json::<StripeErrorBody>()
                .await
                .ok()
                .and_then(|body| body.error)
                .and_then(|detail| detail.message)
                .unwrap_or_else(|| "payment processor rejected the request".to_string());
            return Err(ProcessorError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json::<IntentResponse>()
            .await
            .map_err(|e| ProcessorError::Transport(format!("malformed processor response: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unconfigured_without_secret() {
        assert!(!StripeProcessor::new(None).is_configured());
        assert!(!StripeProcessor::new(Some(String::new())).is_configured());
        assert!(StripeProcessor::new(Some("sk_test_123".to_string())).is_configured());
    }

    #[test]
    fn test_form_fields_shape() {
        let mut metadata = BTreeMap::new();
        metadata.insert("subtotal".to_string(), "40000".to_string());
        let request = IntentRequest {
            amount: Cents::new(40000),
            currency: "usd".to_string(),
            capture_method: CaptureMethod::Manual,
            metadata,
            customer: Some("cus_9".to_string()),
            setup_future_usage: None,
            idempotency_key: None,
        };
        let fields = StripeProcessor::form_fields(&request);
        assert!(fields.contains(&("amount".to_string(), "40000".to_string())));
        assert!(fields.contains(&("capture_method".to_string(), "manual".to_string())));
        assert!(fields.contains(&("metadata[subtotal]".to_string(), "40000".to_string())));
        assert!(fields.contains(&("customer".to_string(), "cus_9".to_string())));
    }
}
