//! Best-effort notification dispatch.

use crate::render::{render_customer_email, render_merchant_email, render_merchant_sms};
use crate::transport::{EmailTransport, SmsTransport};
use heartwood_types::OrderSummary;
use std::sync::Arc;

/// Where merchant notifications go. Customer email comes from the order
/// contact.
#[derive(Clone, Debug, Default)]
pub struct NotifierSettings {
    pub merchant_email: Option<String>,
    pub merchant_phone: Option<String>,
}

/// What actually went out, so the caller can stamp the order record.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DispatchOutcome {
    pub merchant_sent: bool,
    pub customer_sent: bool,
}

/// Notification dispatcher.
///
/// Transports are optional; a `None` transport or missing destination is a
/// logged skip. Send failures are logged and swallowed — notification can
/// never fail an order.
#[derive(Clone, Default)]
pub struct Notifier {
    email: Option<Arc<dyn EmailTransport>>,
    sms: Option<Arc<dyn SmsTransport>>,
    settings: NotifierSettings,
}

impl Notifier {
    pub fn new(settings: NotifierSettings) -> Self {
        Self {
            email: None,
            sms: None,
            settings,
        }
    }

    pub fn with_email(mut self, transport: Arc<dyn EmailTransport>) -> Self {
        self.email = Some(transport);
        self
    }

    pub fn with_sms(mut self, transport: Arc<dyn SmsTransport>) -> Self {
        self.sms = Some(transport);
        self
    }

    /// Merchant notifications: email plus SMS, each independently optional.
    pub async fn notify_merchant(&self, summary: &OrderSummary) -> bool {
        let mut sent = false;

        match (&self.email, &self.settings.merchant_email) {
            (Some(transport), Some(to)) => {
                let message = render_merchant_email(summary, to);
                match transport.send_email(&message).await {
                    Ok(()) => sent = true,
                    Err(err) => {
                        tracing::warn!(order_id = %summary.order_id, %err, "merchant email failed");
                    }
                }
            }
            _ => {
                tracing::info!(order_id = %summary.order_id, "merchant email not configured, skipping");
            }
        }

        match (&self.sms, &self.settings.merchant_phone) {
            (Some(transport), Some(to)) => {
                let message = render_merchant_sms(summary, to);
                match transport.send_sms(&message).await {
                    Ok(()) => sent = true,
                    Err(err) => {
                        tracing::warn!(order_id = %summary.order_id, %err, "merchant sms failed");
                    }
                }
            }
            _ => {
                tracing::info!(order_id = %summary.order_id, "merchant sms not configured, skipping");
            }
        }

        sent
    }

    /// Customer confirmation email, addressed from the order contact.
    pub async fn notify_customer(&self, summary: &OrderSummary) -> bool {
        let Some(transport) = &self.email else {
            tracing::info!(order_id = %summary.order_id, "email transport not configured, skipping");
            return false;
        };
        if summary.contact_email.is_empty() {
            tracing::info!(order_id = %summary.order_id, "no customer email on order, skipping");
            return false;
        }

        let message = render_customer_email(summary, &summary.contact_email);
        match transport.send_email(&message).await {
            Ok(()) => true,
            Err(err) => {
                tracing::warn!(order_id = %summary.order_id, %err, "customer email failed");
                false
            }
        }
    }

    /// Both audiences; returns what was actually delivered.
    pub async fn notify_all(&self, summary: &OrderSummary) -> DispatchOutcome {
        DispatchOutcome {
            merchant_sent: self.notify_merchant(summary).await,
            customer_sent: self.notify_customer(summary).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::{EmailMessage, NotifyError, SmsMessage};
    use async_trait::async_trait;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingEmail {
        sent: Mutex<Vec<EmailMessage>>,
        fail: bool,
    }

    #[async_trait]
    impl EmailTransport for RecordingEmail {
        async fn send_email(&self, message: &EmailMessage) -> Result<(), NotifyError> {
            if self.fail {
                return Err(NotifyError::Transport("smtp unreachable".to_string()));
            }
            self.sent.lock().unwrap().push(message.clone());
            Ok(())
        }
    }

    #[derive(Default)]
    struct RecordingSms {
        sent: Mutex<Vec<SmsMessage>>,
    }

    #[async_trait]
    impl SmsTransport for RecordingSms {
        async fn send_sms(&self, message: &SmsMessage) -> Result<(), NotifyError> {
            self.sent.lock().unwrap().push(message.clone());
            Ok(())
        }
    }

    fn summary_with_email() -> OrderSummary {
        OrderSummary {
            order_id: "ord_test".to_string(),
            contact_email: "sam@example.com".to_string(),
            ..OrderSummary::default()
        }
    }

    #[tokio::test]
    async fn test_unconfigured_transports_skip() {
        let notifier = Notifier::new(NotifierSettings::default());
        let outcome = notifier.notify_all(&summary_with_email()).await;
        assert!(!outcome.merchant_sent);
        assert!(!outcome.customer_sent);
    }

    #[tokio::test]
    async fn test_merchant_email_and_sms() {
        let email = Arc::new(RecordingEmail::default());
        let sms = Arc::new(RecordingSms::default());
        let notifier = Notifier::new(NotifierSettings {
            merchant_email: Some("orders@example.com".to_string()),
            merchant_phone: Some("+15550100".to_string()),
        })
        .with_email(email.clone())
        .with_sms(sms.clone());

        assert!(notifier.notify_merchant(&summary_with_email()).await);
        assert_eq!(email.sent.lock().unwrap().len(), 1);
        assert_eq!(sms.sent.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_customer_requires_contact_email() {
        let email = Arc::new(RecordingEmail::default());
        let notifier = Notifier::new(NotifierSettings::default()).with_email(email.clone());

        assert!(!notifier.notify_customer(&OrderSummary::default()).await);
        assert!(notifier.notify_customer(&summary_with_email()).await);
        let sent = email.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].to, "sam@example.com");
    }

    #[tokio::test]
    async fn test_send_failure_is_swallowed() {
        let email = Arc::new(RecordingEmail {
            fail: true,
            ..RecordingEmail::default()
        });
        let notifier = Notifier::new(NotifierSettings {
            merchant_email: Some("orders@example.com".to_string()),
            merchant_phone: None,
        })
        .with_email(email);

        // Failure is reported as "nothing sent", never as an error.
        assert!(!notifier.notify_merchant(&summary_with_email()).await);
    }
}
