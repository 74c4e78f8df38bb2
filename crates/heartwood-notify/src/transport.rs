use async_trait::async_trait;
use thiserror::Error;

/// Transport-level failures. Kept opaque; the dispatcher only logs them.
#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("transport error: {0}")]
    Transport(String),
}

/// One outbound email.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EmailMessage {
    pub to: String,
    pub subject: String,
    pub text: String,
    pub html: Option<String>,
}

/// One outbound SMS.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SmsMessage {
    pub to: String,
    pub body: String,
}

/// Email delivery collaborator.
#[async_trait]
pub trait EmailTransport: Send + Sync {
    async fn send_email(&self, message: &EmailMessage) -> Result<(), NotifyError>;
}

/// SMS delivery collaborator.
#[async_trait]
pub trait SmsTransport: Send + Sync {
    async fn send_sms(&self, message: &SmsMessage) -> Result<(), NotifyError>;
}
