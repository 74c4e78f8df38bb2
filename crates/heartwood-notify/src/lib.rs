//! Outbound order notifications.
//!
//! Transports are narrow async traits; a missing transport means "not
//! configured" and is a logged skip, never an error. Renderers consume the
//! reconstructed [`heartwood_types::OrderSummary`] only — this crate knows
//! nothing about how the summary was stored.
//!
//! Dispatch is best-effort by design: a failed send is logged and dropped,
//! never retried, and never propagates to the payment path.

#![deny(unsafe_code)]
#![warn(rust_2018_idioms)]

mod dispatch;
mod render;
mod transport;

pub use dispatch::{DispatchOutcome, Notifier, NotifierSettings};
pub use render::{render_customer_email, render_merchant_email, render_merchant_sms};
pub use transport::{EmailMessage, EmailTransport, NotifyError, SmsMessage, SmsTransport};
