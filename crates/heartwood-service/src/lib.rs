//! Heartwood checkout HTTP service.
//!
//! One money-moving endpoint: create a payment intent from a submitted
//! cart. The request body is untrusted; cart lines go through the
//! sanitizing codec, the charge amount is recomputed by the quote engine,
//! and the processor call carries the caller's idempotency key so retried
//! submissions cannot double-charge.
//!
//! Order persistence and notification dispatch are best-effort from this
//! path: their failures are logged and never block the client secret.

#![deny(unsafe_code)]
#![warn(rust_2018_idioms)]

pub mod config;
pub mod error;
pub mod handlers;
pub mod processor;
pub mod router;
pub mod state;
