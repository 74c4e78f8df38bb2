//! Shared application state.

use crate::processor::PaymentProcessor;
use heartwood_notify::Notifier;
use heartwood_order::OrderStore;
use heartwood_pricing::QuoteEngine;
use std::sync::Arc;

/// Handed to every handler by axum.
#[derive(Clone)]
pub struct AppState {
    pub engine: QuoteEngine,
    pub processor: Arc<dyn PaymentProcessor>,
    pub orders: Arc<dyn OrderStore>,
    pub notifier: Arc<Notifier>,
}

impl AppState {
    pub fn new(
        engine: QuoteEngine,
        processor: Arc<dyn PaymentProcessor>,
        orders: Arc<dyn OrderStore>,
        notifier: Arc<Notifier>,
    ) -> Self {
        Self {
            engine,
            processor,
            orders,
            notifier,
        }
    }
}
