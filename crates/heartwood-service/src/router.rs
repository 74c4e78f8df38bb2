//! API router configuration.

use crate::handlers;
use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Create the main API router.
pub fn create_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/health", get(handlers::health_check))
        .route("/payment-intents", post(handlers::create_payment_intent))
        .with_state(state);

    Router::new()
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processor::StripeProcessor;
    use heartwood_notify::{Notifier, NotifierSettings};
    use heartwood_order::memory::InMemoryOrderStore;
    use heartwood_pricing::{PriceTable, QuoteEngine};
    use std::sync::Arc;

    #[test]
    fn test_router_builds() {
        let state = AppState::new(
            QuoteEngine::new(PriceTable::standard(), "usd"),
            Arc::new(StripeProcessor::new(None)),
            Arc::new(InMemoryOrderStore::new()),
            Arc::new(Notifier::new(NotifierSettings::default())),
        );
        let _router = create_router(state);
    }
}
