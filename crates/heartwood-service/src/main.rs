//! Heartwood checkout service entrypoint.

use anyhow::Context;
use heartwood_notify::Notifier;
use heartwood_order::memory::InMemoryOrderStore;
use heartwood_order::OrderStore;
use heartwood_pricing::{PriceTable, QuoteEngine};
use heartwood_service::config::ServiceConfig;
use heartwood_service::processor::StripeProcessor;
use heartwood_service::router::create_router;
use heartwood_service::state::AppState;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = ServiceConfig::from_env();
    if config.stripe_secret_key.is_none() {
        tracing::warn!("STRIPE_SECRET_KEY not set; payment-intent requests will be rejected");
    }

    let orders: Arc<dyn OrderStore> = build_order_store(&config).await?;
    let state = AppState::new(
        QuoteEngine::new(PriceTable::standard(), config.currency.clone()),
        Arc::new(StripeProcessor::new(config.stripe_secret_key.clone())),
        orders,
        Arc::new(Notifier::new(config.notifier.clone())),
    );

    let listener = tokio::net::TcpListener::bind(&config.addr)
        .await
        .with_context(|| format!("failed to bind {}", config.addr))?;
    tracing::info!(addr = %config.addr, "heartwood checkout service listening");
    axum::serve(listener, create_router(state))
        .await
        .context("server error")?;
    Ok(())
}

#[cfg(feature = "postgres")]
async fn build_order_store(config: &ServiceConfig) -> anyhow::Result<Arc<dyn OrderStore>> {
    match &config.database_url {
        Some(url) => {
            let store = heartwood_order::postgres::PostgresOrderStore::connect(url)
                .await
                .context("failed to connect order store")?;
            Ok(Arc::new(store))
        }
        None => {
            tracing::warn!("DATABASE_URL not set; using in-memory order store");
            Ok(Arc::new(InMemoryOrderStore::new()))
        }
    }
}

#[cfg(not(feature = "postgres"))]
async fn build_order_store(config: &ServiceConfig) -> anyhow::Result<Arc<dyn OrderStore>> {
    if config.database_url.is_some() {
        tracing::warn!("DATABASE_URL set but postgres support is not compiled in");
    }
    Ok(Arc::new(InMemoryOrderStore::new()))
}
