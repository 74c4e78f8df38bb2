//! Environment-driven service configuration.

use heartwood_notify::NotifierSettings;

fn env_opt(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}

/// Everything the service reads from the environment at startup.
#[derive(Clone, Debug)]
pub struct ServiceConfig {
    /// Bind address, `HEARTWOOD_ADDR` (default `0.0.0.0:8787`).
    pub addr: String,
    /// Charge currency, `HEARTWOOD_CURRENCY` (default `usd`).
    pub currency: String,
    /// Processor secret, `STRIPE_SECRET_KEY`. Absence is surfaced as a
    /// configuration error at request time, not at startup.
    pub stripe_secret_key: Option<String>,
    /// `DATABASE_URL`, when the postgres order store is compiled in.
    pub database_url: Option<String>,
    /// Merchant notification destinations, `HEARTWOOD_MERCHANT_EMAIL` /
    /// `HEARTWOOD_MERCHANT_PHONE`.
    pub notifier: NotifierSettings,
}

impl ServiceConfig {
    pub fn from_env() -> Self {
        Self {
            addr: env_opt("HEARTWOOD_ADDR").unwrap_or_else(|| "0.0.0.0:8787".to_string()),
            currency: env_opt("HEARTWOOD_CURRENCY").unwrap_or_else(|| "usd".to_string()),
            stripe_secret_key: env_opt("STRIPE_SECRET_KEY"),
            database_url: env_opt("DATABASE_URL"),
            notifier: NotifierSettings {
                merchant_email: env_opt("HEARTWOOD_MERCHANT_EMAIL"),
                merchant_phone: env_opt("HEARTWOOD_MERCHANT_PHONE"),
            },
        }
    }
}
