//! Application configuration management.

use serde::Deserialize;

use crate::types::Currency;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Database configuration.
    pub database: DatabaseConfig,
    /// Billing configuration.
    #[serde(default)]
    pub billing: BillingConfig,
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Database connection URL.
    pub url: String,
    /// Maximum number of connections in the pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Minimum number of connections in the pool.
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    1
}

/// Billing configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct BillingConfig {
    /// Currency invoices are rendered in.
    #[serde(default = "default_currency")]
    pub currency: Currency,
    /// Days after invoice creation before an unpaid invoice is overdue.
    #[serde(default = "default_payment_terms_days")]
    pub payment_terms_days: i64,
}

fn default_currency() -> Currency {
    Currency::Php
}

fn default_payment_terms_days() -> i64 {
    30
}

impl Default for BillingConfig {
    fn default() -> Self {
        Self {
            currency: default_currency(),
            payment_terms_days: default_payment_terms_days(),
        }
    }
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(
                config::Environment::with_prefix("STOWAGE")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_applies_defaults() {
        temp_env::with_vars(
            [
                ("STOWAGE__DATABASE__URL", Some("sqlite::memory:")),
                ("STOWAGE__BILLING__CURRENCY", None),
                ("STOWAGE__BILLING__PAYMENT_TERMS_DAYS", None),
            ],
            || {
                let config = AppConfig::load().unwrap();
                assert_eq!(config.database.url, "sqlite::memory:");
                assert_eq!(config.database.max_connections, 10);
                assert_eq!(config.database.min_connections, 1);
                assert_eq!(config.billing.currency, Currency::Php);
                assert_eq!(config.billing.payment_terms_days, 30);
            },
        );
    }

    #[test]
    fn test_load_reads_billing_overrides() {
        temp_env::with_vars(
            [
                ("STOWAGE__DATABASE__URL", Some("sqlite::memory:")),
                ("STOWAGE__BILLING__CURRENCY", Some("USD")),
                ("STOWAGE__BILLING__PAYMENT_TERMS_DAYS", Some("14")),
            ],
            || {
                let config = AppConfig::load().unwrap();
                assert_eq!(config.billing.currency, Currency::Usd);
                assert_eq!(config.billing.payment_terms_days, 14);
            },
        );
    }

    #[test]
    fn test_load_requires_database_url() {
        temp_env::with_var_unset("STOWAGE__DATABASE__URL", || {
            assert!(AppConfig::load().is_err());
        });
    }
}
