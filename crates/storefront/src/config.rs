//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional.
//!
//! - `STOREFRONT_HOST` - Bind address (default: 127.0.0.1)
//! - `STOREFRONT_PORT` - Listen port (default: 3000)
//! - `STOREFRONT_CURRENCY` - ISO 4217 code for catalog and cart prices (default: EUR)
//! - `STOREFRONT_CATALOG_PATH` - Product catalog JSON file
//!   (default: crates/storefront/content/products.json)
//! - `STOREFRONT_STATIC_DIR` - Directory served under `/static`
//!   (default: crates/storefront/static)
//! - `STOREFRONT_PAGE_IDLE_SECS` - Seconds an idle page session keeps its cart (default: 1800)
//! - `STOREFRONT_MAX_PAGES` - Maximum live page sessions (default: 10000)
//! - `STOREFRONT_ADD_FEEDBACK_MS` - How long the add button shows its confirmation (default: 900)
//! - `STOREFRONT_CHECKOUT_NOTICE` - Text shown when checkout is pressed
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_SAMPLE_RATE` - Error event sample rate (default: 1.0)
//! - `SENTRY_TRACES_SAMPLE_RATE` - Performance trace sample rate (default: 0.0)

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use kiosk_core::CurrencyCode;
use thiserror::Error;

/// Checkout notice used until a payment provider is wired in.
pub const DEFAULT_CHECKOUT_NOTICE: &str =
    "Demo: Hier würdest du jetzt Payment integrieren (Stripe/Shopify).";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Currency of catalog prices and carts
    pub currency: CurrencyCode,
    /// Product catalog file
    pub catalog_path: PathBuf,
    /// Directory served under `/static`
    pub static_dir: PathBuf,
    /// Page session and cart drawer behaviour
    pub pages: PageConfig,
    /// Text shown when checkout is pressed
    pub checkout_notice: String,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name (e.g., "production")
    pub sentry_environment: Option<String>,
    /// Sentry error event sample rate
    pub sentry_sample_rate: f32,
    /// Sentry performance trace sample rate
    pub sentry_traces_sample_rate: f32,
}

/// Page session limits and timings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageConfig {
    /// An idle page session (and its cart) is dropped after this long
    pub idle_timeout: Duration,
    /// Upper bound on live page sessions
    pub max_pages: u64,
    /// How long the add button shows its confirmation before reverting
    pub add_feedback_delay: Duration,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            idle_timeout: Duration::from_secs(1800),
            max_pages: 10_000,
            add_feedback_delay: Duration::from_millis(900),
        }
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an unparseable value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an unparseable value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let vars = Vars(&lookup);
        let defaults = PageConfig::default();

        let pages = PageConfig {
            idle_timeout: vars
                .parsed::<u64>("STOREFRONT_PAGE_IDLE_SECS")?
                .map_or(defaults.idle_timeout, Duration::from_secs),
            max_pages: vars
                .parsed("STOREFRONT_MAX_PAGES")?
                .unwrap_or(defaults.max_pages),
            add_feedback_delay: vars
                .parsed::<u64>("STOREFRONT_ADD_FEEDBACK_MS")?
                .map_or(defaults.add_feedback_delay, Duration::from_millis),
        };

        Ok(Self {
            host: vars.parsed("STOREFRONT_HOST")?.unwrap_or(IpAddr::from([127, 0, 0, 1])),
            port: vars.parsed("STOREFRONT_PORT")?.unwrap_or(3000),
            currency: vars.parsed("STOREFRONT_CURRENCY")?.unwrap_or_default(),
            catalog_path: vars
                .get("STOREFRONT_CATALOG_PATH")
                .unwrap_or_else(|| "crates/storefront/content/products.json".to_string())
                .into(),
            static_dir: vars
                .get("STOREFRONT_STATIC_DIR")
                .unwrap_or_else(|| "crates/storefront/static".to_string())
                .into(),
            pages,
            checkout_notice: vars
                .get("STOREFRONT_CHECKOUT_NOTICE")
                .unwrap_or_else(|| DEFAULT_CHECKOUT_NOTICE.to_string()),
            sentry_dsn: vars.get("SENTRY_DSN"),
            sentry_environment: vars.get("SENTRY_ENVIRONMENT"),
            sentry_sample_rate: vars.parsed("SENTRY_SAMPLE_RATE")?.unwrap_or(1.0),
            sentry_traces_sample_rate: vars.parsed("SENTRY_TRACES_SAMPLE_RATE")?.unwrap_or(0.0),
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::from([127, 0, 0, 1]),
            port: 3000,
            currency: CurrencyCode::default(),
            catalog_path: "crates/storefront/content/products.json".into(),
            static_dir: "crates/storefront/static".into(),
            pages: PageConfig::default(),
            checkout_notice: DEFAULT_CHECKOUT_NOTICE.to_string(),
            sentry_dsn: None,
            sentry_environment: None,
            sentry_sample_rate: 1.0,
            sentry_traces_sample_rate: 0.0,
        }
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Variable source with empty values treated as unset.
struct Vars<'a, F: Fn(&str) -> Option<String>>(&'a F);

impl<F: Fn(&str) -> Option<String>> Vars<'_, F> {
    /// Get an optional variable.
    fn get(&self, key: &str) -> Option<String> {
        (self.0)(key).filter(|value| !value.trim().is_empty())
    }

    /// Get an optional variable parsed into `T`.
    fn parsed<T>(&self, key: &str) -> Result<Option<T>, ConfigError>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        self.get(key)
            .map(|value| {
                value
                    .trim()
                    .parse::<T>()
                    .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
            })
            .transpose()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn load(pairs: &[(&str, &str)]) -> Result<StorefrontConfig, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        StorefrontConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[]).unwrap();
        assert_eq!(config.socket_addr().to_string(), "127.0.0.1:3000");
        assert_eq!(config.currency, CurrencyCode::EUR);
        assert_eq!(config.pages, PageConfig::default());
        assert_eq!(config.checkout_notice, DEFAULT_CHECKOUT_NOTICE);
        assert!(config.sentry_dsn.is_none());
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("STOREFRONT_HOST", "0.0.0.0"),
            ("STOREFRONT_PORT", "8080"),
            ("STOREFRONT_CURRENCY", "usd"),
            ("STOREFRONT_PAGE_IDLE_SECS", "60"),
            ("STOREFRONT_MAX_PAGES", "5"),
            ("STOREFRONT_ADD_FEEDBACK_MS", "250"),
            ("STOREFRONT_CHECKOUT_NOTICE", "Bald verfügbar"),
            ("SENTRY_DSN", "https://key@sentry.example/1"),
        ])
        .unwrap();

        assert_eq!(config.socket_addr().to_string(), "0.0.0.0:8080");
        assert_eq!(config.currency, CurrencyCode::USD);
        assert_eq!(config.pages.idle_timeout, Duration::from_secs(60));
        assert_eq!(config.pages.max_pages, 5);
        assert_eq!(config.pages.add_feedback_delay, Duration::from_millis(250));
        assert_eq!(config.checkout_notice, "Bald verfügbar");
        assert!(config.sentry_dsn.is_some());
    }

    #[test]
    fn test_empty_value_uses_default() {
        let config = load(&[("STOREFRONT_PORT", "  ")]).unwrap();
        assert_eq!(config.port, 3000);
    }

    #[test]
    fn test_invalid_port() {
        let err = load(&[("STOREFRONT_PORT", "not-a-port")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(ref key, _) if key == "STOREFRONT_PORT"));
    }

    #[test]
    fn test_invalid_currency() {
        let err = load(&[("STOREFRONT_CURRENCY", "DOGE")]).unwrap_err();
        assert!(err.to_string().contains("STOREFRONT_CURRENCY"));
    }

    #[test]
    fn test_default_matches_empty_environment() {
        let loaded = load(&[]).unwrap();
        let default = StorefrontConfig::default();
        assert_eq!(loaded.socket_addr(), default.socket_addr());
        assert_eq!(loaded.catalog_path, default.catalog_path);
        assert_eq!(loaded.static_dir, default.static_dir);
        assert_eq!(loaded.pages, default.pages);
    }
}
