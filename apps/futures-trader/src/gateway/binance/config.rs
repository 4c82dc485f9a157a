//! Binance adapter configuration.

use std::time::Duration;

/// Environment for the Binance USDT-M Futures API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinanceEnvironment {
    /// Simulated trading against the exchange testnet.
    Testnet,
    /// Real trading (real money).
    Production,
}

impl BinanceEnvironment {
    /// Base URL for the futures REST API.
    #[must_use]
    pub const fn rest_base_url(&self) -> &'static str {
        match self {
            Self::Testnet => "https://testnet.binancefuture.com",
            Self::Production => "https://fapi.binance.com",
        }
    }

    /// Check whether this is the production environment.
    #[must_use]
    pub const fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

impl std::fmt::Display for BinanceEnvironment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Testnet => write!(f, "TESTNET"),
            Self::Production => write!(f, "PRODUCTION"),
        }
    }
}

/// Configuration for the Binance futures gateway.
#[derive(Debug, Clone)]
pub struct BinanceConfig {
    /// API key, sent in the `X-MBX-APIKEY` header.
    pub api_key: String,
    /// API secret used for request signing.
    pub api_secret: String,
    /// Trading environment.
    pub environment: BinanceEnvironment,
    /// HTTP request timeout; the only deadline applied to any call.
    pub timeout: Duration,
    /// Signed-request receive window in milliseconds.
    pub recv_window_ms: u64,
}

impl BinanceConfig {
    /// Create a new configuration with default timeout and receive window.
    #[must_use]
    pub fn new(api_key: String, api_secret: String, environment: BinanceEnvironment) -> Self {
        Self {
            api_key,
            api_secret,
            environment,
            timeout: Duration::from_secs(30),
            recv_window_ms: 5000,
        }
    }

    /// Set the HTTP timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Get the REST base URL for the configured environment.
    #[must_use]
    pub const fn rest_base_url(&self) -> &'static str {
        self.environment.rest_base_url()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn testnet_urls() {
        let env = BinanceEnvironment::Testnet;
        assert!(env.rest_base_url().contains("testnet"));
        assert!(!env.is_production());
    }

    #[test]
    fn production_urls() {
        let env = BinanceEnvironment::Production;
        assert!(!env.rest_base_url().contains("testnet"));
        assert!(env.is_production());
    }

    #[test]
    fn config_defaults() {
        let config = BinanceConfig::new(
            "key".to_string(),
            "secret".to_string(),
            BinanceEnvironment::Testnet,
        );
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.recv_window_ms, 5000);
        assert!(config.rest_base_url().contains("testnet"));
    }

    #[test]
    fn config_with_timeout() {
        let config = BinanceConfig::new(
            "key".to_string(),
            "secret".to_string(),
            BinanceEnvironment::Production,
        )
        .with_timeout(Duration::from_secs(5));
        assert_eq!(config.timeout, Duration::from_secs(5));
    }

    #[test]
    fn environment_display() {
        assert_eq!(format!("{}", BinanceEnvironment::Testnet), "TESTNET");
        assert_eq!(format!("{}", BinanceEnvironment::Production), "PRODUCTION");
    }
}
